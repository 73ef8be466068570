//! Listener bookkeeping for host input and resize signals

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one viewer session, used to tag the listeners it owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventScope {
    /// The element the viewer draws into
    Container,
    /// The whole host window, so drags keep tracking outside the container
    Window,
}

/// Host signals the viewer subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerLeave,
    Wheel,
    Resize,
}

/// Handle returned when a listener is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Listener {
    id: ListenerId,
    owner: SessionId,
    scope: EventScope,
    kind: EventKind,
}

/// Registered listeners of every session sharing a host
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, owner: SessionId, scope: EventScope, kind: EventKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener { id, owner, scope, kind });
        log::debug!("{} listening for {:?} on {:?} ({:?})", owner, kind, scope, id);
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Sessions subscribed to `kind` on `scope`, in registration order
    pub fn subscribers(&self, scope: EventScope, kind: EventKind) -> Vec<SessionId> {
        let mut owners: Vec<SessionId> = Vec::new();
        for l in self.listeners.iter().filter(|l| l.scope == scope && l.kind == kind) {
            if !owners.contains(&l.owner) {
                owners.push(l.owner);
            }
        }
        owners
    }

    pub fn count_for(&self, owner: SessionId) -> usize {
        self.listeners.iter().filter(|l| l.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
