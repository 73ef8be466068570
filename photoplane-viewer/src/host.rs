//! The environment a viewer session lives in: its container, listeners and frame clock

use photoplane_core::SurfaceSize;

use crate::events::{EventKind, EventScope, ListenerId, ListenerRegistry, SessionId};

/// Handle of a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Services a session needs from whatever hosts it.
///
/// The window runner implements this on top of winit. [`HostRegistry`]
/// implements it in memory.
pub trait ViewerHost {
    /// Size of the container, or `None` if there is nothing to draw into
    fn container_size(&self) -> Option<SurfaceSize>;

    fn add_listener(&mut self, owner: SessionId, scope: EventScope, kind: EventKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId) -> bool;

    /// Ask for one frame callback on the next paint
    fn request_frame(&mut self) -> FrameId;

    /// Cancel a requested frame. Returns false if it already ran or was cancelled.
    fn cancel_frame(&mut self, id: FrameId) -> bool;
}

/// Frame requests waiting for the next paint
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Vec<FrameId>,
    next_id: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending.push(id);
        id
    }

    pub fn cancel(&mut self, id: FrameId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|f| *f != id);
        self.pending.len() != before
    }

    /// Take every frame due at this paint. Requests made while handling
    /// them wait for the next one.
    pub fn take_due(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self, id: FrameId) -> bool {
        self.pending.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// In-memory host: a container size plus listener and frame bookkeeping
#[derive(Debug, Default)]
pub struct HostRegistry {
    container: Option<SurfaceSize>,
    listeners: ListenerRegistry,
    frames: FrameQueue,
}

impl HostRegistry {
    pub fn new(container: Option<SurfaceSize>) -> Self {
        Self {
            container,
            listeners: ListenerRegistry::new(),
            frames: FrameQueue::new(),
        }
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self::new(Some(SurfaceSize::new(width, height)))
    }

    pub fn set_container_size(&mut self, size: Option<SurfaceSize>) {
        self.container = size;
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

    pub fn take_due_frames(&mut self) -> Vec<FrameId> {
        self.frames.take_due()
    }
}

impl ViewerHost for HostRegistry {
    fn container_size(&self) -> Option<SurfaceSize> {
        self.container
    }

    fn add_listener(&mut self, owner: SessionId, scope: EventScope, kind: EventKind) -> ListenerId {
        self.listeners.add(owner, scope, kind)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn request_frame(&mut self) -> FrameId {
        self.frames.request()
    }

    fn cancel_frame(&mut self, id: FrameId) -> bool {
        self.frames.cancel(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_queue_request_and_cancel() {
        let mut frames = FrameQueue::new();
        let a = frames.request();
        let b = frames.request();
        assert_ne!(a, b);
        assert_eq!(frames.len(), 2);

        assert!(frames.cancel(a));
        assert!(!frames.cancel(a));
        assert!(frames.is_pending(b));
        assert!(!frames.is_pending(a));
    }

    #[test]
    fn test_take_due_drains_queue() {
        let mut frames = FrameQueue::new();
        let a = frames.request();
        assert_eq!(frames.take_due(), vec![a]);
        assert!(frames.is_empty());
        assert!(!frames.cancel(a));
    }

    #[test]
    fn test_host_registry_container_size() {
        let mut host = HostRegistry::with_size(800, 600);
        assert_eq!(host.container_size(), Some(SurfaceSize::new(800, 600)));
        host.set_container_size(None);
        assert_eq!(host.container_size(), None);
    }
}
