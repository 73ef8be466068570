//! Keeps camera aspect and surface size in step with the container

use photoplane_core::{RenderBackend, SurfaceSize};

use crate::events::{EventKind, EventScope, ListenerId, SessionId};
use crate::host::ViewerHost;
use crate::scene::SceneGraph;

#[derive(Debug)]
pub struct ResizeAdapter {
    listener: Option<ListenerId>,
    current: SurfaceSize,
}

impl ResizeAdapter {
    pub fn new(initial: SurfaceSize) -> Self {
        Self {
            listener: None,
            current: initial,
        }
    }

    pub fn attach<H: ViewerHost>(&mut self, host: &mut H, owner: SessionId) {
        if self.listener.is_none() {
            self.listener = Some(host.add_listener(owner, EventScope::Window, EventKind::Resize));
        }
    }

    pub fn detach<H: ViewerHost>(&mut self, host: &mut H) -> bool {
        match self.listener.take() {
            Some(id) => host.remove_listener(id),
            None => false,
        }
    }

    pub fn current_size(&self) -> SurfaceSize {
        self.current
    }

    /// Apply a new container size to the camera and, if present, the surface.
    ///
    /// Zero-area sizes and the size already applied are ignored.
    pub fn apply<B: RenderBackend>(
        &mut self,
        size: SurfaceSize,
        scene: &mut SceneGraph<B>,
        backend: &mut B,
        surface: Option<&mut B::Surface>,
    ) -> bool {
        if size.is_empty() || size == self.current {
            return false;
        }
        scene.update_aspect(size.width, size.height);
        if let Some(surface) = surface {
            backend.resize_surface(surface, size);
        }
        log::debug!("Resized to {}x{}", size.width, size.height);
        self.current = size;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{BackendEvent, HeadlessBackend};
    use crate::host::HostRegistry;
    use approx::assert_relative_eq;
    use photoplane_core::{CameraSettings, ZoomRange};

    #[test]
    fn test_resize_updates_aspect_and_surface() {
        let mut backend = HeadlessBackend::new();
        let mut surface = backend.create_surface(SurfaceSize::new(800, 600)).unwrap();
        let mut scene = SceneGraph::new(&CameraSettings::default(), ZoomRange::default(), SurfaceSize::new(800, 600));
        let mut adapter = ResizeAdapter::new(SurfaceSize::new(800, 600));

        let size = SurfaceSize::new(1280, 720);
        assert!(adapter.apply(size, &mut scene, &mut backend, Some(&mut surface)));
        assert_relative_eq!(scene.state().camera.aspect, 1280.0 / 720.0);
        assert_eq!(backend.surface_size(&surface), size);

        let resizes_before = backend.events().len();
        assert!(!adapter.apply(size, &mut scene, &mut backend, Some(&mut surface)));
        assert_eq!(backend.events().len(), resizes_before);
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut backend = HeadlessBackend::new();
        let mut scene = SceneGraph::new(&CameraSettings::default(), ZoomRange::default(), SurfaceSize::new(400, 200));
        let mut adapter = ResizeAdapter::new(SurfaceSize::new(400, 200));

        assert!(!adapter.apply(SurfaceSize::new(0, 0), &mut scene, &mut backend, None));
        assert_relative_eq!(scene.state().camera.aspect, 2.0);
        assert_eq!(adapter.current_size(), SurfaceSize::new(400, 200));
    }

    #[test]
    fn test_resize_without_surface_or_mesh() {
        let mut backend = HeadlessBackend::new();
        let mut scene = SceneGraph::new(&CameraSettings::default(), ZoomRange::default(), SurfaceSize::new(100, 100));
        let mut adapter = ResizeAdapter::new(SurfaceSize::new(100, 100));

        assert!(adapter.apply(SurfaceSize::new(300, 100), &mut scene, &mut backend, None));
        assert_relative_eq!(scene.state().camera.aspect, 3.0);
        assert!(!backend.events().iter().any(|e| matches!(e, BackendEvent::ResizeSurface { .. })));
    }

    #[test]
    fn test_listener_lifecycle() {
        let mut host = HostRegistry::with_size(100, 100);
        let owner = SessionId::next();
        let mut adapter = ResizeAdapter::new(SurfaceSize::new(100, 100));

        adapter.attach(&mut host, owner);
        assert_eq!(host.listeners().subscribers(EventScope::Window, EventKind::Resize), vec![owner]);
        assert!(adapter.detach(&mut host));
        assert!(!adapter.detach(&mut host));
        assert!(host.listeners().is_empty());
    }
}
