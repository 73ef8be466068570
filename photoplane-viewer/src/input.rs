//! Pointer drag rotation and wheel zoom

use photoplane_core::{InputState, PointerPosition, RenderBackend, ViewerSettings};

use crate::events::{EventKind, EventScope, ListenerId, SessionId};
use crate::host::ViewerHost;
use crate::scene::SceneGraph;

/// Listeners the controller registers, with the scope each is attached to.
/// Presses and wheel belong to the container. Moves and releases are
/// tracked on the whole window so a drag survives leaving the container.
pub const INPUT_LISTENERS: [(EventScope, EventKind); 5] = [
    (EventScope::Container, EventKind::PointerDown),
    (EventScope::Window, EventKind::PointerMove),
    (EventScope::Window, EventKind::PointerUp),
    (EventScope::Window, EventKind::PointerLeave),
    (EventScope::Container, EventKind::Wheel),
];

#[derive(Debug)]
pub struct InputController {
    drag_sensitivity: f32,
    zoom_sensitivity: f32,
    listeners: Vec<ListenerId>,
}

impl InputController {
    pub fn new(settings: &ViewerSettings) -> Self {
        Self {
            drag_sensitivity: settings.drag_sensitivity,
            zoom_sensitivity: settings.zoom_sensitivity,
            listeners: Vec::new(),
        }
    }

    pub fn attach<H: ViewerHost>(&mut self, host: &mut H, owner: SessionId) {
        if !self.listeners.is_empty() {
            return;
        }
        for (scope, kind) in INPUT_LISTENERS {
            self.listeners.push(host.add_listener(owner, scope, kind));
        }
    }

    /// Remove every registered listener. Returns how many the host removed.
    pub fn detach<H: ViewerHost>(&mut self, host: &mut H) -> usize {
        self.listeners
            .drain(..)
            .filter(|id| host.remove_listener(*id))
            .count()
    }

    /// Start dragging. Ignored until an image is attached.
    pub fn pointer_down<B: RenderBackend>(
        &self,
        input: &mut InputState,
        scene: &SceneGraph<B>,
        pos: PointerPosition,
    ) -> bool {
        if !scene.has_mesh() {
            return false;
        }
        input.begin_drag(pos);
        true
    }

    /// Rotate by the pointer delta: horizontal motion turns around Y,
    /// vertical motion around X.
    pub fn pointer_move<B: RenderBackend>(
        &self,
        input: &mut InputState,
        scene: &mut SceneGraph<B>,
        pos: PointerPosition,
    ) -> bool {
        if !scene.has_mesh() {
            return false;
        }
        match input.drag_to(pos) {
            Some((dx, dy)) => {
                scene.rotate_by(dy * self.drag_sensitivity, dx * self.drag_sensitivity);
                true
            }
            None => false,
        }
    }

    /// Pointer released or left the window
    pub fn pointer_up(&self, input: &mut InputState) {
        input.reset();
    }

    /// Positive deltas zoom out. Returns the new camera distance.
    pub fn wheel<B: RenderBackend>(&self, scene: &mut SceneGraph<B>, delta_y: f32) -> f32 {
        scene.zoom_by(delta_y * self.zoom_sensitivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessBackend;
    use crate::host::HostRegistry;
    use crate::scene::ImagePlane;
    use approx::assert_relative_eq;
    use photoplane_core::{
        CameraSettings, GeometrySpec, ImageData, MaterialDesc, PlaneMesh, SurfaceSize, ZoomRange,
    };

    fn loaded_scene(backend: &mut HeadlessBackend) -> SceneGraph<HeadlessBackend> {
        let mut scene = SceneGraph::new(&CameraSettings::default(), ZoomRange::default(), SurfaceSize::new(800, 600));
        let spec = GeometrySpec::from_aspect_ratio(1.0);
        let texture = backend.create_texture(&ImageData::solid(1, 1, [255; 4])).unwrap();
        let geometry = backend.create_geometry(&PlaneMesh::from_spec(&spec)).unwrap();
        let material = backend.create_material(&texture, &MaterialDesc::default()).unwrap();
        scene.attach_plane(ImagePlane { geometry, material, texture, spec });
        scene
    }

    #[test]
    fn test_drag_accumulates_rotation() {
        let mut backend = HeadlessBackend::new();
        let mut scene = loaded_scene(&mut backend);
        let mut input = InputState::default();
        let controller = InputController::new(&ViewerSettings::default());

        assert!(controller.pointer_down(&mut input, &scene, PointerPosition::ORIGIN));
        assert!(controller.pointer_move(&mut input, &mut scene, PointerPosition::new(10.0, 0.0)));
        assert!(controller.pointer_move(&mut input, &mut scene, PointerPosition::new(5.0, 5.0)));

        assert_relative_eq!(scene.rotation().y, 0.05, epsilon = 1e-6);
        assert_relative_eq!(scene.rotation().x, 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut backend = HeadlessBackend::new();
        let mut scene = loaded_scene(&mut backend);
        let mut input = InputState::default();
        let controller = InputController::new(&ViewerSettings::default());

        assert!(!controller.pointer_move(&mut input, &mut scene, PointerPosition::new(50.0, 50.0)));
        assert_eq!(scene.rotation().x, 0.0);
        assert_eq!(scene.rotation().y, 0.0);
    }

    #[test]
    fn test_pointer_up_resets_drag() {
        let mut backend = HeadlessBackend::new();
        let scene = loaded_scene(&mut backend);
        let mut input = InputState::default();
        let controller = InputController::new(&ViewerSettings::default());

        controller.pointer_down(&mut input, &scene, PointerPosition::new(3.0, 4.0));
        controller.pointer_up(&mut input);
        assert!(!input.is_dragging);
        assert_eq!(input.last_pointer, PointerPosition::ORIGIN);
    }

    #[test]
    fn test_drag_needs_a_mesh() {
        let scene: SceneGraph<HeadlessBackend> =
            SceneGraph::new(&CameraSettings::default(), ZoomRange::default(), SurfaceSize::new(10, 10));
        let mut input = InputState::default();
        let controller = InputController::new(&ViewerSettings::default());
        assert!(!controller.pointer_down(&mut input, &scene, PointerPosition::new(1.0, 1.0)));
        assert!(!input.is_dragging);
    }

    #[test]
    fn test_wheel_zoom_is_clamped() {
        let mut scene: SceneGraph<HeadlessBackend> =
            SceneGraph::new(&CameraSettings::default(), ZoomRange::default(), SurfaceSize::new(10, 10));
        let controller = InputController::new(&ViewerSettings::default());

        assert_relative_eq!(controller.wheel(&mut scene, 100.0), 1.6, epsilon = 1e-6);
        assert_relative_eq!(controller.wheel(&mut scene, 100_000.0), 3.0);
        assert_relative_eq!(controller.wheel(&mut scene, -100_000.0), 0.5);
    }

    #[test]
    fn test_attach_and_detach_listeners() {
        let mut host = HostRegistry::with_size(10, 10);
        let owner = SessionId::next();
        let mut controller = InputController::new(&ViewerSettings::default());

        controller.attach(&mut host, owner);
        controller.attach(&mut host, owner);
        assert_eq!(host.listeners().count_for(owner), INPUT_LISTENERS.len());
        assert!(host
            .listeners()
            .subscribers(EventScope::Window, EventKind::PointerMove)
            .contains(&owner));

        assert_eq!(controller.detach(&mut host), INPUT_LISTENERS.len());
        assert_eq!(controller.detach(&mut host), 0);
        assert!(host.listeners().is_empty());
    }
}
