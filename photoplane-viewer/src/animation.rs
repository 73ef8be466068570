//! The per-session frame loop and idle motion

use photoplane_core::{IdleMotion, InputState, RenderBackend};

use crate::host::{FrameId, ViewerHost};
use crate::scene::SceneGraph;

/// Keeps at most one frame request outstanding for its session
#[derive(Debug)]
pub struct AnimationScheduler {
    idle: IdleMotion,
    pending: Option<FrameId>,
    frames: u64,
}

impl AnimationScheduler {
    pub fn new(idle: IdleMotion) -> Self {
        Self {
            idle,
            pending: None,
            frames: 0,
        }
    }

    /// Request the first frame. Does nothing if the loop is already running.
    pub fn start<H: ViewerHost>(&mut self, host: &mut H) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(host.request_frame());
        true
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending
    }

    pub fn frames_run(&self) -> u64 {
        self.frames
    }

    /// Claim `frame` if it is the one we are waiting for
    pub fn accept(&mut self, frame: FrameId) -> bool {
        if self.pending != Some(frame) {
            return false;
        }
        self.pending = None;
        self.frames += 1;
        true
    }

    /// Apply idle motion for time `t_ms` unless the user is dragging
    pub fn tick<B: RenderBackend>(&self, input: &InputState, scene: &mut SceneGraph<B>, t_ms: f64) {
        if input.is_dragging {
            return;
        }
        let rotation = self.idle.rotation_at(t_ms);
        scene.set_mesh_rotation(rotation.x, rotation.y);
    }

    pub fn schedule_next<H: ViewerHost>(&mut self, host: &mut H) {
        if self.pending.is_none() {
            self.pending = Some(host.request_frame());
        }
    }

    /// Cancel the outstanding request, if any
    pub fn cancel<H: ViewerHost>(&mut self, host: &mut H) -> bool {
        match self.pending.take() {
            Some(id) => host.cancel_frame(id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessBackend;
    use crate::host::HostRegistry;
    use approx::assert_relative_eq;
    use photoplane_core::{CameraSettings, PointerPosition, SurfaceSize, ZoomRange};

    fn scene() -> SceneGraph<HeadlessBackend> {
        SceneGraph::new(&CameraSettings::default(), ZoomRange::default(), SurfaceSize::new(10, 10))
    }

    #[test]
    fn test_single_outstanding_frame() {
        let mut host = HostRegistry::with_size(10, 10);
        let mut scheduler = AnimationScheduler::new(IdleMotion::default());

        assert!(scheduler.start(&mut host));
        assert!(!scheduler.start(&mut host));
        assert_eq!(host.frames().len(), 1);

        let frame = host.take_due_frames()[0];
        assert!(scheduler.accept(frame));
        assert!(!scheduler.accept(frame));
        scheduler.schedule_next(&mut host);
        scheduler.schedule_next(&mut host);
        assert_eq!(host.frames().len(), 1);
        assert_eq!(scheduler.frames_run(), 1);
    }

    #[test]
    fn test_cancel_clears_host_queue() {
        let mut host = HostRegistry::with_size(10, 10);
        let mut scheduler = AnimationScheduler::new(IdleMotion::default());
        scheduler.start(&mut host);

        assert!(scheduler.cancel(&mut host));
        assert!(!scheduler.cancel(&mut host));
        assert!(host.frames().is_empty());
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_idle_rotation_overrides() {
        let scheduler = AnimationScheduler::new(IdleMotion::default());
        let mut scene = scene();
        scene.set_mesh_rotation(1.0, 1.0);

        let t = 1000.0_f64;
        scheduler.tick(&InputState::default(), &mut scene, t);
        assert_relative_eq!(scene.rotation().y, ((t * 0.0005).sin() * 0.1) as f32, epsilon = 1e-7);
        assert_relative_eq!(scene.rotation().x, ((t * 0.0003).sin() * 0.05) as f32, epsilon = 1e-7);
    }

    #[test]
    fn test_idle_rotation_is_paused_while_dragging() {
        let scheduler = AnimationScheduler::new(IdleMotion::default());
        let mut scene = scene();
        scene.set_mesh_rotation(0.3, 0.4);

        let mut input = InputState::default();
        input.begin_drag(PointerPosition::new(1.0, 1.0));
        scheduler.tick(&input, &mut scene, 5000.0);
        assert_relative_eq!(scene.rotation().x, 0.3);
        assert_relative_eq!(scene.rotation().y, 0.4);
    }
}
