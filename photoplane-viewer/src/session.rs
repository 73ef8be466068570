//! One viewer instance: a container, an image and the resources in between
//!
//! A session is built once per (container, image) pair. It creates the
//! render surface and camera immediately, asks a [`TextureSource`] for the
//! image, and once the image arrives attaches the plane and starts the frame
//! loop. [`ViewerSession::dispose`] tears everything down in reverse.

use photoplane_core::{
    Error, GeometrySpec, ImageData, InputState, MaterialDesc, PlaneMesh, PointerPosition, RenderBackend,
    Result, SceneState, SurfaceSize, ViewerConfig, ViewerSettings,
};

use crate::animation::AnimationScheduler;
use crate::events::SessionId;
use crate::host::{FrameId, ViewerHost};
use crate::input::InputController;
use crate::loader::{LoadCompletion, LoadTicket, TextureSource};
use crate::resize::ResizeAdapter;
use crate::scene::{ImagePlane, SceneGraph};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Initializing,
    Loading,
    Ready,
    Failed(String),
    Disposed,
}

/// What happened to a load completion
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The image is attached and the frame loop is running
    Applied,
    /// The load or the GPU upload failed. The session is now `Failed`.
    Failed(String),
    /// The completion did not belong to the current request and was dropped
    Discarded,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Initializing,
    Loading { ticket: LoadTicket },
    Ready,
    Failed { reason: String },
    Disposed,
}

pub struct ViewerSession<B: RenderBackend> {
    id: SessionId,
    config: ViewerConfig,
    settings: ViewerSettings,
    backend: B,
    surface: Option<B::Surface>,
    scene: SceneGraph<B>,
    input: InputState,
    controller: InputController,
    resize: ResizeAdapter,
    scheduler: AnimationScheduler,
    phase: Phase,
}

impl<B: RenderBackend> ViewerSession<B> {
    /// Create the surface and camera for `config.container` and attach the
    /// input and resize listeners. Fails if the host has no container.
    pub fn new<H: ViewerHost>(config: ViewerConfig, settings: ViewerSettings, host: &mut H, mut backend: B) -> Result<Self> {
        settings.validate()?;
        let size = host.container_size().ok_or_else(|| {
            Error::ContainerUnavailable(format!("container {:?} has no size", config.container))
        })?;

        let surface = backend.create_surface(SurfaceSize::new(size.width.max(1), size.height.max(1)))?;
        let scene = SceneGraph::new(&settings.camera, settings.zoom_range, size);

        let id = SessionId::next();
        let mut controller = InputController::new(&settings);
        controller.attach(host, id);
        let mut resize = ResizeAdapter::new(size);
        resize.attach(host, id);

        log::info!(
            "Created {} for {} ({}x{})",
            id,
            config.image_ref,
            size.width,
            size.height
        );

        Ok(Self {
            id,
            scheduler: AnimationScheduler::new(settings.idle),
            config,
            settings,
            backend,
            surface: Some(surface),
            scene,
            input: InputState::default(),
            controller,
            resize,
            phase: Phase::Initializing,
        })
    }

    /// Create a session and immediately request its image
    pub fn start<H: ViewerHost, S: TextureSource + ?Sized>(
        config: ViewerConfig,
        settings: ViewerSettings,
        host: &mut H,
        backend: B,
        source: &S,
    ) -> Result<Self> {
        let mut session = Self::new(config, settings, host, backend)?;
        session.begin_load(source);
        Ok(session)
    }

    /// Request the image. Only the first call on a fresh session does anything.
    pub fn begin_load<S: TextureSource + ?Sized>(&mut self, source: &S) -> Option<LoadTicket> {
        if self.phase != Phase::Initializing {
            return None;
        }
        let ticket = LoadTicket::next();
        self.phase = Phase::Loading { ticket };
        source.request(ticket, &self.config.image_ref);
        Some(ticket)
    }

    /// Apply a finished load, if it is the one this session is waiting for
    pub fn complete_load<H: ViewerHost>(&mut self, host: &mut H, completion: LoadCompletion) -> LoadOutcome {
        match self.phase {
            Phase::Loading { ticket } if ticket == completion.ticket => {}
            _ => {
                log::debug!(
                    "{} discarding stale load of {} ({:?})",
                    self.id,
                    completion.image_ref,
                    completion.ticket
                );
                return LoadOutcome::Discarded;
            }
        }

        let attached = completion.result.and_then(|image| self.attach_image(&image));
        match attached {
            Ok(spec) => {
                self.phase = Phase::Ready;
                self.scheduler.start(host);
                log::info!(
                    "{} ready: {} as {:.3}x{:.3} plane",
                    self.id,
                    self.config.image_ref,
                    spec.width,
                    spec.height
                );
                LoadOutcome::Applied
            }
            Err(e) => {
                let reason = e.to_string();
                log::warn!("{} failed to load {}: {}", self.id, self.config.image_ref, reason);
                self.phase = Phase::Failed { reason: reason.clone() };
                LoadOutcome::Failed(reason)
            }
        }
    }

    /// Upload the image and attach the plane, or release whatever was
    /// created if any step fails.
    fn attach_image(&mut self, image: &ImageData) -> Result<GeometrySpec> {
        let spec = GeometrySpec::from_image_size(image.width, image.height)?;
        let mesh = PlaneMesh::from_spec(&spec);

        let texture = self.backend.create_texture(image)?;
        let geometry = match self.backend.create_geometry(&mesh) {
            Ok(geometry) => geometry,
            Err(e) => {
                self.backend.release_texture(texture);
                return Err(e);
            }
        };
        let material = match self.backend.create_material(&texture, &MaterialDesc::default()) {
            Ok(material) => material,
            Err(e) => {
                self.backend.release_geometry(geometry);
                self.backend.release_texture(texture);
                return Err(e);
            }
        };

        if let Some(previous) = self.scene.attach_plane(ImagePlane { geometry, material, texture, spec }) {
            previous.release(&mut self.backend);
        }
        Ok(spec)
    }

    pub fn on_pointer_down(&mut self, pos: PointerPosition) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.controller.pointer_down(&mut self.input, &self.scene, pos)
    }

    pub fn on_pointer_move(&mut self, pos: PointerPosition) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.controller.pointer_move(&mut self.input, &mut self.scene, pos)
    }

    pub fn on_pointer_up(&mut self) {
        if !self.is_disposed() {
            self.controller.pointer_up(&mut self.input);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
    }

    /// Zoom by a wheel delta in pixels. Returns the camera distance.
    pub fn on_wheel(&mut self, delta_y: f32) -> Option<f32> {
        if self.is_disposed() {
            return None;
        }
        Some(self.controller.wheel(&mut self.scene, delta_y))
    }

    pub fn on_resize(&mut self, size: SurfaceSize) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.resize
            .apply(size, &mut self.scene, &mut self.backend, self.surface.as_mut())
    }

    /// Run one animation frame at `t_ms`. Frames that are not this
    /// session's pending frame, or arrive outside `Ready`, do nothing.
    pub fn on_frame<H: ViewerHost>(&mut self, host: &mut H, frame: FrameId, t_ms: f64) -> bool {
        if self.phase != Phase::Ready || !self.scheduler.accept(frame) {
            return false;
        }
        self.scheduler.tick(&self.input, &mut self.scene, t_ms);

        if let Some(surface) = self.surface.as_mut() {
            let params = self.scene.frame_params(self.settings.background_color);
            if let Err(e) = self.backend.render(surface, &params, self.scene.drawable()) {
                log::warn!("{} render failed: {}", self.id, e);
            }
        }

        self.scheduler.schedule_next(host);
        true
    }

    /// Present a clear-only frame while no image is drawable, so the window
    /// has content during loading and after a failed load. Does nothing once
    /// the session is `Ready` (the frame loop renders then) or disposed.
    pub fn present_idle(&mut self) -> bool {
        if matches!(self.phase, Phase::Ready | Phase::Disposed) {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let params = self.scene.frame_params(self.settings.background_color);
        match self.backend.render(surface, &params, None) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{} clear failed: {}", self.id, e);
                false
            }
        }
    }

    /// Clear rotation and zoom back to their initial values
    pub fn reset_view(&mut self) {
        if !self.is_disposed() {
            self.input.reset();
            self.scene.reset_view();
        }
    }

    /// Stop the frame loop, remove listeners and release every resource.
    /// Calling it again does nothing and returns false.
    pub fn dispose<H: ViewerHost>(&mut self, host: &mut H) -> bool {
        if self.is_disposed() {
            return false;
        }

        self.scheduler.cancel(host);
        let removed = self.controller.detach(host) + usize::from(self.resize.detach(host));
        self.release_resources();
        self.input.reset();
        self.phase = Phase::Disposed;

        log::info!(
            "Disposed {} after {} frames ({} listeners removed)",
            self.id,
            self.scheduler.frames_run(),
            removed
        );
        true
    }

    fn release_resources(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.backend.release_surface(surface);
        }
        if let Some(plane) = self.scene.detach_plane() {
            plane.release(&mut self.backend);
        }
    }

    pub fn state(&self) -> SessionState {
        match &self.phase {
            Phase::Initializing => SessionState::Initializing,
            Phase::Loading { .. } => SessionState::Loading,
            Phase::Ready => SessionState::Ready,
            Phase::Failed { reason } => SessionState::Failed(reason.clone()),
            Phase::Disposed => SessionState::Disposed,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    /// Ticket of the request in flight, if any
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        match self.phase {
            Phase::Loading { ticket } => Some(ticket),
            _ => None,
        }
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.scheduler.pending_frame()
    }

    pub fn scene_state(&self) -> SceneState {
        self.scene.state()
    }

    pub fn input_state(&self) -> InputState {
        self.input
    }

    pub fn scene(&self) -> &SceneGraph<B> {
        &self.scene
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> Option<&B::Surface> {
        self.surface.as_ref()
    }
}

impl<B: RenderBackend> Drop for ViewerSession<B> {
    fn drop(&mut self) {
        if self.is_disposed() {
            return;
        }
        log::warn!("{} dropped without dispose; its host listeners stay registered", self.id);
        self.release_resources();
        self.phase = Phase::Disposed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{live_resources, BackendEvent, FailurePlan, HeadlessBackend};
    use crate::host::HostRegistry;
    use approx::assert_relative_eq;
    use photoplane_core::ContainerId;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSource {
        requests: RefCell<Vec<(LoadTicket, String)>>,
    }

    impl TextureSource for RecordingSource {
        fn request(&self, ticket: LoadTicket, image_ref: &str) {
            self.requests.borrow_mut().push((ticket, image_ref.to_string()));
        }
    }

    fn config() -> ViewerConfig {
        ViewerConfig::new("photo.png", ContainerId(1))
    }

    fn session(host: &mut HostRegistry, backend: HeadlessBackend) -> ViewerSession<HeadlessBackend> {
        ViewerSession::new(config(), ViewerSettings::default(), host, backend).unwrap()
    }

    fn loaded(host: &mut HostRegistry, width: u32, height: u32) -> ViewerSession<HeadlessBackend> {
        let mut session = session(host, HeadlessBackend::new());
        let source = RecordingSource::default();
        let ticket = session.begin_load(&source).unwrap();
        let outcome = session.complete_load(
            host,
            LoadCompletion {
                ticket,
                image_ref: "photo.png".to_string(),
                result: Ok(ImageData::solid(width, height, [200, 100, 50, 255])),
            },
        );
        assert_eq!(outcome, LoadOutcome::Applied);
        session
    }

    #[test]
    fn test_construction_attaches_listeners_and_surface() {
        let mut host = HostRegistry::with_size(800, 600);
        let session = session(&mut host, HeadlessBackend::new());

        assert_eq!(session.state(), SessionState::Initializing);
        assert_eq!(host.listeners().count_for(session.id()), 6);
        assert!(session.surface().is_some());
        assert!(host.frames().is_empty());
        assert_relative_eq!(session.scene_state().camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn test_missing_container_is_an_error() {
        let mut host = HostRegistry::new(None);
        let result = ViewerSession::new(config(), ViewerSettings::default(), &mut host, HeadlessBackend::new());
        assert!(matches!(result, Err(Error::ContainerUnavailable(_))));
        assert!(host.listeners().is_empty());
    }

    #[test]
    fn test_begin_load_requests_once() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = session(&mut host, HeadlessBackend::new());
        let source = RecordingSource::default();

        let ticket = session.begin_load(&source).unwrap();
        assert_eq!(session.begin_load(&source), None);
        assert_eq!(session.state(), SessionState::Loading);
        assert_eq!(session.pending_ticket(), Some(ticket));
        assert_eq!(*source.requests.borrow(), vec![(ticket, "photo.png".to_string())]);
    }

    #[test]
    fn test_load_attaches_sized_plane_and_starts_loop() {
        let mut host = HostRegistry::with_size(100, 100);
        let session = loaded(&mut host, 1920, 960);

        assert_eq!(session.state(), SessionState::Ready);
        assert!(session.scene_state().has_mesh);
        let spec = session.scene().plane().unwrap().spec;
        assert_relative_eq!(spec.width, 1.0);
        assert_relative_eq!(spec.height, 0.5);
        assert_eq!(host.frames().len(), 1);
        assert!(session.backend().events().iter().any(|e| matches!(
            e,
            BackendEvent::CreateMaterial { side: photoplane_core::Side::Double, .. }
        )));
    }

    #[test]
    fn test_load_failure_moves_to_failed() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = session(&mut host, HeadlessBackend::new());
        let ticket = session.begin_load(&RecordingSource::default()).unwrap();

        let outcome = session.complete_load(
            &mut host,
            LoadCompletion {
                ticket,
                image_ref: "photo.png".to_string(),
                result: Err(Error::ImageLoad("404".to_string())),
            },
        );
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert!(matches!(session.state(), SessionState::Failed(reason) if reason.contains("404")));
        assert!(!session.scene_state().has_mesh);
        assert!(host.frames().is_empty());
    }

    #[test]
    fn test_gpu_failure_releases_partial_resources() {
        let mut host = HostRegistry::with_size(100, 100);
        let backend = HeadlessBackend::with_failures(FailurePlan {
            material: true,
            ..FailurePlan::default()
        });
        let log = backend.log();
        let mut session = session(&mut host, backend);
        let ticket = session.begin_load(&RecordingSource::default()).unwrap();

        let outcome = session.complete_load(
            &mut host,
            LoadCompletion {
                ticket,
                image_ref: "photo.png".to_string(),
                result: Ok(ImageData::solid(2, 2, [0; 4])),
            },
        );
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert!(!session.scene_state().has_mesh);
        // only the surface is still alive
        assert_eq!(live_resources(&log.borrow()), 1);
    }

    #[test]
    fn test_mismatched_ticket_is_discarded() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = session(&mut host, HeadlessBackend::new());
        session.begin_load(&RecordingSource::default());

        let outcome = session.complete_load(
            &mut host,
            LoadCompletion {
                ticket: LoadTicket::next(),
                image_ref: "other.png".to_string(),
                result: Ok(ImageData::solid(1, 1, [0; 4])),
            },
        );
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert_eq!(session.state(), SessionState::Loading);
    }

    #[test]
    fn test_stale_completion_after_dispose_changes_nothing() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = session(&mut host, HeadlessBackend::new());
        let ticket = session.begin_load(&RecordingSource::default()).unwrap();
        session.dispose(&mut host);
        let events_before = session.backend().events().len();

        let outcome = session.complete_load(
            &mut host,
            LoadCompletion {
                ticket,
                image_ref: "photo.png".to_string(),
                result: Ok(ImageData::solid(4, 4, [0; 4])),
            },
        );
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert_eq!(session.state(), SessionState::Disposed);
        assert!(!session.scene_state().has_mesh);
        assert_eq!(session.backend().events().len(), events_before);
        assert!(host.frames().is_empty());
        assert!(host.listeners().is_empty());
    }

    #[test]
    fn test_wheel_zoom_before_load_and_clamping() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = session(&mut host, HeadlessBackend::new());

        assert_relative_eq!(session.on_wheel(100_000.0).unwrap(), 3.0);
        assert_relative_eq!(session.scene_state().camera.zoom_z, 3.0);
        assert_relative_eq!(session.on_wheel(-100_000.0).unwrap(), 0.5);
    }

    #[test]
    fn test_drag_ignored_before_load() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = session(&mut host, HeadlessBackend::new());

        assert!(!session.on_pointer_down(PointerPosition::new(1.0, 1.0)));
        assert!(!session.on_pointer_move(PointerPosition::new(20.0, 20.0)));
        assert!(!session.input_state().is_dragging);
    }

    #[test]
    fn test_drag_then_leave() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = loaded(&mut host, 10, 10);

        session.on_pointer_down(PointerPosition::ORIGIN);
        session.on_pointer_move(PointerPosition::new(10.0, 0.0));
        session.on_pointer_move(PointerPosition::new(5.0, 5.0));
        assert_relative_eq!(session.scene_state().mesh.y, 0.05, epsilon = 1e-6);
        assert_relative_eq!(session.scene_state().mesh.x, 0.05, epsilon = 1e-6);

        session.on_pointer_leave();
        assert_eq!(session.input_state(), InputState::default());
    }

    #[test]
    fn test_frame_renders_and_reschedules() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = loaded(&mut host, 10, 10);

        let frame = host.take_due_frames()[0];
        assert!(session.on_frame(&mut host, frame, 2000.0));
        assert!(!session.on_frame(&mut host, frame, 2016.0));
        assert_eq!(host.frames().len(), 1);
        assert!(session
            .backend()
            .events()
            .contains(&BackendEvent::Render { surface: 1, with_mesh: true }));
        assert_relative_eq!(
            session.scene_state().mesh.y,
            ((2000.0_f64 * 0.0005).sin() * 0.1) as f32,
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_frame_before_ready_does_nothing() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = session(&mut host, HeadlessBackend::new());
        let stray = host.request_frame();

        assert!(!session.on_frame(&mut host, stray, 16.0));
        assert!(session.backend().last_frame().is_none());
    }

    #[test]
    fn test_idle_present_clears_until_ready() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = session(&mut host, HeadlessBackend::new());
        let ticket = session.begin_load(&RecordingSource::default()).unwrap();

        assert!(session.present_idle());
        assert_eq!(
            session.backend().events().last(),
            Some(&BackendEvent::Render { surface: 1, with_mesh: false })
        );
        assert!(session.backend().last_frame().is_some());
        assert!(host.frames().is_empty());

        session.complete_load(
            &mut host,
            LoadCompletion {
                ticket,
                image_ref: "photo.png".to_string(),
                result: Err(Error::ImageLoad("404".to_string())),
            },
        );
        assert!(session.present_idle());

        session.dispose(&mut host);
        let events_before = session.backend().events().len();
        assert!(!session.present_idle());
        assert_eq!(session.backend().events().len(), events_before);
    }

    #[test]
    fn test_idle_present_skipped_once_ready() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = loaded(&mut host, 10, 10);
        let events_before = session.backend().events().len();

        assert!(!session.present_idle());
        assert_eq!(session.backend().events().len(), events_before);
    }

    #[test]
    fn test_resize_tracks_container() {
        let mut host = HostRegistry::with_size(800, 600);
        let mut session = session(&mut host, HeadlessBackend::new());

        assert!(session.on_resize(SurfaceSize::new(1000, 500)));
        assert!(!session.on_resize(SurfaceSize::new(1000, 500)));
        assert!(!session.on_resize(SurfaceSize::new(0, 500)));
        assert_relative_eq!(session.scene_state().camera.aspect, 2.0);
        let surface = session.surface().unwrap();
        assert_eq!(session.backend().surface_size(surface), SurfaceSize::new(1000, 500));
    }

    #[test]
    fn test_dispose_order_and_idempotence() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = loaded(&mut host, 10, 10);

        assert!(session.dispose(&mut host));
        assert!(!session.dispose(&mut host));
        assert_eq!(session.state(), SessionState::Disposed);
        assert!(host.frames().is_empty());
        assert!(host.listeners().is_empty());

        let releases: Vec<BackendEvent> = session
            .backend()
            .events()
            .into_iter()
            .filter(|e| {
                matches!(
                    e,
                    BackendEvent::ReleaseSurface { .. }
                        | BackendEvent::ReleaseGeometry { .. }
                        | BackendEvent::ReleaseMaterial { .. }
                        | BackendEvent::ReleaseTexture { .. }
                )
            })
            .collect();
        assert_eq!(releases.len(), 4);
        assert!(matches!(releases[0], BackendEvent::ReleaseSurface { .. }));
        assert!(matches!(releases[1], BackendEvent::ReleaseGeometry { .. }));
        assert!(matches!(releases[2], BackendEvent::ReleaseMaterial { .. }));
        assert!(matches!(releases[3], BackendEvent::ReleaseTexture { .. }));
        assert_eq!(session.backend().live_resources(), 0);
    }

    #[test]
    fn test_handlers_are_inert_after_dispose() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = loaded(&mut host, 10, 10);
        let before = session.scene_state();
        session.dispose(&mut host);

        assert!(!session.on_pointer_down(PointerPosition::new(1.0, 1.0)));
        assert!(!session.on_pointer_move(PointerPosition::new(9.0, 9.0)));
        assert_eq!(session.on_wheel(500.0), None);
        assert!(!session.on_resize(SurfaceSize::new(300, 100)));
        assert_relative_eq!(session.scene_state().camera.zoom_z, before.camera.zoom_z);
        assert_relative_eq!(session.scene_state().camera.aspect, before.camera.aspect);
    }

    #[test]
    fn test_drop_without_dispose_releases_resources() {
        let mut host = HostRegistry::with_size(100, 100);
        let session = loaded(&mut host, 10, 10);
        let log = session.backend().log();
        drop(session);
        assert_eq!(live_resources(&log.borrow()), 0);
    }

    #[test]
    fn test_reset_view() {
        let mut host = HostRegistry::with_size(100, 100);
        let mut session = loaded(&mut host, 10, 10);
        session.on_wheel(400.0);
        session.on_pointer_down(PointerPosition::ORIGIN);
        session.on_pointer_move(PointerPosition::new(30.0, 0.0));

        session.reset_view();
        let state = session.scene_state();
        assert_relative_eq!(state.camera.zoom_z, 1.5);
        assert_relative_eq!(state.mesh.y, 0.0);
        assert!(!session.input_state().is_dragging);
    }
}
