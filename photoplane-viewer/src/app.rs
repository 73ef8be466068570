//! Desktop photo viewer: one session at a time in a winit window

use std::path::Path;
use std::sync::{Arc, Mutex};

use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopWindowTarget},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

use photoplane_core::{ContainerId, Error, PointerPosition, Result, SurfaceSize, ViewerConfig, ViewerSettings};
use photoplane_gpu::{GpuContext, ImagePlaneRenderer, RenderConfig};

use crate::events::{EventKind, EventScope, ListenerId, ListenerRegistry, SessionId};
use crate::host::{FrameId, HostRegistry, ViewerHost};
use crate::loader::{LoaderConfig, TextureLoader};
use crate::session::{LoadOutcome, ViewerSession};

/// Events posted to the window's event loop from other threads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// A load completion is waiting in the loader channel
    TextureLoaded,
}

/// [`ViewerHost`] backed by a winit window. The window is the container.
pub struct WindowHost {
    window: Arc<Window>,
    registry: HostRegistry,
    clock: instant::Instant,
}

impl WindowHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            registry: HostRegistry::default(),
            clock: instant::Instant::now(),
        }
    }

    /// Milliseconds since the host was created
    pub fn elapsed_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    pub fn take_due_frames(&mut self) -> Vec<FrameId> {
        self.registry.take_due_frames()
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        self.registry.listeners()
    }
}

impl ViewerHost for WindowHost {
    fn container_size(&self) -> Option<SurfaceSize> {
        let size = self.window.inner_size();
        Some(SurfaceSize::new(size.width, size.height))
    }

    fn add_listener(&mut self, owner: SessionId, scope: EventScope, kind: EventKind) -> ListenerId {
        self.registry.add_listener(owner, scope, kind)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.registry.remove_listener(id)
    }

    fn request_frame(&mut self) -> FrameId {
        let id = self.registry.request_frame();
        self.window.request_redraw();
        id
    }

    fn cancel_frame(&mut self, id: FrameId) -> bool {
        self.registry.cancel_frame(id)
    }
}

/// Convert a winit wheel delta to pixels, positive meaning scroll down
pub fn wheel_delta_pixels(delta: MouseScrollDelta, line_height: f32) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * line_height,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    }
}

/// File name of an image reference, for the window title
pub fn display_name(image_ref: &str) -> &str {
    let trimmed = image_ref.trim_end_matches('/');
    Path::new(trimmed)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(trimmed)
}

/// Interactive photo viewer window.
///
/// Shows one image at a time on a slowly swaying plane. Drag to tilt,
/// scroll to zoom, `N`/`P` (or the arrow keys) to switch image, `R` to reset
/// the view. Dropping a file on the window opens it.
pub struct PhotoViewer {
    settings: ViewerSettings,
    render_config: RenderConfig,
    loader_config: LoaderConfig,
    title: String,
    width: f64,
    height: f64,
}

impl PhotoViewer {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            settings,
            render_config: RenderConfig::default(),
            loader_config: LoaderConfig::default(),
            title: "photoplane".to_string(),
            width: 1200.0,
            height: 800.0,
        }
    }

    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.render_config = config;
        self
    }

    pub fn with_loader_config(mut self, config: LoaderConfig) -> Self {
        self.loader_config = config;
        self
    }

    pub fn with_window(mut self, title: impl Into<String>, width: f64, height: f64) -> Self {
        self.title = title.into();
        self.width = width;
        self.height = height;
        self
    }

    /// Open the window and show `image_refs[0]`. Blocks until the window closes.
    pub fn run(self, image_refs: Vec<String>) -> Result<()> {
        if image_refs.is_empty() {
            return Err(Error::InvalidData("no images to show".to_string()));
        }
        self.settings.validate()?;

        let event_loop = EventLoopBuilder::<ViewerEvent>::with_user_event()
            .build()
            .map_err(|e| Error::Window(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&self.title)
                .with_inner_size(LogicalSize::new(self.width, self.height))
                .build(&event_loop)
                .map_err(|e| Error::Window(format!("Failed to create window: {}", e)))?,
        );

        let gpu = Arc::new(pollster::block_on(GpuContext::new())?);
        let loader_config = LoaderConfig {
            max_texture_dimension: self
                .loader_config
                .max_texture_dimension
                .min(gpu.max_texture_dimension()),
            ..self.loader_config.clone()
        };
        let mut loader = TextureLoader::with_defaults(loader_config)?;
        let proxy = Mutex::new(event_loop.create_proxy());
        loader.set_waker(Arc::new(move || {
            if let Ok(proxy) = proxy.lock() {
                let _ = proxy.send_event(ViewerEvent::TextureLoaded);
            }
        }));

        let mut runner = Runner {
            host: WindowHost::new(Arc::clone(&window)),
            gpu,
            window,
            loader,
            settings: self.settings,
            render_config: self.render_config,
            title: self.title,
            session: None,
            images: image_refs,
            current: 0,
            cursor: PointerPosition::ORIGIN,
        };
        runner.open(0);

        event_loop
            .run(move |event, elwt| {
                elwt.set_control_flow(ControlFlow::Wait);
                match event {
                    Event::WindowEvent { event, window_id } if window_id == runner.window.id() => {
                        runner.handle_window_event(event, elwt);
                    }
                    Event::UserEvent(ViewerEvent::TextureLoaded) => runner.apply_completions(),
                    Event::LoopExiting => runner.close(),
                    _ => {}
                }
            })
            .map_err(|e| Error::Window(format!("Event loop failed: {}", e)))
    }
}

struct Runner {
    gpu: Arc<GpuContext>,
    window: Arc<Window>,
    host: WindowHost,
    loader: TextureLoader,
    settings: ViewerSettings,
    render_config: RenderConfig,
    title: String,
    session: Option<ViewerSession<ImagePlaneRenderer>>,
    images: Vec<String>,
    current: usize,
    cursor: PointerPosition,
}

impl Runner {
    /// Replace the current session with one showing `images[index]`
    fn open(&mut self, index: usize) {
        self.close();
        let Some(image_ref) = self.images.get(index).cloned() else {
            return;
        };
        self.current = index;

        let config = ViewerConfig::new(image_ref.clone(), ContainerId(u64::from(self.window.id())));
        let backend = ImagePlaneRenderer::new(Arc::clone(&self.gpu), Arc::clone(&self.window), self.render_config.clone());
        match ViewerSession::start(config, self.settings.clone(), &mut self.host, backend, &self.loader) {
            Ok(session) => {
                self.window
                    .set_title(&format!("{} - {}", self.title, display_name(&image_ref)));
                self.session = Some(session);
                self.window.request_redraw();
            }
            Err(e) => log::error!("Could not open {}: {}", image_ref, e),
        }
    }

    fn step(&mut self, offset: isize) {
        let len = self.images.len() as isize;
        if len == 0 {
            return;
        }
        let next = (self.current as isize + offset).rem_euclid(len) as usize;
        self.open(next);
    }

    fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.dispose(&mut self.host);
        }
    }

    /// The current session, if it subscribed to `kind` on `scope`
    fn subscriber(&mut self, scope: EventScope, kind: EventKind) -> Option<&mut ViewerSession<ImagePlaneRenderer>> {
        let subscribers = self.host.listeners().subscribers(scope, kind);
        self.session.as_mut().filter(|s| subscribers.contains(&s.id()))
    }

    fn apply_completions(&mut self) {
        for completion in self.loader.drain() {
            let Some(session) = self.session.as_mut() else {
                log::debug!("No session for completed load of {}", completion.image_ref);
                continue;
            };
            if let LoadOutcome::Failed(reason) = session.complete_load(&mut self.host, completion) {
                let image_ref = &session.config().image_ref;
                self.window
                    .set_title(&format!("{} - could not load {}", self.title, display_name(image_ref)));
                log::warn!("{}", reason);
            }
        }
    }

    fn handle_window_event(&mut self, event: WindowEvent, elwt: &EventLoopWindowTarget<ViewerEvent>) {
        match event {
            WindowEvent::CloseRequested => {
                self.close();
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(session) = self.subscriber(EventScope::Window, EventKind::Resize) {
                    session.on_resize(SurfaceSize::new(size.width, size.height));
                }
                self.window.request_redraw();
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                let cursor = self.cursor;
                match state {
                    ElementState::Pressed => {
                        if let Some(session) = self.subscriber(EventScope::Container, EventKind::PointerDown) {
                            session.on_pointer_down(cursor);
                        }
                    }
                    ElementState::Released => {
                        if let Some(session) = self.subscriber(EventScope::Window, EventKind::PointerUp) {
                            session.on_pointer_up();
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let cursor = PointerPosition::new(position.x as f32, position.y as f32);
                self.cursor = cursor;
                if let Some(session) = self.subscriber(EventScope::Window, EventKind::PointerMove) {
                    session.on_pointer_move(cursor);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(session) = self.subscriber(EventScope::Window, EventKind::PointerLeave) {
                    session.on_pointer_leave();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let pixels = wheel_delta_pixels(delta, self.settings.wheel_line_height);
                if let Some(session) = self.subscriber(EventScope::Container, EventKind::Wheel) {
                    session.on_wheel(pixels);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event, elwt),
            WindowEvent::DroppedFile(path) => {
                let image_ref = path.to_string_lossy().into_owned();
                log::info!("Opening dropped file {}", image_ref);
                self.images.push(image_ref);
                self.open(self.images.len() - 1);
            }
            WindowEvent::RedrawRequested => {
                let t_ms = self.host.elapsed_ms();
                for frame in self.host.take_due_frames() {
                    if let Some(session) = self.session.as_mut() {
                        session.on_frame(&mut self.host, frame, t_ms);
                    }
                }
                // clear-only frame while there is no image to draw
                if let Some(session) = self.session.as_mut() {
                    session.present_idle();
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, event: &KeyEvent, elwt: &EventLoopWindowTarget<ViewerEvent>) {
        if event.state != ElementState::Pressed {
            return;
        }
        match &event.logical_key {
            Key::Named(NamedKey::Escape) => {
                self.close();
                elwt.exit();
            }
            Key::Named(NamedKey::ArrowRight) => self.step(1),
            Key::Named(NamedKey::ArrowLeft) => self.step(-1),
            Key::Character(c) => match c.as_str() {
                "n" | "N" => self.step(1),
                "p" | "P" => self.step(-1),
                "r" | "R" => {
                    if let Some(session) = self.session.as_mut() {
                        session.reset_view();
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}
