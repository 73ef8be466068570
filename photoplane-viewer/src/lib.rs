//! Interactive image-plane viewer
//!
//! Shows a photo as a textured plane in 3D space that sways gently on its
//! own, tilts when dragged and zooms with the scroll wheel:
//! - [`ViewerSession`]: lifecycle of one viewer from construction to disposal
//! - [`SceneGraph`]: camera, plane rotation and GPU resources
//! - [`TextureLoader`]: async fetch and decode off the UI thread
//! - [`InputController`], [`AnimationScheduler`], [`ResizeAdapter`]: the event-driven parts
//! - [`PhotoViewer`]: a ready-made winit window around all of the above
//!
//! Sessions are generic over [`photoplane_core::RenderBackend`] and
//! [`ViewerHost`], so they run just as well against [`HeadlessBackend`]
//! and [`HostRegistry`] as inside a real window.

pub mod animation;
pub mod app;
pub mod events;
pub mod headless;
pub mod host;
pub mod input;
pub mod loader;
pub mod resize;
pub mod scene;
pub mod session;

pub use animation::AnimationScheduler;
pub use app::{PhotoViewer, ViewerEvent, WindowHost};
pub use events::{EventKind, EventScope, ListenerId, ListenerRegistry, SessionId};
pub use headless::{BackendEvent, FailurePlan, HeadlessBackend};
pub use host::{FrameId, FrameQueue, HostRegistry, ViewerHost};
pub use input::InputController;
pub use loader::{LoadCompletion, LoadTicket, LoadWaker, LoaderConfig, TextureLoader, TextureSource};
pub use resize::ResizeAdapter;
pub use scene::{ImagePlane, SceneGraph};
pub use session::{LoadOutcome, SessionState, ViewerSession};

use photoplane_core::{Result, ViewerSettings};

/// Open a window showing `image_ref` with default settings
pub fn show_image(image_ref: impl Into<String>) -> Result<()> {
    PhotoViewer::new(ViewerSettings::default()).run(vec![image_ref.into()])
}
