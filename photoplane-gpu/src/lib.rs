//! # photoplane GPU
//!
//! wgpu render backend for the photoplane image viewer.
//!
//! [`ImagePlaneRenderer`] implements [`photoplane_core::RenderBackend`] for a
//! winit window: one surface per viewer session, one textured plane drawn
//! unlit and double sided.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use photoplane_gpu::{GpuContext, ImagePlaneRenderer, RenderConfig};
//!
//! fn example(window: Arc<winit::window::Window>) -> photoplane_core::Result<()> {
//!     let gpu = Arc::new(pollster::block_on(GpuContext::new())?);
//!     let _renderer = ImagePlaneRenderer::new(gpu, window, RenderConfig::default());
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod renderer;
pub mod shaders;
pub mod texture;

// Re-export commonly used items
pub use device::GpuContext;
pub use renderer::{ImagePlaneRenderer, PlaneGeometry, PlaneMaterial, PlaneUniforms, RenderConfig, RenderSurface};
pub use texture::{plane_to_vertices, PlaneTexture, PlaneVertex};
