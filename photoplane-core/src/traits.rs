//! Core traits for photoplane
//!
//! [`RenderBackend`] is the seam between the viewer's session logic and the GPU.
//! Every resource it hands out is released by value, so a resource can only be
//! released once.

use crate::{image::ImageData, plane::PlaneMesh, Result};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Size of a container or render surface in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, e.g. a minimised window
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Which faces of the plane are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Front,
    Double,
}

/// Unlit textured material description
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub side: Side,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self { side: Side::Double }
    }
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub view_proj: Matrix4<f32>,
    pub model: Matrix4<f32>,
    /// sRGB clear color
    pub clear_color: [f64; 4],
}

/// GPU resource pipeline used by a viewer session
pub trait RenderBackend {
    type Surface;
    type Texture;
    type Geometry;
    type Material;

    /// Create the render surface and attach it to the container
    fn create_surface(&mut self, size: SurfaceSize) -> Result<Self::Surface>;

    /// Reconfigure the surface for a new container size
    fn resize_surface(&mut self, surface: &mut Self::Surface, size: SurfaceSize);

    /// Current configured size of the surface
    fn surface_size(&self, surface: &Self::Surface) -> SurfaceSize;

    /// Upload decoded pixels as a texture
    fn create_texture(&mut self, image: &ImageData) -> Result<Self::Texture>;

    /// Upload plane vertices and indices
    fn create_geometry(&mut self, mesh: &PlaneMesh) -> Result<Self::Geometry>;

    /// Build a material sampling `texture`
    fn create_material(&mut self, texture: &Self::Texture, desc: &MaterialDesc) -> Result<Self::Material>;

    /// Clear the surface and draw the plane, if there is one
    fn render(
        &mut self,
        surface: &mut Self::Surface,
        frame: &FrameParams,
        mesh: Option<(&Self::Geometry, &Self::Material)>,
    ) -> Result<()>;

    fn release_geometry(&mut self, geometry: Self::Geometry);

    fn release_material(&mut self, material: Self::Material);

    fn release_texture(&mut self, texture: Self::Texture);

    /// Detach the surface from its container and free it
    fn release_surface(&mut self, surface: Self::Surface);
}
