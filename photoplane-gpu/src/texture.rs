//! Image textures and plane vertex data

use bytemuck::{Pod, Zeroable};
use photoplane_core::{Error, ImageData, PlaneMesh, Result};

use crate::device::GpuContext;

/// Vertex data for the image plane
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl PlaneVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // UV
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Interleave plane positions and texture coordinates
pub fn plane_to_vertices(mesh: &PlaneMesh) -> Vec<PlaneVertex> {
    mesh.vertices
        .iter()
        .zip(&mesh.uvs)
        .map(|(p, uv)| PlaneVertex {
            position: [p.x, p.y, p.z],
            uv: *uv,
        })
        .collect()
}

/// An uploaded image
pub struct PlaneTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl PlaneTexture {
    /// Upload RGBA pixels into a new sRGB texture
    pub fn from_image(gpu: &GpuContext, image: &ImageData) -> Result<Self> {
        let max = gpu.max_texture_dimension();
        if image.width == 0 || image.height == 0 {
            return Err(Error::InvalidData("cannot upload an empty image".to_string()));
        }
        if image.width > max || image.height > max {
            return Err(Error::Gpu(format!(
                "image {}x{} exceeds the device texture limit of {}",
                image.width, image.height, max
            )));
        }

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Image Plane Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        gpu.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            width: image.width,
            height: image.height,
        })
    }
}

/// Convert an sRGB channel to linear, for clear colors on sRGB surfaces
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
