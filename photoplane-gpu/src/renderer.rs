//! wgpu implementation of the viewer's render backend

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;
use photoplane_core::{
    Error, FrameParams, ImageData, MaterialDesc, PlaneMesh, RenderBackend, Result, Side, SurfaceSize,
};
use winit::window::Window;

use crate::device::GpuContext;
use crate::shaders::IMAGE_PLANE_SHADER;
use crate::texture::{plane_to_vertices, srgb_to_linear, PlaneTexture, PlaneVertex};

/// Camera and model matrices
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct PlaneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl PlaneUniforms {
    pub fn new(view_proj: Matrix4<f32>, model: Matrix4<f32>) -> Self {
        Self {
            view_proj: view_proj.into(),
            model: model.into(),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub present_mode: wgpu::PresentMode,
    pub enable_alpha_blending: bool,
    /// 4x MSAA on the window surface
    pub enable_multisampling: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            present_mode: wgpu::PresentMode::AutoVsync,
            enable_alpha_blending: true,
            enable_multisampling: true,
        }
    }
}

impl RenderConfig {
    /// Samples per pixel of the render target
    pub fn sample_count(&self) -> u32 {
        if self.enable_multisampling { 4 } else { 1 }
    }
}

/// Window surface plus the pipelines and uniforms that target it
pub struct RenderSurface {
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub front_pipeline: wgpu::RenderPipeline,
    pub double_sided_pipeline: wgpu::RenderPipeline,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
    pub sample_count: u32,
    pub msaa_texture: Option<wgpu::Texture>,
    pub msaa_view: Option<wgpu::TextureView>,
}

/// Vertex and index buffers of the image plane
pub struct PlaneGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// Texture binding of the image plane
pub struct PlaneMaterial {
    pub bind_group: wgpu::BindGroup,
    pub side: Side,
}

/// Renders one textured plane into a window
pub struct ImagePlaneRenderer {
    gpu: Arc<GpuContext>,
    window: Arc<Window>,
    config: RenderConfig,
    uniform_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    shader: wgpu::ShaderModule,
}

impl ImagePlaneRenderer {
    /// Create a renderer drawing into `window`
    pub fn new(gpu: Arc<GpuContext>, window: Arc<Window>, config: RenderConfig) -> Self {
        let uniform_layout = gpu.create_bind_group_layout(
            "image_plane_uniform_layout",
            &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        );

        let texture_layout = gpu.create_bind_group_layout(
            "image_plane_texture_layout",
            &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        );

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Image Plane Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let shader = gpu.create_shader_module("Image Plane Shader", IMAGE_PLANE_SHADER);

        Self {
            gpu,
            window,
            config,
            uniform_layout,
            texture_layout,
            sampler,
            shader,
        }
    }

    /// The GPU context this renderer draws with
    pub fn gpu(&self) -> &Arc<GpuContext> {
        &self.gpu
    }

    /// Requested sample count, or 1 if the adapter cannot multisample `format`
    fn supported_sample_count(&self, format: wgpu::TextureFormat) -> u32 {
        let requested = self.config.sample_count();
        let flags = self.gpu.adapter.get_texture_format_features(format).flags;
        if requested > 1 && !flags.sample_count_supported(requested) {
            log::warn!("{:?} does not support {}x MSAA, rendering without it", format, requested);
            return 1;
        }
        requested
    }

    /// Multisampled color target the frame is drawn into before it is
    /// resolved onto the surface texture
    fn create_msaa_texture(
        &self,
        surface_config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Option<(wgpu::Texture, wgpu::TextureView)> {
        if sample_count <= 1 {
            return None;
        }
        let msaa_texture = self.gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Image Plane MSAA Texture"),
            size: wgpu::Extent3d {
                width: surface_config.width,
                height: surface_config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: surface_config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let msaa_view = msaa_texture.create_view(&wgpu::TextureViewDescriptor::default());
        Some((msaa_texture, msaa_view))
    }

    fn create_pipeline(&self, format: wgpu::TextureFormat, side: Side, sample_count: u32) -> wgpu::RenderPipeline {
        let label = match side {
            Side::Front => "Front",
            Side::Double => "Double Sided",
        };

        let layout = self.gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Image Plane Pipeline Layout", label)),
            bind_group_layouts: &[&self.uniform_layout, &self.texture_layout],
            push_constant_ranges: &[],
        });

        self.gpu.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Image Plane Pipeline", label)),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: "vs_main",
                buffers: &[PlaneVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: if self.config.enable_alpha_blending {
                        Some(wgpu::BlendState::ALPHA_BLENDING)
                    } else {
                        Some(wgpu::BlendState::REPLACE)
                    },
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: match side {
                    Side::Front => Some(wgpu::Face::Back),
                    Side::Double => None,
                },
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        })
    }

    fn clear_color(&self, surface: &RenderSurface, color: [f64; 4]) -> wgpu::Color {
        let to_surface = |c: f64| {
            if surface.surface_config.format.is_srgb() {
                srgb_to_linear(c)
            } else {
                c
            }
        };
        wgpu::Color {
            r: to_surface(color[0]),
            g: to_surface(color[1]),
            b: to_surface(color[2]),
            a: color[3],
        }
    }
}

impl RenderBackend for ImagePlaneRenderer {
    type Surface = RenderSurface;
    type Texture = PlaneTexture;
    type Geometry = PlaneGeometry;
    type Material = PlaneMaterial;

    fn create_surface(&mut self, size: SurfaceSize) -> Result<RenderSurface> {
        let surface = self
            .gpu
            .instance
            .create_surface(self.window.clone())
            .map_err(|e| Error::Gpu(format!("Failed to create surface: {:?}", e)))?;

        let surface_caps = surface.get_capabilities(&self.gpu.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface is not supported by the adapter".to_string()))?;

        let present_mode = if surface_caps.present_modes.contains(&self.config.present_mode) {
            self.config.present_mode
        } else {
            wgpu::PresentMode::Fifo
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&self.gpu.device, &surface_config);

        let uniforms = PlaneUniforms::new(Matrix4::identity(), Matrix4::identity());
        let uniform_buffer = self.gpu.create_buffer_init(
            "Image Plane Uniforms",
            &[uniforms],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let uniform_bind_group = self.gpu.create_bind_group(
            "image_plane_uniform_bind_group",
            &self.uniform_layout,
            &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        );

        let sample_count = self.supported_sample_count(surface_format);
        let (msaa_texture, msaa_view) = match self.create_msaa_texture(&surface_config, sample_count) {
            Some((texture, view)) => (Some(texture), Some(view)),
            None => (None, None),
        };

        log::debug!(
            "Created {}x{} surface ({:?}, {:?}, {}x MSAA)",
            surface_config.width,
            surface_config.height,
            surface_format,
            present_mode,
            sample_count
        );

        Ok(RenderSurface {
            front_pipeline: self.create_pipeline(surface_format, Side::Front, sample_count),
            double_sided_pipeline: self.create_pipeline(surface_format, Side::Double, sample_count),
            surface,
            surface_config,
            uniform_buffer,
            uniform_bind_group,
            sample_count,
            msaa_texture,
            msaa_view,
        })
    }

    fn resize_surface(&mut self, surface: &mut RenderSurface, size: SurfaceSize) {
        if size.width > 0 && size.height > 0 {
            surface.surface_config.width = size.width;
            surface.surface_config.height = size.height;
            surface.surface.configure(&self.gpu.device, &surface.surface_config);

            if let Some((texture, view)) = self.create_msaa_texture(&surface.surface_config, surface.sample_count) {
                if let Some(old) = surface.msaa_texture.replace(texture) {
                    old.destroy();
                }
                surface.msaa_view = Some(view);
            }
        }
    }

    fn surface_size(&self, surface: &RenderSurface) -> SurfaceSize {
        SurfaceSize::new(surface.surface_config.width, surface.surface_config.height)
    }

    fn create_texture(&mut self, image: &ImageData) -> Result<PlaneTexture> {
        PlaneTexture::from_image(&self.gpu, image)
    }

    fn create_geometry(&mut self, mesh: &PlaneMesh) -> Result<PlaneGeometry> {
        if mesh.vertex_count() == 0 || mesh.face_count() == 0 {
            return Err(Error::InvalidData("plane mesh is empty".to_string()));
        }

        let vertices = plane_to_vertices(mesh);
        let indices = mesh.indices();

        Ok(PlaneGeometry {
            vertex_buffer: self.gpu.create_buffer_init("Image Plane Vertex Buffer", &vertices, wgpu::BufferUsages::VERTEX),
            index_buffer: self.gpu.create_buffer_init("Image Plane Index Buffer", &indices, wgpu::BufferUsages::INDEX),
            index_count: indices.len() as u32,
        })
    }

    fn create_material(&mut self, texture: &PlaneTexture, desc: &MaterialDesc) -> Result<PlaneMaterial> {
        let bind_group = self.gpu.create_bind_group(
            "image_plane_texture_bind_group",
            &self.texture_layout,
            &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        );

        Ok(PlaneMaterial {
            bind_group,
            side: desc.side,
        })
    }

    fn render(
        &mut self,
        surface: &mut RenderSurface,
        frame: &FrameParams,
        mesh: Option<(&PlaneGeometry, &PlaneMaterial)>,
    ) -> Result<()> {
        let uniforms = PlaneUniforms::new(frame.view_proj, frame.model);
        self.gpu
            .queue
            .write_buffer(&surface.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let output = match surface.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                // Skip this frame; the next one draws into the reconfigured surface
                surface.surface.configure(&self.gpu.device, &surface.surface_config);
                return Ok(());
            }
            Err(e) => return Err(Error::Gpu(format!("Failed to get surface texture: {:?}", e))),
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let (target, resolve_target) = match surface.msaa_view.as_ref() {
            Some(msaa_view) => (msaa_view, Some(&view)),
            None => (&view, None),
        };
        let clear = self.clear_color(surface, frame.clear_color);

        let mut encoder = self.gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Image Plane Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Image Plane Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some((geometry, material)) = mesh {
                let pipeline = match material.side {
                    Side::Front => &surface.front_pipeline,
                    Side::Double => &surface.double_sided_pipeline,
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &surface.uniform_bind_group, &[]);
                render_pass.set_bind_group(1, &material.bind_group, &[]);
                render_pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
                render_pass.set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..geometry.index_count, 0, 0..1);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();

        Ok(())
    }

    fn release_geometry(&mut self, geometry: PlaneGeometry) {
        geometry.vertex_buffer.destroy();
        geometry.index_buffer.destroy();
    }

    fn release_material(&mut self, material: PlaneMaterial) {
        drop(material.bind_group);
    }

    fn release_texture(&mut self, texture: PlaneTexture) {
        drop(texture.view);
        texture.texture.destroy();
    }

    fn release_surface(&mut self, surface: RenderSurface) {
        surface.uniform_buffer.destroy();
        if let Some(msaa_texture) = surface.msaa_texture {
            msaa_texture.destroy();
        }
        log::debug!(
            "Released {}x{} surface",
            surface.surface_config.width,
            surface.surface_config.height
        );
    }
}
