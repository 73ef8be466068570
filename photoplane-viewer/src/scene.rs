//! Camera, plane rotation and the GPU resources of the loaded image

use photoplane_core::{
    Camera, CameraSettings, CameraState, FrameParams, GeometrySpec, MeshRotation, RenderBackend,
    SceneState, SurfaceSize, Transform3D, ZoomRange,
};

/// Everything the backend created for one image
pub struct ImagePlane<B: RenderBackend> {
    pub geometry: B::Geometry,
    pub material: B::Material,
    pub texture: B::Texture,
    pub spec: GeometrySpec,
}

impl<B: RenderBackend> ImagePlane<B> {
    /// Hand the resources back to the backend, geometry first
    pub fn release(self, backend: &mut B) {
        backend.release_geometry(self.geometry);
        backend.release_material(self.material);
        backend.release_texture(self.texture);
    }
}

pub struct SceneGraph<B: RenderBackend> {
    camera: Camera,
    initial_distance: f32,
    zoom_range: ZoomRange,
    rotation: MeshRotation,
    plane: Option<ImagePlane<B>>,
}

impl<B: RenderBackend> SceneGraph<B> {
    /// Perspective camera on +Z looking at the origin, sized for `container`
    pub fn new(settings: &CameraSettings, zoom_range: ZoomRange, container: SurfaceSize) -> Self {
        let aspect = if container.is_empty() { 1.0 } else { container.aspect_ratio() };
        let mut camera = Camera::new(settings.fov_deg, aspect, settings.near, settings.far, settings.initial_distance);
        let initial_distance = camera.set_distance(settings.initial_distance, &zoom_range);
        Self {
            camera,
            initial_distance,
            zoom_range,
            rotation: MeshRotation::default(),
            plane: None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Recompute the projection for a new container size.
    /// Returns false for zero-area sizes, which leave the camera unchanged.
    pub fn update_aspect(&mut self, width: u32, height: u32) -> bool {
        self.camera.update_aspect(width, height)
    }

    pub fn rotation(&self) -> MeshRotation {
        self.rotation
    }

    pub fn set_mesh_rotation(&mut self, x: f32, y: f32) {
        self.rotation = MeshRotation { x, y };
    }

    pub fn rotate_by(&mut self, dx: f32, dy: f32) {
        self.rotation.x += dx;
        self.rotation.y += dy;
    }

    pub fn zoom_z(&self) -> f32 {
        self.camera.distance()
    }

    /// Move the camera along its axis, clamped to the zoom range
    pub fn zoom_by(&mut self, delta: f32) -> f32 {
        self.camera.dolly(delta, &self.zoom_range)
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    /// Back to the initial distance with no rotation
    pub fn reset_view(&mut self) {
        self.rotation = MeshRotation::default();
        self.camera.set_distance(self.initial_distance, &self.zoom_range);
    }

    pub fn has_mesh(&self) -> bool {
        self.plane.is_some()
    }

    pub fn plane(&self) -> Option<&ImagePlane<B>> {
        self.plane.as_ref()
    }

    /// Attach the loaded image. Returns the plane it replaced, if any.
    pub fn attach_plane(&mut self, plane: ImagePlane<B>) -> Option<ImagePlane<B>> {
        self.plane.replace(plane)
    }

    pub fn detach_plane(&mut self) -> Option<ImagePlane<B>> {
        self.plane.take()
    }

    /// Geometry and material to draw, if an image is attached
    pub fn drawable(&self) -> Option<(&B::Geometry, &B::Material)> {
        self.plane.as_ref().map(|p| (&p.geometry, &p.material))
    }

    pub fn model_matrix(&self) -> Transform3D {
        Transform3D::from_euler_xy(self.rotation.x, self.rotation.y)
    }

    pub fn frame_params(&self, clear_color: [f64; 4]) -> FrameParams {
        FrameParams {
            view_proj: self.camera.view_projection(),
            model: self.model_matrix().matrix,
            clear_color,
        }
    }

    pub fn state(&self) -> SceneState {
        SceneState {
            camera: CameraState {
                fov_deg: self.camera.fov_deg,
                aspect: self.camera.aspect_ratio,
                near: self.camera.near,
                far: self.camera.far,
                zoom_z: self.camera.distance(),
            },
            mesh: self.rotation,
            has_mesh: self.plane.is_some(),
        }
    }
}
