//! Perspective camera for the image plane

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Maps nalgebra's OpenGL clip space (z in [-1, 1]) onto wgpu's (z in [0, 1])
#[rustfmt::skip]
pub fn opengl_to_wgpu_matrix() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Inclusive range the camera distance is kept in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
}

impl ZoomRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, z: f32) -> f32 {
        z.max(self.min).min(self.max)
    }

    pub fn contains(&self, z: f32) -> bool {
        z >= self.min && z <= self.max
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self::new(0.5, 3.0)
    }
}

/// A perspective camera on the +Z axis looking at the origin
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    projection: Matrix4<f32>,
}

impl Camera {
    /// Create a new camera `distance` units in front of the origin
    pub fn new(fov_deg: f32, aspect_ratio: f32, near: f32, far: f32, distance: f32) -> Self {
        let mut camera = Self {
            position: Point3::new(0.0, 0.0, distance),
            target: Point3::origin(),
            up: Vector3::y(),
            fov_deg,
            aspect_ratio,
            near,
            far,
            projection: Matrix4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the cached projection matrix, already in wgpu clip space
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    /// Projection times view
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }

    /// Recompute the projection after a change to fov, aspect or clip planes
    pub fn update_projection_matrix(&mut self) {
        let perspective = Perspective3::new(
            self.aspect_ratio,
            self.fov_deg.to_radians(),
            self.near,
            self.far,
        );
        self.projection = opengl_to_wgpu_matrix() * perspective.into_inner();
    }

    /// Set the aspect ratio from a container size and update the projection.
    ///
    /// Returns false (and leaves the camera alone) for zero-area sizes.
    pub fn update_aspect(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect_ratio = width as f32 / height as f32;
        self.update_projection_matrix();
        true
    }

    /// Distance along the view axis, i.e. the zoom level
    pub fn distance(&self) -> f32 {
        self.position.z
    }

    /// Place the camera at `z`, clamped into `range`. Returns the applied distance.
    pub fn set_distance(&mut self, z: f32, range: &ZoomRange) -> f32 {
        self.position.z = range.clamp(z);
        self.position.z
    }

    /// Move along the view axis by `delta`, clamped into `range`
    pub fn dolly(&mut self, delta: f32, range: &ZoomRange) -> f32 {
        self.set_distance(self.position.z + delta, range)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 1000.0, 1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_camera_matches_viewer_defaults() {
        let camera = Camera::default();
        assert_relative_eq!(camera.fov_deg, 75.0);
        assert_relative_eq!(camera.near, 0.1);
        assert_relative_eq!(camera.far, 1000.0);
        assert_relative_eq!(camera.distance(), 1.5);
    }

    #[test]
    fn test_update_aspect_recomputes_projection() {
        let mut camera = Camera::default();
        let before = camera.projection_matrix();

        assert!(camera.update_aspect(1600, 800));
        assert_relative_eq!(camera.aspect_ratio, 2.0);

        let after = camera.projection_matrix();
        assert_relative_eq!(after[(0, 0)], before[(0, 0)] / 2.0, epsilon = 1e-5);
        assert_relative_eq!(after[(1, 1)], before[(1, 1)], epsilon = 1e-5);
    }

    #[test]
    fn test_update_aspect_ignores_zero_area() {
        let mut camera = Camera::default();
        assert!(!camera.update_aspect(0, 600));
        assert!(!camera.update_aspect(800, 0));
        assert_relative_eq!(camera.aspect_ratio, 1.0);
    }

    #[test]
    fn test_distance_is_clamped() {
        let range = ZoomRange::default();
        let mut camera = Camera::default();

        assert_relative_eq!(camera.dolly(100.0, &range), 3.0);
        assert_relative_eq!(camera.dolly(-100.0, &range), 0.5);
        assert_relative_eq!(camera.set_distance(1.0, &range), 1.0);
    }

    #[test]
    fn test_projection_maps_near_plane_to_zero_depth() {
        let camera = Camera::default();
        let clip = camera.projection_matrix() * nalgebra::Vector4::new(0.0, 0.0, -camera.near, 1.0);
        assert_relative_eq!(clip.z / clip.w, 0.0, epsilon = 1e-5);
    }
}
