//! Viewer configuration

use crate::{camera::ZoomRange, state::MeshRotation, Error, Result};
use serde::{Deserialize, Serialize};

/// Opaque id of the region a viewer is mounted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub u64);

/// What a single viewer session shows, and where.
///
/// Never mutated after a session starts: showing another image means a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub image_ref: String,
    pub container: ContainerId,
}

impl ViewerConfig {
    pub fn new(image_ref: impl Into<String>, container: ContainerId) -> Self {
        Self {
            image_ref: image_ref.into(),
            container,
        }
    }
}

/// Perspective camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub initial_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            initial_distance: 1.5,
        }
    }
}

/// Small oscillating rotation shown while nobody is dragging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdleMotion {
    /// Radians per millisecond fed to `sin` for the Y rotation
    pub yaw_frequency: f64,
    pub yaw_amplitude: f64,
    pub pitch_frequency: f64,
    pub pitch_amplitude: f64,
}

impl IdleMotion {
    /// Rotation at `t_ms` milliseconds. Depends on nothing but `t_ms`.
    pub fn rotation_at(&self, t_ms: f64) -> MeshRotation {
        MeshRotation {
            x: ((t_ms * self.pitch_frequency).sin() * self.pitch_amplitude) as f32,
            y: ((t_ms * self.yaw_frequency).sin() * self.yaw_amplitude) as f32,
        }
    }
}

impl Default for IdleMotion {
    fn default() -> Self {
        Self {
            yaw_frequency: 0.0005,
            yaw_amplitude: 0.1,
            pitch_frequency: 0.0003,
            pitch_amplitude: 0.05,
        }
    }
}

/// Tunables for the interactive viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    pub camera: CameraSettings,
    pub zoom_range: ZoomRange,
    /// Camera distance change per wheel pixel
    pub zoom_sensitivity: f32,
    /// Radians of rotation per dragged pixel
    pub drag_sensitivity: f32,
    pub idle: IdleMotion,
    /// sRGB clear color
    pub background_color: [f64; 4],
    /// Pixels per line for line-based wheel deltas
    pub wheel_line_height: f32,
}

impl ViewerSettings {
    /// Check the settings are internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.zoom_range.min > self.zoom_range.max {
            return Err(Error::InvalidData(format!(
                "zoom range is inverted ({} > {})",
                self.zoom_range.min, self.zoom_range.max
            )));
        }
        if !self.zoom_range.contains(self.camera.initial_distance) {
            return Err(Error::InvalidData(format!(
                "initial camera distance {} is outside the zoom range",
                self.camera.initial_distance
            )));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(Error::InvalidData(format!(
                "invalid clip planes near={} far={}",
                self.camera.near, self.camera.far
            )));
        }
        if !(self.camera.fov_deg > 0.0 && self.camera.fov_deg < 180.0) {
            return Err(Error::InvalidData(format!(
                "field of view {} out of range",
                self.camera.fov_deg
            )));
        }
        Ok(())
    }
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            zoom_range: ZoomRange::default(),
            zoom_sensitivity: 0.001,
            drag_sensitivity: 0.01,
            idle: IdleMotion::default(),
            background_color: [245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0, 1.0],
            wheel_line_height: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(ViewerSettings::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_zoom_range_is_rejected() {
        let settings = ViewerSettings {
            zoom_range: ZoomRange::new(3.0, 0.5),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_initial_distance_must_be_in_range() {
        let mut settings = ViewerSettings::default();
        settings.camera.initial_distance = 5.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_idle_rotation_at_zero_is_rest() {
        let r = IdleMotion::default().rotation_at(0.0);
        assert_relative_eq!(r.x, 0.0);
        assert_relative_eq!(r.y, 0.0);
    }

    #[test]
    fn test_idle_rotation_peaks_at_amplitude() {
        let idle = IdleMotion::default();
        let t = std::f64::consts::FRAC_PI_2 / idle.yaw_frequency;
        assert_relative_eq!(idle.rotation_at(t).y, 0.1, epsilon = 1e-6);
    }
}
