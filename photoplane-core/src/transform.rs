//! 3D transformation utilities

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation applied to the image plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Rotation about X then Y, in intrinsic XYZ order (`Rx * Ry`)
    pub fn from_euler_xy(x: f32, y: f32) -> Self {
        let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), x);
        let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y);
        Self::rotation(rx * ry)
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }
}
