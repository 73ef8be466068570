//! Image-plane geometry

use crate::{Error, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Plane dimensions derived from an image's pixel aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySpec {
    pub width: f32,
    pub height: f32,
}

impl GeometrySpec {
    /// Size a plane for an image of the given pixel dimensions.
    ///
    /// The longer side is always 1, so the plane fits inside a unit footprint
    /// whatever the orientation of the photo.
    pub fn from_image_size(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ImageLoad(format!(
                "image has zero extent ({}x{})",
                width, height
            )));
        }
        Ok(Self::from_aspect_ratio(width as f32 / height as f32))
    }

    /// Size a plane for a pixel aspect ratio `width / height`
    pub fn from_aspect_ratio(aspect_ratio: f32) -> Self {
        if aspect_ratio >= 1.0 {
            Self {
                width: 1.0,
                height: 1.0 / aspect_ratio,
            }
        } else {
            Self {
                width: aspect_ratio,
                height: 1.0,
            }
        }
    }

    /// Width over height of the plane
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// A textured quad centred on the origin, facing +Z
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneMesh {
    pub vertices: Vec<Point3<f32>>,
    pub uvs: Vec<[f32; 2]>,
    pub faces: Vec<[u32; 3]>,
}

impl PlaneMesh {
    /// Build the two-triangle quad for a geometry spec.
    ///
    /// Texture rows run top to bottom, so `v = 0` sits on the top edge.
    pub fn from_spec(spec: &GeometrySpec) -> Self {
        let hw = spec.width * 0.5;
        let hh = spec.height * 0.5;

        let vertices = vec![
            Point3::new(-hw, -hh, 0.0),
            Point3::new(hw, -hh, 0.0),
            Point3::new(hw, hh, 0.0),
            Point3::new(-hw, hh, 0.0),
        ];
        let uvs = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        let faces = vec![[0, 1, 2], [2, 3, 0]];

        Self { vertices, uvs, faces }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Flattened triangle indices
    pub fn indices(&self) -> Vec<u32> {
        self.faces.iter().flat_map(|f| f.iter().copied()).collect()
    }

    /// Axis-aligned extent of the quad as `(width, height)`
    pub fn extent(&self) -> (f32, f32) {
        let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for v in &self.vertices {
            min_x = min_x.min(v.x);
            max_x = max_x.max(v.x);
            min_y = min_y.min(v.y);
            max_y = max_y.max(v.y);
        }
        if self.vertices.is_empty() {
            return (0.0, 0.0);
        }
        (max_x - min_x, max_y - min_y)
    }
}
