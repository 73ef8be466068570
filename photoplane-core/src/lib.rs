//! Core data structures and traits for photoplane
//!
//! This crate provides the backend-independent pieces of the image-plane viewer:
//! the camera, plane geometry sizing, interaction state, settings and the
//! [`RenderBackend`] trait implemented by the GPU crate.

pub mod camera;
pub mod config;
pub mod error;
pub mod image;
pub mod plane;
pub mod state;
pub mod traits;
pub mod transform;

pub use camera::*;
pub use config::*;
pub use error::*;
pub use image::*;
pub use plane::*;
pub use state::*;
pub use traits::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};
