//! Interaction and scene state records shared by input handling and animation

use serde::{Deserialize, Serialize};

/// Pointer position in container pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for PointerPosition {
    type Output = (f32, f32);

    fn sub(self, rhs: Self) -> Self::Output {
        (self.x - rhs.x, self.y - rhs.y)
    }
}

/// Euler rotation of the image plane in radians
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshRotation {
    pub x: f32,
    pub y: f32,
}

/// Snapshot of the camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub zoom_z: f32,
}

/// Snapshot of everything the renderer reads each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub camera: CameraState,
    pub mesh: MeshRotation,
    pub has_mesh: bool,
}

/// Transient pointer-drag state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub is_dragging: bool,
    pub last_pointer: PointerPosition,
}

impl InputState {
    /// Start a drag at `pos`
    pub fn begin_drag(&mut self, pos: PointerPosition) {
        self.is_dragging = true;
        self.last_pointer = pos;
    }

    /// Advance an active drag to `pos`, returning the pointer delta.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn drag_to(&mut self, pos: PointerPosition) -> Option<(f32, f32)> {
        if !self.is_dragging {
            return None;
        }
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        Some(delta)
    }

    /// Back to `{ is_dragging: false, last_pointer: origin }`
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
