//! A render backend that keeps no GPU state and records what it was asked to do.
//!
//! Useful for running sessions without a window or adapter, e.g. in tests or
//! when driving the viewer from a server process.

use std::cell::RefCell;
use std::rc::Rc;

use photoplane_core::{
    Error, FrameParams, ImageData, MaterialDesc, PlaneMesh, RenderBackend, Result, Side, SurfaceSize,
};

/// One backend call, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackendEvent {
    CreateSurface { id: u64, size: SurfaceSize },
    ResizeSurface { id: u64, size: SurfaceSize },
    CreateTexture { id: u64, width: u32, height: u32 },
    CreateGeometry { id: u64, extent: (f32, f32) },
    CreateMaterial { id: u64, texture: u64, side: Side },
    Render { surface: u64, with_mesh: bool },
    ReleaseGeometry { id: u64 },
    ReleaseMaterial { id: u64 },
    ReleaseTexture { id: u64 },
    ReleaseSurface { id: u64 },
}

/// Which resource creation should fail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailurePlan {
    pub surface: bool,
    pub texture: bool,
    pub geometry: bool,
    pub material: bool,
    pub render: bool,
}

#[derive(Debug, PartialEq)]
pub struct HeadlessSurface {
    id: u64,
    size: SurfaceSize,
}

#[derive(Debug, PartialEq)]
pub struct HeadlessTexture {
    id: u64,
}

#[derive(Debug, PartialEq)]
pub struct HeadlessGeometry {
    id: u64,
}

#[derive(Debug, PartialEq)]
pub struct HeadlessMaterial {
    id: u64,
}

/// Shared, inspectable log of backend calls
pub type BackendLog = Rc<RefCell<Vec<BackendEvent>>>;

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    log: BackendLog,
    failures: FailurePlan,
    next_id: u64,
    last_frame: Option<FrameParams>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failures(failures: FailurePlan) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    /// Handle to the call log that stays valid after the backend is dropped
    pub fn log(&self) -> BackendLog {
        Rc::clone(&self.log)
    }

    pub fn events(&self) -> Vec<BackendEvent> {
        self.log.borrow().clone()
    }

    pub fn last_frame(&self) -> Option<&FrameParams> {
        self.last_frame.as_ref()
    }

    /// Resources created and not yet released
    pub fn live_resources(&self) -> usize {
        live_resources(&self.log.borrow())
    }

    fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn record(&self, event: BackendEvent) {
        self.log.borrow_mut().push(event);
    }
}

/// Count resources created in `events` and not released afterwards
pub fn live_resources(events: &[BackendEvent]) -> usize {
    let created = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                BackendEvent::CreateSurface { .. }
                    | BackendEvent::CreateTexture { .. }
                    | BackendEvent::CreateGeometry { .. }
                    | BackendEvent::CreateMaterial { .. }
            )
        })
        .count();
    let released = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                BackendEvent::ReleaseSurface { .. }
                    | BackendEvent::ReleaseTexture { .. }
                    | BackendEvent::ReleaseGeometry { .. }
                    | BackendEvent::ReleaseMaterial { .. }
            )
        })
        .count();
    created.saturating_sub(released)
}

impl RenderBackend for HeadlessBackend {
    type Surface = HeadlessSurface;
    type Texture = HeadlessTexture;
    type Geometry = HeadlessGeometry;
    type Material = HeadlessMaterial;

    fn create_surface(&mut self, size: SurfaceSize) -> Result<Self::Surface> {
        if self.failures.surface {
            return Err(Error::Gpu("headless surface creation disabled".to_string()));
        }
        let id = self.alloc();
        self.record(BackendEvent::CreateSurface { id, size });
        Ok(HeadlessSurface { id, size })
    }

    fn resize_surface(&mut self, surface: &mut Self::Surface, size: SurfaceSize) {
        surface.size = size;
        self.record(BackendEvent::ResizeSurface { id: surface.id, size });
    }

    fn surface_size(&self, surface: &Self::Surface) -> SurfaceSize {
        surface.size
    }

    fn create_texture(&mut self, image: &ImageData) -> Result<Self::Texture> {
        if self.failures.texture {
            return Err(Error::Gpu("headless texture upload disabled".to_string()));
        }
        let id = self.alloc();
        self.record(BackendEvent::CreateTexture {
            id,
            width: image.width,
            height: image.height,
        });
        Ok(HeadlessTexture { id })
    }

    fn create_geometry(&mut self, mesh: &PlaneMesh) -> Result<Self::Geometry> {
        if self.failures.geometry {
            return Err(Error::Gpu("headless geometry upload disabled".to_string()));
        }
        let id = self.alloc();
        self.record(BackendEvent::CreateGeometry { id, extent: mesh.extent() });
        Ok(HeadlessGeometry { id })
    }

    fn create_material(&mut self, texture: &Self::Texture, desc: &MaterialDesc) -> Result<Self::Material> {
        if self.failures.material {
            return Err(Error::Gpu("headless material creation disabled".to_string()));
        }
        let id = self.alloc();
        self.record(BackendEvent::CreateMaterial {
            id,
            texture: texture.id,
            side: desc.side,
        });
        Ok(HeadlessMaterial { id })
    }

    fn render(
        &mut self,
        surface: &mut Self::Surface,
        frame: &FrameParams,
        mesh: Option<(&Self::Geometry, &Self::Material)>,
    ) -> Result<()> {
        if self.failures.render {
            return Err(Error::Gpu("headless render disabled".to_string()));
        }
        self.last_frame = Some(*frame);
        self.record(BackendEvent::Render {
            surface: surface.id,
            with_mesh: mesh.is_some(),
        });
        Ok(())
    }

    fn release_geometry(&mut self, geometry: Self::Geometry) {
        self.record(BackendEvent::ReleaseGeometry { id: geometry.id });
    }

    fn release_material(&mut self, material: Self::Material) {
        self.record(BackendEvent::ReleaseMaterial { id: material.id });
    }

    fn release_texture(&mut self, texture: Self::Texture) {
        self.record(BackendEvent::ReleaseTexture { id: texture.id });
    }

    fn release_surface(&mut self, surface: Self::Surface) {
        self.record(BackendEvent::ReleaseSurface { id: surface.id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photoplane_core::GeometrySpec;

    #[test]
    fn test_records_creation_and_release() {
        let mut backend = HeadlessBackend::new();
        let surface = backend.create_surface(SurfaceSize::new(4, 3)).unwrap();
        let texture = backend.create_texture(&ImageData::solid(2, 1, [0, 0, 0, 255])).unwrap();
        let geometry = backend
            .create_geometry(&PlaneMesh::from_spec(&GeometrySpec::from_aspect_ratio(2.0)))
            .unwrap();
        assert_eq!(backend.live_resources(), 3);

        backend.release_geometry(geometry);
        backend.release_texture(texture);
        backend.release_surface(surface);
        assert_eq!(backend.live_resources(), 0);
        assert_eq!(backend.events().len(), 6);
    }

    #[test]
    fn test_failure_plan() {
        let mut backend = HeadlessBackend::with_failures(FailurePlan {
            texture: true,
            ..FailurePlan::default()
        });
        assert!(backend.create_texture(&ImageData::solid(1, 1, [0; 4])).is_err());
        assert!(backend.events().is_empty());
    }
}
