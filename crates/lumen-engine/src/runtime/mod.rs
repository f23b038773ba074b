//! Engine runtime handle.
//!
//! [`EngineRuntime`] is the narrow capability surface hosts drive: enumerate
//! and select a renderer, build surfaces and scenes, start presentation, and
//! release. [`GpuEngine`] is the wgpu-backed implementation; hosts are tested
//! against fakes of the trait.

mod error;
mod gpu_engine;
mod presenter;

use std::path::Path;
use std::sync::Arc;

pub use error::EngineError;
pub use gpu_engine::{GpuEngine, GpuScene, GpuSurface, RENDERER_BACKENDS};

use crate::device::NativeWindow;

/// Explicit placement for an engine-owned surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SurfaceGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl SurfaceGeometry {
    /// Windowed geometry at the origin.
    pub fn windowed(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            fullscreen: false,
        }
    }
}

/// The two forms a surface can be constructed from.
#[derive(Clone)]
pub enum SurfaceTarget {
    Geometry(SurfaceGeometry),
    /// Bind to an existing platform window. `width`/`height` are its current
    /// physical size.
    Native {
        window: Arc<dyn NativeWindow>,
        width: u32,
        height: u32,
    },
}

impl SurfaceTarget {
    pub fn size(&self) -> (u32, u32) {
        match self {
            Self::Geometry(g) => (g.width, g.height),
            Self::Native { width, height, .. } => (*width, *height),
        }
    }
}

impl std::fmt::Debug for SurfaceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry(g) => f.debug_tuple("Geometry").field(g).finish(),
            Self::Native { width, height, .. } => f
                .debug_struct("Native")
                .field("width", width)
                .field("height", height)
                .finish_non_exhaustive(),
        }
    }
}

/// Capability contract of a rendering engine.
///
/// Surfaces and scenes are owned by the caller and handed back for release.
/// Presentation started by [`run`](Self::run) happens on the engine's own
/// schedule and never blocks the caller.
pub trait EngineRuntime {
    type Surface;
    type Scene;

    /// Available renderer backends, in engine order. Every call takes a fresh snapshot.
    fn renderer_names(&self) -> Vec<String>;

    /// Activates a renderer from the enumeration. Must precede surface construction.
    fn select_renderer(&mut self, name: &str) -> Result<(), EngineError>;

    fn create_surface(&mut self, target: SurfaceTarget) -> Result<Self::Surface, EngineError>;

    fn load_scene(&mut self, path: &Path) -> Result<Self::Scene, EngineError>;

    /// Starts continuous presentation of `scene` on `surface`.
    fn run(&mut self, surface: &mut Self::Surface, scene: &Self::Scene) -> Result<(), EngineError>;

    /// Follows a host window resize.
    fn resize_surface(
        &mut self,
        surface: &mut Self::Surface,
        width: u32,
        height: u32,
    ) -> Result<(), EngineError> {
        let _ = (surface, width, height);
        Ok(())
    }

    /// Releases a scene. Presentation driving it stops before its next frame.
    fn release_scene(&mut self, scene: Self::Scene) -> Result<(), EngineError>;

    /// Releases a surface, stopping its presentation first.
    fn release_surface(&mut self, surface: Self::Surface) -> Result<(), EngineError>;
}
