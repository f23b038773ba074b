//! Host window contract.
//!
//! The controller only sees [`HostPlatform`]; the winit runtime implements it,
//! and tests use an in-memory fake.

mod events;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lumen_engine::device::NativeWindow;

pub use events::{DirtyRect, EventKind, FrameImage, InputEvent, PointerButton, WindowEvent};

/// Host-assigned window identity. Never reused within a process.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Which host events are forwarded into the session.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IntegrationFlags {
    pub forward_input: bool,
    pub forward_paint: bool,
}

impl Default for IntegrationFlags {
    fn default() -> Self {
        Self {
            forward_input: true,
            forward_paint: true,
        }
    }
}

/// Requested window configuration.
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub title: String,
    /// Logical pixels.
    pub width: u32,
    pub height: u32,
    pub visible: bool,
    /// Whether the platform draws decorations.
    pub framed: bool,
    pub integration: IntegrationFlags,
    /// UI content file loaded into the window after creation.
    pub content: Option<PathBuf>,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            width: 800,
            height: 600,
            visible: true,
            framed: true,
            integration: IntegrationFlags::default(),
            content: None,
        }
    }
}

/// A live window as reported by the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowHandle {
    pub id: WindowId,
    /// Current drawable size in physical pixels.
    pub width: u32,
    pub height: u32,
    pub visible: bool,
    pub framed: bool,
    pub integration: IntegrationFlags,
}

/// Windowing services the bootstrap controller consumes.
pub trait HostPlatform {
    fn create_window(&mut self, spec: &WindowSpec) -> anyhow::Result<WindowHandle>;

    fn load_content(&mut self, window: WindowId, path: &Path) -> anyhow::Result<()>;

    /// Raw handle for binding an engine swapchain, when the platform exposes one.
    fn native_window(&self, window: WindowId) -> Option<Arc<dyn NativeWindow>>;

    fn window_count(&self) -> usize;

    /// Destroys the platform window. Called only after its session has released
    /// every engine resource.
    fn finalize_window(&mut self, window: WindowId);

    /// Best-effort memory reclamation. Returns `false` when the host has none.
    fn reclaim_resources(&mut self) -> bool {
        false
    }

    fn quit(&mut self);
}
