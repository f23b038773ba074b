use std::path::PathBuf;

use crate::platform::WindowSpec;

/// How a session's surface is bound to its window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SurfaceBinding {
    /// Engine-owned surface sized from the window's pixel dimensions.
    #[default]
    Geometry,
    /// Swapchain on the host window's native handle.
    Native,
}

/// What happens once the last window has closed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitPolicy {
    QuitWhenAllClosed,
    /// Keep the process alive; a later activation recreates a window.
    KeepAlive,
}

impl Default for ExitPolicy {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::KeepAlive
        } else {
            Self::QuitWhenAllClosed
        }
    }
}

/// Controller configuration.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub window: WindowSpec,
    /// Scene loaded into every window's session.
    pub scene_path: PathBuf,
    /// Renderer to select. `None` selects the first one the engine reports.
    pub preferred_renderer: Option<String>,
    pub surface_binding: SurfaceBinding,
    /// Fullscreen flag passed with geometry surfaces.
    pub fullscreen: bool,
    pub exit_policy: ExitPolicy,
    /// Install logging subscribers for paint and input on new windows.
    pub log_events: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            window: WindowSpec::default(),
            scene_path: PathBuf::from("scenes/main.txt"),
            preferred_renderer: None,
            surface_binding: SurfaceBinding::default(),
            fullscreen: false,
            exit_policy: ExitPolicy::default(),
            log_events: true,
        }
    }
}
