use std::sync::Arc;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

/// A platform window a swapchain can be created on.
///
/// Any `raw-window-handle` window that can cross threads qualifies; hosts hand
/// one over as `Arc<dyn NativeWindow>`.
pub trait NativeWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {}

impl<T> NativeWindow for T where T: HasWindowHandle + HasDisplayHandle + Send + Sync {}

/// Where presented frames end up.
pub enum FrameTarget {
    /// Swapchain bound to a native window.
    Window {
        surface: wgpu::Surface<'static>,
        config: wgpu::SurfaceConfiguration,
    },
    /// Engine-owned texture with fixed pixel dimensions.
    Offscreen {
        texture: wgpu::Texture,
        view: wgpu::TextureView,
    },
}

impl FrameTarget {
    /// Current extent in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        match self {
            Self::Window { config, .. } => (config.width, config.height),
            Self::Offscreen { texture, .. } => (texture.width(), texture.height()),
        }
    }

    pub fn is_offscreen(&self) -> bool {
        matches!(self, Self::Offscreen { .. })
    }
}

impl std::fmt::Debug for FrameTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.size();
        let kind = if self.is_offscreen() { "Offscreen" } else { "Window" };
        write!(f, "FrameTarget::{kind}({w}x{h})")
    }
}

pub(crate) type SharedWindow = Arc<dyn NativeWindow>;
