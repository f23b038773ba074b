//! GPU device + render target management.
//!
//! This module is responsible for:
//! - probing which wgpu backends can produce an adapter
//! - creating the Instance/Adapter/Device/Queue for the selected backend
//! - creating window swapchains and offscreen textures, and clearing them per frame

mod error;
mod gpu;
mod init;
mod surface;
mod target;

pub use error::SurfaceErrorAction;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use target::{FrameTarget, NativeWindow};
