//! Lumen engine crate.
//!
//! This crate owns the renderer side of the bootstrap: the `EngineRuntime`
//! capability trait consumed by hosts, its wgpu implementation, and scene loading.

pub mod device;
pub mod runtime;
pub mod scene;
pub mod time;

pub mod logging;
