//! Bootstrap controller.
//!
//! Owns the association between host windows and engine resources. Every
//! window gets a [`Session`] that walks
//! `Created -> EngineAttached -> Running -> Closing -> Released`; the scene is
//! always released before the surface, and both before the host window is
//! finalized.

mod config;
mod controller;
mod error;
mod session;

#[cfg(test)]
mod fake;

pub use config::{BootstrapConfig, ExitPolicy, SurfaceBinding};
pub use controller::{Bootstrap, ClosedSession};
pub use error::BootstrapError;
pub use session::{EventHandler, Session, SessionState, SubscriptionId};
