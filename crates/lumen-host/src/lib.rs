//! Lumen host crate.
//!
//! Sequences host windows against an engine runtime: one session per window,
//! each owning exactly one surface and one scene, created and torn down in a
//! fixed order.

pub mod bootstrap;
pub mod platform;
pub mod runtime;
