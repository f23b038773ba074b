//! Time subsystem.
//!
//! One `FrameClock` per presenter thread; call `tick()` once per presented frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
