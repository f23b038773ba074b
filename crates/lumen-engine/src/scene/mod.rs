//! Scene descriptions.
//!
//! A scene is loaded from a small line-oriented text file and is immutable once
//! loaded. Presenters read it concurrently through an `Arc`.

mod error;
mod graph;
mod loader;

pub use error::SceneError;
pub use graph::{Camera, ClearColor, Node, Scene};
