use std::path::PathBuf;

use lumen_engine::runtime::EngineError;

use crate::platform::WindowId;

use super::SessionState;

/// Failures surfaced by the bootstrap controller.
///
/// Engine failures are fatal to the affected window's session only: the
/// window stays open without a running scene until it is closed.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("engine reported no renderer backends")]
    EnumerationEmpty,

    #[error("renderer `{name}` was not accepted")]
    RendererSelectionFailed {
        name: String,
        #[source]
        source: EngineError,
    },

    #[error("failed to construct surface for {window}")]
    SurfaceConstructionFailed {
        window: WindowId,
        #[source]
        source: EngineError,
    },

    #[error("failed to load scene `{}`", path.display())]
    SceneLoadFailed {
        path: PathBuf,
        #[source]
        source: EngineError,
    },

    #[error("failed to start scene on {window}")]
    SceneStartFailed {
        window: WindowId,
        #[source]
        source: EngineError,
    },

    #[error("failed to release {resource} of {window}")]
    TeardownFailed {
        window: WindowId,
        resource: &'static str,
        #[source]
        source: EngineError,
    },

    #[error("failed to create host window")]
    WindowCreation(#[source] anyhow::Error),

    #[error("{0} has no session")]
    UnknownWindow(WindowId),

    #[error("{window} is {state:?}; expected {expected:?}")]
    InvalidState {
        window: WindowId,
        state: SessionState,
        expected: SessionState,
    },
}
