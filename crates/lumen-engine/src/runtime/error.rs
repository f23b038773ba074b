use crate::scene::SceneError;

/// Errors reported by an [`EngineRuntime`](super::EngineRuntime).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no renderer has been selected")]
    NoRenderer,

    #[error("unknown renderer `{0}`")]
    UnknownRenderer(String),

    #[error("cannot switch renderer from `{active}` to `{requested}` while surfaces are alive")]
    RendererBusy { active: String, requested: String },

    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unsupported surface target: {0}")]
    UnsupportedTarget(String),

    #[error(transparent)]
    SceneLoad(#[from] SceneError),

    #[error("gpu operation failed")]
    Gpu(#[source] anyhow::Error),

    #[error("failed to spawn presenter thread")]
    Spawn(#[source] std::io::Error),

    #[error("presenter thread panicked")]
    PresenterPanicked,
}
