use std::path::PathBuf;

/// Failure to produce a [`Scene`](super::Scene) from a resource path.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read scene file `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `line` is 1-based.
    #[error("scene parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl SceneError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
