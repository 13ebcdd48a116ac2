use std::path::PathBuf;
use thiserror::Error;

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Which external toolchain entry point failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOp {
    Train,
    Export,
}

impl std::fmt::Display for BackendOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Train => write!(f, "train"),
            Self::Export => write!(f, "export"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Dataset root or one of its required subdirectories is absent.
    #[error("dataset not found under {}", root.display())]
    DatasetMissing { root: PathBuf, missing: Vec<PathBuf> },

    /// Trained checkpoint is absent at the expected path.
    #[error("trained checkpoint not found at {}", .0.display())]
    CheckpointMissing(PathBuf),

    #[error("invalid pipeline config: {0}")]
    InvalidConfig(String),

    /// The external toolchain call itself failed. Fatal, never retried.
    #[error("external {op} call failed: {message}")]
    Backend { op: BackendOp, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Precondition failures abort before the external call and map to a
    /// distinct exit code; everything else is an external/internal fault.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::DatasetMissing { .. } | Self::CheckpointMissing(_))
    }
}
