use crate::config::{ExportConfig, TrainConfig};
use crate::error::PipelineResult;
use crate::progress::ProgressSink;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Outcome of a successful training call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRun {
    /// Best-performing checkpoint produced by the run.
    pub best_checkpoint: PathBuf,
    /// Run directory holding logs, metric plots, and all checkpoints.
    pub run_dir: PathBuf,
}

/// Typed boundary to the external training/export toolchain.
///
/// Both operations are blocking from the pipeline's perspective: training
/// may run for hours, and neither call is retried or recovered on failure.
/// Failures surface as `PipelineError::Backend` with the toolchain's own
/// context and propagate to the operator unmodified.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    fn id(&self) -> &'static str;

    /// Fine-tune the configured base model. Returns the produced
    /// checkpoint paths on success.
    async fn train(
        &self,
        config: &TrainConfig,
        progress: &dyn ProgressSink,
    ) -> PipelineResult<TrainRun>;

    /// Export a checkpoint to the configured inference format. The
    /// checkpoint may be a concrete path or a symbolic pretrained name the
    /// toolchain resolves (and fetches) itself. Returns the path of the
    /// produced artifact.
    async fn export(&self, checkpoint: &Path, config: &ExportConfig) -> PipelineResult<PathBuf>;
}
