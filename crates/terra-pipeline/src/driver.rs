//! Pipeline drivers.
//!
//! Each driver follows the same linear shape: check preconditions (abort
//! with a diagnostic), invoke the external routine (fatal on failure),
//! publish the artifact (non-fatal on failure), report.

use crate::backend::ModelBackend;
use crate::config::{ExportConfig, TrainConfig};
use crate::dataset::check_dataset_layout;
use crate::error::{PipelineError, PipelineResult};
use crate::labels::{coco_overlap, undetectable_with_coco};
use crate::layout::PipelineLayout;
use crate::manifest::write_export_manifest;
use crate::progress::{PipelineEvent, ProgressSink};
use crate::publish::{publish_artifact, PublishOutcome};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct TrainReport {
    pub best_checkpoint: PathBuf,
    pub run_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Artifact produced by the external export call.
    pub artifact: PathBuf,
    pub manifest: PathBuf,
    /// Best-effort frontend copy; `Failed` does not invalidate the export.
    pub publish: PublishOutcome,
}

#[derive(Debug, Clone)]
pub struct QuickTestReport {
    pub export: ExportReport,
    /// Eco categories the generic checkpoint detects, with COCO indices.
    pub detectable: Vec<(&'static str, usize)>,
    /// Eco categories the generic checkpoint cannot detect.
    pub undetectable: Vec<&'static str>,
}

/// Run the training pipeline: dataset gate, then the external fine-tuning
/// call. The external call blocks for the whole run (possibly hours) and
/// is never retried.
pub async fn run_training(
    layout: &PipelineLayout,
    config: &TrainConfig,
    backend: &dyn ModelBackend,
    progress: &dyn ProgressSink,
) -> PipelineResult<TrainReport> {
    config.validate()?;

    let check = check_dataset_layout(&layout.dataset_root());
    if !check.is_complete() {
        return Err(PipelineError::DatasetMissing { root: check.root, missing: check.missing });
    }

    progress.on_event(PipelineEvent::StageStarted { stage: "train".to_string() });
    let run = backend.train(config, progress).await?;
    progress.on_event(PipelineEvent::StageFinished { stage: "train".to_string() });

    info!(checkpoint = %run.best_checkpoint.display(), "training complete");
    Ok(TrainReport { best_checkpoint: run.best_checkpoint, run_dir: run.run_dir })
}

/// Run the export pipeline: checkpoint gate, external export call,
/// manifest write, best-effort frontend publish.
pub async fn run_export(
    layout: &PipelineLayout,
    checkpoint: &Path,
    model_name: &str,
    config: &ExportConfig,
    backend: &dyn ModelBackend,
) -> PipelineResult<ExportReport> {
    config.validate()?;

    if !checkpoint.is_file() {
        return Err(PipelineError::CheckpointMissing(checkpoint.to_path_buf()));
    }

    export_and_publish(layout, checkpoint, model_name, config, backend).await
}

/// Run the smoke-test pipeline: export the generic pretrained checkpoint
/// (a symbolic name the toolchain fetches itself, so no existence gate)
/// and report which eco categories its label set misses.
pub async fn run_quick_test(
    layout: &PipelineLayout,
    base_model: &str,
    model_name: &str,
    config: &ExportConfig,
    backend: &dyn ModelBackend,
) -> PipelineResult<QuickTestReport> {
    config.validate()?;

    let export =
        export_and_publish(layout, Path::new(base_model), model_name, config, backend).await?;

    Ok(QuickTestReport {
        export,
        detectable: coco_overlap(),
        undetectable: undetectable_with_coco(),
    })
}

async fn export_and_publish(
    layout: &PipelineLayout,
    checkpoint: &Path,
    model_name: &str,
    config: &ExportConfig,
    backend: &dyn ModelBackend,
) -> PipelineResult<ExportReport> {
    let artifact = backend.export(checkpoint, config).await?;
    let manifest = write_export_manifest(checkpoint, &artifact, config)?;

    let dest = layout.frontend_model_path(model_name);
    let publish = publish_artifact(&artifact, &dest);

    info!(artifact = %artifact.display(), published = publish.is_published(), "export complete");
    Ok(ExportReport { artifact, manifest, publish })
}
