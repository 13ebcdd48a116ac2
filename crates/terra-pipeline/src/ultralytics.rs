//! Production backend driving the Ultralytics `yolo` command-line tool.
//!
//! The toolchain's own progress output (epoch tables, export log) streams
//! straight to the operator's terminal via inherited stdio. This module only
//! assembles `key=value` arguments from the typed configs and verifies the
//! expected output artifacts exist after each call returns.

use crate::backend::{ModelBackend, TrainRun};
use crate::config::{ExportConfig, TrainConfig};
use crate::error::{BackendOp, PipelineError, PipelineResult};
use crate::progress::{PipelineEvent, ProgressSink};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct UltralyticsBackend {
    /// Executable to invoke; override for virtualenv installs or tests.
    program: PathBuf,
    /// Directory the toolchain runs in; relative paths in configs resolve
    /// against it, and remotely fetched pretrained weights land here.
    base_dir: PathBuf,
}

fn fmt_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

impl UltralyticsBackend {
    #[must_use]
    pub fn new(base_dir: PathBuf) -> Self {
        Self { program: PathBuf::from("yolo"), base_dir }
    }

    #[must_use]
    pub fn with_program(mut self, program: PathBuf) -> Self {
        self.program = program;
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn train_args(config: &TrainConfig) -> Vec<String> {
        let aug = &config.augmentation;
        vec![
            "detect".to_string(),
            "train".to_string(),
            format!("model={}", config.base_model),
            format!("data={}", config.data_manifest.display()),
            format!("epochs={}", config.epochs),
            format!("imgsz={}", config.image_size),
            format!("batch={}", config.batch_size),
            format!("patience={}", config.patience),
            format!("device={}", config.device),
            format!("project={}", config.project),
            format!("name={}", config.name),
            format!("exist_ok={}", fmt_bool(config.exist_ok)),
            format!("optimizer={}", config.optimizer),
            format!("lr0={}", config.initial_lr),
            format!("lrf={}", config.final_lr_fraction),
            format!("hsv_h={}", aug.hsv_h),
            format!("hsv_s={}", aug.hsv_s),
            format!("hsv_v={}", aug.hsv_v),
            format!("degrees={}", aug.degrees),
            format!("translate={}", aug.translate),
            format!("scale={}", aug.scale),
            format!("flipud={}", aug.flipud),
            format!("fliplr={}", aug.fliplr),
            format!("mosaic={}", aug.mosaic),
            format!("verbose={}", fmt_bool(config.verbose)),
            format!("plots={}", fmt_bool(config.plots)),
        ]
    }

    fn export_args(checkpoint: &Path, config: &ExportConfig) -> Vec<String> {
        vec![
            "export".to_string(),
            format!("model={}", checkpoint.display()),
            format!("format={}", config.format),
            format!("imgsz={}", config.image_size),
            format!("simplify={}", fmt_bool(config.simplify)),
            format!("opset={}", config.opset),
            format!("dynamic={}", fmt_bool(config.dynamic)),
            format!("half={}", fmt_bool(config.half)),
        ]
    }

    async fn run_toolchain(&self, op: BackendOp, args: &[String]) -> PipelineResult<()> {
        debug!(program = %self.program.display(), ?args, "invoking external toolchain");

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(&self.base_dir)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| PipelineError::Backend {
                op,
                message: format!("failed to launch '{}': {e}", self.program.display()),
            })?;

        if !status.success() {
            return Err(PipelineError::Backend {
                op,
                message: format!("'{}' exited with {status}", self.program.display()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ModelBackend for UltralyticsBackend {
    fn id(&self) -> &'static str {
        "ultralytics"
    }

    async fn train(
        &self,
        config: &TrainConfig,
        progress: &dyn ProgressSink,
    ) -> PipelineResult<TrainRun> {
        config.validate()?;

        progress.on_event(PipelineEvent::Message {
            stage: "train".to_string(),
            text: format!("fine-tuning {} on {}", config.base_model, config.data_manifest.display()),
        });

        self.run_toolchain(BackendOp::Train, &Self::train_args(config)).await?;

        let run_dir = self.base_dir.join(&config.project).join(&config.name);
        let best_checkpoint = run_dir.join("weights").join("best.pt");
        if !best_checkpoint.is_file() {
            return Err(PipelineError::Backend {
                op: BackendOp::Train,
                message: format!(
                    "training finished but no checkpoint was produced at {}",
                    best_checkpoint.display()
                ),
            });
        }

        Ok(TrainRun { best_checkpoint, run_dir })
    }

    async fn export(&self, checkpoint: &Path, config: &ExportConfig) -> PipelineResult<PathBuf> {
        config.validate()?;

        self.run_toolchain(BackendOp::Export, &Self::export_args(checkpoint, config)).await?;

        // The toolchain writes the artifact next to the checkpoint, swapping
        // the extension for the target format's.
        let artifact = self
            .resolve(checkpoint)
            .with_extension(config.format.to_string());
        if !artifact.is_file() {
            return Err(PipelineError::Backend {
                op: BackendOp::Export,
                message: format!(
                    "export finished but no artifact was produced at {}",
                    artifact.display()
                ),
            });
        }

        Ok(artifact)
    }
}
