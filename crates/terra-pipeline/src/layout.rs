use crate::config::TrainConfig;
use std::path::{Path, PathBuf};

/// Default file name of the published browser model.
pub const DEFAULT_MODEL_NAME: &str = "yolov8n-eco";

/// Filesystem layout for the training/export pipeline.
///
/// Every path is derived from an explicit base directory (normally the
/// `training/` directory of the project); nothing mutates the process
/// working directory.
#[derive(Debug, Clone)]
pub struct PipelineLayout {
    base: PathBuf,
}

impl PipelineLayout {
    #[must_use]
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Dataset root, `datasets/eco-detection/`.
    #[must_use]
    pub fn dataset_root(&self) -> PathBuf {
        self.base.join("datasets").join("eco-detection")
    }

    /// Dataset descriptor consumed by the external trainer.
    #[must_use]
    pub fn data_manifest(&self) -> PathBuf {
        self.base.join("data.yaml")
    }

    /// Run directory for a training configuration, `runs/<project>/<name>/`.
    #[must_use]
    pub fn run_dir(&self, config: &TrainConfig) -> PathBuf {
        self.base.join(&config.project).join(&config.name)
    }

    /// Best checkpoint produced by a training run.
    #[must_use]
    pub fn best_checkpoint(&self, config: &TrainConfig) -> PathBuf {
        self.run_dir(config).join("weights").join("best.pt")
    }

    /// Static-asset directory of the sibling frontend project.
    #[must_use]
    pub fn frontend_models_dir(&self) -> PathBuf {
        self.base.join("..").join("frontend").join("public").join("models")
    }

    /// Publish destination for an exported model.
    #[must_use]
    pub fn frontend_model_path(&self, model_name: &str) -> PathBuf {
        self.frontend_models_dir().join(format!("{model_name}.onnx"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = PipelineLayout::new(PathBuf::from("/work/training"));
        let config = TrainConfig::default();

        assert_eq!(
            layout.dataset_root(),
            PathBuf::from("/work/training/datasets/eco-detection")
        );
        assert_eq!(layout.data_manifest(), PathBuf::from("/work/training/data.yaml"));
        assert_eq!(
            layout.best_checkpoint(&config),
            PathBuf::from("/work/training/runs/eco-detect/v1/weights/best.pt")
        );
        assert!(layout
            .frontend_model_path(DEFAULT_MODEL_NAME)
            .to_string_lossy()
            .ends_with("frontend/public/models/yolov8n-eco.onnx"));
    }

    #[test]
    fn test_run_dir_follows_project_and_name() {
        let layout = PipelineLayout::new(PathBuf::from("/t"));
        let config = TrainConfig {
            project: "runs/other".to_string(),
            name: "v2".to_string(),
            ..TrainConfig::default()
        };
        assert_eq!(layout.run_dir(&config), PathBuf::from("/t/runs/other/v2"));
    }
}
