use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input resolutions must be multiples of the model stride.
const MODEL_STRIDE: u32 = 32;

/// Compute device selector passed to the external toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Cuda(u32),
    Cpu,
}

impl Default for Device {
    fn default() -> Self {
        Self::Cuda(0)
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cuda(index) => write!(f, "{index}"),
            Self::Cpu => write!(f, "cpu"),
        }
    }
}

impl std::str::FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("cpu") {
            return Ok(Self::Cpu);
        }
        s.parse::<u32>()
            .map(Self::Cuda)
            .map_err(|_| format!("invalid device selector '{s}' (expected GPU index or 'cpu')"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optimizer {
    AdamW,
    Sgd,
    Auto,
}

impl std::fmt::Display for Optimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AdamW => write!(f, "AdamW"),
            Self::Sgd => write!(f, "SGD"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// Augmentation magnitudes forwarded to the external trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Augmentation {
    pub hsv_h: f64,
    pub hsv_s: f64,
    pub hsv_v: f64,
    pub degrees: f64,
    pub translate: f64,
    pub scale: f64,
    pub flipud: f64,
    pub fliplr: f64,
    pub mosaic: f64,
}

impl Default for Augmentation {
    fn default() -> Self {
        Self {
            hsv_h: 0.015,
            hsv_s: 0.7,
            hsv_v: 0.4,
            degrees: 10.0,
            translate: 0.1,
            scale: 0.5,
            flipud: 0.0,
            fliplr: 0.5,
            mosaic: 1.0,
        }
    }
}

impl Augmentation {
    pub fn validate(&self) -> PipelineResult<()> {
        for (name, value) in [
            ("flipud", self.flipud),
            ("fliplr", self.fliplr),
            ("mosaic", self.mosaic),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PipelineError::InvalidConfig(format!(
                    "{name} must be a probability in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Full configuration for one fine-tuning run.
///
/// Defaults reproduce the eco-detection training profile; every field can
/// be overridden before `validate()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Baseline pretrained checkpoint, by symbolic name (fetched remotely
    /// by the toolchain if not cached locally).
    pub base_model: String,
    /// Dataset descriptor file.
    pub data_manifest: PathBuf,
    pub epochs: u32,
    pub image_size: u32,
    pub batch_size: u32,
    /// Early stopping patience, in epochs.
    pub patience: u32,
    pub device: Device,
    /// Run namespace: output lands in `<project>/<name>/`.
    pub project: String,
    pub name: String,
    /// Overwrite an existing run directory instead of suffixing the name.
    pub exist_ok: bool,
    pub optimizer: Optimizer,
    pub initial_lr: f64,
    /// Final learning rate as a fraction of `initial_lr`.
    pub final_lr_fraction: f64,
    pub augmentation: Augmentation,
    pub verbose: bool,
    pub plots: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            base_model: "yolov8n.pt".to_string(),
            data_manifest: PathBuf::from("data.yaml"),
            epochs: 100,
            image_size: 640,
            batch_size: 16,
            patience: 20,
            device: Device::default(),
            project: "runs/eco-detect".to_string(),
            name: "v1".to_string(),
            exist_ok: true,
            optimizer: Optimizer::AdamW,
            initial_lr: 0.001,
            final_lr_fraction: 0.01,
            augmentation: Augmentation::default(),
            verbose: true,
            plots: true,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> PipelineResult<()> {
        if self.base_model.trim().is_empty() {
            return Err(PipelineError::InvalidConfig("base_model is required".to_string()));
        }
        if self.epochs == 0 {
            return Err(PipelineError::InvalidConfig("epochs must be >= 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(PipelineError::InvalidConfig("batch_size must be >= 1".to_string()));
        }
        if self.patience == 0 {
            return Err(PipelineError::InvalidConfig("patience must be >= 1".to_string()));
        }
        if self.image_size == 0 || self.image_size % MODEL_STRIDE != 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "image_size must be a positive multiple of {MODEL_STRIDE}, got {}",
                self.image_size
            )));
        }
        if !self.initial_lr.is_finite() || self.initial_lr <= 0.0 {
            return Err(PipelineError::InvalidConfig("initial_lr must be > 0".to_string()));
        }
        if !self.final_lr_fraction.is_finite()
            || self.final_lr_fraction <= 0.0
            || self.final_lr_fraction > 1.0
        {
            return Err(PipelineError::InvalidConfig(
                "final_lr_fraction must be in (0, 1]".to_string(),
            ));
        }
        if self.project.trim().is_empty() || self.name.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "project and name are required".to_string(),
            ));
        }
        self.augmentation.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Onnx,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Onnx => write!(f, "onnx"),
        }
    }
}

/// Export profile for browser inference.
///
/// The defaults are deliberately conservative: fixed 640x640 input shape,
/// full fp32 precision, and opset 12, which the onnxruntime-web runtime
/// accepts without shape polymorphism or half-precision fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub image_size: u32,
    /// Run the graph simplification pass on the exported model.
    pub simplify: bool,
    pub opset: u32,
    /// Dynamic input axes; kept off for stable browser performance.
    pub dynamic: bool,
    /// Half precision; kept off for runtime compatibility.
    pub half: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Onnx,
            image_size: 640,
            simplify: true,
            opset: 12,
            dynamic: false,
            half: false,
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> PipelineResult<()> {
        if self.image_size == 0 || self.image_size % MODEL_STRIDE != 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "image_size must be a positive multiple of {MODEL_STRIDE}, got {}",
                self.image_size
            )));
        }
        // Opsets below 7 predate the ONNX IR freeze; the toolchain itself
        // caps support at 19.
        if !(7..=19).contains(&self.opset) {
            return Err(PipelineError::InvalidConfig(format!(
                "opset must be in 7..=19, got {}",
                self.opset
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_defaults_match_profile() {
        let config = TrainConfig::default();
        assert_eq!(config.epochs, 100);
        assert_eq!(config.image_size, 640);
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.patience, 20);
        assert_eq!(config.optimizer, Optimizer::AdamW);
        assert!((config.initial_lr - 0.001).abs() < f64::EPSILON);
        assert!(config.exist_ok);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_export_defaults_match_browser_profile() {
        let config = ExportConfig::default();
        assert_eq!(config.opset, 12);
        assert_eq!(config.image_size, 640);
        assert!(config.simplify);
        assert!(!config.dynamic);
        assert!(!config.half);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_train_validate_rejects_degenerate_values() {
        let mut config = TrainConfig::default();
        config.epochs = 0;
        assert!(config.validate().is_err());

        let mut config = TrainConfig::default();
        config.image_size = 633;
        assert!(config.validate().is_err());

        let mut config = TrainConfig::default();
        config.augmentation.mosaic = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_validate_rejects_out_of_range_opset() {
        let mut config = ExportConfig::default();
        config.opset = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_device_round_trip() {
        assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
        assert_eq!("1".parse::<Device>().unwrap(), Device::Cuda(1));
        assert!("gpu".parse::<Device>().is_err());
        assert_eq!(Device::Cuda(0).to_string(), "0");
        assert_eq!(Device::Cpu.to_string(), "cpu");
    }
}
