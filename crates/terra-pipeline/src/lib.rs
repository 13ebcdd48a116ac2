//! Terra Pipeline
//!
//! Driver layer for the eco-detection model lifecycle:
//! - Checking dataset preconditions before training starts
//! - Configuring and invoking the external YOLO toolchain (`Trainer`/export)
//! - Exporting trained checkpoints to browser-ready ONNX
//! - Publishing exported artifacts to the frontend asset directory
//!
//! The neural network, training loop, and ONNX graph generation all live in
//! the external toolchain; this crate owns the configuration passed in, the
//! paths expected out, and the precondition/publish steps around the calls.

pub mod backend;
pub mod config;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod labels;
pub mod layout;
pub mod manifest;
pub mod progress;
pub mod publish;
pub mod ultralytics;

pub use backend::{ModelBackend, TrainRun};
pub use config::{Augmentation, Device, ExportConfig, ExportFormat, Optimizer, TrainConfig};
pub use dataset::{check_dataset_layout, expected_layout, DatasetCheck, REQUIRED_SUBDIRS};
pub use driver::{run_export, run_quick_test, run_training, ExportReport, QuickTestReport, TrainReport};
pub use error::{BackendOp, PipelineError, PipelineResult};
pub use labels::{coco_index, coco_overlap, undetectable_with_coco, COCO_CLASSES, ECO_CLASSES};
pub use layout::{PipelineLayout, DEFAULT_MODEL_NAME};
pub use manifest::{sha256_file, write_export_manifest, ExportManifest};
pub use progress::{NullProgressSink, PipelineEvent, ProgressSink, StdoutProgressSink};
pub use publish::{publish_artifact, PublishOutcome};
pub use ultralytics::UltralyticsBackend;
