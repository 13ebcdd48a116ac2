//! Terra CLI - training/export pipeline for the eco-detection model
//!
//! Provides a `terra` command that drives the external YOLO toolchain
//! through dataset checks, fine-tuning, smoke-testing, and browser-ready
//! ONNX export with frontend publishing.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use terra_pipeline::{dataset, Device, PipelineError};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "terra",
    author,
    version,
    about = "TERRA AI - eco-detection model pipeline",
    long_about = "Drives the external YOLO toolchain through training, quick smoke-testing,\nand ONNX export, then publishes the exported model to the frontend."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Base directory of the training project (defaults to the current
    /// directory); all dataset/run/frontend paths resolve against it
    #[arg(short = 'b', long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the dataset directory layout required for training
    Check,

    /// Fine-tune the eco-detection model
    ///
    /// Requires the dataset under datasets/eco-detection/. The external
    /// training call blocks until the run finishes (potentially hours).
    Train {
        /// Baseline pretrained checkpoint (symbolic name)
        #[arg(long, default_value = "yolov8n.pt")]
        model: String,

        /// Dataset descriptor file (defaults to data.yaml under the base
        /// directory)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Number of training epochs
        #[arg(long, default_value_t = 100)]
        epochs: u32,

        /// Input image size (must be a multiple of 32)
        #[arg(long, default_value_t = 640)]
        imgsz: u32,

        /// Batch size (adjust to available VRAM)
        #[arg(long, default_value_t = 16)]
        batch: u32,

        /// Early stopping patience, in epochs
        #[arg(long, default_value_t = 20)]
        patience: u32,

        /// Compute device: GPU index or 'cpu'
        #[arg(long, default_value = "0")]
        device: Device,

        /// Run name under runs/eco-detect/
        #[arg(long, default_value = "v1")]
        name: String,

        /// Path to the external 'yolo' executable
        #[arg(long, default_value = "yolo")]
        yolo_bin: PathBuf,
    },

    /// Export the trained checkpoint to browser-ready ONNX
    ///
    /// Verifies the checkpoint exists, exports with the fixed browser
    /// profile (640x640, fp32, opset 12, simplified, static shape), and
    /// copies the result into the frontend's public/models directory.
    Export {
        /// Trained checkpoint to export (defaults to the v1 run's best.pt)
        #[arg(long)]
        checkpoint: Option<PathBuf>,

        /// File name (without extension) of the published model
        #[arg(long, default_value = terra_pipeline::DEFAULT_MODEL_NAME)]
        model_name: String,

        /// Path to the external 'yolo' executable
        #[arg(long, default_value = "yolo")]
        yolo_bin: PathBuf,
    },

    /// Export the generic pretrained model for pipeline smoke-testing
    ///
    /// Skips custom training entirely; the resulting model only knows the
    /// generic COCO label set, not the eco-action categories.
    QuickTest {
        /// Generic pretrained checkpoint (symbolic name)
        #[arg(long, default_value = "yolov8n.pt")]
        model: String,

        /// File name (without extension) of the published model
        #[arg(long, default_value = terra_pipeline::DEFAULT_MODEL_NAME)]
        model_name: String,

        /// Path to the external 'yolo' executable
        #[arg(long, default_value = "yolo")]
        yolo_bin: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let base_dir = match resolve_base_dir(args.base_dir) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Command::Check => commands::check::execute(base_dir).await,
        Command::Train { model, data, epochs, imgsz, batch, patience, device, name, yolo_bin } => {
            commands::train::execute(
                base_dir,
                commands::train::TrainArgs {
                    model,
                    data,
                    epochs,
                    imgsz,
                    batch,
                    patience,
                    device,
                    name,
                    yolo_bin,
                },
            )
            .await
        }
        Command::Export { checkpoint, model_name, yolo_bin } => {
            commands::export::execute(base_dir, checkpoint, model_name, yolo_bin).await
        }
        Command::QuickTest { model, model_name, yolo_bin } => {
            commands::quick_test::execute(base_dir, model, model_name, yolo_bin).await
        }
    };

    if let Err(e) = result {
        std::process::exit(report_error(&e).into());
    }
}

fn resolve_base_dir(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match flag {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}

fn init_tracing(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Present the failure with actionable guidance and pick the exit code:
/// 2 for precondition failures, 1 for everything else.
fn report_error(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::DatasetMissing { root, missing }) => {
            eprintln!("{} dataset not found", "✗".red().bold());
            eprintln!();
            eprintln!("Download the dataset export and extract it so that these exist:");
            eprint!("{}", dataset::expected_layout(root));
            eprintln!();
            eprintln!("Missing:");
            for path in missing {
                eprintln!("  {}", path.display().to_string().red());
            }
            2
        }
        Some(PipelineError::CheckpointMissing(path)) => {
            eprintln!("{} trained checkpoint not found at {}", "✗".red().bold(), path.display());
            eprintln!();
            eprintln!("Run training first:");
            eprintln!("  terra train");
            2
        }
        _ => {
            eprintln!("{} {err:#}", "error:".red().bold());
            1
        }
    }
}
