//! Train command implementation.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use terra_pipeline::{
    run_training, Device, PipelineLayout, StdoutProgressSink, TrainConfig, UltralyticsBackend,
};

pub struct TrainArgs {
    pub model: String,
    pub data: Option<PathBuf>,
    pub epochs: u32,
    pub imgsz: u32,
    pub batch: u32,
    pub patience: u32,
    pub device: Device,
    pub name: String,
    pub yolo_bin: PathBuf,
}

/// Execute the train command.
///
/// Gates on the dataset layout, then hands off to the external trainer.
/// The external call blocks until the run completes and is never retried;
/// its failure propagates to the operator unmodified.
pub async fn execute(base_dir: PathBuf, args: TrainArgs) -> Result<()> {
    super::banner("Eco-Detection Training");

    let layout = PipelineLayout::new(base_dir);

    // Relative descriptor paths resolve against the base dir, matching how
    // the backend resolves them; the cwd plays no part.
    let data_manifest = match args.data {
        Some(path) if path.is_absolute() => path,
        Some(path) => layout.base().join(path),
        None => layout.data_manifest(),
    };

    let config = TrainConfig {
        base_model: args.model,
        data_manifest,
        epochs: args.epochs,
        image_size: args.imgsz,
        batch_size: args.batch,
        patience: args.patience,
        device: args.device,
        name: args.name,
        ..TrainConfig::default()
    };
    let backend = UltralyticsBackend::new(layout.base().to_path_buf())
        .with_program(args.yolo_bin);

    println!("{}", "✓ Starting training (this may take hours on a single GPU)".green());
    println!();

    let report = run_training(&layout, &config, &backend, &StdoutProgressSink).await?;

    println!();
    println!("{}", "✓ Training complete".green().bold());
    println!();
    println!("Best model: {}", report.best_checkpoint.display());
    println!("Run output: {}", report.run_dir.display().to_string().dimmed());
    println!();
    println!("Next steps:");
    println!("  1. terra export");
    println!("  2. Review training metrics in {}", report.run_dir.display());

    Ok(())
}
