//! Export command implementation.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use terra_pipeline::{
    run_export, ExportConfig, ExportReport, PipelineLayout, PublishOutcome, TrainConfig,
    UltralyticsBackend,
};

/// Execute the export command.
///
/// Verifies the trained checkpoint exists, exports it with the browser
/// profile, and publishes the artifact to the frontend asset directory.
pub async fn execute(
    base_dir: PathBuf,
    checkpoint: Option<PathBuf>,
    model_name: String,
    yolo_bin: PathBuf,
) -> Result<()> {
    super::banner("ONNX Export");

    let layout = PipelineLayout::new(base_dir);
    // Relative checkpoint paths resolve against the base dir, matching how
    // the backend resolves them; the cwd plays no part.
    let checkpoint = match checkpoint {
        Some(path) if path.is_absolute() => path,
        Some(path) => layout.base().join(path),
        None => layout.best_checkpoint(&TrainConfig::default()),
    };
    let config = ExportConfig::default();

    println!("Checkpoint: {}", checkpoint.display().to_string().dimmed());
    println!(
        "Profile:    {}x{} fp32, opset {}, simplified, static shape",
        config.image_size, config.image_size, config.opset
    );
    println!();

    let backend =
        UltralyticsBackend::new(layout.base().to_path_buf()).with_program(yolo_bin);

    let report = run_export(&layout, &checkpoint, &model_name, &config, &backend).await?;
    print_report(&report);

    Ok(())
}

/// Render the export outcome, including the non-fatal publish branch.
/// Shared with the quick-test command.
pub fn print_report(report: &ExportReport) {
    println!("{}", "✓ Export complete".green().bold());
    println!();
    println!("Artifact: {}", report.artifact.display());
    println!("Manifest: {}", report.manifest.display().to_string().dimmed());

    match &report.publish {
        PublishOutcome::Published { dest } => {
            println!("{} {}", "✓ Published to frontend:".green(), dest.display());
            println!();
            println!("Start the frontend to test: cd ../frontend && npm run dev");
        }
        PublishOutcome::Failed { source, dest, reason } => {
            println!();
            println!("{} could not copy to frontend: {reason}", "⚠".yellow().bold());
            println!();
            println!("Copy the model manually:");
            println!("  FROM: {}", source.display());
            println!("  TO:   {}", dest.display());
        }
    }
}
