//! Dataset preconditions check command.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use terra_pipeline::{check_dataset_layout, PipelineError, PipelineLayout, REQUIRED_SUBDIRS};

/// Execute the check command.
///
/// Read-only diagnostic of the dataset layout; exits with the
/// precondition code when the layout is incomplete.
pub async fn execute(base_dir: PathBuf) -> Result<()> {
    super::banner("Dataset Check");

    let layout = PipelineLayout::new(base_dir);
    let root = layout.dataset_root();
    println!("Dataset root: {}", root.display().to_string().dimmed());
    println!();

    let check = check_dataset_layout(&root);

    for sub in REQUIRED_SUBDIRS {
        let dir = root.join(sub);
        if dir.is_dir() {
            println!("  {} {}  ({} files)", "✓".green(), sub, count_files(&dir));
        } else {
            println!("  {} {}  (missing)", "✗".red(), sub);
        }
    }
    println!();

    if check.is_complete() {
        println!("{}", "✓ Dataset layout is complete".green().bold());
        println!();
        println!("Next step:");
        println!("  terra train");
        Ok(())
    } else {
        Err(PipelineError::DatasetMissing { root: check.root, missing: check.missing }.into())
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).filter(|e| e.path().is_file()).count())
        .unwrap_or(0)
}
