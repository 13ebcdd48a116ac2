use crate::config::ExportConfig;
use crate::error::PipelineResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Record of a completed export, written next to the artifact.
///
/// The frontend build and the operator can verify which checkpoint and
/// export profile produced the artifact they are serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub created_at: DateTime<Utc>,
    /// Checkpoint the artifact was exported from (path or symbolic name).
    pub checkpoint: PathBuf,
    pub artifact: PathBuf,
    pub sha256: String,
    pub config: ExportConfig,
}

pub fn sha256_file(path: &Path) -> PipelineResult<String> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Write `export_manifest.json` alongside the artifact. Returns the
/// manifest path.
pub fn write_export_manifest(
    checkpoint: &Path,
    artifact: &Path,
    config: &ExportConfig,
) -> PipelineResult<PathBuf> {
    let manifest = ExportManifest {
        created_at: Utc::now(),
        checkpoint: checkpoint.to_path_buf(),
        artifact: artifact.to_path_buf(),
        sha256: sha256_file(artifact)?,
        config: config.clone(),
    };

    let path = artifact
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("export_manifest.json");
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
