use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of the best-effort copy into the frontend asset directory.
///
/// Publishing is deliberately not an error channel: a failed copy never
/// invalidates the export itself, it only means the operator completes the
/// copy by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { dest: PathBuf },
    Failed { source: PathBuf, dest: PathBuf, reason: String },
}

impl PublishOutcome {
    #[must_use]
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Copy the exported artifact to the frontend asset path.
#[must_use]
pub fn publish_artifact(source: &Path, dest: &Path) -> PublishOutcome {
    debug!(source = %source.display(), dest = %dest.display(), "publishing artifact");

    match std::fs::copy(source, dest) {
        Ok(_) => PublishOutcome::Published { dest: dest.to_path_buf() },
        Err(e) => {
            warn!(error = %e, "publish failed; artifact remains at source");
            PublishOutcome::Failed {
                source: source.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_publish_copies_artifact() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("model.onnx");
        std::fs::write(&source, b"graph").unwrap();
        let dest_dir = temp.path().join("public").join("models");
        std::fs::create_dir_all(&dest_dir).unwrap();
        let dest = dest_dir.join("model.onnx");

        let outcome = publish_artifact(&source, &dest);
        assert!(outcome.is_published());
        assert_eq!(std::fs::read(&dest).unwrap(), b"graph");
    }

    #[test]
    fn test_publish_failure_reports_both_paths() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("model.onnx");
        std::fs::write(&source, b"graph").unwrap();
        let dest = temp.path().join("no-such-dir").join("model.onnx");

        match publish_artifact(&source, &dest) {
            PublishOutcome::Failed { source: s, dest: d, reason } => {
                assert_eq!(s, source);
                assert_eq!(d, dest);
                assert!(!reason.is_empty());
            }
            PublishOutcome::Published { .. } => panic!("copy into missing dir should fail"),
        }
    }
}
