use std::path::{Path, PathBuf};

/// Subdirectories every usable dataset export must contain.
pub const REQUIRED_SUBDIRS: [&str; 4] = [
    "train/images",
    "train/labels",
    "valid/images",
    "valid/labels",
];

/// Result of checking the dataset directory layout.
#[derive(Debug, Clone)]
pub struct DatasetCheck {
    pub root: PathBuf,
    /// Required subdirectories that are absent, in declaration order.
    pub missing: Vec<PathBuf>,
}

impl DatasetCheck {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// One-shot precondition gate: read-only, no retries.
#[must_use]
pub fn check_dataset_layout(root: &Path) -> DatasetCheck {
    let missing = REQUIRED_SUBDIRS
        .iter()
        .map(|sub| root.join(sub))
        .filter(|path| !path.is_dir())
        .collect();

    DatasetCheck { root: root.to_path_buf(), missing }
}

/// Human-readable description of the expected layout, for diagnostics.
#[must_use]
pub fn expected_layout(root: &Path) -> String {
    let mut out = String::new();
    for sub in REQUIRED_SUBDIRS {
        out.push_str("  ");
        out.push_str(&root.join(sub).display().to_string());
        out.push('/');
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_root_reports_all_subdirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("datasets").join("eco-detection");

        let check = check_dataset_layout(&root);
        assert!(!check.is_complete());
        assert_eq!(check.missing.len(), REQUIRED_SUBDIRS.len());
    }

    #[test]
    fn test_partial_layout_reports_only_missing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        std::fs::create_dir_all(root.join("train/images")).unwrap();
        std::fs::create_dir_all(root.join("train/labels")).unwrap();

        let check = check_dataset_layout(&root);
        assert_eq!(check.missing.len(), 2);
        assert!(check.missing.iter().all(|p| p.to_string_lossy().contains("valid")));
    }

    #[test]
    fn test_complete_layout_passes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        for sub in REQUIRED_SUBDIRS {
            std::fs::create_dir_all(root.join(sub)).unwrap();
        }

        assert!(check_dataset_layout(&root).is_complete());
    }

    #[test]
    fn test_file_in_place_of_directory_counts_as_missing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        std::fs::create_dir_all(root.join("train")).unwrap();
        std::fs::write(root.join("train/images"), b"not a directory").unwrap();

        let check = check_dataset_layout(&root);
        assert!(check.missing.iter().any(|p| p.ends_with("train/images")));
    }

    #[test]
    fn test_expected_layout_lists_every_subdir() {
        let text = expected_layout(Path::new("datasets/eco-detection"));
        for sub in REQUIRED_SUBDIRS {
            assert!(text.contains(sub));
        }
    }
}
