//! Directory collector
//!
//! Walks a manifest root and buckets YAML files by the directory that holds them.
//! Keys are paths relative to the root and every bucket is sorted, so the walk
//! order of the underlying filesystem never leaks into the result.

use crate::error::MergeError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// File name suffixes treated as YAML manifests.
pub const YAML_EXTENSIONS: [&str; 2] = [".yaml", ".yml"];

/// Relative directory path -> sorted manifest file names.
pub type DirectoryBuckets = BTreeMap<String, Vec<String>>;

/// Collector configuration
#[derive(Debug, Clone, Default)]
pub struct CollectorConfig {
    /// Whether to descend into symlinked directories (default: false)
    pub follow_symlinks: bool,
}

/// Collects manifest files below a root directory
pub struct Collector {
    root: PathBuf,
    config: CollectorConfig,
}

impl Collector {
    /// Create a collector for the given root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: CollectorConfig::default(),
        }
    }

    /// Create a collector with custom configuration
    pub fn with_config(root: impl Into<PathBuf>, config: CollectorConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Walk the root and build the directory buckets.
    ///
    /// Files sitting directly in the root are never collected. Directories without
    /// any manifest file do not get an entry. A missing or unreadable root is fatal;
    /// failures further down are logged and the affected subtree is skipped.
    pub fn collect(&self) -> Result<DirectoryBuckets, MergeError> {
        let metadata = std::fs::metadata(&self.root).map_err(|source| MergeError::RootUnreadable {
            path: self.root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(MergeError::RootUnreadable {
                path: self.root.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
            });
        }

        let mut buckets = DirectoryBuckets::new();
        let walker = WalkDir::new(&self.root).follow_links(self.config.follow_symlinks);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(self.root_error(e)),
                Err(e) => {
                    warn!("Skipping unreadable path below {}: {}", self.root.display(), e);
                    continue;
                }
            };

            // Depth 1 files live in the root itself
            if entry.depth() < 2 || !is_regular_file(&entry) {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                warn!("Skipping non UTF8 file name: {:?}", entry.path());
                continue;
            };
            if !is_yaml_file_name(file_name) {
                continue;
            }

            let Some(dir_key) = self.relative_dir(entry.path()) else {
                warn!("Skipping file with non UTF8 directory: {:?}", entry.path());
                continue;
            };

            debug!(directory = %dir_key, file = %file_name, "Collected manifest file");
            buckets
                .entry(dir_key)
                .or_default()
                .push(file_name.to_string());
        }

        for files in buckets.values_mut() {
            files.sort();
        }

        Ok(buckets)
    }

    fn relative_dir(&self, file_path: &Path) -> Option<String> {
        let parent = file_path.parent()?;
        let relative = parent.strip_prefix(&self.root).ok()?;
        relative.to_str().map(str::to_string)
    }

    fn root_error(&self, err: walkdir::Error) -> MergeError {
        match err.into_io_error() {
            Some(source) => MergeError::RootUnreadable {
                path: self.root.clone(),
                source,
            },
            None => MergeError::RootUnreadable {
                path: self.root.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"),
            },
        }
    }
}

/// True when the name carries one of the manifest suffixes (case sensitive).
pub fn is_yaml_file_name(name: &str) -> bool {
    YAML_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    // Unfollowed symlinks still count when they point at a file
    file_type.is_symlink()
        && std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
}
