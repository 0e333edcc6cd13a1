use std::fs;
use std::path::{Path, PathBuf};

use crate::models::error::CaptureError;

/// Where captured stills are written and how they are named.
///
/// Files are `<prefix>_<yyyyMMdd_HHmmss_SSS>_<8 hex>.jpg`; the random suffix
/// keeps two captures inside the same millisecond apart.
#[derive(Debug, Clone)]
pub struct OutputLocation {
    directory: PathBuf,
    prefix: String,
}

impl OutputLocation {
    pub fn new(directory: PathBuf, prefix: impl Into<String>) -> Self {
        Self {
            directory,
            prefix: prefix.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Allocate a fresh output path, creating the directory if needed.
    ///
    /// The returned path is always absolute; a relative directory resolves
    /// against the current working directory.
    pub fn next_file(&self) -> Result<PathBuf, CaptureError> {
        let directory = std::path::absolute(&self.directory)
            .map_err(|e| CaptureError::Storage(format!("failed to resolve output directory: {}", e)))?;
        fs::create_dir_all(&directory)
            .map_err(|e| CaptureError::Storage(format!("failed to create directory: {}", e)))?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let file_name = format!("{}_{}_{}.jpg", self.prefix, timestamp, &suffix[..8]);
        Ok(directory.join(file_name))
    }
}
