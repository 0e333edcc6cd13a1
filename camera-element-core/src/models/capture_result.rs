use std::path::{Path, PathBuf};

/// Result of a successful still capture.
///
/// `width`/`height` are zero when the platform does not report dimensions
/// with its save-complete callback. This is a known limitation: the saved
/// file is not decoded to recover them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    pub uri: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl CaptureResult {
    pub fn from_saved(path: &Path, saved: &SavedImage) -> Self {
        Self {
            uri: format!("file://{}", path.display()),
            path: path.to_path_buf(),
            width: saved.width.unwrap_or(0),
            height: saved.height.unwrap_or(0),
        }
    }
}

/// What the platform reports when a still has been written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SavedImage {
    pub width: Option<u32>,
    pub height: Option<u32>,
}
