use std::path::Path;

use crate::models::capture_result::SavedImage;
use crate::models::hardware::{CaptureFlash, MeteringPoint, ZoomRange};

/// Completion for a still capture. Fires on a platform executor thread.
pub type CaptureCallback = Box<dyn FnOnce(Result<SavedImage, String>) + Send + 'static>;

/// Controls of a bound camera device.
///
/// All setters are fire-and-forget, matching platform camera controls.
pub trait CameraDevice: Send + Sync {
    /// Current zoom ratio bounds, or `None` when not yet reported.
    fn zoom_range(&self) -> Option<ZoomRange>;

    fn set_zoom_ratio(&self, ratio: f32);

    /// Continuous illumination on/off.
    fn enable_torch(&self, on: bool);

    /// Flash mode used by the still-capture pipeline.
    fn set_capture_flash(&self, flash: CaptureFlash);

    /// One-shot focus and metering at a normalized point.
    fn start_focus_and_metering(&self, point: MeteringPoint);

    /// Write a still to `output`, then call `done`.
    fn take_picture(&self, output: &Path, done: CaptureCallback);
}
