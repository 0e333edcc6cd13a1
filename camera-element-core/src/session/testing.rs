//! Fakes shared by the session unit tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::dispatch::generation::GenerationCounter;
use crate::models::capture_result::SavedImage;
use crate::models::config::DeviceSelector;
use crate::models::hardware::{CaptureFlash, MeteringPoint, ZoomRange};
use crate::session::binder::SessionHandle;
use crate::traits::camera_device::{CameraDevice, CaptureCallback};

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceOp {
    Zoom(f32),
    Torch(bool),
    Flash(CaptureFlash),
    Focus(MeteringPoint),
    Picture(PathBuf),
}

pub struct RecordingDevice {
    pub ops: Mutex<Vec<DeviceOp>>,
    pub pending: Mutex<Vec<CaptureCallback>>,
    zoom_range: Option<ZoomRange>,
}

impl RecordingDevice {
    pub fn new(zoom_range: Option<ZoomRange>) -> Arc<Self> {
        Arc::new(Self {
            ops: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
            zoom_range,
        })
    }

    pub fn ops(&self) -> Vec<DeviceOp> {
        self.ops.lock().clone()
    }

    pub fn finish_capture(&self, outcome: Result<SavedImage, String>) {
        let done = self.pending.lock().remove(0);
        done(outcome);
    }
}

impl CameraDevice for RecordingDevice {
    fn zoom_range(&self) -> Option<ZoomRange> {
        self.zoom_range
    }

    fn set_zoom_ratio(&self, ratio: f32) {
        self.ops.lock().push(DeviceOp::Zoom(ratio));
    }

    fn enable_torch(&self, on: bool) {
        self.ops.lock().push(DeviceOp::Torch(on));
    }

    fn set_capture_flash(&self, flash: CaptureFlash) {
        self.ops.lock().push(DeviceOp::Flash(flash));
    }

    fn start_focus_and_metering(&self, point: MeteringPoint) {
        self.ops.lock().push(DeviceOp::Focus(point));
    }

    fn take_picture(&self, output: &Path, done: CaptureCallback) {
        self.ops.lock().push(DeviceOp::Picture(output.to_path_buf()));
        self.pending.lock().push(done);
    }
}

/// A session around `device` with a fresh id from `ids`.
pub fn session_for(ids: &mut GenerationCounter, device: Arc<RecordingDevice>) -> SessionHandle {
    SessionHandle::new(ids.advance(), DeviceSelector::Back, device)
}
