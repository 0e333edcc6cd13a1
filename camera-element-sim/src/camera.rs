use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use camera_element_core::{
    CameraDevice, CameraProvider, CaptureCallback, CaptureFlash, DeviceSelector, LifecycleScope,
    MeteringPoint, SavedImage, UseCaseSet, ZoomRange,
};

use crate::completion::{dispatch, Completion};

/// Minimal JPEG (SOI + EOI) written for every simulated still.
const JPEG_PLACEHOLDER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

/// Observable hardware state of a simulated device.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HardwareState {
    pub zoom: Option<f32>,
    pub torch: bool,
    pub capture_flash: Option<CaptureFlash>,
    pub focus_points: Vec<MeteringPoint>,
}

type PendingJob = Box<dyn FnOnce() + Send + 'static>;

/// A simulated physical camera.
pub struct SimCameraDevice {
    selector: DeviceSelector,
    zoom_range: Option<ZoomRange>,
    capture: Completion,
    hardware: Mutex<HardwareState>,
    pending: Mutex<Vec<PendingJob>>,
    capture_failure: Mutex<Option<String>>,
    dimensions: Mutex<Option<(u32, u32)>>,
    pictures: AtomicU32,
}

impl SimCameraDevice {
    pub fn new(selector: DeviceSelector, zoom_range: Option<ZoomRange>, capture: Completion) -> Self {
        Self {
            selector,
            zoom_range,
            capture,
            hardware: Mutex::new(HardwareState::default()),
            pending: Mutex::new(Vec::new()),
            capture_failure: Mutex::new(None),
            dimensions: Mutex::new(None),
            pictures: AtomicU32::new(0),
        }
    }

    pub fn selector(&self) -> DeviceSelector {
        self.selector
    }

    pub fn hardware(&self) -> HardwareState {
        self.hardware.lock().clone()
    }

    /// Make subsequent captures fail with `message`.
    pub fn fail_captures(&self, message: impl Into<String>) {
        *self.capture_failure.lock() = Some(message.into());
    }

    /// Report dimensions with subsequent save-complete callbacks.
    pub fn report_dimensions(&self, width: u32, height: u32) {
        *self.dimensions.lock() = Some((width, height));
    }

    /// Number of `take_picture` calls received.
    pub fn pictures_requested(&self) -> u32 {
        self.pictures.load(Ordering::SeqCst)
    }

    /// Finish every manually-held capture. Returns how many completed.
    pub fn complete_captures(&self) -> usize {
        let jobs: Vec<PendingJob> = self.pending.lock().drain(..).collect();
        let count = jobs.len();
        for job in jobs {
            job();
        }
        count
    }

    /// A new binding starts from default hardware state.
    fn reset(&self) {
        *self.hardware.lock() = HardwareState::default();
    }
}

impl CameraDevice for SimCameraDevice {
    fn zoom_range(&self) -> Option<ZoomRange> {
        self.zoom_range
    }

    fn set_zoom_ratio(&self, ratio: f32) {
        self.hardware.lock().zoom = Some(ratio);
    }

    fn enable_torch(&self, on: bool) {
        self.hardware.lock().torch = on;
    }

    fn set_capture_flash(&self, flash: CaptureFlash) {
        self.hardware.lock().capture_flash = Some(flash);
    }

    fn start_focus_and_metering(&self, point: MeteringPoint) {
        self.hardware.lock().focus_points.push(point);
    }

    fn take_picture(&self, output: &Path, done: CaptureCallback) {
        self.pictures.fetch_add(1, Ordering::SeqCst);
        let failure = self.capture_failure.lock().clone();
        let dimensions = *self.dimensions.lock();
        let path = output.to_path_buf();

        let job = move || {
            let outcome = match failure {
                Some(message) => Err(message),
                None => fs::write(&path, JPEG_PLACEHOLDER)
                    .map(|_| SavedImage {
                        width: dimensions.map(|(w, _)| w),
                        height: dimensions.map(|(_, h)| h),
                    })
                    .map_err(|e| format!("failed to write {}: {}", path.display(), e)),
            };
            done(outcome);
        };
        if let Some(job) = dispatch(self.capture, "sim-capture", job) {
            self.pending.lock().push(Box::new(job));
        }
    }
}

/// Calls received by the simulated provider, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Bind { scope: String, device: DeviceSelector },
    UnbindAll,
}

/// Simulated camera subsystem with a front and a back device.
///
/// Tracks bindings and counts any bind issued over a live binding, which
/// the real platform does not support.
pub struct SimCameraProvider {
    front: Arc<SimCameraDevice>,
    back: Arc<SimCameraDevice>,
    bound: Mutex<Option<DeviceSelector>>,
    calls: Mutex<Vec<ProviderCall>>,
    rejection: Mutex<Option<String>>,
    overlapping_binds: AtomicU32,
}

impl SimCameraProvider {
    /// Back lens zooms 1–8×, front lens 1–4×.
    pub fn new(capture: Completion) -> Self {
        Self::with_devices(
            SimCameraDevice::new(DeviceSelector::Front, Some(ZoomRange::new(1.0, 4.0)), capture),
            SimCameraDevice::new(DeviceSelector::Back, Some(ZoomRange::new(1.0, 8.0)), capture),
        )
    }

    pub fn with_devices(front: SimCameraDevice, back: SimCameraDevice) -> Self {
        Self {
            front: Arc::new(front),
            back: Arc::new(back),
            bound: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            rejection: Mutex::new(None),
            overlapping_binds: AtomicU32::new(0),
        }
    }

    pub fn device(&self, selector: DeviceSelector) -> Arc<SimCameraDevice> {
        match selector {
            DeviceSelector::Front => Arc::clone(&self.front),
            DeviceSelector::Back => Arc::clone(&self.back),
        }
    }

    /// Currently bound device, if any.
    pub fn bound(&self) -> Option<DeviceSelector> {
        *self.bound.lock()
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().clone()
    }

    pub fn bind_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, ProviderCall::Bind { .. }))
            .count()
    }

    pub fn overlapping_binds(&self) -> u32 {
        self.overlapping_binds.load(Ordering::SeqCst)
    }

    /// Reject subsequent binds with `message` (`None` to accept again).
    pub fn reject_binds(&self, message: Option<&str>) {
        *self.rejection.lock() = message.map(str::to_string);
    }
}

impl CameraProvider for SimCameraProvider {
    fn bind_to_lifecycle(
        &self,
        scope: &dyn LifecycleScope,
        device: DeviceSelector,
        _use_cases: &UseCaseSet,
    ) -> Result<Arc<dyn CameraDevice>, String> {
        self.calls.lock().push(ProviderCall::Bind {
            scope: scope.name().to_string(),
            device,
        });

        let mut bound = self.bound.lock();
        if let Some(existing) = *bound {
            log::error!("Bind over live binding ({} → {})", existing, device);
            self.overlapping_binds.fetch_add(1, Ordering::SeqCst);
        }
        if let Some(message) = self.rejection.lock().clone() {
            return Err(message);
        }

        let camera = self.device(device);
        camera.reset();
        *bound = Some(device);
        Ok(camera as Arc<dyn CameraDevice>)
    }

    fn unbind_all(&self) {
        self.calls.lock().push(ProviderCall::UnbindAll);
        *self.bound.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use camera_element_core::{CaptureMode, PreviewSurface};

    use super::*;
    use crate::scope::SimLifecycleScope;

    fn use_cases() -> UseCaseSet {
        UseCaseSet {
            preview: PreviewSurface::new("test"),
            capture_mode: CaptureMode::MinimizeLatency,
        }
    }

    #[test]
    fn bind_over_live_binding_is_counted() {
        let provider = SimCameraProvider::new(Completion::Manual);
        let scope = SimLifecycleScope::new("test");

        provider.bind_to_lifecycle(&scope, DeviceSelector::Back, &use_cases()).unwrap();
        provider.bind_to_lifecycle(&scope, DeviceSelector::Front, &use_cases()).unwrap();
        assert_eq!(provider.overlapping_binds(), 1);

        provider.unbind_all();
        provider.bind_to_lifecycle(&scope, DeviceSelector::Back, &use_cases()).unwrap();
        assert_eq!(provider.overlapping_binds(), 1);
        assert_eq!(provider.bind_count(), 3);
    }

    #[test]
    fn new_binding_resets_hardware() {
        let provider = SimCameraProvider::new(Completion::Manual);
        let scope = SimLifecycleScope::new("test");

        let device = provider.bind_to_lifecycle(&scope, DeviceSelector::Back, &use_cases()).unwrap();
        device.set_zoom_ratio(4.0);
        device.enable_torch(true);
        provider.unbind_all();

        provider.bind_to_lifecycle(&scope, DeviceSelector::Back, &use_cases()).unwrap();
        assert_eq!(provider.device(DeviceSelector::Back).hardware(), HardwareState::default());
    }

    #[test]
    fn immediate_capture_writes_placeholder() {
        let device = SimCameraDevice::new(DeviceSelector::Back, None, Completion::Immediate);
        let path = std::env::temp_dir().join("camera_element_sim_placeholder.jpg");
        let saved = Arc::new(Mutex::new(None));
        let sink = saved.clone();

        device.take_picture(&path, Box::new(move |outcome| *sink.lock() = Some(outcome)));

        assert_eq!(*saved.lock(), Some(Ok(SavedImage::default())));
        assert_eq!(fs::read(&path).unwrap(), JPEG_PLACEHOLDER);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn manual_capture_waits_for_completion() {
        let device = SimCameraDevice::new(DeviceSelector::Back, None, Completion::Manual);
        device.fail_captures("lens cap on");
        let saved = Arc::new(Mutex::new(None));
        let sink = saved.clone();

        device.take_picture(
            Path::new("/nonexistent/never.jpg"),
            Box::new(move |outcome| *sink.lock() = Some(outcome)),
        );
        assert!(saved.lock().is_none());

        assert_eq!(device.complete_captures(), 1);
        assert_eq!(*saved.lock(), Some(Err("lens cap on".to_string())));
    }
}
