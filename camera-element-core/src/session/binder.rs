use std::fmt;
use std::sync::Arc;

use crate::dispatch::generation::{Generation, GenerationCounter};
use crate::models::config::{DeviceSelector, ElementConfig};
use crate::models::error::BindError;
use crate::models::hardware::{CaptureMode, PreviewSurface, UseCaseSet};
use crate::traits::camera_device::CameraDevice;
use crate::traits::lifecycle_scope::LifecycleScope;
use crate::traits::provider_source::CameraProvider;

/// Live binding of preview surface + capture pipeline + device.
///
/// Owned only by the lifecycle controller; everything else borrows it for
/// the duration of a single call.
pub struct SessionHandle {
    id: Generation,
    selector: DeviceSelector,
    device: Arc<dyn CameraDevice>,
}

impl SessionHandle {
    pub(crate) fn new(id: Generation, selector: DeviceSelector, device: Arc<dyn CameraDevice>) -> Self {
        Self { id, selector, device }
    }

    pub fn id(&self) -> Generation {
        self.id
    }

    pub fn selector(&self) -> DeviceSelector {
        self.selector
    }

    pub fn device(&self) -> &dyn CameraDevice {
        self.device.as_ref()
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id.value())
            .field("selector", &self.selector)
            .finish()
    }
}

/// Binds preview + capture use-cases against a lifecycle scope.
///
/// Always unbind-then-bind: overlapping bindings on one physical device
/// are unsupported by the platform.
pub struct UseCaseBinder {
    sessions: GenerationCounter,
    capture_mode: CaptureMode,
}

impl UseCaseBinder {
    pub fn new() -> Self {
        Self {
            sessions: GenerationCounter::new(),
            capture_mode: CaptureMode::MinimizeLatency,
        }
    }

    /// Replace `previous` (if any) with a fresh session for `config.device`.
    pub fn bind(
        &mut self,
        provider: &dyn CameraProvider,
        config: &ElementConfig,
        surface: &PreviewSurface,
        scope: Option<&dyn LifecycleScope>,
        previous: Option<SessionHandle>,
    ) -> Result<SessionHandle, BindError> {
        if let Some(old) = previous {
            log::debug!("Replacing session {:?}", old);
        }
        self.unbind(provider);

        let Some(scope) = scope else {
            log::warn!("No lifecycle scope supplied by host, cannot bind camera");
            return Err(BindError::NoLifecycleOwner);
        };
        if !scope.is_active() {
            log::debug!("Binding to inactive scope {:?}, preview starts when it activates", scope.name());
        }

        log::info!("bind() — device={} scope={}", config.device, scope.name());
        let use_cases = UseCaseSet {
            preview: surface.clone(),
            capture_mode: self.capture_mode,
        };
        let device = provider
            .bind_to_lifecycle(scope, config.device, &use_cases)
            .map_err(|e| {
                log::error!("Use case binding failed: {}", e);
                BindError::HardwareRejected(e)
            })?;

        Ok(SessionHandle::new(self.sessions.current(), config.device, device))
    }

    /// Release every use-case and invalidate the current session id.
    pub fn unbind(&mut self, provider: &dyn CameraProvider) {
        provider.unbind_all();
        self.sessions.advance();
    }

    /// Whether `id` names the session from the most recent bind.
    pub fn is_current(&self, id: Generation) -> bool {
        self.sessions.is_current(id)
    }
}

impl Default for UseCaseBinder {
    fn default() -> Self {
        Self::new()
    }
}
