use std::sync::Arc;

use crate::models::error::ProviderError;
use crate::models::hardware::UseCaseSet;
use crate::models::config::DeviceSelector;
use crate::traits::camera_device::CameraDevice;
use crate::traits::lifecycle_scope::LifecycleScope;

/// Completion for an asynchronous provider acquisition.
///
/// May be invoked on any thread; implementations of the core only post it
/// onward to the element's main context.
pub type ProviderCallback =
    Box<dyn FnOnce(Result<Arc<dyn CameraProvider>, ProviderError>) + Send + 'static>;

/// The platform camera subsystem entry point.
///
/// Acquisition is asynchronous and may take a noticeable amount of time,
/// so the element starts it as early as possible.
pub trait ProviderSource: Send + Sync {
    /// Begin acquiring the provider. `complete` fires exactly once.
    fn request_provider(&self, complete: ProviderCallback);
}

/// Handle to the platform camera subsystem once acquired.
pub trait CameraProvider: Send + Sync {
    /// Bind preview + capture use-cases for `device` to `scope`.
    ///
    /// The caller always unbinds before binding: the platform does not
    /// support overlapping bindings on one physical device.
    fn bind_to_lifecycle(
        &self,
        scope: &dyn LifecycleScope,
        device: DeviceSelector,
        use_cases: &UseCaseSet,
    ) -> Result<Arc<dyn CameraDevice>, String>;

    /// Release every bound use-case.
    fn unbind_all(&self);
}
