//! # camera-element-sim
//!
//! Simulated platform backend for camera-element-core.
//!
//! Provides:
//! - `SimPermissionHost`: runtime permission host with a scriptable user
//! - `SimProviderSource`: asynchronous provider acquisition (manual, inline or delayed)
//! - `SimCameraProvider` / `SimCameraDevice`: front/back cameras with observable hardware state
//! - `SimLifecycleScope`: host lifecycle owner
//! - `EventRecorder`: delegate recording every state change and event
//!
//! ## Usage
//! ```ignore
//! use camera_element_core::{CameraElement, ElementOptions};
//! use camera_element_sim::{Completion, SimPermissionHost, SimPlatform};
//!
//! let platform = SimPlatform::new(SimPermissionHost::granted(), Completion::Manual, Completion::Manual);
//! let mut element = CameraElement::new(platform.bindings(), ElementOptions::default())?;
//! element.attach();
//! platform.source.complete_pending();
//! element.run_pending();
//! ```

pub mod camera;
pub mod completion;
pub mod permission;
pub mod provider;
pub mod recorder;
pub mod scope;

use std::sync::Arc;

use camera_element_core::{LifecycleScope, PlatformBindings};

pub use camera::{HardwareState, ProviderCall, SimCameraDevice, SimCameraProvider};
pub use completion::Completion;
pub use permission::SimPermissionHost;
pub use provider::SimProviderSource;
pub use recorder::EventRecorder;
pub use scope::SimLifecycleScope;

/// Every simulated collaborator an element needs, wired together.
pub struct SimPlatform {
    pub permission: Arc<SimPermissionHost>,
    pub source: Arc<SimProviderSource>,
    pub provider: Arc<SimCameraProvider>,
    pub scope: Arc<SimLifecycleScope>,
}

impl SimPlatform {
    pub fn new(permission: SimPermissionHost, acquisition: Completion, capture: Completion) -> Self {
        let provider = Arc::new(SimCameraProvider::new(capture));
        Self {
            permission: Arc::new(permission),
            source: Arc::new(SimProviderSource::new(Arc::clone(&provider), acquisition)),
            provider,
            scope: Arc::new(SimLifecycleScope::new("sim-activity")),
        }
    }

    pub fn bindings(&self) -> PlatformBindings {
        PlatformBindings {
            permission_host: self.permission.clone(),
            provider_source: self.source.clone(),
            lifecycle_scope: Some(self.scope.clone() as Arc<dyn LifecycleScope>),
        }
    }

    /// Bindings for a host that never exposes a lifecycle scope.
    pub fn bindings_without_scope(&self) -> PlatformBindings {
        PlatformBindings {
            lifecycle_scope: None,
            ..self.bindings()
        }
    }
}
