//! # camera-element-core
//!
//! Platform-agnostic core of an embeddable camera preview + still-capture
//! element.
//!
//! Coordinates an asynchronous permission grant, an asynchronous camera
//! provider acquisition and host attach/detach events, and serializes prop
//! updates (zoom, flash, focus) and capture requests against the hardware
//! session. Platform backends implement the traits in [`traits`] and plug
//! into [`CameraElement`].
//!
//! ## Architecture
//!
//! ```text
//! camera-element-core (this crate)
//! ├── traits/      ← PermissionHost, ProviderSource, CameraProvider, CameraDevice, LifecycleScope, ElementDelegate
//! ├── models/      ← ElementConfig, LifecycleState, ElementEvent, error enums, hardware value types
//! ├── permission/  ← PermissionGate
//! ├── session/     ← HardwareSessionProvider, UseCaseBinder, ControlApplier, CaptureCoordinator, LifecycleController
//! ├── dispatch/    ← MainQueue (confined main context), generation tokens
//! ├── element/     ← CameraElement host boundary, invoke protocol, focus ring
//! └── storage/     ← capture output naming
//! ```
//!
//! ## Threading
//!
//! One main context owns all state. Platform callbacks only post
//! [`MainMessage`]s through a [`MainHandle`]; the owner applies them with
//! [`CameraElement::run_pending`], dropping any that belong to a detached
//! cycle or replaced session.

pub mod dispatch;
pub mod element;
pub mod models;
pub mod permission;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use dispatch::generation::{Generation, GenerationCounter};
pub use dispatch::main_queue::{MainHandle, MainMessage, MainQueue};
pub use element::camera_element::CameraElement;
pub use element::focus_ring::FocusRing;
pub use element::invoke::{InvokeCallback, InvokeResponse, MethodCall};
pub use models::capture_result::{CaptureResult, SavedImage};
pub use models::config::{DeviceSelector, ElementConfig, ElementOptions, FlashMode, FocusMode};
pub use models::error::{BindError, CaptureError, ElementError, ErrorCode, PermissionDenial, ProviderError};
pub use models::events::ElementEvent;
pub use models::hardware::{CaptureFlash, CaptureMode, MeteringPoint, PreviewSurface, UseCaseSet, ZoomRange};
pub use models::state::{LifecycleState, PermissionState};
pub use permission::gate::{PermissionGate, PermissionOutcome};
pub use session::binder::{SessionHandle, UseCaseBinder};
pub use session::capture::{CaptureCoordinator, CaptureReply, CaptureTicket};
pub use session::control::ControlApplier;
pub use session::controller::{LifecycleController, PlatformBindings};
pub use session::provider::{Acquire, HardwareSessionProvider};
pub use storage::output::OutputLocation;
pub use traits::camera_device::{CameraDevice, CaptureCallback};
pub use traits::element_delegate::ElementDelegate;
pub use traits::lifecycle_scope::LifecycleScope;
pub use traits::permission_host::PermissionHost;
pub use traits::provider_source::{CameraProvider, ProviderCallback, ProviderSource};
