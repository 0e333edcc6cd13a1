use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::element::invoke::{InvokeCallback, InvokeResponse, MethodCall};
use crate::models::config::{DeviceSelector, ElementConfig, ElementOptions, FlashMode, FocusMode};
use crate::models::error::{ElementError, ErrorCode};
use crate::models::state::LifecycleState;
use crate::session::capture::CaptureReply;
use crate::session::controller::{LifecycleController, PlatformBindings};
use crate::traits::element_delegate::ElementDelegate;

/// The `<camera>` element as seen by a host element framework.
///
/// Translates string props and JSON method invocations into controller
/// calls. Must be driven from one thread (the host's main context), which
/// also calls [`CameraElement::run_pending`] to apply platform completions.
pub struct CameraElement {
    controller: LifecycleController,
}

impl CameraElement {
    pub fn new(bindings: PlatformBindings, options: ElementOptions) -> Result<Self, ElementError> {
        log::info!("CameraElement constructed");
        Ok(Self {
            controller: LifecycleController::new(bindings, options)?,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn ElementDelegate>) {
        self.controller.set_delegate(delegate);
    }

    pub fn controller(&self) -> &LifecycleController {
        &self.controller
    }

    pub fn state(&self) -> &LifecycleState {
        self.controller.state()
    }

    pub fn config(&self) -> &ElementConfig {
        self.controller.config()
    }

    // --- Host lifecycle callbacks ---

    pub fn attach(&mut self) {
        self.controller.attach();
    }

    pub fn detach(&mut self) {
        self.controller.detach();
    }

    pub fn window_focus_changed(&mut self, has_focus: bool) {
        self.controller.window_focus_changed(has_focus);
    }

    pub fn permission_result(&mut self, granted: bool) {
        self.controller.permission_result(granted);
    }

    pub fn clear_permission_denial(&mut self) {
        self.controller.clear_permission_denial();
    }

    pub fn layout(&mut self, width: f32, height: f32) {
        self.controller.layout(width, height);
    }

    pub fn touch_down(&mut self, x: f32, y: f32) -> bool {
        self.controller.touch_down(x, y)
    }

    pub fn run_pending(&mut self) -> usize {
        self.controller.run_pending()
    }

    pub fn wait_and_run(&mut self, timeout: Duration) -> usize {
        self.controller.wait_and_run(timeout)
    }

    // --- Declarative props ---

    /// Apply one host prop. `null` values are ignored.
    pub fn set_prop(&mut self, name: &str, value: &Value) -> Result<(), ElementError> {
        if value.is_null() {
            return Ok(());
        }
        match name {
            "device" => {
                let device: DeviceSelector = prop_str(name, value)?.parse()?;
                self.controller.set_device(device);
            }
            "flash-mode" => {
                let mode = FlashMode::parse_lenient(prop_str(name, value)?);
                self.controller.set_flash_mode(mode);
            }
            "focus-mode" => {
                let mode = FocusMode::parse_lenient(prop_str(name, value)?);
                self.controller.set_focus_mode(mode);
            }
            "zoom" => {
                let zoom = value
                    .as_f64()
                    .ok_or_else(|| ElementError::InvalidProp(format!("zoom must be a number, got {}", value)))?;
                self.controller.set_zoom(zoom as f32);
            }
            "enable-torch" => {
                let enabled = match value {
                    Value::Bool(b) => *b,
                    Value::String(s) => s.eq_ignore_ascii_case("true"),
                    other => {
                        return Err(ElementError::InvalidProp(format!(
                            "enable-torch must be a boolean, got {}",
                            other
                        )))
                    }
                };
                self.controller.set_enable_torch(enabled);
            }
            other => return Err(ElementError::InvalidProp(format!("unknown prop: {}", other))),
        }
        Ok(())
    }

    // --- Invokable methods ---

    /// Run an invokable method. `callback` fires exactly once: immediately
    /// for everything except a successfully started `takePhoto`.
    pub fn invoke(
        &mut self,
        method: &str,
        params: &Value,
        callback: InvokeCallback,
    ) -> Result<(), ElementError> {
        let call = match MethodCall::parse(method, params) {
            Ok(call) => call,
            Err(e) => {
                callback(InvokeResponse::failure(ErrorCode::SessionError, e.to_string()));
                return Err(e);
            }
        };

        match call {
            MethodCall::TakePhoto => {
                let reply: CaptureReply = Box::new(move |result| {
                    callback(match &result {
                        Ok(photo) => InvokeResponse::photo(photo),
                        Err(e) => InvokeResponse::failure(e.code(), e.to_string()),
                    })
                });
                if let Err(e) = self.controller.take_photo(reply) {
                    log::debug!("takePhoto rejected: {}", e);
                }
            }
            MethodCall::SwitchCamera => {
                self.controller.switch_camera();
                callback(InvokeResponse::success());
            }
            MethodCall::SetZoom { level } => {
                self.controller.set_zoom(level);
                callback(InvokeResponse::success());
            }
            MethodCall::SetFlash { mode } => {
                self.controller.set_flash_mode(mode);
                callback(InvokeResponse::success());
            }
            MethodCall::Focus { x, y } => {
                self.controller.focus_at(x, y);
                callback(InvokeResponse::success());
            }
        }
        Ok(())
    }
}

fn prop_str<'a>(name: &str, value: &'a Value) -> Result<&'a str, ElementError> {
    value
        .as_str()
        .ok_or_else(|| ElementError::InvalidProp(format!("{} must be a string, got {}", name, value)))
}
