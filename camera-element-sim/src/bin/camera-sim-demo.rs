use std::process::ExitCode;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use camera_element_core::{
    CameraElement, ElementDelegate, ElementEvent, ElementOptions, InvokeResponse, LifecycleState,
};
use camera_element_sim::{Completion, SimPermissionHost, SimPlatform};

const STEP: Duration = Duration::from_millis(500);

/// Prints every state change and event as one JSON line, the way a host
/// bridge would forward them to its UI layer.
struct StdoutDelegate;

impl ElementDelegate for StdoutDelegate {
    fn on_state_changed(&self, state: &LifecycleState) {
        println!("{}", json!({ "state": state.name() }));
    }

    fn on_event(&self, event: &ElementEvent) {
        println!("{}", json!({ "event": event.name(), "detail": event.detail() }));
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let platform = SimPlatform::new(
        SimPermissionHost::granted(),
        Completion::After(Duration::from_millis(120)),
        Completion::After(Duration::from_millis(80)),
    );
    let options = ElementOptions {
        output_directory: std::env::temp_dir().join("camera-sim-demo"),
        ..Default::default()
    };

    let mut element = match CameraElement::new(platform.bindings(), options) {
        Ok(element) => element,
        Err(e) => {
            log::error!("Failed to create camera element: {}", e);
            return ExitCode::FAILURE;
        }
    };
    element.set_delegate(Arc::new(StdoutDelegate));
    element.layout(1080.0, 1920.0);

    element.attach();
    while !element.state().is_ready() && !element.state().is_halted() {
        if element.wait_and_run(STEP) == 0 {
            log::error!("Camera did not become ready");
            return ExitCode::FAILURE;
        }
    }

    let (tx, rx) = mpsc::channel::<InvokeResponse>();
    let invoke = |element: &mut CameraElement, method: &str, params: serde_json::Value| {
        let tx = tx.clone();
        let callback = Box::new(move |response: InvokeResponse| {
            // receiver outlives every invocation
            let _ = tx.send(response);
        });
        if let Err(e) = element.invoke(method, &params, callback) {
            log::warn!("{} failed: {}", method, e);
        }
    };

    invoke(&mut element, "setZoom", json!({ "level": 50 }));
    invoke(&mut element, "setFlash", json!({ "mode": "on" }));
    invoke(&mut element, "takePhoto", json!({}));

    let mut photo = None;
    for _ in 0..10 {
        element.wait_and_run(STEP);
        photo = rx
            .try_iter()
            .find(|response| response.data.is_some() || !response.is_success());
        if photo.is_some() || element.state().is_halted() {
            break;
        }
    }
    match photo {
        Some(response) => println!("{}", json!({ "takePhoto": response })),
        None => log::error!("takePhoto never resolved"),
    }

    element.detach();
    ExitCode::SUCCESS
}
