use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::capture_result::CaptureResult;
use crate::models::config::FlashMode;
use crate::models::error::{ElementError, ErrorCode};

/// Completion for an invokable method, `(resultCode, payload)` convention.
pub type InvokeCallback = Box<dyn FnOnce(InvokeResponse) + Send + 'static>;

/// `{code: 0, data?}` on success, `{code: 1, data: {code, message}}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvokeResponse {
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl InvokeResponse {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;

    pub fn success() -> Self {
        Self {
            code: Self::SUCCESS,
            data: None,
        }
    }

    pub fn photo(result: &CaptureResult) -> Self {
        Self {
            code: Self::SUCCESS,
            data: Some(json!({
                "uri": result.uri,
                "width": result.width,
                "height": result.height,
            })),
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Self::FAILURE,
            data: Some(json!({ "code": code, "message": message.into() })),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }

    /// Boundary error code of a failure payload.
    pub fn error_code(&self) -> Option<&str> {
        self.data.as_ref()?.get("code")?.as_str()
    }
}

/// A parsed invokable method call.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodCall {
    TakePhoto,
    SwitchCamera,
    SetZoom { level: f32 },
    SetFlash { mode: FlashMode },
    Focus { x: f32, y: f32 },
}

#[derive(Deserialize)]
struct ZoomParams {
    #[serde(default = "default_level")]
    level: f64,
}

fn default_level() -> f64 {
    1.0
}

#[derive(Deserialize)]
struct FlashParams {
    #[serde(default = "default_flash")]
    mode: String,
}

fn default_flash() -> String {
    "auto".into()
}

#[derive(Deserialize)]
struct FocusParams {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
}

impl MethodCall {
    pub fn parse(method: &str, params: &Value) -> Result<Self, ElementError> {
        match method {
            "takePhoto" => Ok(Self::TakePhoto),
            "switchCamera" => Ok(Self::SwitchCamera),
            "setZoom" => {
                let p: ZoomParams = params_of(method, params)?;
                Ok(Self::SetZoom { level: p.level as f32 })
            }
            "setFlash" => {
                let p: FlashParams = params_of(method, params)?;
                Ok(Self::SetFlash {
                    mode: FlashMode::parse_lenient(&p.mode),
                })
            }
            "focus" => {
                let p: FocusParams = params_of(method, params)?;
                Ok(Self::Focus {
                    x: p.x as f32,
                    y: p.y as f32,
                })
            }
            other => Err(ElementError::UnknownMethod(other.to_string())),
        }
    }
}

/// Missing params behave like an empty map.
fn params_of<T: for<'de> Deserialize<'de>>(method: &str, params: &Value) -> Result<T, ElementError> {
    let params = if params.is_null() { json!({}) } else { params.clone() };
    serde_json::from_value(params)
        .map_err(|e| ElementError::InvalidParams(format!("{}: {}", method, e)))
}
