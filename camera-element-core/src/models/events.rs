use serde::Serialize;
use serde_json::Value;

use super::capture_result::CaptureResult;
use super::error::ErrorCode;

/// Events emitted upward to the host element framework.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementEvent {
    CameraReady,
    PhotoCaptured(CaptureResult),
    /// Reports the clamped zoom that was applied, never the raw request.
    ZoomChanged { zoom: f32, min_zoom: f32, max_zoom: f32 },
    TapFocus { x: f32, y: f32 },
    Error { code: ErrorCode, message: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhotoCapturedDetail<'a> {
    uri: &'a str,
    width: u32,
    height: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ZoomChangedDetail {
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
}

#[derive(Serialize)]
struct TapFocusDetail {
    x: f32,
    y: f32,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: ErrorCode,
    message: &'a str,
}

impl ElementEvent {
    /// Event name as seen by the host.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CameraReady => "cameraready",
            Self::PhotoCaptured(_) => "photocaptured",
            Self::ZoomChanged { .. } => "zoomchanged",
            Self::TapFocus { .. } => "tapfocus",
            Self::Error { .. } => "error",
        }
    }

    /// Event detail payload in the host's JSON shape.
    pub fn detail(&self) -> Value {
        let detail = match self {
            Self::CameraReady => return Value::Object(Default::default()),
            Self::PhotoCaptured(result) => serde_json::to_value(PhotoCapturedDetail {
                uri: &result.uri,
                width: result.width,
                height: result.height,
            }),
            Self::ZoomChanged {
                zoom,
                min_zoom,
                max_zoom,
            } => serde_json::to_value(ZoomChangedDetail {
                zoom: *zoom,
                min_zoom: *min_zoom,
                max_zoom: *max_zoom,
            }),
            Self::TapFocus { x, y } => serde_json::to_value(TapFocusDetail { x: *x, y: *y }),
            Self::Error { code, message } => serde_json::to_value(ErrorDetail { code: *code, message }),
        };
        detail.unwrap_or_else(|e| {
            log::error!("Failed to serialize {} detail: {}", self.name(), e);
            Value::Null
        })
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;

    #[test]
    fn zoom_detail_uses_camel_case() {
        let event = ElementEvent::ZoomChanged {
            zoom: 8.0,
            min_zoom: 1.0,
            max_zoom: 8.0,
        };
        assert_eq!(event.name(), "zoomchanged");
        assert_eq!(event.detail(), json!({"zoom": 8.0, "minZoom": 1.0, "maxZoom": 8.0}));
    }

    #[test]
    fn photo_detail() {
        let event = ElementEvent::PhotoCaptured(CaptureResult {
            uri: "file:///tmp/a.jpg".into(),
            path: PathBuf::from("/tmp/a.jpg"),
            width: 0,
            height: 0,
        });
        assert_eq!(
            event.detail(),
            json!({"uri": "file:///tmp/a.jpg", "width": 0, "height": 0})
        );
    }

    #[test]
    fn error_detail() {
        let event = ElementEvent::error(ErrorCode::PermissionDenied, "nope");
        assert_eq!(event.detail(), json!({"code": "PERMISSION_DENIED", "message": "nope"}));
        assert_eq!(ElementEvent::CameraReady.detail(), json!({}));
    }
}
