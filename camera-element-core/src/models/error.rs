use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Boundary error codes reported in `error` events and invoke failure payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    PermissionDenied,
    CameraNotReady,
    CaptureFailed,
    SessionError,
    /// Only used in invoke failure payloads, never in `error` events.
    CameraBusy,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::CameraNotReady => "CAMERA_NOT_READY",
            Self::CaptureFailed => "CAPTURE_FAILED",
            Self::SessionError => "SESSION_ERROR",
            Self::CameraBusy => "CAMERA_BUSY",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a permission check ended in a final denial.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDenial {
    #[error("camera permission was denied, enable it in app settings")]
    UserDenied,

    /// The host has no foreground surface able to show the system prompt.
    #[error("camera permission not granted and the host cannot prompt for it")]
    NoPromptSurface,
}

/// Errors from provider acquisition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("camera provider unavailable: {0}")]
    Unavailable(String),

    #[error("camera provider requested without permission")]
    PermissionMissing,
}

/// Errors from binding preview + capture use-cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The host never supplied a lifecycle scope. Fatal for the element.
    #[error("no lifecycle owner available for binding")]
    NoLifecycleOwner,

    #[error("hardware rejected use-case binding: {0}")]
    HardwareRejected(String),

    #[error("failed to obtain camera provider: {0}")]
    ProviderUnavailable(String),
}

impl From<ProviderError> for BindError {
    fn from(e: ProviderError) -> Self {
        Self::ProviderUnavailable(e.to_string())
    }
}

/// Errors from a still capture request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera permission not granted")]
    PermissionDenied,

    /// Transient: no session yet, or the session went away mid-capture.
    #[error("camera is not ready: {0}")]
    NotReady(String),

    /// A capture is already in flight. Retry rather than queue.
    #[error("a capture is already in progress")]
    Busy,

    #[error("capture failed: {0}")]
    HardwareFailure(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl CaptureError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::PermissionDenied => ErrorCode::PermissionDenied,
            Self::NotReady(_) => ErrorCode::CameraNotReady,
            Self::Busy => ErrorCode::CameraBusy,
            Self::HardwareFailure(_) | Self::Storage(_) => ErrorCode::CaptureFailed,
        }
    }
}

/// Errors at the host element boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElementError {
    #[error("invalid prop: {0}")]
    InvalidProp(String),

    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
