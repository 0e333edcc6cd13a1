/// Host capability for the runtime camera permission.
///
/// Implemented by the embedding application. `request_permission` shows the
/// system prompt and returns immediately; the outcome reaches the element
/// later through `CameraElement::permission_result` and/or the host
/// regaining window focus.
pub trait PermissionHost: Send + Sync {
    /// Whether camera access is currently granted.
    fn has_permission(&self) -> bool;

    /// Whether a foreground surface exists that can show the system prompt.
    fn can_prompt(&self) -> bool;

    /// Show the system permission prompt.
    fn request_permission(&self);
}
