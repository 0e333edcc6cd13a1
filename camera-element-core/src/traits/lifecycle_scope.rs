/// Host-provided scope whose active/inactive transitions a session is tied to.
///
/// Passed explicitly to the element at construction instead of being
/// discovered by walking the host context chain.
pub trait LifecycleScope: Send + Sync {
    fn name(&self) -> &str;

    fn is_active(&self) -> bool;
}
