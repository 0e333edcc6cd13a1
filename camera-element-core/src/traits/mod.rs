pub mod camera_device;
pub mod element_delegate;
pub mod lifecycle_scope;
pub mod permission_host;
pub mod provider_source;
