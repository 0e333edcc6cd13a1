pub mod camera_element;
pub mod focus_ring;
pub mod invoke;
