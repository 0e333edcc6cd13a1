pub mod generation;
pub mod main_queue;
