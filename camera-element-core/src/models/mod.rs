pub mod capture_result;
pub mod config;
pub mod error;
pub mod events;
pub mod hardware;
pub mod state;
