//! Core utilities, configuration, and common functionality

pub mod classify;
pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod toolchain;
pub mod utils;
pub mod web_server;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_startup_configuration};
