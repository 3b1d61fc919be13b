//! # Console Shared
//! 
//! Shared configuration, telemetry, constants and error types for the admin console session.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
