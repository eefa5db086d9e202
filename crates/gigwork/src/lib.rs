pub mod config;
pub mod dashboard;
pub mod error;
pub mod notifications;
pub mod platform;
pub mod telemetry;
