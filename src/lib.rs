pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod types;

// Application layer and its adapters
pub mod app;
pub mod infra;
