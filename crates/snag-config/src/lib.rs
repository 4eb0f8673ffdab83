//! Layered configuration for snag (`.snag/config.toml`).

pub mod config;
mod config_merge;
pub mod paths;

pub use config::{CaptureConfig, LogConfig, SnagConfig, StatusConfig};
pub use paths::{APP_NAME, CONFIG_ENV_VAR, global_config_path, project_config_path};
