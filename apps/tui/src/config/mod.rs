#[allow(clippy::module_inception)]
mod config;

pub use config::{init_app_config, AppConfig, DEFAULT_DATABASE_NAME, DEFAULT_LOG_FILE};
