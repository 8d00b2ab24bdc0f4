pub mod migrations;
pub mod queries;

pub use migrations::{create_settings_pool, setup_database};
pub use queries::{get_setting, put_setting};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("could not prepare settings directory: {0}")]
    Io(#[from] std::io::Error),
}
