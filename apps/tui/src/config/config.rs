use crate::sim::client::DEFAULT_ENDPOINT;
use crate::sim::params::ClientVariant;
use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_NAME: &str = "hfprop.db";
pub const DEFAULT_LOG_FILE: &str = "hfprop.log";

/// Runtime settings resolved from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub endpoint: String,
    pub variant: ClientVariant,
    pub log_file: PathBuf,
    pub debug: bool,
}

/// Loads `.env`, then reads configuration from the process environment.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    dotenv().ok();
    let base_dir: PathBuf = env::current_dir()?;
    AppConfig::from_lookup(&base_dir, |key| env::var(key).ok())
}

impl AppConfig {
    /// Builds the configuration from any key lookup, relative to `base_dir`.
    pub fn from_lookup(
        base_dir: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> color_eyre::eyre::Result<Self> {
        let db_name = lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());
        let database_url = database_url_for(&base_dir.join(&db_name))?;

        let endpoint = lookup("HFPROP_ENDPOINT")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let variant = match lookup("HFPROP_VARIANT") {
            Some(raw) => ClientVariant::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown HFPROP_VARIANT, using online");
                ClientVariant::Online
            }),
            None => ClientVariant::default(),
        };

        let log_file = lookup("HFPROP_LOG").map_or_else(
            || base_dir.join(DEFAULT_LOG_FILE),
            |path| base_dir.join(path),
        );

        let debug = lookup("DEBUG").is_some_and(|value| {
            matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
        });

        Ok(Self {
            database_url,
            endpoint,
            variant,
            log_file,
            debug,
        })
    }
}

/// Formats a SQLite URL for SQLx.
///
/// Absolute paths need `sqlite:///` (three slashes), relative ones `sqlite://`.
fn database_url_for(database_path: &Path) -> color_eyre::eyre::Result<String> {
    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;
    let clean_path = path_str.trim_start_matches('/');

    let database_url = if database_path.is_absolute() {
        format!("sqlite:///{clean_path}")
    } else {
        format!("sqlite://{clean_path}")
    };
    tracing::debug!(%database_url, "resolved database url");
    Ok(database_url)
}
