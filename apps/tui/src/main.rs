mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use hfprop_tui::config::{init_app_config, AppConfig};
use hfprop_tui::db::create_settings_pool;
use hfprop_tui::theme::system_prefers_dark;
use hfprop_tui::{SimulationClient, SimulationController, ThemeManager};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    args.apply_env_overrides();

    color_eyre::install()?;

    let config = init_app_config()?;
    let headless = args.headless || !is_terminal();
    init_tracing(&config, !headless)?;
    tracing::debug!(?config, headless, "configuration loaded");

    let form = args.form_values()?;

    if headless {
        return event::run_headless(&config, &form, args.json).await;
    }

    let store = match create_settings_pool(&config.database_url).await {
        Ok(pool) => Some(pool),
        Err(e) => {
            tracing::warn!(error = %e, "settings database unavailable, theme will not persist");
            None
        }
    };
    let theme = ThemeManager::load(store, system_prefers_dark()).await;

    let controller = SimulationController::new(
        SimulationClient::new(config.endpoint.clone()),
        config.variant,
    );
    let mut app = App::with_form(controller, theme, form);

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

// The alternate screen owns stdout in TUI mode, so logs go to a file there.
fn init_tracing(config: &AppConfig, to_file: bool) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    Ok(())
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
