use clap::{CommandFactory, Parser};
use color_eyre::eyre::eyre;
use hfprop_tui::{AntennaHeight, AntennaType, FormValues, NoiseEnvironment};

#[derive(Debug, Default, Parser)]
#[command(name = "hfprop", version, about = "HF propagation simulator terminal client")]
pub struct CliArgs {
    /// Run one simulation from the flags below and print the result
    #[arg(long)]
    pub headless: bool,

    /// Print headless results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override settings database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Simulation endpoint URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Client variant: online (map) or offline (manual indices)
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<String>,

    /// Log file used while the TUI is active
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    #[arg(long = "tx-lat", value_name = "DEG", allow_hyphen_values = true)]
    pub tx_lat: Option<String>,

    #[arg(long = "tx-lon", value_name = "DEG", allow_hyphen_values = true)]
    pub tx_lon: Option<String>,

    #[arg(long = "rx-lat", value_name = "DEG", allow_hyphen_values = true)]
    pub rx_lat: Option<String>,

    #[arg(long = "rx-lon", value_name = "DEG", allow_hyphen_values = true)]
    pub rx_lon: Option<String>,

    /// Transmitter power in watts
    #[arg(long = "power", value_name = "W", allow_hyphen_values = true)]
    pub tx_power: Option<String>,

    #[arg(long = "start-freq", value_name = "MHZ", allow_hyphen_values = true)]
    pub start_freq: Option<String>,

    #[arg(long = "end-freq", value_name = "MHZ", allow_hyphen_values = true)]
    pub end_freq: Option<String>,

    #[arg(long = "steps", value_name = "N", allow_hyphen_values = true)]
    pub freq_steps: Option<String>,

    /// Solar flux index (offline variant)
    #[arg(long, allow_hyphen_values = true)]
    pub sfi: Option<String>,

    /// Sunspot number (offline variant)
    #[arg(long, allow_hyphen_values = true)]
    pub ssn: Option<String>,

    /// Planetary K index (offline variant)
    #[arg(long, allow_hyphen_values = true)]
    pub kp: Option<String>,

    /// Dipole, Vertical or Yagi
    #[arg(long = "tx-antenna", value_name = "TYPE")]
    pub tx_antenna: Option<String>,

    /// Low, Medium or High
    #[arg(long = "tx-height", value_name = "HEIGHT")]
    pub tx_height: Option<String>,

    #[arg(long = "rx-antenna", value_name = "TYPE")]
    pub rx_antenna: Option<String>,

    #[arg(long = "rx-height", value_name = "HEIGHT")]
    pub rx_height: Option<String>,

    /// Quiet Rural, Rural, Residential, Urban or Industrial
    #[arg(long = "noise", value_name = "ENV")]
    pub noise: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(endpoint) = &self.endpoint {
            std::env::set_var("HFPROP_ENDPOINT", endpoint);
        }
        if let Some(variant) = &self.variant {
            std::env::set_var("HFPROP_VARIANT", variant);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("HFPROP_LOG", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Form snapshot: the TUI defaults with any flags applied on top.
    pub fn form_values(&self) -> color_eyre::Result<FormValues> {
        let mut form = FormValues::default();

        let text_fields = [
            (&self.tx_lat, &mut form.tx_lat),
            (&self.tx_lon, &mut form.tx_lon),
            (&self.rx_lat, &mut form.rx_lat),
            (&self.rx_lon, &mut form.rx_lon),
            (&self.tx_power, &mut form.tx_power),
            (&self.start_freq, &mut form.start_freq),
            (&self.end_freq, &mut form.end_freq),
            (&self.freq_steps, &mut form.freq_steps),
            (&self.sfi, &mut form.sfi),
            (&self.ssn, &mut form.ssn),
            (&self.kp, &mut form.kp),
        ];
        for (flag, slot) in text_fields {
            if let Some(value) = flag {
                slot.clone_from(value);
            }
        }

        if let Some(raw) = &self.tx_antenna {
            form.tx_antenna_type =
                AntennaType::parse(raw).ok_or_else(|| eyre!("Unknown antenna type: {raw}"))?;
        }
        if let Some(raw) = &self.rx_antenna {
            form.rx_antenna_type =
                AntennaType::parse(raw).ok_or_else(|| eyre!("Unknown antenna type: {raw}"))?;
        }
        if let Some(raw) = &self.tx_height {
            form.tx_antenna_height =
                AntennaHeight::parse(raw).ok_or_else(|| eyre!("Unknown antenna height: {raw}"))?;
        }
        if let Some(raw) = &self.rx_height {
            form.rx_antenna_height =
                AntennaHeight::parse(raw).ok_or_else(|| eyre!("Unknown antenna height: {raw}"))?;
        }
        if let Some(raw) = &self.noise {
            form.noise_environment = NoiseEnvironment::parse(raw)
                .ok_or_else(|| eyre!("Unknown noise environment: {raw}"))?;
        }

        Ok(form)
    }

    pub fn help_text() -> String {
        Self::command().render_help().to_string()
    }
}
