use crate::display::format::{
    format_fixed1, format_freq, format_loss, format_plain, format_snr, format_text,
};
use crate::sim::record::ResultRecord;
use chrono::{DateTime, Utc};

pub const DEFAULT_TITLE: &str = "Calculation Details";
pub const EMPTY_MESSAGE: &str = "Run simulation to see calculation details.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLine {
    Field { label: &'static str, value: String },
    Rule,
    Note(String),
}

impl DetailLine {
    fn field(label: &'static str, value: String) -> Self {
        Self::Field { label, value }
    }
}

/// Breakdown of one representative record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub title: String,
    pub lines: Vec<DetailLine>,
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self::empty()
    }
}

impl DetailPanel {
    pub fn empty() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            lines: vec![DetailLine::Note(EMPTY_MESSAGE.to_string())],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.lines.as_slice(), [DetailLine::Note(_)])
    }

    pub fn from_record(record: &ResultRecord, now: DateTime<Utc>) -> Self {
        let title = match record.frequency_mhz {
            Some(freq) if freq != 0.0 => {
                format!("{DEFAULT_TITLE} ({} MHz)", format_freq(Some(freq)))
            }
            _ => DEFAULT_TITLE.to_string(),
        };

        let power_dbm = 10.0 * (record.tx_power_w.unwrap_or(1.0) * 1000.0).log10();
        let r = record;

        let lines = vec![
            DetailLine::field("Distance", format!("{} km", format_fixed1(r.distance_km))),
            DetailLine::field(
                "Tx Power",
                format!(
                    "{} W ({} dBm)",
                    format_plain(r.tx_power_w),
                    format_fixed1(Some(power_dbm))
                ),
            ),
            DetailLine::field(
                "Time (UTC)",
                format!(
                    "{} ({})",
                    now.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                    format_text(r.time_of_day.as_deref())
                ),
            ),
            DetailLine::field(
                "Solar Zenith Angle",
                format!("{}°", format_fixed1(r.solar_zenith_angle)),
            ),
            DetailLine::field(
                "Indices Used",
                format!(
                    "SFI={}, SSN={}, Kp={}",
                    format_plain(r.sfi),
                    format_plain(r.ssn),
                    format_plain(r.kp)
                ),
            ),
            DetailLine::Rule,
            DetailLine::field(
                "Tx Antenna",
                antenna_summary(
                    r.tx_antenna_type.as_deref(),
                    r.tx_antenna_height.as_deref(),
                    r.tx_gain_dbi,
                ),
            ),
            DetailLine::field(
                "Rx Antenna",
                antenna_summary(
                    r.rx_antenna_type.as_deref(),
                    r.rx_antenna_height.as_deref(),
                    r.rx_gain_dbi,
                ),
            ),
            DetailLine::field(
                "Rx Noise Env",
                format!(
                    "{} | Noise Fig: {} dB",
                    format_text(r.noise_environment.as_deref()),
                    format_fixed1(r.noise_figure_db)
                ),
            ),
            DetailLine::field(
                "Noise Floor",
                format!("kTB + NoiseFig = {} dBm", format_fixed1(r.noise_floor_dbm)),
            ),
            DetailLine::Rule,
            DetailLine::field(
                "Est. MUF (F2)",
                format!(
                    "{} MHz | Est. FOT (F2): {} MHz",
                    format_fixed1(r.muf_f2),
                    format_fixed1(r.fot_f2)
                ),
            ),
            DetailLine::field("Est. MUF (E)", format!("{} MHz", format_fixed1(r.muf_e))),
            DetailLine::field("Base FSPL", format!("{} dB", format_loss(r.fspl_db))),
            DetailLine::field(
                "Absorption (Est.)",
                format!("{} dB", format_loss(r.absorption_db)),
            ),
            DetailLine::Rule,
            DetailLine::field(
                "Ground Wave Loss",
                format!("FSPL + Extra ≈ {} dB", format_loss(r.ground_wave_total_loss_db)),
            ),
            DetailLine::field("Skywave Mode", format_text(r.skywave_mode.as_deref())),
            DetailLine::field(
                "Skywave Loss",
                format!(
                    "FSPL + ModeLoss + Absorp ≈ {} dB",
                    format_loss(r.skywave_total_loss_db)
                ),
            ),
            DetailLine::Rule,
            DetailLine::field(
                "Ground Wave SNR (Est.)",
                format!("{} dB", format_snr(r.ground_wave_snr)),
            ),
            DetailLine::field(
                "Skywave SNR (Est.)",
                format!("{} dB", format_snr(r.skywave_snr)),
            ),
        ];

        Self { title, lines }
    }

    /// Value of the first field with this label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            DetailLine::Field { label: l, value } if *l == label => Some(value.as_str()),
            _ => None,
        })
    }
}

fn antenna_summary(kind: Option<&str>, height: Option<&str>, gain_dbi: Option<f64>) -> String {
    format!(
        "{} ({}) | Gain: {} dBi",
        format_text(kind),
        format_text(height),
        format_fixed1(gain_dbi)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_panel_shows_prompt() {
        let panel = DetailPanel::empty();
        assert_eq!(panel.title, "Calculation Details");
        assert!(panel.is_empty());
        assert_eq!(
            panel.lines,
            vec![DetailLine::Note(
                "Run simulation to see calculation details.".to_string()
            )]
        );
    }

    #[test]
    fn populated_panel_formats_fields() {
        let record = ResultRecord {
            frequency_mhz: Some(14.0),
            distance_km: Some(853.24),
            tx_power_w: Some(100.0),
            time_of_day: Some("Day".to_string()),
            tx_antenna_type: Some("Dipole".to_string()),
            tx_antenna_height: Some("Medium (≈0.5λ)".to_string()),
            tx_gain_dbi: Some(2.15),
            ground_wave_snr: Some(12.34),
            skywave_snr: None,
            sfi: Some(150.0),
            ..ResultRecord::default()
        };

        let panel = DetailPanel::from_record(&record, at_noon());
        assert_eq!(panel.title, "Calculation Details (14.000 MHz)");
        assert!(!panel.is_empty());
        assert_eq!(panel.value("Distance"), Some("853.2 km"));
        assert_eq!(panel.value("Tx Power"), Some("100 W (50.0 dBm)"));
        assert_eq!(
            panel.value("Time (UTC)"),
            Some("2024-03-20T12:00:00.000Z (Day)")
        );
        assert_eq!(panel.value("Indices Used"), Some("SFI=150, SSN=-, Kp=-"));
        assert_eq!(
            panel.value("Tx Antenna"),
            Some("Dipole (Medium (≈0.5λ)) | Gain: 2.1 dBi")
        );
        assert_eq!(panel.value("Ground Wave SNR (Est.)"), Some("12.3 dB"));
        assert_eq!(panel.value("Skywave SNR (Est.)"), Some("- dB"));
    }

    #[test]
    fn missing_power_assumes_one_watt() {
        let panel = DetailPanel::from_record(&ResultRecord::default(), at_noon());
        assert_eq!(panel.title, "Calculation Details");
        assert_eq!(panel.value("Tx Power"), Some("- W (30.0 dBm)"));
        assert_eq!(panel.value("Distance"), Some("- km"));
    }
}
