use serde::{Deserialize, Serialize};

/// One frequency point of a simulation run. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultRecord {
    #[serde(rename = "frequencyMHz")]
    pub frequency_mhz: Option<f64>,
    pub distance_km: Option<f64>,
    pub tx_power_w: Option<f64>,
    pub time_of_day: Option<String>,
    pub tx_antenna_type: Option<String>,
    pub tx_antenna_height: Option<String>,
    pub rx_antenna_type: Option<String>,
    pub rx_antenna_height: Option<String>,
    pub noise_environment: Option<String>,
    pub tx_gain_dbi: Option<f64>,
    pub rx_gain_dbi: Option<f64>,
    pub noise_floor_dbm: Option<f64>,
    pub noise_figure_db: Option<f64>,
    pub fspl_db: Option<f64>,
    pub ground_wave_extra_loss_db: Option<f64>,
    pub ground_wave_total_loss_db: Option<f64>,
    #[serde(rename = "groundWaveSNR")]
    pub ground_wave_snr: Option<f64>,
    pub skywave_mode: Option<String>,
    pub skywave_extra_loss_db: Option<f64>,
    pub absorption_db: Option<f64>,
    pub skywave_total_loss_db: Option<f64>,
    #[serde(rename = "skywaveSNR")]
    pub skywave_snr: Option<f64>,
    pub skywave_likelihood: Option<String>,
    #[serde(rename = "MUF_F2")]
    pub muf_f2: Option<f64>,
    #[serde(rename = "FOT_F2")]
    pub fot_f2: Option<f64>,
    #[serde(rename = "MUF_E")]
    pub muf_e: Option<f64>,
    pub solar_zenith_angle: Option<f64>,
    pub sfi: Option<f64>,
    pub ssn: Option<f64>,
    pub kp: Option<f64>,
}

const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Rewrites bare `-Infinity`, `Infinity` and `NaN` tokens to `null`.
///
/// Tokens inside string literals are left alone.
pub fn sanitize_non_finite_literals(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = body;

    while let Some(ch) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if let Some(token) = NON_FINITE_TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// Decodes a success body into records, tolerating non-finite literals.
pub fn decode_records(body: &str) -> Result<Vec<ResultRecord>, serde_json::Error> {
    serde_json::from_str(&sanitize_non_finite_literals(body))
}
