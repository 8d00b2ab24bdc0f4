use crate::domain::{AntennaHeight, AntennaType, NoiseEnvironment};
use serde::Serialize;

/// Which of the two client designs is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientVariant {
    /// Map overlay, indices supplied by the endpoint.
    #[default]
    Online,
    /// No map, operator supplies SFI/SSN/Kp.
    Offline,
}

impl ClientVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "online" | "map" => Some(Self::Online),
            "offline" | "indices" => Some(Self::Offline),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }

    pub const fn has_map(self) -> bool {
        matches!(self, Self::Online)
    }

    pub const fn collects_indices(self) -> bool {
        matches!(self, Self::Offline)
    }
}

/// Raw form contents exactly as typed by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub tx_lat: String,
    pub tx_lon: String,
    pub rx_lat: String,
    pub rx_lon: String,
    pub tx_power: String,
    pub start_freq: String,
    pub end_freq: String,
    pub freq_steps: String,
    pub sfi: String,
    pub ssn: String,
    pub kp: String,
    pub tx_antenna_type: AntennaType,
    pub tx_antenna_height: AntennaHeight,
    pub rx_antenna_type: AntennaType,
    pub rx_antenna_height: AntennaHeight,
    pub noise_environment: NoiseEnvironment,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            tx_lat: "40".to_string(),
            tx_lon: "-100".to_string(),
            rx_lat: "40".to_string(),
            rx_lon: "-90".to_string(),
            tx_power: "100".to_string(),
            start_freq: "14".to_string(),
            end_freq: "14".to_string(),
            freq_steps: "1".to_string(),
            sfi: "80".to_string(),
            ssn: "10".to_string(),
            kp: "2".to_string(),
            tx_antenna_type: AntennaType::default(),
            tx_antenna_height: AntennaHeight::default(),
            rx_antenna_type: AntennaType::default(),
            rx_antenna_height: AntennaHeight::default(),
            noise_environment: NoiseEnvironment::default(),
        }
    }
}

/// Parses a real number; unparseable input becomes NaN so range checks reject it.
pub fn parse_real(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Validated request body for `POST /simulate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub tx_lat: f64,
    pub tx_lon: f64,
    pub rx_lat: f64,
    pub rx_lon: f64,
    pub tx_power_w: f64,
    pub start_freq: f64,
    pub end_freq: f64,
    pub freq_steps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfi: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kp: Option<u32>,
    pub tx_antenna_type: AntennaType,
    pub tx_antenna_height: AntennaHeight,
    pub rx_antenna_type: AntennaType,
    pub rx_antenna_height: AntennaHeight,
    pub noise_environment: NoiseEnvironment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_real_rejects_garbage_as_nan() {
        assert!(parse_real("abc").is_nan());
        assert!(parse_real("").is_nan());
        assert!((parse_real(" 14.25 ") - 14.25).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_integer_is_strict() {
        assert_eq!(parse_integer("7"), Some(7));
        assert_eq!(parse_integer("2.5"), None);
        assert_eq!(parse_integer(""), None);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let params = SimulationParams {
            tx_lat: 40.0,
            tx_lon: -100.0,
            rx_lat: 40.0,
            rx_lon: -90.0,
            tx_power_w: 100.0,
            start_freq: 14.0,
            end_freq: 14.0,
            freq_steps: 1,
            sfi: None,
            ssn: None,
            kp: None,
            tx_antenna_type: AntennaType::Dipole,
            tx_antenna_height: AntennaHeight::Medium,
            rx_antenna_type: AntennaType::Vertical,
            rx_antenna_height: AntennaHeight::Low,
            noise_environment: NoiseEnvironment::Urban,
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["txPowerW"], 100.0);
        assert_eq!(value["freqSteps"], 1);
        assert_eq!(value["rxAntennaType"], "Vertical");
        assert_eq!(value["noiseEnvironment"], "Urban");
        assert!(value.get("sfi").is_none());
    }

    #[test]
    fn variant_parsing() {
        assert_eq!(ClientVariant::parse("Offline"), Some(ClientVariant::Offline));
        assert_eq!(ClientVariant::parse("map"), Some(ClientVariant::Online));
        assert_eq!(ClientVariant::parse("other"), None);
        assert!(ClientVariant::Online.has_map());
        assert!(ClientVariant::Offline.collects_indices());
    }
}
