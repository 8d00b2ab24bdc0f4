use crate::sim::error::ValidationError;
use crate::sim::params::{parse_integer, parse_real, ClientVariant, FormValues, SimulationParams};

pub const MIN_FREQ_MHZ: f64 = 1.8;
pub const MAX_FREQ_MHZ: f64 = 30.0;
pub const MAX_FREQ_STEPS: i64 = 100;

const SFI_RANGE: (i64, i64) = (60, 350);
const SSN_RANGE: (i64, i64) = (0, 400);
const KP_RANGE: (i64, i64) = (0, 9);

/// Latitude/longitude within the globe. NaN never passes.
pub fn coords_valid(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

fn freq_valid(freq: f64) -> bool {
    (MIN_FREQ_MHZ..=MAX_FREQ_MHZ).contains(&freq)
}

fn index_in(value: Option<i64>, (low, high): (i64, i64)) -> Option<u32> {
    value
        .filter(|v| (low..=high).contains(v))
        .and_then(|v| u32::try_from(v).ok())
}

/// Runs the ordered checks; the first failing check decides the message.
#[allow(clippy::float_cmp)]
pub fn validate(
    form: &FormValues,
    variant: ClientVariant,
) -> Result<SimulationParams, ValidationError> {
    let tx_lat = parse_real(&form.tx_lat);
    let tx_lon = parse_real(&form.tx_lon);
    let rx_lat = parse_real(&form.rx_lat);
    let rx_lon = parse_real(&form.rx_lon);
    let tx_power_w = parse_real(&form.tx_power);
    let start_freq = parse_real(&form.start_freq);
    let end_freq = parse_real(&form.end_freq);
    let freq_steps = parse_integer(&form.freq_steps);

    if !coords_valid(tx_lat, tx_lon) {
        return Err(ValidationError::new("Invalid Transmitter coordinates."));
    }
    if !coords_valid(rx_lat, rx_lon) {
        return Err(ValidationError::new("Invalid Receiver coordinates."));
    }
    if tx_lat == rx_lat && tx_lon == rx_lon {
        return Err(ValidationError::new(
            "Transmitter and Receiver locations cannot be the same.",
        ));
    }
    if !tx_power_w.is_finite() || tx_power_w <= 0.0 {
        return Err(ValidationError::new(
            "Invalid Transmitter Power (must be > 0).",
        ));
    }
    if !freq_valid(start_freq) {
        return Err(ValidationError::new("Invalid Start Frequency (1.8-30 MHz)."));
    }
    if !freq_valid(end_freq) {
        return Err(ValidationError::new("Invalid End Frequency (1.8-30 MHz)."));
    }
    if end_freq < start_freq {
        return Err(ValidationError::new(
            "End Frequency must be >= Start Frequency.",
        ));
    }
    let Some(freq_steps) = index_in(freq_steps, (1, MAX_FREQ_STEPS)) else {
        return Err(ValidationError::new(
            "Invalid number of Frequency Steps (1-100).",
        ));
    };
    if freq_steps > 1 && end_freq == start_freq {
        return Err(ValidationError::new(
            "Start and End Frequency cannot be the same when Steps > 1.",
        ));
    }

    let (sfi, ssn, kp) = if variant.collects_indices() {
        let Some(sfi) = index_in(parse_integer(&form.sfi), SFI_RANGE) else {
            return Err(ValidationError::new("Invalid SFI value (60-350)."));
        };
        let Some(ssn) = index_in(parse_integer(&form.ssn), SSN_RANGE) else {
            return Err(ValidationError::new("Invalid SSN value (0-400)."));
        };
        let Some(kp) = index_in(parse_integer(&form.kp), KP_RANGE) else {
            return Err(ValidationError::new("Invalid Kp value (0-9)."));
        };
        (Some(sfi), Some(ssn), Some(kp))
    } else {
        (None, None, None)
    };

    Ok(SimulationParams {
        tx_lat,
        tx_lon,
        rx_lat,
        rx_lon,
        tx_power_w,
        start_freq,
        end_freq,
        freq_steps,
        sfi,
        ssn,
        kp,
        tx_antenna_type: form.tx_antenna_type,
        tx_antenna_height: form.tx_antenna_height,
        rx_antenna_type: form.rx_antenna_type,
        rx_antenna_height: form.rx_antenna_height,
        noise_environment: form.noise_environment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormValues {
        FormValues::default()
    }

    fn message(form: &FormValues, variant: ClientVariant) -> String {
        validate(form, variant).unwrap_err().message
    }

    #[test]
    fn defaults_are_valid() {
        let params = validate(&form(), ClientVariant::Online).unwrap();
        assert_eq!(params.freq_steps, 1);
        assert_eq!(params.sfi, None);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected_per_station() {
        for (lat, lon) in [("91", "0"), ("-90.5", "0"), ("0", "180.01"), ("0", "-181"), ("x", "0")] {
            let mut tx = form();
            tx.tx_lat = lat.to_string();
            tx.tx_lon = lon.to_string();
            assert_eq!(
                message(&tx, ClientVariant::Online),
                "Invalid Transmitter coordinates."
            );

            let mut rx = form();
            rx.rx_lat = lat.to_string();
            rx.rx_lon = lon.to_string();
            assert_eq!(
                message(&rx, ClientVariant::Online),
                "Invalid Receiver coordinates."
            );
        }
    }

    #[test]
    fn boundary_coordinates_are_accepted() {
        let mut f = form();
        f.tx_lat = "90".to_string();
        f.tx_lon = "-180".to_string();
        f.rx_lat = "-90".to_string();
        f.rx_lon = "180".to_string();
        assert!(validate(&f, ClientVariant::Online).is_ok());
    }

    #[test]
    fn identical_stations_rejected_regardless_of_other_fields() {
        let mut f = form();
        f.rx_lon = f.tx_lon.clone();
        f.tx_power = "-5".to_string();
        f.freq_steps = "500".to_string();
        assert_eq!(
            message(&f, ClientVariant::Online),
            "Transmitter and Receiver locations cannot be the same."
        );
    }

    #[test]
    fn transmitter_error_takes_precedence_over_receiver() {
        let mut f = form();
        f.tx_lat = "100".to_string();
        f.rx_lat = "100".to_string();
        assert_eq!(
            message(&f, ClientVariant::Online),
            "Invalid Transmitter coordinates."
        );
    }

    #[test]
    fn power_must_be_positive_and_finite() {
        for power in ["0", "-1", "inf", "abc"] {
            let mut f = form();
            f.tx_power = power.to_string();
            assert_eq!(
                message(&f, ClientVariant::Online),
                "Invalid Transmitter Power (must be > 0)."
            );
        }
    }

    #[test]
    fn frequency_checks_in_order() {
        let mut f = form();
        f.start_freq = "1.7".to_string();
        f.end_freq = "31".to_string();
        assert_eq!(
            message(&f, ClientVariant::Online),
            "Invalid Start Frequency (1.8-30 MHz)."
        );

        f.start_freq = "1.8".to_string();
        assert_eq!(
            message(&f, ClientVariant::Online),
            "Invalid End Frequency (1.8-30 MHz)."
        );

        f.start_freq = "20".to_string();
        f.end_freq = "10".to_string();
        assert_eq!(
            message(&f, ClientVariant::Online),
            "End Frequency must be >= Start Frequency."
        );
    }

    #[test]
    fn step_count_checks() {
        let mut f = form();
        for steps in ["0", "101", "2.5", ""] {
            f.freq_steps = steps.to_string();
            assert_eq!(
                message(&f, ClientVariant::Online),
                "Invalid number of Frequency Steps (1-100)."
            );
        }

        f.freq_steps = "5".to_string();
        assert_eq!(
            message(&f, ClientVariant::Online),
            "Start and End Frequency cannot be the same when Steps > 1."
        );

        f.end_freq = "21".to_string();
        let params = validate(&f, ClientVariant::Online).unwrap();
        assert_eq!(params.freq_steps, 5);
    }

    #[test]
    fn indices_only_checked_offline() {
        let mut f = form();
        f.sfi = "10".to_string();
        f.ssn = "-1".to_string();
        f.kp = "12".to_string();
        assert!(validate(&f, ClientVariant::Online).is_ok());
        assert_eq!(
            message(&f, ClientVariant::Offline),
            "Invalid SFI value (60-350)."
        );

        f.sfi = "150".to_string();
        assert_eq!(
            message(&f, ClientVariant::Offline),
            "Invalid SSN value (0-400)."
        );

        f.ssn = "400".to_string();
        assert_eq!(message(&f, ClientVariant::Offline), "Invalid Kp value (0-9).");

        f.kp = "9".to_string();
        let params = validate(&f, ClientVariant::Offline).unwrap();
        assert_eq!((params.sfi, params.ssn, params.kp), (Some(150), Some(400), Some(9)));
    }

    #[test]
    fn frequency_checks_precede_index_checks() {
        let mut f = form();
        f.start_freq = "40".to_string();
        f.sfi = "1".to_string();
        assert_eq!(
            message(&f, ClientVariant::Offline),
            "Invalid Start Frequency (1.8-30 MHz)."
        );
    }
}
