pub const PLACEHOLDER: &str = "-";

fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// SNR in dB with one decimal; absent or non-finite values show a dash.
pub fn format_snr(snr_db: Option<f64>) -> String {
    fixed(snr_db, 1)
}

pub fn format_loss(loss_db: Option<f64>) -> String {
    fixed(loss_db, 1)
}

pub fn format_freq(freq_mhz: Option<f64>) -> String {
    fixed(freq_mhz, 3)
}

pub fn format_fixed1(value: Option<f64>) -> String {
    fixed(value, 1)
}

/// Shortest natural rendering, e.g. `100` or `0.5`.
pub fn format_plain(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_text(value: Option<&str>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), str::to_string)
}
