use crate::display::details::DetailPanel;
use crate::display::format::{format_fixed1, format_freq, format_loss, format_snr, format_text, PLACEHOLDER};
use crate::domain::{SkywaveLikelihood, StyleBucket};
use crate::sim::record::ResultRecord;
use chrono::{DateTime, Utc};

/// Which results area is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Empty,
    Single,
    Tabular,
}

impl DisplayMode {
    pub const fn for_count(count: usize) -> Self {
        match count {
            0 => Self::Empty,
            1 => Self::Single,
            _ => Self::Tabular,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Single => "single",
            Self::Tabular => "tabular",
        }
    }
}

/// Index of the record used for details and map colouring.
pub const fn representative_index(count: usize) -> Option<usize> {
    if count == 0 {
        None
    } else {
        Some(count / 2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinglePanel {
    pub distance_km: String,
    pub likelihood: String,
    pub likelihood_style: StyleBucket,
    pub ground_wave_snr: String,
    pub skywave_snr: String,
}

impl Default for SinglePanel {
    fn default() -> Self {
        Self {
            distance_km: PLACEHOLDER.to_string(),
            likelihood: PLACEHOLDER.to_string(),
            likelihood_style: StyleBucket::Neutral,
            ground_wave_snr: PLACEHOLDER.to_string(),
            skywave_snr: PLACEHOLDER.to_string(),
        }
    }
}

impl SinglePanel {
    pub fn from_record(record: &ResultRecord) -> Self {
        let label = record.skywave_likelihood.as_deref();
        let likelihood = if SkywaveLikelihood::is_recognised(label) {
            format_text(label)
        } else {
            PLACEHOLDER.to_string()
        };

        Self {
            distance_km: format_fixed1(record.distance_km),
            likelihood,
            likelihood_style: SkywaveLikelihood::from_label(label).style_bucket(),
            ground_wave_snr: format_snr(record.ground_wave_snr),
            skywave_snr: format_snr(record.skywave_snr),
        }
    }
}

/// One table row, columns in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub frequency_mhz: String,
    pub ground_wave_snr: String,
    pub skywave_mode: String,
    pub absorption_db: String,
    pub skywave_loss_db: String,
    pub skywave_snr: String,
    pub likelihood: String,
    pub likelihood_style: StyleBucket,
}

impl TableRow {
    pub const HEADERS: [&'static str; 7] = [
        "Freq (MHz)",
        "GW SNR (dB)",
        "Sky Mode",
        "Absorp (dB)",
        "Sky Loss (dB)",
        "Sky SNR (dB)",
        "Sky Likelihood",
    ];

    pub fn from_record(record: &ResultRecord) -> Self {
        let label = record.skywave_likelihood.as_deref();
        Self {
            frequency_mhz: format_freq(record.frequency_mhz),
            ground_wave_snr: format_snr(record.ground_wave_snr),
            skywave_mode: format_text(record.skywave_mode.as_deref()),
            absorption_db: format_loss(record.absorption_db),
            skywave_loss_db: format_loss(record.skywave_total_loss_db),
            skywave_snr: format_snr(record.skywave_snr),
            likelihood: label.unwrap_or("Poor").to_string(),
            likelihood_style: SkywaveLikelihood::from_label(label).style_bucket(),
        }
    }

    pub fn cells(&self) -> [&str; 7] {
        [
            self.frequency_mhz.as_str(),
            self.ground_wave_snr.as_str(),
            self.skywave_mode.as_str(),
            self.absorption_db.as_str(),
            self.skywave_loss_db.as_str(),
            self.skywave_snr.as_str(),
            self.likelihood.as_str(),
        ]
    }
}

/// Everything the results area shows after a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultView {
    pub mode: DisplayMode,
    pub single: SinglePanel,
    pub rows: Vec<TableRow>,
    pub details: DetailPanel,
    records: Vec<ResultRecord>,
    representative: Option<ResultRecord>,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, records: &[ResultRecord]) -> DisplayMode {
        self.render_at(records, Utc::now())
    }

    /// Rebuilds the whole view from `records`. Nothing from a previous run survives.
    pub fn render_at(&mut self, records: &[ResultRecord], now: DateTime<Utc>) -> DisplayMode {
        let Some(index) = representative_index(records.len()) else {
            self.clear();
            return self.mode;
        };

        let representative = &records[index];
        self.mode = DisplayMode::for_count(records.len());
        match self.mode {
            DisplayMode::Single => {
                self.single = SinglePanel::from_record(representative);
                self.rows.clear();
            }
            _ => {
                self.single = SinglePanel::default();
                self.rows = records.iter().map(TableRow::from_record).collect();
            }
        }
        self.details = DetailPanel::from_record(representative, now);
        self.representative = Some(representative.clone());
        self.records = records.to_vec();
        self.mode
    }

    /// Empty state: single panel of dashes, no table, reset details.
    pub fn clear(&mut self) {
        self.mode = DisplayMode::Empty;
        self.single = SinglePanel::default();
        self.rows.clear();
        self.details = DetailPanel::empty();
        self.records.clear();
        self.representative = None;
    }

    /// Records from the last successful run, in server order.
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn representative(&self) -> Option<&ResultRecord> {
        self.representative.as_ref()
    }

    pub const fn shows_single(&self) -> bool {
        matches!(self.mode, DisplayMode::Empty | DisplayMode::Single)
    }

    pub const fn shows_table(&self) -> bool {
        matches!(self.mode, DisplayMode::Tabular)
    }
}
