use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

/// Picks the best candidate for free-form operator input.
///
/// Exact (case-insensitive) matches on either the wire value or the label win;
/// otherwise the highest fuzzy score is used.
fn parse_choice<T: Copy>(
    value: &str,
    all: &[T],
    as_str: impl Fn(T) -> &'static str,
    label: impl Fn(T) -> &'static str,
) -> Option<T> {
    let needle = value.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(exact) = all.iter().copied().find(|choice| {
        as_str(*choice).to_lowercase() == needle || label(*choice).to_lowercase() == needle
    }) {
        return Some(exact);
    }

    let matcher = SkimMatcherV2::default();
    all.iter()
        .copied()
        .filter_map(|choice| {
            matcher
                .fuzzy_match(as_str(choice), &needle)
                .map(|score| (score, choice))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, choice)| choice)
}

const fn wrap_next(index: usize, len: usize) -> usize {
    (index + 1) % len
}

const fn wrap_prev(index: usize, len: usize) -> usize {
    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AntennaType {
    #[default]
    #[serde(rename = "Dipole")]
    Dipole,
    #[serde(rename = "Vertical")]
    Vertical,
    #[serde(rename = "Yagi (Simple)")]
    Yagi,
}

impl AntennaType {
    pub const ALL: [Self; 3] = [Self::Dipole, Self::Vertical, Self::Yagi];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dipole => "Dipole",
            Self::Vertical => "Vertical",
            Self::Yagi => "Yagi (Simple)",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dipole => "Dipole",
            Self::Vertical => "Vertical",
            Self::Yagi => "Yagi",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Dipole => 0,
            Self::Vertical => 1,
            Self::Yagi => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(value, &Self::ALL, Self::as_str, Self::label)
    }

    pub const fn next(self) -> Self {
        Self::ALL[wrap_next(self.index(), Self::ALL.len())]
    }

    pub const fn prev(self) -> Self {
        Self::ALL[wrap_prev(self.index(), Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AntennaHeight {
    #[serde(rename = "Low (<0.25λ)")]
    Low,
    #[default]
    #[serde(rename = "Medium (≈0.5λ)")]
    Medium,
    #[serde(rename = "High (>0.75λ)")]
    High,
}

impl AntennaHeight {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low (<0.25λ)",
            Self::Medium => "Medium (≈0.5λ)",
            Self::High => "High (>0.75λ)",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(value, &Self::ALL, Self::as_str, Self::label)
    }

    pub const fn next(self) -> Self {
        Self::ALL[wrap_next(self.index(), Self::ALL.len())]
    }

    pub const fn prev(self) -> Self {
        Self::ALL[wrap_prev(self.index(), Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoiseEnvironment {
    #[serde(rename = "Quiet Rural")]
    QuietRural,
    #[serde(rename = "Rural")]
    Rural,
    #[default]
    #[serde(rename = "Residential")]
    Residential,
    #[serde(rename = "Urban")]
    Urban,
    #[serde(rename = "Industrial")]
    Industrial,
}

impl NoiseEnvironment {
    pub const ALL: [Self; 5] = [
        Self::QuietRural,
        Self::Rural,
        Self::Residential,
        Self::Urban,
        Self::Industrial,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuietRural => "Quiet Rural",
            Self::Rural => "Rural",
            Self::Residential => "Residential",
            Self::Urban => "Urban",
            Self::Industrial => "Industrial",
        }
    }

    pub const fn label(self) -> &'static str {
        self.as_str()
    }

    pub const fn index(self) -> usize {
        match self {
            Self::QuietRural => 0,
            Self::Rural => 1,
            Self::Residential => 2,
            Self::Urban => 3,
            Self::Industrial => 4,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(value, &Self::ALL, Self::as_str, Self::label)
    }

    pub const fn next(self) -> Self {
        Self::ALL[wrap_next(self.index(), Self::ALL.len())]
    }

    pub const fn prev(self) -> Self {
        Self::ALL[wrap_prev(self.index(), Self::ALL.len())]
    }
}

/// Skywave quality as reported by the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkywaveLikelihood {
    Good,
    Fair,
    #[default]
    Poor,
    /// Skywave is not viable but the ground wave may carry the signal.
    FairGroundWave,
}

impl SkywaveLikelihood {
    /// Maps a raw label onto the closed set. Absent or unknown labels are `Poor`.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Poor;
        };
        let lower = label.trim().to_lowercase();
        if lower.contains("gw") || lower.contains("ground") {
            return Self::FairGroundWave;
        }
        match lower.as_str() {
            "good" => Self::Good,
            "fair" => Self::Fair,
            _ => Self::Poor,
        }
    }

    /// Whether the raw label named one of the known buckets.
    pub fn is_recognised(label: Option<&str>) -> bool {
        label.is_some_and(|label| {
            let lower = label.trim().to_lowercase();
            matches!(lower.as_str(), "good" | "fair" | "poor")
                || lower.contains("gw")
                || lower.contains("ground")
        })
    }

    pub const fn style_bucket(self) -> StyleBucket {
        match self {
            Self::Good => StyleBucket::Good,
            Self::Fair => StyleBucket::Fair,
            Self::Poor => StyleBucket::Poor,
            Self::FairGroundWave => StyleBucket::FairGroundWave,
        }
    }

    /// Bucket for the skywave path line; ground-wave-only results draw as poor.
    pub const fn sky_path_bucket(self) -> StyleBucket {
        match self {
            Self::Good => StyleBucket::Good,
            Self::Fair => StyleBucket::Fair,
            Self::Poor | Self::FairGroundWave => StyleBucket::Poor,
        }
    }
}

/// Visual class used by indicators and map lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleBucket {
    Good,
    Fair,
    Poor,
    FairGroundWave,
    Neutral,
}

impl StyleBucket {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::FairGroundWave => "fair-gw",
            Self::Neutral => "neutral",
        }
    }
}
