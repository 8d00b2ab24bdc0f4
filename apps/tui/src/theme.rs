use crate::db::queries::{get_setting, put_setting};
use crate::domain::StyleBucket;
use ratatui::style::Color;
use sqlx::SqlitePool;

pub const THEME_KEY: &str = "color-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than `dark` is light.
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon offered by the toggle: the sun switches back to light, the moon to dark.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Dark => "☀",
            Self::Light => "☾",
        }
    }

    pub const fn palette(self) -> Palette {
        match self {
            Self::Light => Palette::LIGHT,
            Self::Dark => Palette::DARK,
        }
    }
}

/// Terminal colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight: Color,
    pub error: Color,
    pub warning: Color,
    pub good: Color,
    pub fair: Color,
    pub poor: Color,
    pub fair_ground_wave: Color,
    pub map: Color,
}

impl Palette {
    pub const LIGHT: Self = Self {
        background: Color::White,
        text: Color::Black,
        muted: Color::DarkGray,
        border: Color::Blue,
        accent: Color::Blue,
        highlight: Color::Rgb(219, 234, 254),
        error: Color::Red,
        warning: Color::Rgb(161, 98, 7),
        good: Color::Green,
        fair: Color::Rgb(202, 138, 4),
        poor: Color::Red,
        fair_ground_wave: Color::Rgb(234, 88, 12),
        map: Color::Gray,
    };

    pub const DARK: Self = Self {
        background: Color::Reset,
        text: Color::White,
        muted: Color::Gray,
        border: Color::Cyan,
        accent: Color::Cyan,
        highlight: Color::DarkGray,
        error: Color::LightRed,
        warning: Color::Yellow,
        good: Color::LightGreen,
        fair: Color::Yellow,
        poor: Color::LightRed,
        fair_ground_wave: Color::Rgb(251, 146, 60),
        map: Color::DarkGray,
    };

    pub const fn bucket(&self, bucket: StyleBucket) -> Color {
        match bucket {
            StyleBucket::Good => self.good,
            StyleBucket::Fair => self.fair,
            StyleBucket::Poor => self.poor,
            StyleBucket::FairGroundWave => self.fair_ground_wave,
            StyleBucket::Neutral => self.muted,
        }
    }
}

/// Reads the terminal background from `COLORFGBG` (`fg;bg` or `fg;x;bg`).
///
/// Background indices 0-6 and 8 are dark colours; anything else, or an
/// unset variable, counts as light.
pub fn prefers_dark_from_colorfgbg(value: Option<&str>) -> bool {
    value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

pub fn system_prefers_dark() -> bool {
    prefers_dark_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

/// Current theme plus the store it is persisted in.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    theme: Theme,
    store: Option<SqlitePool>,
}

impl ThemeManager {
    /// Stored choice wins, otherwise the terminal preference. The result is persisted.
    pub async fn load(store: Option<SqlitePool>, system_prefers_dark: bool) -> Self {
        let stored = match &store {
            Some(pool) => match get_setting(pool, THEME_KEY).await {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(error = %e, "could not read stored theme");
                    None
                }
            },
            None => None,
        };

        let theme = stored.as_deref().map_or_else(
            || {
                if system_prefers_dark {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            },
            Theme::from_stored,
        );

        let mut manager = Self { theme, store };
        manager.set_theme(theme).await;
        manager
    }

    /// Manager with no backing store; changes live only in memory.
    pub const fn in_memory(theme: Theme) -> Self {
        Self { theme, store: None }
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub const fn glyph(&self) -> &'static str {
        self.theme.glyph()
    }

    pub async fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Some(pool) = &self.store {
            if let Err(e) = put_setting(pool, THEME_KEY, theme.as_str()).await {
                tracing::warn!(error = %e, "could not persist theme");
            }
        }
        tracing::info!(theme = theme.as_str(), "theme set");
    }

    pub async fn toggle(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set_theme(next).await;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::setup_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn settings_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        setup_database(&pool).await.unwrap();
        pool
    }

    #[test]
    fn stored_values_parse_to_light_unless_dark() {
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("solarized"), Theme::Light);
    }

    #[test]
    fn glyph_offers_the_other_theme() {
        assert_eq!(Theme::Dark.glyph(), "☀");
        assert_eq!(Theme::Light.glyph(), "☾");
    }

    #[test]
    fn colorfgbg_detection() {
        assert!(prefers_dark_from_colorfgbg(Some("15;0")));
        assert!(prefers_dark_from_colorfgbg(Some("15;default;8")));
        assert!(!prefers_dark_from_colorfgbg(Some("0;15")));
        assert!(!prefers_dark_from_colorfgbg(Some("0;7")));
        assert!(!prefers_dark_from_colorfgbg(Some("garbage")));
        assert!(!prefers_dark_from_colorfgbg(None));
    }

    #[test]
    fn palette_maps_buckets() {
        let palette = Theme::Dark.palette();
        assert_eq!(palette.bucket(StyleBucket::Good), palette.good);
        assert_eq!(palette.bucket(StyleBucket::Neutral), palette.muted);
        assert_ne!(Palette::LIGHT, Palette::DARK);
    }

    #[tokio::test]
    async fn load_uses_system_preference_when_nothing_stored() {
        let pool = settings_pool().await;
        let manager = ThemeManager::load(Some(pool.clone()), true).await;
        assert_eq!(manager.theme(), Theme::Dark);
        assert_eq!(
            get_setting(&pool, THEME_KEY).await.unwrap().as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn stored_choice_beats_system_preference() {
        let pool = settings_pool().await;
        put_setting(&pool, THEME_KEY, "light").await.unwrap();
        let manager = ThemeManager::load(Some(pool), true).await;
        assert_eq!(manager.theme(), Theme::Light);
    }

    #[tokio::test]
    async fn toggle_flips_and_persists() {
        let pool = settings_pool().await;
        let mut manager = ThemeManager::load(Some(pool.clone()), false).await;
        assert_eq!(manager.glyph(), "☾");

        assert_eq!(manager.toggle().await, Theme::Dark);
        assert_eq!(manager.glyph(), "☀");
        assert_eq!(
            get_setting(&pool, THEME_KEY).await.unwrap().as_deref(),
            Some("dark")
        );

        assert_eq!(manager.toggle().await, Theme::Light);
        assert_eq!(
            get_setting(&pool, THEME_KEY).await.unwrap().as_deref(),
            Some("light")
        );
    }

    #[tokio::test]
    async fn toggle_survives_a_broken_store() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        // No settings table: every read and write fails.
        let mut manager = ThemeManager::load(Some(pool), false).await;
        assert_eq!(manager.theme(), Theme::Light);
        assert_eq!(manager.toggle().await, Theme::Dark);
    }
}
