use serde::Deserialize;
use std::path::PathBuf;
use tutorial_core::TriggerBand;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default)]
    pub show_sidebar: bool,
    #[serde(default = "crate::config::defaults::default_lessons_dir")]
    pub lessons_dir: String,
    #[serde(default = "crate::config::defaults::default_cache_dir")]
    pub cache_dir: String,
    #[serde(default = "crate::config::defaults::default_persist_track")]
    pub persist_track: bool,
    #[serde(default = "crate::config::defaults::default_band_top_inset")]
    pub band_top_inset: f32,
    #[serde(default = "crate::config::defaults::default_band_bottom_inset")]
    pub band_bottom_inset: f32,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_toggle_sidebar")]
    pub key_toggle_sidebar: String,
    #[serde(default = "crate::config::defaults::default_key_next_section")]
    pub key_next_section: String,
    #[serde(default = "crate::config::defaults::default_key_prev_section")]
    pub key_prev_section: String,
    #[serde(default = "crate::config::defaults::default_key_cycle_track")]
    pub key_cycle_track: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_theme")]
    pub key_toggle_theme: String,
    #[serde(default = "crate::config::defaults::default_key_quit")]
    pub key_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::Night,
            font_size: crate::config::defaults::default_font_size(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            show_sidebar: false,
            lessons_dir: crate::config::defaults::default_lessons_dir(),
            cache_dir: crate::config::defaults::default_cache_dir(),
            persist_track: crate::config::defaults::default_persist_track(),
            band_top_inset: crate::config::defaults::default_band_top_inset(),
            band_bottom_inset: crate::config::defaults::default_band_bottom_inset(),
            log_level: crate::config::defaults::default_log_level(),
            key_toggle_sidebar: crate::config::defaults::default_key_toggle_sidebar(),
            key_next_section: crate::config::defaults::default_key_next_section(),
            key_prev_section: crate::config::defaults::default_key_prev_section(),
            key_cycle_track: crate::config::defaults::default_key_cycle_track(),
            key_toggle_theme: crate::config::defaults::default_key_toggle_theme(),
            key_quit: crate::config::defaults::default_key_quit(),
        }
    }
}

impl AppConfig {
    /// Trigger band from the configured insets, clamped to a usable band.
    pub fn trigger_band(&self) -> TriggerBand {
        TriggerBand::new(self.band_top_inset, self.band_bottom_inset)
    }

    pub fn cache_path(&self) -> PathBuf {
        PathBuf::from(&self.cache_dir)
    }

    pub fn lessons_path(&self) -> PathBuf {
        PathBuf::from(&self.lessons_dir)
    }

    /// Copy the settings the base file always owns over per-user overrides.
    pub fn keep_base_owned(&mut self, base: &AppConfig) {
        self.log_level = base.log_level;
        self.lessons_dir = base.lessons_dir.clone();
        self.cache_dir = base.cache_dir.clone();
        self.persist_track = base.persist_track;
        self.band_top_inset = base.band_top_inset;
        self.band_bottom_inset = base.band_bottom_inset;
        self.key_toggle_sidebar = base.key_toggle_sidebar.clone();
        self.key_next_section = base.key_next_section.clone();
        self.key_prev_section = base.key_prev_section.clone();
        self.key_cycle_track = base.key_cycle_track.clone();
        self.key_toggle_theme = base.key_toggle_theme.clone();
        self.key_quit = base.key_quit.clone();
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    #[default]
    Night,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
