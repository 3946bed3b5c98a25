use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use serde::Deserialize;

/// Sectioned on-disk layout of `AppConfig`.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    content: ContentConfig,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    section_tracking: SectionTrackingConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            window_width: tables.appearance.window_width,
            window_height: tables.appearance.window_height,
            show_sidebar: tables.appearance.show_sidebar,
            lessons_dir: tables.content.lessons_dir,
            cache_dir: tables.storage.cache_dir,
            persist_track: tables.storage.persist_track,
            band_top_inset: tables.section_tracking.band_top_inset,
            band_bottom_inset: tables.section_tracking.band_bottom_inset,
            log_level: tables.logging.log_level,
            key_toggle_sidebar: tables.keys.toggle_sidebar,
            key_next_section: tables.keys.next_section,
            key_prev_section: tables.keys.prev_section,
            key_cycle_track: tables.keys.cycle_track,
            key_toggle_theme: tables.keys.toggle_theme,
            key_quit: tables.keys.quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                window_width: config.window_width,
                window_height: config.window_height,
                show_sidebar: config.show_sidebar,
            },
            content: ContentConfig {
                lessons_dir: config.lessons_dir.clone(),
            },
            storage: StorageConfig {
                cache_dir: config.cache_dir.clone(),
                persist_track: config.persist_track,
            },
            section_tracking: SectionTrackingConfig {
                band_top_inset: config.band_top_inset,
                band_bottom_inset: config.band_bottom_inset,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                toggle_sidebar: config.key_toggle_sidebar.clone(),
                next_section: config.key_next_section.clone(),
                prev_section: config.key_prev_section.clone(),
                cycle_track: config.key_cycle_track.clone(),
                toggle_theme: config.key_toggle_theme.clone(),
                quit: config.key_quit.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default)]
    show_sidebar: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            show_sidebar: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ContentConfig {
    #[serde(default = "defaults::default_lessons_dir")]
    lessons_dir: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            lessons_dir: defaults::default_lessons_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct StorageConfig {
    #[serde(default = "defaults::default_cache_dir")]
    cache_dir: String,
    #[serde(default = "defaults::default_persist_track")]
    persist_track: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            cache_dir: defaults::default_cache_dir(),
            persist_track: defaults::default_persist_track(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SectionTrackingConfig {
    #[serde(default = "defaults::default_band_top_inset")]
    band_top_inset: f32,
    #[serde(default = "defaults::default_band_bottom_inset")]
    band_bottom_inset: f32,
}

impl Default for SectionTrackingConfig {
    fn default() -> Self {
        SectionTrackingConfig {
            band_top_inset: defaults::default_band_top_inset(),
            band_bottom_inset: defaults::default_band_bottom_inset(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_toggle_sidebar")]
    toggle_sidebar: String,
    #[serde(default = "defaults::default_key_next_section")]
    next_section: String,
    #[serde(default = "defaults::default_key_prev_section")]
    prev_section: String,
    #[serde(default = "defaults::default_key_cycle_track")]
    cycle_track: String,
    #[serde(default = "defaults::default_key_toggle_theme")]
    toggle_theme: String,
    #[serde(default = "defaults::default_key_quit")]
    quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            toggle_sidebar: defaults::default_key_toggle_sidebar(),
            next_section: defaults::default_key_next_section(),
            prev_section: defaults::default_key_prev_section(),
            cycle_track: defaults::default_key_cycle_track(),
            toggle_theme: defaults::default_key_toggle_theme(),
            quit: defaults::default_key_quit(),
        }
    }
}
