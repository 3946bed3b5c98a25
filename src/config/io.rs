use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SECTION_NAMES: [&str; 6] = [
    "appearance",
    "content",
    "storage",
    "section_tracking",
    "logging",
    "keys",
];

const OVERRIDE_FILE: &str = "config.toml";

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

/// Parse either the sectioned layout or a flat list of keys.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let table: toml::Table = toml::from_str(contents).context("config is not valid TOML")?;
    let sectioned = SECTION_NAMES
        .iter()
        .any(|name| matches!(table.get(*name), Some(toml::Value::Table(_))));

    if sectioned {
        let tables: ConfigTables =
            toml::from_str(contents).context("failed to read sectioned config")?;
        Ok(tables.into())
    } else {
        toml::from_str::<AppConfig>(contents).context("failed to read flat config")
    }
}

/// Serialize using the sectioned layout.
pub fn serialize_config(config: &AppConfig) -> Result<String> {
    let tables = ConfigTables::from(config);
    toml::to_string(&tables).context("failed to serialize config")
}

fn override_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(OVERRIDE_FILE)
}

/// Per-user overrides saved under the cache directory, if any.
pub fn load_override(cache_dir: &Path) -> Option<AppConfig> {
    let path = override_path(cache_dir);
    let data = fs::read_to_string(&path).ok()?;
    match parse_config(&data) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            warn!(path = %path.display(), "Ignoring unreadable config override: {err:#}");
            None
        }
    }
}

pub fn save_override(cache_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = override_path(cache_dir);
    fs::create_dir_all(cache_dir)
        .with_context(|| format!("failed to create {}", cache_dir.display()))?;
    let contents = serialize_config(config)?;
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Saved config override");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tutorial-viewer-config-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn sectioned_config_is_read() {
        let cfg = parse_config(
            r#"
[appearance]
theme = "day"
font_size = 18

[section_tracking]
band_top_inset = 0.1

[keys]
cycle_track = "ctrl+k"
"#,
        )
        .expect("parse");
        assert_eq!(cfg.theme, ThemeMode::Day);
        assert_eq!(cfg.font_size, 18);
        assert!((cfg.band_top_inset - 0.1).abs() < f32::EPSILON);
        assert!((cfg.band_bottom_inset - 0.70).abs() < f32::EPSILON);
        assert_eq!(cfg.key_cycle_track, "ctrl+k");
        assert_eq!(cfg.key_quit, "q");
    }

    #[test]
    fn flat_config_is_still_accepted() {
        let cfg = parse_config("log_level = \"warn\"\npersist_track = false\n").expect("parse");
        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert!(!cfg.persist_track);
        assert_eq!(cfg.lessons_dir, "content/lessons");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("theme = [").is_err());
        assert!(parse_config("[appearance]\ntheme = \"sepia\"\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = temp_dir("missing");
        let cfg = load_config(&dir.join("nope.toml"));
        assert_eq!(cfg.font_size, AppConfig::default().font_size);
    }

    #[test]
    fn serialized_config_reads_back_sectioned() {
        let mut cfg = AppConfig::default();
        cfg.theme = ThemeMode::Day;
        cfg.show_sidebar = true;
        let text = serialize_config(&cfg).expect("serialize");
        assert!(text.contains("[appearance]"));
        let parsed = parse_config(&text).expect("parse");
        assert_eq!(parsed.theme, ThemeMode::Day);
        assert!(parsed.show_sidebar);
    }

    #[test]
    fn override_is_saved_under_cache_dir() {
        let dir = temp_dir("override");
        assert!(load_override(&dir).is_none());

        let mut cfg = AppConfig::default();
        cfg.font_size = 21;
        save_override(&dir, &cfg).expect("save");
        let loaded = load_override(&dir).expect("override present");
        assert_eq!(loaded.font_size, 21);

        let _ = fs::remove_dir_all(&dir);
    }
}
