pub(crate) fn default_font_size() -> u32 {
    16
}

pub(crate) fn default_window_width() -> f32 {
    1100.0
}

pub(crate) fn default_window_height() -> f32 {
    820.0
}

pub(crate) fn default_lessons_dir() -> String {
    "content/lessons".to_string()
}

pub(crate) fn default_cache_dir() -> String {
    ".cache".to_string()
}

pub(crate) fn default_persist_track() -> bool {
    true
}

pub(crate) fn default_band_top_inset() -> f32 {
    0.20
}

pub(crate) fn default_band_bottom_inset() -> f32 {
    0.70
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_toggle_sidebar() -> String {
    "m".to_string()
}

pub(crate) fn default_key_next_section() -> String {
    "j".to_string()
}

pub(crate) fn default_key_prev_section() -> String {
    "k".to_string()
}

pub(crate) fn default_key_cycle_track() -> String {
    "t".to_string()
}

pub(crate) fn default_key_toggle_theme() -> String {
    "ctrl+t".to_string()
}

pub(crate) fn default_key_quit() -> String {
    "q".to_string()
}
