//! Theme selection and the accent palette shared by the views.

use iced::Color;
use iced::Theme as IcedTheme;
use tutorial_core::{CalloutKind, Track, TutorialLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl From<crate::config::ThemeMode> for Theme {
    fn from(mode: crate::config::ThemeMode) -> Self {
        match mode {
            crate::config::ThemeMode::Night => Theme::Dark,
            crate::config::ThemeMode::Day => Theme::Light,
        }
    }
}

impl From<Theme> for IcedTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => IcedTheme::Light,
            Theme::Dark => IcedTheme::Dark,
        }
    }
}

/// Parse `#rrggbb`. Anything else renders as neutral grey.
pub fn hex_color(raw: &str) -> Color {
    let parsed = raw
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6)
        .and_then(|hex| u32::from_str_radix(hex, 16).ok());
    match parsed {
        Some(value) => Color::from_rgb8(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        ),
        None => Color::from_rgb(0.5, 0.5, 0.5),
    }
}

pub fn track_color(track: Track) -> Color {
    hex_color(track.metadata().color)
}

pub fn level_color(level: TutorialLevel) -> Color {
    hex_color(level.color())
}

pub fn callout_color(kind: CalloutKind) -> Color {
    match kind {
        CalloutKind::Info => hex_color("#58a6ff"),
        CalloutKind::Warning => hex_color("#d29922"),
        CalloutKind::Tip => hex_color("#3fb950"),
        CalloutKind::Danger => hex_color("#f85149"),
    }
}

/// `color` at reduced opacity, for tinted backgrounds.
pub fn tint(color: Color, alpha: f32) -> Color {
    Color {
        a: alpha.clamp(0.0, 1.0),
        ..color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        let color = hex_color("#3fb950");
        assert_eq!(color, Color::from_rgb8(0x3f, 0xb9, 0x50));
    }

    #[test]
    fn malformed_hex_falls_back_to_grey() {
        assert_eq!(hex_color("3fb950"), Color::from_rgb(0.5, 0.5, 0.5));
        assert_eq!(hex_color("#zzzzzz"), Color::from_rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn track_accents_come_from_track_metadata() {
        assert_eq!(track_color(Track::NextJs), Color::from_rgb8(0x58, 0xa6, 0xff));
        assert_eq!(track_color(Track::FastApi), Color::from_rgb8(0x3f, 0xb9, 0x50));
    }

    #[test]
    fn night_mode_maps_to_dark() {
        assert_eq!(Theme::from(crate::config::ThemeMode::Night), Theme::Dark);
        assert_eq!(Theme::from(crate::config::ThemeMode::Day), Theme::Light);
    }
}
