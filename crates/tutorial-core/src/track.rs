use serde::{Deserialize, Serialize};

/// Technology stack the reader follows through the code samples.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    #[default]
    NextJs,
    FastApi,
}

/// Static presentation data for a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackMetadata {
    pub id: Track,
    pub name: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub language: &'static str,
    /// Accent color as `#rrggbb`.
    pub color: &'static str,
}

const NEXTJS: TrackMetadata = TrackMetadata {
    id: Track::NextJs,
    name: "Next.js",
    label: "Next.js Track",
    icon: "\u{269b}\u{fe0f}",
    language: "TypeScript",
    color: "#58a6ff",
};

const FASTAPI: TrackMetadata = TrackMetadata {
    id: Track::FastApi,
    name: "FastAPI",
    label: "FastAPI Track",
    icon: "\u{1f40d}",
    language: "Python",
    color: "#3fb950",
};

impl Track {
    /// Every track, in declared order.
    pub const ALL: [Track; 2] = [Track::NextJs, Track::FastApi];

    pub fn as_str(self) -> &'static str {
        match self {
            Track::NextJs => "nextjs",
            Track::FastApi => "fastapi",
        }
    }

    /// Parse a stored or authored identifier. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Track> {
        match raw.trim() {
            "nextjs" => Some(Track::NextJs),
            "fastapi" => Some(Track::FastApi),
            _ => None,
        }
    }

    pub fn metadata(self) -> &'static TrackMetadata {
        match self {
            Track::NextJs => &NEXTJS,
            Track::FastApi => &FASTAPI,
        }
    }

    /// The next track in declared order, wrapping around.
    pub fn cycle(self) -> Track {
        let idx = Track::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Track::ALL[(idx + 1) % Track::ALL.len()]
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
