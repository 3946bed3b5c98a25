use crate::track::Track;
use serde::{Deserialize, Serialize};

/// Per-track variants of one content block, in authored order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackContent<T> {
    entries: Vec<(Track, T)>,
}

impl<T> Default for TrackContent<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> TrackContent<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the variant for `track`. A replaced variant keeps its
    /// original position.
    pub fn insert(&mut self, track: Track, value: T) {
        match self.entries.iter_mut().find(|(t, _)| *t == track) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((track, value)),
        }
    }

    pub fn with(mut self, track: Track, value: T) -> Self {
        self.insert(track, value);
        self
    }

    pub fn get(&self, track: Track) -> Option<&T> {
        self.entries
            .iter()
            .find(|(t, _)| *t == track)
            .map(|(_, value)| value)
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|(_, value)| value)
    }

    pub fn available_tracks(&self) -> Vec<Track> {
        self.entries.iter().map(|(track, _)| *track).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Track, &T)> {
        self.entries.iter().map(|(track, value)| (*track, value))
    }

    pub fn resolve<'a>(&'a self, current: Track, fallback: Option<&'a T>) -> Option<&'a T> {
        resolve(self, current, fallback)
    }
}

impl<T> FromIterator<(Track, T)> for TrackContent<T> {
    fn from_iter<I: IntoIterator<Item = (Track, T)>>(iter: I) -> Self {
        let mut content = TrackContent::new();
        for (track, value) in iter {
            content.insert(track, value);
        }
        content
    }
}

/// Pick the block to show for `current`.
///
/// Priority: the entry for `current`, then `fallback`, then the first
/// authored entry, then nothing. The third step keeps a single-track
/// sample visible to readers on the other track.
pub fn resolve<'a, T>(
    content: &'a TrackContent<T>,
    current: Track,
    fallback: Option<&'a T>,
) -> Option<&'a T> {
    content
        .get(current)
        .or(fallback)
        .or_else(|| content.first())
}

/// Gate for content authored for a subset of tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackOnly {
    tracks: Vec<Track>,
}

impl TrackOnly {
    pub fn new(tracks: impl IntoIterator<Item = Track>) -> Self {
        Self {
            tracks: tracks.into_iter().collect(),
        }
    }

    pub fn visible_for(&self, current: Track) -> bool {
        self.tracks.contains(&current)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

/// A code listing with optional file name and language hint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodeSample {
    pub code: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

impl CodeSample {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            filename: None,
            lang: None,
        }
    }

    pub fn line_count(&self) -> usize {
        self.code.lines().count().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_track_entry_wins() {
        let content = TrackContent::new()
            .with(Track::NextJs, "ts")
            .with(Track::FastApi, "py");
        assert_eq!(content.resolve(Track::FastApi, Some(&"fallback")), Some(&"py"));
    }

    #[test]
    fn fallback_beats_first_entry() {
        let content = TrackContent::new().with(Track::NextJs, "x");
        assert_eq!(resolve(&content, Track::FastApi, Some(&"y")), Some(&"y"));
    }

    #[test]
    fn single_authored_entry_is_shown_without_fallback() {
        let content = TrackContent::new().with(Track::NextJs, "x");
        assert_eq!(resolve(&content, Track::FastApi, None), Some(&"x"));
    }

    #[test]
    fn empty_content_without_fallback_resolves_to_nothing() {
        let content: TrackContent<&str> = TrackContent::new();
        assert_eq!(resolve(&content, Track::NextJs, None), None);
    }

    #[test]
    fn first_entry_follows_authored_order() {
        let content = TrackContent::new()
            .with(Track::FastApi, "py")
            .with(Track::NextJs, "ts");
        assert_eq!(content.first(), Some(&"py"));
        assert_eq!(content.available_tracks(), vec![Track::FastApi, Track::NextJs]);
    }

    #[test]
    fn replacing_an_entry_keeps_its_position() {
        let mut content = TrackContent::new()
            .with(Track::FastApi, "old")
            .with(Track::NextJs, "ts");
        content.insert(Track::FastApi, "new");
        assert_eq!(content.len(), 2);
        assert_eq!(content.first(), Some(&"new"));
    }

    #[test]
    fn track_only_gates_on_listed_tracks() {
        let gate = TrackOnly::new([Track::FastApi]);
        assert!(gate.visible_for(Track::FastApi));
        assert!(!gate.visible_for(Track::NextJs));
    }
}
