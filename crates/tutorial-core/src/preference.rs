//! The reader's selected track: one root-owned instance, read by every
//! consumer, changed through `select`.
//!
//! `select` applies the in-memory update, notifies every live listener and
//! then writes the storage, in that order, before returning. Storage
//! failures only cost persistence; they are logged and swallowed.

use crate::storage::{PreferenceStorage, TRACK_STORAGE_KEY};
use crate::track::{Track, TrackMetadata};
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

type ListenerFn = dyn Fn(Track);

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "the listener is removed as soon as this guard is dropped"]
pub struct TrackListener {
    _callback: Rc<ListenerFn>,
}

pub struct TrackPreferenceStore<S: PreferenceStorage> {
    current: Track,
    storage: S,
    listeners: Vec<Weak<ListenerFn>>,
}

impl<S: PreferenceStorage> TrackPreferenceStore<S> {
    /// Seed the selection from `storage`. Absent, unreadable or unknown
    /// values fall back to the default track.
    pub fn initialize(storage: S) -> Self {
        let current = match storage.get(TRACK_STORAGE_KEY) {
            Ok(Some(raw)) => match Track::parse(&raw) {
                Some(track) => {
                    info!(%track, "Restored track selection");
                    track
                }
                None => {
                    warn!(value = %raw, "Ignoring unrecognized stored track");
                    Track::default()
                }
            },
            Ok(None) => {
                debug!("No stored track; using default");
                Track::default()
            }
            Err(err) => {
                warn!("Track storage unavailable, using default: {err:#}");
                Track::default()
            }
        };

        Self {
            current,
            storage,
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> Track {
        self.current
    }

    pub fn metadata(&self) -> &'static TrackMetadata {
        self.current.metadata()
    }

    /// Make `track` the selection, notify listeners, then persist.
    ///
    /// Re-selecting the current track is a no-op apart from the storage
    /// write.
    pub fn select(&mut self, track: Track) {
        let changed = track != self.current;
        self.current = track;

        if changed {
            info!(%track, "Track selected");
            self.notify(track);
        }

        if let Err(err) = self.storage.set(TRACK_STORAGE_KEY, track.as_str()) {
            warn!(%track, "Failed to persist track selection: {err:#}");
        }
    }

    /// `select` for identifiers coming from untyped sources. Unknown
    /// identifiers leave the selection untouched.
    pub fn select_by_id(&mut self, raw: &str) -> bool {
        match Track::parse(raw) {
            Some(track) => {
                self.select(track);
                true
            }
            None => {
                warn!(value = %raw, "Ignoring request for unknown track");
                false
            }
        }
    }

    /// Register `listener` for selection changes. It stays registered for
    /// as long as the returned guard is alive.
    pub fn subscribe(&mut self, listener: impl Fn(Track) + 'static) -> TrackListener {
        let callback: Rc<ListenerFn> = Rc::new(listener);
        self.listeners.push(Rc::downgrade(&callback));
        TrackListener {
            _callback: callback,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.strong_count() > 0)
            .count()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn notify(&mut self, track: Track) {
        self.listeners.retain(|listener| listener.strong_count() > 0);
        let live: Vec<Rc<ListenerFn>> = self.listeners.iter().filter_map(Weak::upgrade).collect();
        debug!(listeners = live.len(), %track, "Broadcasting track change");
        for listener in live {
            listener(track);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use anyhow::{Result, anyhow};
    use std::cell::{Cell, RefCell};

    struct UnavailableStorage {
        writes: Cell<usize>,
    }

    impl PreferenceStorage for UnavailableStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("storage disabled"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            self.writes.set(self.writes.get() + 1);
            Err(anyhow!("quota exceeded"))
        }
    }

    #[test]
    fn fresh_store_defaults_to_first_track() {
        let store = TrackPreferenceStore::initialize(MemoryStorage::new());
        assert_eq!(store.current(), Track::NextJs);
    }

    #[test]
    fn selection_is_persisted_and_restored() {
        let storage = MemoryStorage::new();
        {
            let mut store = TrackPreferenceStore::initialize(&storage);
            store.select(Track::FastApi);
        }
        assert_eq!(
            storage.get(TRACK_STORAGE_KEY).expect("read"),
            Some("fastapi".to_string())
        );

        let restored = TrackPreferenceStore::initialize(&storage);
        assert_eq!(restored.current(), Track::FastApi);
    }

    #[test]
    fn unrecognized_stored_value_falls_back_to_default() {
        let storage = MemoryStorage::with_entry(TRACK_STORAGE_KEY, "cobol-on-rails");
        let store = TrackPreferenceStore::initialize(storage);
        assert_eq!(store.current(), Track::NextJs);
    }

    #[test]
    fn every_listener_sees_the_change() {
        let mut store = TrackPreferenceStore::initialize(MemoryStorage::new());
        let first = Rc::new(Cell::new(store.current()));
        let second = Rc::new(Cell::new(store.current()));

        let first_sink = Rc::clone(&first);
        let _first = store.subscribe(move |track| first_sink.set(track));
        let second_sink = Rc::clone(&second);
        let _second = store.subscribe(move |track| second_sink.set(track));

        store.select(Track::FastApi);

        assert_eq!(first.get(), Track::FastApi);
        assert_eq!(second.get(), Track::FastApi);
        assert_eq!(store.current(), Track::FastApi);
    }

    #[test]
    fn reselecting_current_track_is_harmless() {
        let mut store = TrackPreferenceStore::initialize(MemoryStorage::new());
        let calls = Rc::new(Cell::new(0usize));
        let sink = Rc::clone(&calls);
        let _listener = store.subscribe(move |_| sink.set(sink.get() + 1));

        store.select(Track::NextJs);

        assert_eq!(store.current(), Track::NextJs);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn dropped_listener_is_not_called() {
        let mut store = TrackPreferenceStore::initialize(MemoryStorage::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listener = store.subscribe(move |track| sink.borrow_mut().push(track));
        assert_eq!(store.listener_count(), 1);

        drop(listener);
        store.select(Track::FastApi);

        assert!(seen.borrow().is_empty());
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn unavailable_storage_degrades_to_session_only() {
        let storage = UnavailableStorage {
            writes: Cell::new(0),
        };
        let mut store = TrackPreferenceStore::initialize(storage);
        assert_eq!(store.current(), Track::NextJs);

        store.select(Track::FastApi);

        assert_eq!(store.current(), Track::FastApi);
        assert_eq!(store.storage().writes.get(), 1);
    }

    #[test]
    fn unknown_identifier_leaves_selection_alone() {
        let mut store = TrackPreferenceStore::initialize(MemoryStorage::new());
        assert!(!store.select_by_id("rails"));
        assert_eq!(store.current(), Track::NextJs);
        assert!(store.select_by_id("fastapi"));
        assert_eq!(store.current(), Track::FastApi);
    }

    #[test]
    fn listener_observes_new_value_through_current() {
        let mut store = TrackPreferenceStore::initialize(MemoryStorage::new());
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        let _listener = store.subscribe(move |track| sink.set(Some(track)));

        store.select(Track::FastApi);

        assert_eq!(seen.get(), Some(store.current()));
    }
}
