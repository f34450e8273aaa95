//! Dashboard preferences: chart visibility flags and the live-update
//! interval, plus their persistence seam and an observable store.
//!
//! Persistence is delegated to an external key-value collaborator (the
//! terminal equivalent of browser local storage) through [`PrefsBackend`].
//! Stored payloads are decoded with per-field defaults, so preferences
//! saved by an older version merge over the current defaults instead of
//! erroring; corrupt payloads fall back to defaults entirely.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel interval meaning "live update disabled".
pub const RELOAD_DISABLED: i32 = -1;

/// Smallest accepted reload interval, in seconds.
pub const MIN_RELOAD_SECS: i32 = 1;

/// Largest accepted reload interval, in seconds.
pub const MAX_RELOAD_SECS: i32 = 3600;

/// The interval choices offered by the preferences panel, "stop" first.
pub const RELOAD_CHOICES: [i32; 5] = [RELOAD_DISABLED, 5, 10, 30, 60];

fn default_true() -> bool {
    true
}

fn default_reload_interval() -> i32 {
    10
}

/// The flat preferences object.
///
/// Every field carries a serde default so that decoding a partial payload
/// yields the missing fields' defaults rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Show the optimization history chart.
    #[serde(default = "default_true")]
    pub show_history: bool,
    /// Show the Pareto front chart (multi-objective studies only).
    #[serde(default = "default_true")]
    pub show_pareto_front: bool,
    /// Show the parallel coordinate chart.
    #[serde(default = "default_true")]
    pub show_parallel_coordinate: bool,
    /// Show the intermediate values chart (single-objective studies only).
    #[serde(default = "default_true")]
    pub show_intermediate_values: bool,
    /// Show the empirical distribution function chart.
    #[serde(default = "default_true")]
    pub show_edf: bool,
    /// Show the hyperparameter importances chart.
    #[serde(default = "default_true")]
    pub show_importances: bool,
    /// Show the slice chart.
    #[serde(default = "default_true")]
    pub show_slice: bool,
    /// Live-update interval in seconds, or [`RELOAD_DISABLED`].
    #[serde(default = "default_reload_interval")]
    pub reload_interval: i32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_history: true,
            show_pareto_front: true,
            show_parallel_coordinate: true,
            show_intermediate_values: true,
            show_edf: true,
            show_importances: true,
            show_slice: true,
            reload_interval: default_reload_interval(),
        }
    }
}

impl Preferences {
    /// Whether periodic refresh is active.
    pub fn live_update_enabled(&self) -> bool {
        self.reload_interval != RELOAD_DISABLED
    }

    /// Returns a copy with the reload interval forced into range.
    ///
    /// Any negative interval collapses to [`RELOAD_DISABLED`]; zero and
    /// out-of-range positive values clamp into
    /// `MIN_RELOAD_SECS..=MAX_RELOAD_SECS`. Out-of-range input is a caller
    /// or storage defect, so a clamp is logged, never propagated.
    pub fn sanitize(mut self) -> Self {
        let original = self.reload_interval;
        self.reload_interval = if original < 0 {
            RELOAD_DISABLED
        } else {
            original.clamp(MIN_RELOAD_SECS, MAX_RELOAD_SECS)
        };
        if self.reload_interval != original {
            warn!(
                "reload interval {} out of range, using {}",
                original, self.reload_interval
            );
        }
        self
    }
}

/// External key-value collaborator that persists the preferences payload.
pub trait PrefsBackend {
    /// Returns the stored payload, or `None` when nothing was saved yet.
    fn load(&self) -> Option<String>;

    /// Stores the payload, replacing any previous one.
    fn save(&mut self, payload: &str);
}

/// In-memory backend, used in tests and as a no-persistence default.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    payload: Option<String>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsBackend for MemoryBackend {
    fn load(&self) -> Option<String> {
        self.payload.clone()
    }

    fn save(&mut self, payload: &str) {
        self.payload = Some(payload.to_string());
    }
}

/// Loads preferences from the backend, merging stored values over defaults.
///
/// Absent or undecodable payloads yield the defaults; the result is always
/// sanitized.
pub fn load_preferences(backend: &dyn PrefsBackend) -> Preferences {
    let prefs = match backend.load() {
        Some(payload) => match serde_json::from_str::<Preferences>(&payload) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!("discarding stored preferences: {}", err);
                Preferences::default()
            }
        },
        None => Preferences::default(),
    };
    prefs.sanitize()
}

/// Saves preferences through the backend as JSON.
pub fn save_preferences(backend: &mut dyn PrefsBackend, prefs: &Preferences) {
    match serde_json::to_string(prefs) {
        Ok(payload) => backend.save(&payload),
        Err(err) => warn!("failed to encode preferences: {}", err),
    }
}

/// Identifies one subscription on a [`PrefStore`].
pub type SubscriptionId = usize;

type Subscriber = Box<dyn Fn(&Preferences)>;

/// Explicit observable preferences store.
///
/// Replaces ambient global state with a value that is constructed once and
/// passed down to the views that need it: `get` returns the current
/// snapshot, `set` sanitizes, persists through the backend, and notifies
/// subscribers.
///
/// # Examples
///
/// ```rust
/// use trialboard::prefs::{MemoryBackend, Preferences, PrefStore, RELOAD_DISABLED};
///
/// let mut store = PrefStore::new(Box::new(MemoryBackend::new()));
/// assert!(store.get().show_history);
///
/// let mut prefs = store.get();
/// prefs.reload_interval = RELOAD_DISABLED;
/// store.set(prefs);
/// assert!(!store.get().live_update_enabled());
/// ```
pub struct PrefStore {
    current: Preferences,
    backend: Box<dyn PrefsBackend>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: SubscriptionId,
}

impl fmt::Debug for PrefStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefStore")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl PrefStore {
    /// Creates a store, loading the initial value from the backend.
    pub fn new(backend: Box<dyn PrefsBackend>) -> Self {
        let current = load_preferences(backend.as_ref());
        Self {
            current,
            backend,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// The current preferences snapshot.
    pub fn get(&self) -> Preferences {
        self.current.clone()
    }

    /// Replaces the preferences: sanitizes, persists, and notifies all
    /// subscribers with the stored value.
    pub fn set(&mut self, prefs: Preferences) {
        self.current = prefs.sanitize();
        save_preferences(self.backend.as_mut(), &self.current);
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.current);
        }
    }

    /// Registers a change callback and returns its subscription id.
    pub fn subscribe(&mut self, subscriber: impl Fn(&Preferences) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert!(prefs.show_history);
        assert!(prefs.show_slice);
        assert_eq!(prefs.reload_interval, 10);
        assert!(prefs.live_update_enabled());
    }

    #[test]
    fn test_partial_payload_merges_over_defaults() {
        let mut backend = MemoryBackend::new();
        backend.save(r#"{"show_history":false,"reload_interval":30}"#);
        let prefs = load_preferences(&backend);
        assert!(!prefs.show_history);
        assert_eq!(prefs.reload_interval, 30);
        // Fields the stored payload never knew about fall back.
        assert!(prefs.show_edf);
        assert!(prefs.show_importances);
    }

    #[test]
    fn test_corrupt_payload_falls_back_to_defaults() {
        let mut backend = MemoryBackend::new();
        backend.save("not json");
        assert_eq!(load_preferences(&backend), Preferences::default());
    }

    #[test]
    fn test_absent_payload_yields_defaults() {
        assert_eq!(
            load_preferences(&MemoryBackend::new()),
            Preferences::default()
        );
    }

    #[test]
    fn test_sanitize_clamps_interval() {
        let mut prefs = Preferences::default();
        prefs.reload_interval = -5;
        assert_eq!(prefs.clone().sanitize().reload_interval, RELOAD_DISABLED);
        prefs.reload_interval = 0;
        assert_eq!(prefs.clone().sanitize().reload_interval, MIN_RELOAD_SECS);
        prefs.reload_interval = 100_000;
        assert_eq!(prefs.clone().sanitize().reload_interval, MAX_RELOAD_SECS);
        prefs.reload_interval = 30;
        assert_eq!(prefs.clone().sanitize().reload_interval, 30);
    }

    #[test]
    fn test_roundtrip_through_backend() {
        let mut backend = MemoryBackend::new();
        let mut prefs = Preferences::default();
        prefs.show_slice = false;
        prefs.reload_interval = 60;
        save_preferences(&mut backend, &prefs);
        assert_eq!(load_preferences(&backend), prefs);
    }

    #[test]
    fn test_store_set_persists_and_notifies() {
        let mut store = PrefStore::new(Box::new(MemoryBackend::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |p| sink.borrow_mut().push(p.reload_interval));

        let mut prefs = store.get();
        prefs.reload_interval = 5;
        store.set(prefs);
        assert_eq!(store.get().reload_interval, 5);
        assert_eq!(*seen.borrow(), vec![5]);
    }

    #[test]
    fn test_store_set_sanitizes_before_notifying() {
        let mut store = PrefStore::new(Box::new(MemoryBackend::new()));
        let mut prefs = store.get();
        prefs.reload_interval = -99;
        store.set(prefs);
        assert_eq!(store.get().reload_interval, RELOAD_DISABLED);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = PrefStore::new(Box::new(MemoryBackend::new()));
        let seen = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.set(Preferences::default());
        store.unsubscribe(id);
        store.set(Preferences::default());
        assert_eq!(*seen.borrow(), 1);
    }
}
