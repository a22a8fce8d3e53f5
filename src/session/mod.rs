//! Session controller: owns player state and orchestrates the engine.
//!
//! The original game kept unlock/favorite/achievement sets in globals and
//! read browser storage from ambient scope. Here all of that is explicit
//! state owned by [`Session`], with persistence behind the small
//! [`Storage`] trait so tests can run fully in memory.
//!
//! A session wraps an immutable [`Catalog`] and applies the caller-facing
//! contract: exact matches unlock and reset the failure streak, misses feed
//! the [`AttemptTracker`], and close matches consume an attempt only under
//! [`CloseMatchPolicy::Counted`].

pub mod progress;
pub mod snapshot;
pub mod storage;

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::engine::attempts::{AttemptTracker, CloseMatchPolicy, FailureOutcome};
use crate::engine::catalog::{AchievementDef, Catalog, CodeEntry};
use crate::engine::hints::{pick_hint, Hint};
use crate::engine::normalize::normalize;
use crate::engine::resolver::{resolve, Verdict};

pub use progress::ProgressReport;
pub use snapshot::Snapshot;
pub use storage::{FileStorage, MemoryStorage, Storage};

const KEY_UNLOCKED: &str = "unlocked";
const KEY_FAVORITES: &str = "favorites";
const KEY_ACHIEVEMENTS: &str = "achievements";
const KEY_ATTEMPTS: &str = "failed_attempts";
const KEY_LAST_HINT: &str = "last_hint";

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from explicit session operations. Code submission never fails;
/// only operations that name a code directly can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The named code does not exist in the catalog.
    UnknownCode(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::UnknownCode(key) => write!(f, "Unknown code: '{}'", key),
        }
    }
}

impl std::error::Error for SessionError {}

/// The state of a failure streak after a wrong submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureStatus {
    /// Consecutive failures so far (zero right after a hint fired).
    pub attempts: u32,
    /// Failures needed to trigger a hint.
    pub max: u32,
    /// The hint, when this failure reached the threshold.
    pub hint: Option<Hint>,
}

/// What a submission did, for the caller to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Input normalized to nothing; no state changed.
    EmptyInput,
    /// The code matched exactly.
    Unlocked {
        /// Authored key of the unlocked entry.
        key: String,
        /// False when the code had been unlocked before.
        newly_unlocked: bool,
        /// Achievements earned by this unlock, in authored order.
        achievements: Vec<AchievementDef>,
    },
    /// A near miss.
    Close {
        /// Authored key of the closest entry.
        suggestion: String,
        /// `Some` when the active policy counted this as a failure.
        failure: Option<FailureStatus>,
    },
    /// A plain miss.
    Incorrect {
        /// Resulting streak state.
        failure: FailureStatus,
    },
}

/// A filter over the unlocked (or favorite) code listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter<'a> {
    /// Restrict to favorites instead of all unlocked codes.
    pub favorites_only: bool,
    /// Substring search against normalized keys.
    pub search: Option<&'a str>,
    /// Category filter (compared in normalized form).
    pub category: Option<&'a str>,
}

/// One player's game state over a catalog and a storage backend.
pub struct Session<S: Storage> {
    catalog: Catalog,
    storage: S,
    unlocked: HashSet<String>,
    favorites: HashSet<String>,
    achievements: HashSet<String>,
    attempts: AttemptTracker,
    policy: CloseMatchPolicy,
    rng: StdRng,
}

impl<S: Storage> Session<S> {
    /// Build a session, restoring any persisted state from `storage`.
    ///
    /// Persisted keys that no longer exist in the catalog are dropped (with
    /// a warning); surviving keys are canonicalized to the authored
    /// spelling.
    pub fn new(catalog: Catalog, storage: S) -> Self {
        let unlocked = Self::load_keys(&storage, KEY_UNLOCKED, &catalog);
        let favorites = Self::load_keys(&storage, KEY_FAVORITES, &catalog);

        let known_ids: HashSet<&str> =
            catalog.achievements().iter().map(|a| a.id.as_str()).collect();
        let achievements = Self::load_set(&storage, KEY_ACHIEVEMENTS)
            .into_iter()
            .filter(|id| {
                let known = known_ids.contains(id.as_str());
                if !known {
                    warn!(id = %id, "dropping persisted achievement unknown to the catalog");
                }
                known
            })
            .collect();

        let saved_attempts = storage
            .get(KEY_ATTEMPTS)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let attempts =
            AttemptTracker::from_saved(saved_attempts, crate::engine::MAX_FAILED_ATTEMPTS);

        Self {
            catalog,
            storage,
            unlocked,
            favorites,
            achievements,
            attempts,
            policy: CloseMatchPolicy::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Set the close-match counting policy.
    pub fn with_policy(mut self, policy: CloseMatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a fixed seed for hint selection (reproducible runs and tests).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Change the failure threshold, clamping any restored streak into
    /// range.
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.attempts = AttemptTracker::from_saved(self.attempts.attempts(), max);
        self
    }

    /// Submit one typed code and apply the full caller contract.
    pub fn submit(&mut self, raw: &str) -> Outcome {
        if normalize(raw).is_empty() {
            return Outcome::EmptyInput;
        }

        match resolve(&self.catalog, raw) {
            Verdict::Exact { key } => self.handle_unlock(key),
            Verdict::Close { suggestion } => {
                let failure = match self.policy {
                    CloseMatchPolicy::Lenient => None,
                    CloseMatchPolicy::Counted => Some(self.record_failure()),
                };
                Outcome::Close {
                    suggestion,
                    failure,
                }
            }
            Verdict::Miss => Outcome::Incorrect {
                failure: self.record_failure(),
            },
        }
    }

    fn handle_unlock(&mut self, key: String) -> Outcome {
        self.attempts.on_success();
        self.storage.set(KEY_ATTEMPTS, "0");

        let newly_unlocked = self.unlocked.insert(key.clone());
        let mut earned = Vec::new();
        if newly_unlocked {
            debug!(key = %key, "code unlocked");
            Self::persist_set(&mut self.storage, KEY_UNLOCKED, &self.unlocked);

            earned = progress::newly_earned(
                self.catalog.achievements(),
                self.unlocked.len(),
                &self.achievements,
            )
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
            if !earned.is_empty() {
                for def in &earned {
                    self.achievements.insert(def.id.clone());
                }
                Self::persist_set(&mut self.storage, KEY_ACHIEVEMENTS, &self.achievements);
            }
        }

        Outcome::Unlocked {
            key,
            newly_unlocked,
            achievements: earned,
        }
    }

    fn record_failure(&mut self) -> FailureStatus {
        let outcome = self.attempts.on_failure();
        self.storage
            .set(KEY_ATTEMPTS, &self.attempts.attempts().to_string());

        match outcome {
            FailureOutcome::Counted { attempts, max } => FailureStatus {
                attempts,
                max,
                hint: None,
            },
            FailureOutcome::HintDue => {
                let hint = pick_hint(&self.catalog, &self.unlocked, &mut self.rng);
                if let Some(key) = &hint.source_key {
                    self.storage.set(KEY_LAST_HINT, key);
                }
                FailureStatus {
                    attempts: 0,
                    max: self.attempts.max(),
                    hint: Some(hint),
                }
            }
        }
    }

    /// Toggle a code in the favorites set. Returns `true` when the code is
    /// now a favorite. Favorites may reference codes not yet unlocked.
    pub fn toggle_favorite(&mut self, key: &str) -> SessionResult<bool> {
        let canonical = self
            .catalog
            .get_by_key(key)
            .map(|e| e.key.clone())
            .ok_or_else(|| SessionError::UnknownCode(key.to_string()))?;

        let added = if self.favorites.remove(&canonical) {
            false
        } else {
            self.favorites.insert(canonical);
            true
        };
        Self::persist_set(&mut self.storage, KEY_FAVORITES, &self.favorites);
        Ok(added)
    }

    /// Whether a code is currently a favorite.
    pub fn is_favorite(&self, key: &str) -> bool {
        self.catalog
            .get_by_key(key)
            .is_some_and(|e| self.favorites.contains(&e.key))
    }

    /// Whether a code has been unlocked.
    pub fn is_unlocked(&self, key: &str) -> bool {
        self.catalog
            .get_by_key(key)
            .is_some_and(|e| self.unlocked.contains(&e.key))
    }

    /// Unlocked (or favorite) entries matching a filter, sorted by key.
    pub fn list(&self, filter: &ListFilter) -> Vec<&CodeEntry> {
        let source = if filter.favorites_only {
            &self.favorites
        } else {
            &self.unlocked
        };
        let search = filter.search.map(normalize).filter(|s| !s.is_empty());
        let category = filter.category.map(normalize).filter(|c| !c.is_empty());

        let mut keys: Vec<&String> = source.iter().collect();
        keys.sort();

        keys.into_iter()
            .filter_map(|k| self.catalog.get_by_key(k))
            .filter(|e| match search.as_deref() {
                Some(s) => e.normalized_key().contains(s),
                None => true,
            })
            .filter(|e| match category.as_deref() {
                Some(c) => normalize(&e.category) == c,
                None => true,
            })
            .collect()
    }

    /// Categories present among unlocked entries, sorted and deduplicated.
    pub fn categories(&self) -> Vec<String> {
        use itertools::Itertools;

        self.list(&ListFilter::default())
            .into_iter()
            .map(|e| e.category.clone())
            .sorted()
            .dedup()
            .collect()
    }

    /// Current unlock progress.
    pub fn progress(&self) -> ProgressReport {
        ProgressReport {
            unlocked: self.unlocked.len(),
            total: self.catalog.len(),
        }
    }

    /// Earned achievement ids, sorted.
    pub fn earned_achievements(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.achievements.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Key of the last code a hint was given for, if any.
    pub fn last_hint_key(&self) -> Option<String> {
        self.storage.get(KEY_LAST_HINT)
    }

    /// Export the current progress as a snapshot.
    pub fn export(&self) -> Snapshot {
        let sorted = |set: &HashSet<String>| {
            let mut v: Vec<String> = set.iter().cloned().collect();
            v.sort();
            v
        };
        Snapshot::now(
            sorted(&self.unlocked),
            sorted(&self.favorites),
            sorted(&self.achievements),
        )
    }

    /// Replace the session state with a snapshot's and persist it.
    ///
    /// Keys and ids unknown to the catalog are dropped with a warning; the
    /// failure streak is left untouched.
    pub fn import(&mut self, snapshot: Snapshot) {
        self.unlocked = self.canonicalize(snapshot.unlocked);
        self.favorites = self.canonicalize(snapshot.favorites);

        let known_ids: HashSet<&str> = self
            .catalog
            .achievements()
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        self.achievements = snapshot
            .achievements
            .into_iter()
            .filter(|id| {
                let known = known_ids.contains(id.as_str());
                if !known {
                    warn!(id = %id, "dropping imported achievement unknown to the catalog");
                }
                known
            })
            .collect();

        Self::persist_set(&mut self.storage, KEY_UNLOCKED, &self.unlocked);
        Self::persist_set(&mut self.storage, KEY_FAVORITES, &self.favorites);
        Self::persist_set(&mut self.storage, KEY_ACHIEVEMENTS, &self.achievements);
    }

    /// Clear all progress, both in memory and in storage.
    pub fn reset(&mut self) {
        self.unlocked.clear();
        self.favorites.clear();
        self.achievements.clear();
        self.attempts.on_success();
        for key in [
            KEY_UNLOCKED,
            KEY_FAVORITES,
            KEY_ACHIEVEMENTS,
            KEY_ATTEMPTS,
            KEY_LAST_HINT,
        ] {
            self.storage.remove(key);
        }
    }

    /// The catalog this session plays over.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The failure tracker, for display.
    pub fn attempt_tracker(&self) -> &AttemptTracker {
        &self.attempts
    }

    fn canonicalize(&self, keys: Vec<String>) -> HashSet<String> {
        keys.into_iter()
            .filter_map(|k| match self.catalog.get_by_key(&k) {
                Some(entry) => Some(entry.key.clone()),
                None => {
                    warn!(key = %k, "dropping key unknown to the catalog");
                    None
                }
            })
            .collect()
    }

    fn load_keys(storage: &S, key: &str, catalog: &Catalog) -> HashSet<String> {
        Self::load_set(storage, key)
            .into_iter()
            .filter_map(|k| match catalog.get_by_key(&k) {
                Some(entry) => Some(entry.key.clone()),
                None => {
                    warn!(key = %k, blob = key, "dropping persisted key unknown to the catalog");
                    None
                }
            })
            .collect()
    }

    fn load_set(storage: &S, key: &str) -> Vec<String> {
        match storage.get(key) {
            None => Vec::new(),
            Some(json) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(items) => items,
                Err(e) => {
                    warn!(key, error = %e, "persisted blob unreadable, starting empty");
                    Vec::new()
                }
            },
        }
    }

    fn persist_set(storage: &mut S, key: &str, set: &HashSet<String>) {
        let mut items: Vec<&String> = set.iter().collect();
        items.sort();
        match serde_json::to_string(&items) {
            Ok(json) => storage.set(key, &json),
            Err(e) => warn!(key, error = %e, "failed to encode state"),
        }
    }
}
