/// cofre - Secret-Code Unlock Game Engine
///
/// This library implements the engine of a "secret code" unlock game: a
/// player types codes to reveal content, gets nudged when a typo is close to
/// a real code, earns hints after repeated failures, and keeps persistent
/// progress, favorites, and achievements.
///
/// # Architecture
///
/// The crate splits into three layers:
///
/// 1. **Engine** (`engine` module) - pure, synchronous matching core
///    - `normalize`: canonical comparison form (case, diacritics,
///      separators, invisible characters)
///    - `distance`: two-row Levenshtein edit distance
///    - `closeness`: near-miss classification (substring, distance
///      threshold, prefix) and candidate ranking
///    - `catalog`: the TOML-authored reference dictionary of codes,
///      payloads, hints, and achievement definitions
///    - `resolver`: raw input → `Verdict` (exact / close / miss)
///    - `attempts` / `hints`: failure pacing and random hint selection
///
/// 2. **Session** (`session` module) - owned player state
///    - unlock, favorite, and achievement sets persisted as JSON blobs
///      behind the small `Storage` trait (in-memory and file-backed
///      implementations included)
///    - `Session::submit` applies the caller contract: exact matches
///      unlock, misses count toward a hint, close matches are free under
///      the default `Lenient` policy
///
/// 3. **Shell** (`repl` module) - terminal front-end with line editing,
///    completion, and progress commands
///
/// # Example
///
/// ```rust
/// use cofre::engine::{Catalog, CatalogFile};
/// use cofre::session::{MemoryStorage, Outcome, Session};
///
/// let toml = r#"
///     [[codes]]
///     key = "Te Amo"
///     text = "Un mensaje muy especial"
/// "#;
/// let file: CatalogFile = Catalog::parse_toml(toml).unwrap();
/// let catalog = Catalog::from_defs(file).unwrap();
///
/// let mut session = Session::new(catalog, MemoryStorage::new());
/// match session.submit("te-amo") {
///     Outcome::Unlocked { key, .. } => assert_eq!(key, "Te Amo"),
///     other => panic!("expected unlock, got {other:?}"),
/// }
/// ```
pub mod engine;
pub mod repl;
pub mod session;

pub use engine::{
    clean_input, distance, is_close, normalize, resolve, AttemptTracker, Catalog, CatalogError,
    CloseMatchPolicy, CodeEntry, Content, Hint, Verdict, MAX_FAILED_ATTEMPTS,
};
pub use session::{
    FileStorage, ListFilter, MemoryStorage, Outcome, ProgressReport, Session, SessionError,
    Snapshot, Storage,
};

#[cfg(test)]
mod tests {
    use super::*;
    use session::{MemoryStorage, Session};

    fn catalog() -> Catalog {
        let toml = r#"
            [[codes]]
            key = "teamo"
            text = "..."
        "#;
        let file = Catalog::parse_toml(toml).unwrap();
        Catalog::from_defs(file).unwrap()
    }

    #[test]
    fn test_resolve_exact() {
        let verdict = resolve(&catalog(), "Te Amo");
        assert_eq!(
            verdict,
            Verdict::Exact {
                key: "teamo".to_string()
            }
        );
    }

    #[test]
    fn test_session_end_to_end() {
        let mut session = Session::new(catalog(), MemoryStorage::new());
        assert!(matches!(
            session.submit("team"),
            Outcome::Close { .. }
        ));
        assert!(matches!(
            session.submit("teamo"),
            Outcome::Unlocked { .. }
        ));
        assert_eq!(session.progress().unlocked, 1);
    }
}
