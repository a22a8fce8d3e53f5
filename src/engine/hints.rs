//! Hint selection after repeated failed attempts.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::catalog::Catalog;

/// Shown when no locked entry carries a hint.
pub const FALLBACK_HINT: &str =
    "That doesn't seem to be the right code... keep trying.";

/// A hint chosen for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// The hint text to display.
    pub text: String,
    /// Key of the entry the hint belongs to, when one was chosen. `None`
    /// means the fallback message. Callers persist this as the last hinted
    /// code.
    pub source_key: Option<String>,
}

/// Pick a hint uniformly at random among entries that are still locked and
/// carry a hint. Falls back to [`FALLBACK_HINT`] when none qualify.
///
/// `unlocked` holds authored keys, as persisted by the session layer.
pub fn pick_hint<R: Rng + ?Sized>(
    catalog: &Catalog,
    unlocked: &HashSet<String>,
    rng: &mut R,
) -> Hint {
    let candidates: Vec<_> = catalog
        .iter()
        .filter(|e| !unlocked.contains(&e.key))
        .filter(|e| e.hint.is_some())
        .collect();

    match candidates.choose(rng) {
        Some(entry) => {
            debug!(key = %entry.key, "hint chosen");
            Hint {
                // Entries never carry Some("") hints past catalog loading.
                text: entry.hint.clone().unwrap_or_default(),
                source_key: Some(entry.key.clone()),
            }
        }
        None => Hint {
            text: FALLBACK_HINT.to_string(),
            source_key: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::CatalogFile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog(toml: &str) -> Catalog {
        let file: CatalogFile = Catalog::parse_toml(toml).unwrap();
        Catalog::from_defs(file).unwrap()
    }

    const HINTED: &str = r#"
        [[codes]]
        key = "teamo"
        text = "a"
        hint = "dos palabras"

        [[codes]]
        key = "sofia"
        text = "b"
        hint = "un nombre"

        [[codes]]
        key = "sinhint"
        text = "c"
    "#;

    #[test]
    fn test_only_locked_hinted_entries_qualify() {
        let catalog = catalog(HINTED);
        let unlocked: HashSet<String> = ["teamo".to_string()].into();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let hint = pick_hint(&catalog, &unlocked, &mut rng);
            assert_eq!(hint.source_key.as_deref(), Some("sofia"));
            assert_eq!(hint.text, "un nombre");
        }
    }

    #[test]
    fn test_fallback_when_nothing_qualifies() {
        let catalog = catalog(HINTED);
        let unlocked: HashSet<String> =
            ["teamo".to_string(), "sofia".to_string()].into();
        let mut rng = StdRng::seed_from_u64(7);

        let hint = pick_hint(&catalog, &unlocked, &mut rng);
        assert_eq!(hint.text, FALLBACK_HINT);
        assert_eq!(hint.source_key, None);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let catalog = catalog(HINTED);
        let unlocked = HashSet::new();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                pick_hint(&catalog, &unlocked, &mut a),
                pick_hint(&catalog, &unlocked, &mut b)
            );
        }
    }

    #[test]
    fn test_empty_catalog_falls_back() {
        let empty = Catalog::from_defs(CatalogFile::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let hint = pick_hint(&empty, &HashSet::new(), &mut rng);
        assert_eq!(hint.text, FALLBACK_HINT);
    }
}
