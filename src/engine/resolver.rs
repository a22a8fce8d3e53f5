//! Code resolution: raw input to a verdict.
//!
//! The resolver is a pure function over the catalog. It never touches
//! persisted state; acting on the verdict (unlocking, counting a failed
//! attempt, showing a hint) is the caller's job.

use tracing::trace;

use super::catalog::Catalog;
use super::closeness::{is_close_normalized, rank_candidates};
use super::normalize::normalize;

/// Outcome of resolving one typed code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The input matches a catalog key exactly (after normalization).
    Exact {
        /// Authored key of the matched entry.
        key: String,
    },
    /// No exact match, but the input is a near miss of some key.
    Close {
        /// Authored key of the closest entry, suitable for an encouraging
        /// message. Never revealed verbatim by the engine itself.
        suggestion: String,
    },
    /// Neither exact nor close.
    Miss,
}

/// Resolve raw player input against the catalog.
///
/// Input that normalizes to nothing is a [`Verdict::Miss`] without consulting
/// the catalog, as is any input against an empty catalog. Exact matches take
/// precedence over closeness: the near-miss heuristics only run when no key
/// matches exactly.
pub fn resolve(catalog: &Catalog, raw_input: &str) -> Verdict {
    let input = normalize(raw_input);
    if input.is_empty() {
        trace!("input normalized to empty, rejecting");
        return Verdict::Miss;
    }

    if let Some(entry) = catalog.get(&input) {
        trace!(key = %entry.key, "exact match");
        return Verdict::Exact {
            key: entry.key.clone(),
        };
    }

    let Some(best) = rank_candidates(&input, catalog.normalized_keys()) else {
        return Verdict::Miss;
    };

    if is_close_normalized(&input, best) {
        // rank_candidates only yields keys the catalog produced.
        let suggestion = catalog
            .get(best)
            .map(|e| e.key.clone())
            .unwrap_or_else(|| best.to_string());
        trace!(suggestion = %suggestion, "close match");
        Verdict::Close { suggestion }
    } else {
        trace!("no match");
        Verdict::Miss
    }
}
