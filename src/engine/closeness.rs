//! Near-miss heuristics for typed codes.
//!
//! Decides whether a wrong code is close enough to some catalog key to show
//! an encouraging "you're on the right track" response instead of a flat
//! incorrect. The rules are deliberately conservative: short or unrelated
//! input must never trigger false encouragement.

use super::distance::distance;
use super::normalize::normalize;

/// Fraction of the longer string's length tolerated as edit distance.
const DISTANCE_TOLERANCE: f64 = 0.18;

/// Minimum prefix length considered meaningful.
const MIN_PREFIX: usize = 2;

/// Classify whether `raw_input` is a near miss of `candidate_key`.
///
/// Both sides are normalized first; if either normalizes to empty the answer
/// is `false`. Rules are evaluated in order, true on the first hit:
///
/// 1. the candidate contains the input as a substring (`"sofia"` inside
///    `"sofiayekaterina"`);
/// 2. edit distance within `max(1, floor(max_len * 0.18))`;
/// 3. the candidate starts with a significant prefix of the input, at least
///    60% of the input and never fewer than two characters.
pub fn is_close(raw_input: &str, candidate_key: &str) -> bool {
    is_close_normalized(&normalize(raw_input), &normalize(candidate_key))
}

/// [`is_close`] over already-normalized strings.
pub(crate) fn is_close_normalized(input: &str, candidate: &str) -> bool {
    if input.is_empty() || candidate.is_empty() {
        return false;
    }

    if candidate.contains(input) {
        return true;
    }

    let input_len = input.chars().count();
    let candidate_len = candidate.chars().count();
    let max_len = input_len.max(candidate_len);
    let threshold = ((max_len as f64 * DISTANCE_TOLERANCE).floor() as usize).max(1);
    if distance(input, candidate) <= threshold {
        return true;
    }

    let prefix_len = ((input_len as f64 * 0.6).ceil() as usize).max(MIN_PREFIX);
    let prefix: String = input.chars().take(prefix_len).collect();
    candidate.starts_with(&prefix)
}

/// Find the key with minimal edit distance to the (already normalized)
/// input. Ties break in iteration order, first wins, so catalog insertion
/// order decides between equally-distant keys.
///
/// Returns `None` for an empty iterator.
pub fn rank_candidates<'a, I>(normalized_input: &str, keys: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, usize)> = None;
    for key in keys {
        let d = distance(normalized_input, key);
        match best {
            // Strict comparison keeps the earliest key on ties.
            Some((_, score)) if d >= score => {}
            _ => best = Some((key, d)),
        }
    }
    best.map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_is_close() {
        assert!(is_close("sofia", "sofiayekaterina"));
    }

    #[test]
    fn test_short_unrelated_is_not_close() {
        assert!(!is_close("ab", "xy"));
        assert!(!is_close("xyz", "teamo"));
    }

    #[test]
    fn test_empty_sides_are_not_close() {
        assert!(!is_close("", "teamo"));
        assert!(!is_close("teamo", ""));
        assert!(!is_close("  -_ ", "teamo"));
    }

    #[test]
    fn test_distance_threshold_boundary() {
        // 10-char candidate: floor(10 * 0.18) = 1.
        let candidate = "abcdefghij";
        // Distance 1 passes the distance rule.
        assert!(is_close("abcdefghiX", candidate));
        // Distance 2 fails it; mangling the front also defeats the substring
        // and prefix rules.
        assert!(!is_close("XYcdefghij", candidate));
    }

    #[test]
    fn test_one_typo_in_short_code() {
        // max(1, floor(5 * 0.18)) = 1, so a single typo stays close.
        assert!(is_close("tiamo", "teamo"));
        assert!(is_close("team", "teamo"));
    }

    #[test]
    fn test_prefix_rule() {
        // "sofiaXX" shares prefix "sofia" (ceil(7 * 0.6) = 5) with "sofia...".
        assert!(is_close("sofiaXX", "sofiayekaterina"));
    }

    #[test]
    fn test_normalizes_before_comparing() {
        assert!(is_close("SOFÍA", "sofiayekaterina"));
        assert!(is_close("Te Amo!", "teamo"));
    }

    #[test]
    fn test_rank_prefers_minimal_distance() {
        let keys = ["teamo", "sofia", "carino"];
        assert_eq!(rank_candidates("team", keys), Some("teamo"));
        assert_eq!(rank_candidates("sofai", keys), Some("sofia"));
    }

    #[test]
    fn test_rank_ties_break_on_first() {
        // Both at distance 1 from "aa"; insertion order wins.
        let keys = ["ab", "ac"];
        assert_eq!(rank_candidates("aa", keys), Some("ab"));
    }

    #[test]
    fn test_rank_empty_iterator() {
        assert_eq!(rank_candidates("teamo", std::iter::empty()), None);
    }
}
