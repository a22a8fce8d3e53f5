//! Levenshtein edit distance between normalized codes.
//!
//! Used by the closeness classifier to score how far a typed code is from
//! each catalog key.

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character insertions, deletions, or
/// substitutions required to transform `a` into `b`. Unit costs, so the
/// result is symmetric in `a` and `b`.
///
/// Runs in O(m·n) time and O(min(m, n)) space using two rolling rows over
/// the shorter string. Operates on `char`s, not bytes, so multi-byte input
/// that survives normalization is still counted per character.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Keep the row over the shorter string.
    let (long, short) = if a_chars.len() >= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    let n = short.len();
    if n == 0 {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
