//! Input cleanup and canonical normalization.
//!
//! All code comparisons happen on normalized forms: lower-cased,
//! diacritic-stripped, with whitespace and punctuation removed. This is what
//! lets a player type `"Te Amo"`, `"te-amo"` or `"TEAMO"` and unlock the same
//! entry, and `"sofía"` match a key authored as `"sofia"`.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip invisible characters that browsers and clipboards like to smuggle
/// into text inputs, then trim surrounding whitespace.
///
/// Removes zero-width space/joiner/non-joiner and BOM; maps NBSP to a plain
/// space so the later whitespace pass catches it.
pub fn clean_input(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'))
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Canonicalize a raw code for comparison.
///
/// Steps, in order: invisible-character cleanup, lower-casing, NFD
/// decomposition with combining marks dropped (so `á` becomes `a` and `ñ`
/// becomes `n`), then removal of everything non-alphanumeric (which also
/// swallows whitespace, hyphen, and underscore runs).
///
/// Empty input yields the empty string. Idempotent: normalizing an already
/// normalized string is a no-op.
pub fn normalize(text: &str) -> String {
    clean_input(text)
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_diacritics() {
        assert_eq!(normalize("SOFÍA"), "sofia");
        assert_eq!(normalize("sofía"), "sofia");
        assert_eq!(normalize("sofia"), "sofia");
    }

    #[test]
    fn test_enie_maps_to_n() {
        assert_eq!(normalize("cariño"), "carino");
        assert_eq!(normalize("AÑO"), "ano");
    }

    #[test]
    fn test_separator_runs_removed() {
        assert_eq!(normalize("te amo"), "teamo");
        assert_eq!(normalize("te-_-  amo"), "teamo");
        assert_eq!(normalize("  te\tamo  "), "teamo");
    }

    #[test]
    fn test_punctuation_removed() {
        assert_eq!(normalize("te.amo!"), "teamo");
        assert_eq!(normalize("¿te amo?"), "teamo");
    }

    #[test]
    fn test_invisible_characters_stripped() {
        assert_eq!(clean_input("\u{FEFF}te amo\u{200B}"), "te amo");
        assert_eq!(clean_input("te\u{00A0}amo"), "te amo");
        assert_eq!(normalize("\u{200C}te\u{00A0}amo\u{200D}"), "teamo");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \u{200B} "), "");
    }

    #[test]
    fn test_idempotent() {
        for s in ["Sofía y Ekaterina", "TE-AMO", "¡hola!", "", "año 2024"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(normalize("14-02-2024"), "14022024");
    }
}
