//! End-to-end resolution scenarios over TOML-authored catalogs.

use cofre::engine::{distance, is_close, normalize, resolve, Catalog, CatalogError, Verdict};

fn catalog(toml: &str) -> Catalog {
    let file = Catalog::parse_toml(toml).expect("test TOML should parse");
    Catalog::from_defs(file).expect("test catalog should validate")
}

#[test]
fn normalization_is_case_and_diacritic_insensitive() {
    assert_eq!(normalize("SOFÍA"), normalize("sofia"));
    assert_eq!(normalize("sofía"), normalize("sofia"));
    assert_eq!(normalize("Te Amo"), "teamo");
}

#[test]
fn distance_properties() {
    assert_eq!(distance("teamo", "teamo"), 0);
    assert_eq!(distance("", "abc"), 3);
    assert_eq!(distance("abc", ""), 3);
    for (a, b) in [("team", "teamo"), ("sofia", "sofiayekaterina")] {
        assert_eq!(distance(a, b), distance(b, a));
    }
}

#[test]
fn closeness_examples() {
    assert!(is_close("sofia", "sofiayekaterina"));
    assert!(!is_close("ab", "xy"));
}

#[test]
fn te_amo_scenario() {
    let catalog = catalog(
        r#"
        [[codes]]
        key = "teamo"
        text = "..."
    "#,
    );

    // Exact through normalization.
    assert_eq!(
        resolve(&catalog, "Te Amo"),
        Verdict::Exact {
            key: "teamo".to_string()
        }
    );

    // One deletion away: distance 1, threshold max(1, floor(5*0.18)) = 1.
    assert_eq!(
        resolve(&catalog, "team"),
        Verdict::Close {
            suggestion: "teamo".to_string()
        }
    );

    // Unrelated input.
    assert_eq!(resolve(&catalog, "xyz"), Verdict::Miss);
}

#[test]
fn exact_match_beats_closeness_to_another_key() {
    let catalog = catalog(
        r#"
        [[codes]]
        key = "sofia"
        text = "a"

        [[codes]]
        key = "sofiayekaterina"
        text = "b"
    "#,
    );
    assert_eq!(
        resolve(&catalog, "sofia"),
        Verdict::Exact {
            key: "sofia".to_string()
        }
    );
}

#[test]
fn tie_break_prefers_authored_order() {
    let catalog = catalog(
        r#"
        [[codes]]
        key = "ab"
        text = "first"

        [[codes]]
        key = "ac"
        text = "second"
    "#,
    );
    // "aa" is at distance 1 from both keys; the first authored entry wins.
    assert_eq!(
        resolve(&catalog, "aa"),
        Verdict::Close {
            suggestion: "ab".to_string()
        }
    );
}

#[test]
fn whitespace_only_input_misses_without_a_catalog_scan() {
    let catalog = catalog(
        r#"
        [[codes]]
        key = "teamo"
        text = "..."
    "#,
    );
    assert_eq!(resolve(&catalog, "   "), Verdict::Miss);
    assert_eq!(resolve(&catalog, "\u{200B}\u{FEFF}"), Verdict::Miss);
}

#[test]
fn duplicate_normalized_keys_rejected_strictly_and_tolerated_permissively() {
    let toml = r#"
        [[codes]]
        key = "Te Amo"
        text = "first"

        [[codes]]
        key = "teamo"
        text = "second"
    "#;
    let file = Catalog::parse_toml(toml).unwrap();
    assert!(matches!(
        Catalog::from_defs(file.clone()),
        Err(CatalogError::DuplicateKey { .. })
    ));

    let permissive = Catalog::from_defs_permissive(file);
    assert_eq!(permissive.len(), 1);
    assert_eq!(
        resolve(&permissive, "te amo"),
        Verdict::Exact {
            key: "Te Amo".to_string()
        }
    );
}
