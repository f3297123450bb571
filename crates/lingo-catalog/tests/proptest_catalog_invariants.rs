//! Property-based invariant tests for catalogs, plural rules and templates.
//!
//! 1.  Every built-in plural rule is deterministic
//! 2.  CJK always returns Other
//! 3.  English: One for ±1, Other otherwise
//! 4.  French: One for |n| <= 1, Other otherwise
//! 5.  Negative counts use absolute value for built-in rules
//! 6.  for_locale never panics on arbitrary strings
//! 7.  Text without syntax characters parses to a single literal
//! 8.  Template::parse never panics
//! 9.  Missing key is always an error
//! 10. insert then get returns the inserted template
//! 11. deep_merge: overlay leaves always win, base-only leaves survive
//! 12. pick never invents keys
//! 13. Coverage percent is bounded and counts add up

use lingo_catalog::{Messages, PluralCategory, PluralRule, Segment, Template};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn all_built_in_rules() -> Vec<PluralRule> {
    vec![
        PluralRule::English,
        PluralRule::Russian,
        PluralRule::Arabic,
        PluralRule::French,
        PluralRule::CJK,
        PluralRule::Polish,
    ]
}

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn path() -> impl Strategy<Value = String> {
    prop::collection::vec(key(), 1..4).prop_map(|parts| parts.join("."))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Plural rules are deterministic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plural_rules_deterministic(count in any::<i64>()) {
        for rule in all_built_in_rules() {
            prop_assert_eq!(rule.categorize(count), rule.categorize(count));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. CJK always returns Other
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cjk_always_other(count in any::<i64>()) {
        prop_assert_eq!(PluralRule::CJK.categorize(count), PluralCategory::Other);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. English: One for ±1, Other for everything else
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn english_one_or_other(count in any::<i64>()) {
        let cat = PluralRule::English.categorize(count);
        if count == 1 || count == -1 {
            prop_assert_eq!(cat, PluralCategory::One);
        } else {
            prop_assert_eq!(cat, PluralCategory::Other);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. French: One for |n| <= 1
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn french_zero_and_one_are_singular(count in any::<i64>()) {
        let cat = PluralRule::French.categorize(count);
        if count.unsigned_abs() <= 1 {
            prop_assert_eq!(cat, PluralCategory::One);
        } else {
            prop_assert_eq!(cat, PluralCategory::Other);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Negative counts use absolute value
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn negative_matches_positive(count in 0i64..=100_000) {
        for rule in all_built_in_rules() {
            prop_assert_eq!(
                rule.categorize(count),
                rule.categorize(-count),
                "rule {:?} differs for ±{}", rule, count
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. for_locale never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn for_locale_never_panics(locale in ".*") {
        let _rule = PluralRule::for_locale(&locale);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Plain text parses to a single literal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_text_is_single_literal(text in "[a-zA-Z0-9 .,!?]{1,40}") {
        let template = Template::parse(&text).unwrap();
        prop_assert_eq!(template.segments(), &[Segment::Text(text.clone())]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. The parser never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parse_never_panics(source in "[a-z{}<>/#', =]{0,40}") {
        let _ = Template::parse(&source);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Missing key is an error
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_key_is_error(path in path()) {
        let messages = Messages::new();
        prop_assert!(messages.get(&path).is_err());
        prop_assert!(!messages.contains(&path));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. insert then get
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn insert_then_get(path in path(), template in "[a-zA-Z ]{0,20}") {
        let messages = Messages::new().with(&path, template.as_str());
        prop_assert_eq!(messages.get(&path), Ok(template.as_str()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 11. deep_merge precedence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn deep_merge_overlay_wins(
        base_entries in prop::collection::vec((key(), key(), "[a-z]{1,5}"), 0..6),
        overlay_entries in prop::collection::vec((key(), key(), "[A-Z]{1,5}"), 0..6),
    ) {
        let mut base = Messages::new();
        for (ns, k, v) in &base_entries {
            base.insert(&format!("{ns}.{k}"), v.as_str());
        }
        let mut overlay = Messages::new();
        for (ns, k, v) in &overlay_entries {
            overlay.insert(&format!("{ns}.{k}"), v.as_str());
        }
        let merged = base.deep_merge(&overlay);

        for path in overlay.leaf_paths() {
            prop_assert_eq!(merged.get(&path), overlay.get(&path));
        }
        for path in base.leaf_paths() {
            if !overlay.contains(&path) {
                prop_assert_eq!(merged.get(&path), base.get(&path));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 12. pick never invents keys
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pick_is_subset(
        entries in prop::collection::vec((key(), key()), 0..8),
        wanted in prop::collection::vec(key(), 0..3),
    ) {
        let mut messages = Messages::new();
        for (ns, k) in &entries {
            messages.insert(&format!("{ns}.{k}"), "v");
        }
        let picked = messages.pick(&wanted);
        for path in picked.leaf_paths() {
            prop_assert!(messages.contains(&path));
            let ns = path.split('.').next().unwrap_or_default();
            prop_assert!(wanted.iter().any(|w| w == ns));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 13. Coverage report percentage is bounded
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coverage_percent_bounded(
        n_keys in 0usize..=10,
        n_locales in 1usize..=3,
    ) {
        let mut catalogs = Vec::new();
        for locale_idx in 0..n_locales {
            let mut messages = Messages::new();
            for k in 0..n_keys {
                if k % (locale_idx + 1) == 0 {
                    messages.insert(&format!("key_{k}"), format!("val_{k}"));
                }
            }
            catalogs.push((format!("l{locale_idx}"), messages));
        }
        let refs: Vec<(&str, &Messages)> =
            catalogs.iter().map(|(l, m)| (l.as_str(), m)).collect();

        let report = Messages::coverage(&refs);
        for lc in &report.locales {
            prop_assert!(lc.coverage_percent >= 0.0 && lc.coverage_percent <= 100.0);
            prop_assert_eq!(lc.present + lc.missing.len(), report.total_keys);
        }
    }
}
