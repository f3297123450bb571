//! Property-based invariant tests for scopes, requests and routing.
//!
//! 1. An absent key yields the fallback and exactly one report
//! 2. Literal templates render verbatim without reports
//! 3. Argument interpolation inserts the value unchanged
//! 4. Child scopes take each overridden field and inherit the rest
//! 5. A request's source runs at most once however often it is read
//! 6. Negotiation always lands on a supported locale
//! 7. strip_locale undoes localized_path under the `Always` prefix

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone as _, Utc};
use lingo_catalog::{Locale, Messages};
use lingo_format::TimeZone;
use lingo_runtime::{
    ConfigError, IntlConfig, IntlError, IntlScope, RequestContext, RequestResolver, Routing,
    ScopeOverrides, Values,
};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

const TAGS: &[&str] = &["en", "de", "de-AT", "fr", "ja"];
const ZONES: &[&str] = &["UTC", "Europe/Vienna", "Asia/Tokyo", "America/New_York"];

fn routing() -> Routing {
    Routing::from_tags(TAGS, "en").unwrap()
}

fn locale() -> impl Strategy<Value = Locale> {
    prop::sample::select(TAGS).prop_map(|tag| Locale::parse(tag).unwrap())
}

fn zone() -> impl Strategy<Value = TimeZone> {
    prop::sample::select(ZONES).prop_map(|name| TimeZone::parse(name).unwrap())
}

fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn recording_scope(config: IntlConfig) -> (IntlScope, Arc<Mutex<Vec<IntlError>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let scope = IntlScope::new(config.with_on_error(move |e| sink.lock().unwrap().push(e.clone())));
    (scope, seen)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Absent keys: fallback plus one report
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn absent_key_reports_once(ns in "[A-Z][a-z]{0,7}", key in "[a-z]{1,8}", locale in locale()) {
        let (scope, seen) = recording_scope(
            IntlConfig::new(locale).with_messages(Messages::new().with("Other.Present", "x")),
        );
        let text = scope.translator(Some(ns.as_str())).t(&key, &Values::new());
        prop_assert_eq!(text, format!("{ns}.{key}"));
        prop_assert_eq!(seen.lock().unwrap().len(), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Literal templates render verbatim
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn literal_templates_verbatim(key in "[a-z]{1,8}", text in "[A-Za-z0-9 .,!?]{0,40}") {
        let (scope, seen) = recording_scope(
            IntlConfig::new(Locale::parse("en").unwrap())
                .with_messages(Messages::new().with(&key, text.clone())),
        );
        prop_assert_eq!(scope.translator(None).t(&key, &Values::new()), text);
        prop_assert!(seen.lock().unwrap().is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Interpolation inserts string values unchanged
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn interpolation_inserts_value(value in "[^{}<>']{0,30}") {
        let (scope, seen) = recording_scope(
            IntlConfig::new(Locale::parse("de").unwrap())
                .with_messages(Messages::new().with("msg", "|{v}|")),
        );
        let out = scope.translator(None).t("msg", &Values::new().with("v", value.clone()));
        prop_assert_eq!(out, format!("|{value}|"));
        prop_assert!(seen.lock().unwrap().is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Child scopes: override or inherit, field by field
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn child_overrides_or_inherits(
        parent_locale in locale(),
        parent_zone in zone(),
        parent_now in instant(),
        child_locale in prop::option::of(locale()),
        child_zone in prop::option::of(zone()),
        child_now in prop::option::of(instant()),
        replace_messages in any::<bool>(),
    ) {
        let root = IntlScope::new(
            IntlConfig::new(parent_locale.clone())
                .with_messages(Messages::new().with("parent", "p"))
                .with_time_zone(parent_zone)
                .with_now(parent_now),
        );
        let mut overrides = ScopeOverrides::new();
        overrides.locale = child_locale.clone();
        overrides.time_zone = child_zone;
        overrides.now = child_now;
        if replace_messages {
            overrides = overrides.messages(Messages::new().with("child", "c"));
        }
        let child = root.child(overrides);

        prop_assert_eq!(child.locale(), child_locale.as_ref().unwrap_or(&parent_locale));
        prop_assert_eq!(child.time_zone(), Some(child_zone.unwrap_or(parent_zone)));
        prop_assert_eq!(child.now(), child_now.unwrap_or(parent_now));
        let messages = child.messages().unwrap();
        prop_assert_eq!(messages.contains("child"), replace_messages);
        prop_assert_eq!(messages.contains("parent"), !replace_messages);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. At most one load per request
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn source_runs_at_most_once(reads in 0usize..20, locale in locale()) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = move |request: &RequestContext| -> Result<IntlConfig, ConfigError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(IntlConfig::new(request.locale.clone()))
        };
        let resolver = RequestResolver::new(routing(), source);
        let request = resolver.begin(locale.as_str()).unwrap();
        for _ in 0..reads {
            prop_assert_eq!(request.scope().unwrap().locale(), &locale);
        }
        prop_assert_eq!(request.load_count(), usize::from(reads > 0));
        prop_assert_eq!(calls.load(Ordering::SeqCst), usize::from(reads > 0));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Negotiation lands on a supported locale
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn negotiation_is_total(header in "[a-zA-Z\\-;=0-9., *]{0,60}") {
        let routing = routing();
        let picked = routing.negotiate(Some(header.as_str()));
        prop_assert!(routing.locales().contains(picked));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Prefix round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn strip_undoes_localize(locale in locale(), segments in prop::collection::vec("[a-z]{3,8}", 0..4)) {
        let routing = routing();
        let path = format!("/{}", segments.join("/"));
        let localized = routing.localized_path(&locale, &path);
        let (found, rest) = routing.strip_locale(&localized);
        prop_assert_eq!(found, Some(&locale));
        prop_assert_eq!(rest, path.as_str());
    }
}
