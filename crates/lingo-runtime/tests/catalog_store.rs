#![forbid(unsafe_code)]

//! Settings file → catalog store → request resolver, on a temp directory.

use std::path::Path;
use std::sync::Arc;

use lingo_runtime::{CatalogStore, IntlSettings, RequestResolver, Values};

fn write(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

fn fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir(tmp.path().join("messages")).unwrap();
    write(
        &tmp.path().join("intl.toml"),
        r#"
        time_zone = "Europe/Vienna"

        [routing]
        locales = ["en", "de", "de-AT"]
        default_locale = "en"
        locale_prefix = "as-needed"

        [messages]
        dir = "messages"

        [formats.dateTime.short]
        dateStyle = "short"
        "#,
    );
    let messages = tmp.path().join("messages");
    write(
        &messages.join("en.json"),
        r#"{"Index": {"title": "Welcome", "footer": "Made with care", "when": "Updated {d, date, short}"}}"#,
    );
    write(&messages.join("de.json"), r#"{"Index": {"title": "Willkommen", "when": "Aktualisiert {d, date, short}"}}"#);
    write(&messages.join("de-AT.json"), r#"{"Index": {"title": "Servus"}}"#);
    tmp
}

#[test]
fn serves_layered_catalogs_per_request() {
    let tmp = fixture();
    let settings = IntlSettings::from_file(tmp.path().join("intl.toml")).unwrap();
    let store = Arc::new(CatalogStore::open(&settings).unwrap());
    let resolver = RequestResolver::new(
        store.routing().clone(),
        store.config_source(&settings).unwrap(),
    );

    let request = resolver.begin("de-AT").unwrap();
    let scope = request.scope().unwrap();
    let t = scope.translator(Some("Index"));
    assert_eq!(t.t("title", &Values::new()), "Servus");
    assert_eq!(t.t("footer", &Values::new()), "Made with care");
    assert_eq!(scope.time_zone().map(|tz| tz.name()), Some("Europe/Vienna"));

    let d = chrono::DateTime::parse_from_rfc3339("2020-11-20T23:30:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    assert_eq!(
        t.t("when", &Values::new().with("d", d)),
        "Aktualisiert 21.11.20",
        "date rendered in the configured zone"
    );

    assert!(resolver.begin("it").unwrap_err().is_not_found());
    assert_eq!(resolver.routing().localized_path(scope.locale(), "/"), "/de-AT");
}

#[test]
fn reload_affects_new_requests_only() {
    let tmp = fixture();
    let settings = IntlSettings::from_file(tmp.path().join("intl.toml")).unwrap();
    let store = Arc::new(CatalogStore::open(&settings).unwrap());
    let resolver = RequestResolver::new(
        store.routing().clone(),
        store.config_source(&settings).unwrap(),
    );

    let before = resolver.begin("en").unwrap();
    let old = before.scope().unwrap().translator(Some("Index"));
    assert_eq!(old.t("title", &Values::new()), "Welcome");

    write(
        &tmp.path().join("messages").join("en.json"),
        r#"{"Index": {"title": "Hello again"}}"#,
    );
    assert_eq!(store.reload().unwrap(), 2);

    assert_eq!(old.t("title", &Values::new()), "Welcome");
    let after = resolver.begin("en").unwrap();
    assert_eq!(
        after.scope().unwrap().translator(Some("Index")).t("title", &Values::new()),
        "Hello again"
    );
}
