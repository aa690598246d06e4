use std::collections::{BTreeMap, BTreeSet};

/// Embedded at compile time; register new locales here.
const EN_US: &str = include_str!("../i18n/en-US/salespulse-ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/salespulse-ui.ftl");

const LOCALES: &[(&str, &str)] = &[("es-ES", ES_ES)];

/// `id -> set of $variables` for each single-line message.
fn messages(src: &str, locale: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut out = BTreeMap::new();
    for line in src.lines() {
        if line.trim().is_empty() || line.starts_with([' ', '\t', '#', '-', '.']) {
            continue;
        }
        let Some((id, value)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim().to_string();
        let previous = out.insert(id.clone(), variables(value));
        assert!(previous.is_none(), "{locale}: duplicate message `{id}`");
    }
    out
}

fn variables(value: &str) -> BTreeSet<String> {
    value
        .split("{ $")
        .skip(1)
        .filter_map(|rest| rest.split_once(' ').map(|(name, _)| name.to_string()))
        .collect()
}

#[test]
fn locales_match_fallback_keys() {
    let fallback = messages(EN_US, "en-US");
    assert!(!fallback.is_empty(), "en-US defines no messages");

    for (locale, src) in LOCALES {
        let translated = messages(src, locale);
        let missing: Vec<_> = fallback.keys().filter(|k| !translated.contains_key(*k)).collect();
        let extra: Vec<_> = translated.keys().filter(|k| !fallback.contains_key(*k)).collect();
        assert!(missing.is_empty(), "{locale} is missing: {missing:?}");
        assert!(extra.is_empty(), "{locale} defines unknown keys: {extra:?}");
    }
}

#[test]
fn translations_keep_placeholders() {
    let fallback = messages(EN_US, "en-US");
    for (locale, src) in LOCALES {
        for (id, vars) in messages(src, locale) {
            if let Some(expected) = fallback.get(&id) {
                assert_eq!(&vars, expected, "{locale}: `{id}` changed its variables");
            }
        }
    }
}
