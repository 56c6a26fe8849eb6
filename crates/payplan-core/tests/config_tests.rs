use payplan::{Config, ConfigError};
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let config = Config::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.http_addr.port(), 3000);
    assert_eq!(config.currency, "CHF");
    assert_eq!(config.default_rate, None);
}

#[test]
fn reads_overrides() {
    let config = Config::from_lookup(lookup(&[
        ("PAYPLAN_HTTP_ADDR", "127.0.0.1:8080"),
        ("PAYPLAN_CURRENCY", " EUR "),
        ("PAYPLAN_DEFAULT_RATE", "950.5"),
    ]))
    .unwrap();
    assert_eq!(config.http_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(config.currency, "EUR");
    assert_eq!(config.default_rate, Some(950.5));
}

#[test]
fn rejects_bad_values() {
    let err = Config::from_lookup(lookup(&[("PAYPLAN_HTTP_ADDR", "nowhere")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PAYPLAN_HTTP_ADDR", .. }));

    let err = Config::from_lookup(lookup(&[("PAYPLAN_DEFAULT_RATE", "-3")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PAYPLAN_DEFAULT_RATE", .. }));

    assert!(Config::from_lookup(lookup(&[("PAYPLAN_CURRENCY", "  ")])).is_err());
}
