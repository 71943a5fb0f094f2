use ghg_dashboard::{Config, Country};
use std::fs;
use tempfile::tempdir;

#[test]
fn defaults_cover_all_countries_and_bounds() {
    let cfg = Config::default();
    assert_eq!(cfg.base_url, "https://api.worldbank.org/v2");
    assert_eq!(cfg.indicator, "EN.GHG.ALL.MT.CE.AR5");
    assert_eq!(cfg.per_page, 2000);
    assert_eq!((cfg.min_year, cfg.max_year), (1972, 2022));
    assert_eq!(cfg.default_countries, Country::ALL.to_vec());
    cfg.validate().unwrap();

    let f = cfg.default_filter().unwrap();
    assert_eq!(f.countries().len(), 6);
    assert_eq!((f.range().start(), f.range().end()), (1972, 2022));
}

#[test]
fn partial_file_overrides_only_given_keys() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("config.json");
    fs::write(
        &p,
        r#"{"min_year": 1990, "default_countries": ["FRA", "BRA"], "locale": "de"}"#,
    )
    .unwrap();
    let cfg = Config::load(Some(&p)).unwrap();
    assert_eq!(cfg.min_year, 1990);
    assert_eq!(cfg.max_year, 2022);
    assert_eq!(cfg.default_countries, vec![Country::Fra, Country::Bra]);
    assert_eq!(cfg.locale, "de");
    assert_eq!(cfg.per_page, 2000);
}

#[test]
fn unknown_keys_and_missing_files_are_errors() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("typo.json");
    fs::write(&p, r#"{"max_yaer": 2020}"#).unwrap();
    assert!(Config::load(Some(&p)).is_err());

    let missing = dir.path().join("nope.json");
    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(format!("{err:#}").contains("read config"));
}

#[test]
fn validation_rejects_bad_values() {
    let inverted = Config {
        min_year: 2000,
        max_year: 1999,
        ..Config::default()
    };
    assert!(inverted.validate().is_err());

    let zero_page = Config {
        per_page: 0,
        ..Config::default()
    };
    assert!(zero_page.validate().is_err());

    let bad_indicator = Config {
        indicator: "EN.GHG/../x".into(),
        ..Config::default()
    };
    assert!(bad_indicator.validate().is_err());

    let no_url = Config {
        base_url: "  ".into(),
        ..Config::default()
    };
    assert!(no_url.validate().is_err());
}

#[test]
fn invalid_file_fails_load_validation() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("config.json");
    fs::write(&p, r#"{"min_year": 2030}"#).unwrap();
    assert!(Config::load(Some(&p)).is_err());
}

#[test]
fn clamp_year_stays_in_bounds() {
    let cfg = Config::default();
    assert_eq!(cfg.clamp_year(1900), 1972);
    assert_eq!(cfg.clamp_year(2100), 2022);
    assert_eq!(cfg.clamp_year(2000), 2000);
}
