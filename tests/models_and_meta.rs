use ghg_dashboard::models::{
    Country, Entry, FALLBACK_RGBA, FilterError, FilterState, Meta, Observation, YearRange,
};

#[test]
fn meta_per_page_string_or_number() {
    let m1: Meta =
        serde_json::from_str(r#"{"page":1,"pages":1,"per_page":"2000","total":10}"#).unwrap();
    assert_eq!(m1.per_page, 2000);
    let m2: Meta =
        serde_json::from_str(r#"{"page":1,"pages":1,"per_page":2000,"total":10}"#).unwrap();
    assert_eq!(m2.per_page, 2000);
    assert!(serde_json::from_str::<Meta>(r#"{"page":1,"pages":1,"per_page":"x","total":1}"#).is_err());
}

#[test]
fn entry_converts_to_observation() {
    let e: Entry = serde_json::from_str(
        r#"{"countryiso3code":"IND","date":" 1999 ","value":null,
            "country":{"id":"IN","value":"India"}}"#,
    )
    .unwrap();
    let o = Observation::try_from(e).unwrap();
    assert_eq!(o, Observation::new("IND", 1999, None));
}

#[test]
fn country_codes_parse_case_insensitively() {
    assert_eq!("usa".parse::<Country>().unwrap(), Country::Usa);
    assert_eq!(" BRA ".parse::<Country>().unwrap(), Country::Bra);
    assert_eq!(
        "DEU".parse::<Country>(),
        Err(FilterError::UnknownCountry("DEU".into()))
    );
    assert_eq!(Country::Chn.to_string(), "CHN");
    assert_eq!(Country::Fra.label(), "France");
}

#[test]
fn colors_are_fixed_per_country_with_fallback() {
    assert_eq!(Country::Usa.rgba(), (255, 99, 132, 0.8));
    assert_eq!(Country::Bra.rgba(), (255, 159, 64, 0.8));
    assert_eq!(Country::rgba_for_code("jpn"), (54, 162, 235, 0.8));
    assert_eq!(Country::rgba_for_code("DEU"), FALLBACK_RGBA);
}

#[test]
fn country_serializes_as_iso3() {
    assert_eq!(serde_json::to_string(&Country::Ind).unwrap(), r#""IND""#);
    let c: Vec<Country> = serde_json::from_str(r#"["JPN","FRA"]"#).unwrap();
    assert_eq!(c, vec![Country::Jpn, Country::Fra]);
}

#[test]
fn year_range_rejects_inverted_bounds() {
    assert_eq!(
        YearRange::new(2021, 2020),
        Err(FilterError::InvertedRange { start: 2021, end: 2020 })
    );
    let r = YearRange::new(1990, 1992).unwrap();
    assert_eq!(r.len(), 3);
    assert!(r.contains(1991) && !r.contains(1993));
    assert_eq!(r.years().collect::<Vec<_>>(), vec![1990, 1991, 1992]);
    assert_eq!(r.to_query_param(), "1990:1992");
    assert!(YearRange::new(2000, 2000).unwrap().is_single_year());
}

#[test]
fn year_range_length_does_not_overflow_at_extremes() {
    let r = YearRange::new(i32::MIN, i32::MAX).unwrap();
    assert_eq!(r.len(), u32::MAX as usize + 1);
    assert_eq!(YearRange::new(i32::MAX, i32::MAX).unwrap().len(), 1);
}

#[test]
fn filter_dedups_countries_keeping_first_occurrence() {
    let f = FilterState::new(
        vec![Country::Jpn, Country::Usa, Country::Jpn, Country::Bra, Country::Usa],
        2000,
        2010,
    )
    .unwrap();
    assert_eq!(f.countries(), &[Country::Jpn, Country::Usa, Country::Bra]);
    assert_eq!(f.country_codes(), "JPN;USA;BRA");
    assert!(FilterState::new(vec![Country::Usa], 2011, 2010).is_err());
}

#[test]
fn toggle_appends_and_removes() {
    let mut f = FilterState::new(vec![Country::Usa, Country::Chn], 2000, 2010).unwrap();
    f.toggle_country(Country::Usa);
    assert_eq!(f.countries(), &[Country::Chn]);
    f.toggle_country(Country::Usa);
    assert_eq!(f.countries(), &[Country::Chn, Country::Usa]);
    f.toggle_country(Country::Chn);
    f.toggle_country(Country::Usa);
    assert!(f.is_empty());

    f.set_countries(vec![Country::Fra, Country::Fra, Country::Ind]);
    assert_eq!(f.countries(), &[Country::Fra, Country::Ind]);
}

#[test]
fn range_setters_keep_start_before_end() {
    let mut f = FilterState::new(vec![Country::Usa], 2000, 2010).unwrap();
    f.set_start_year(2015);
    assert_eq!((f.range().start(), f.range().end()), (2015, 2015));
    f.set_end_year(1995);
    assert_eq!((f.range().start(), f.range().end()), (1995, 1995));
    f.set_end_year(2005);
    f.set_start_year(1999);
    assert_eq!((f.range().start(), f.range().end()), (1999, 2005));
}
