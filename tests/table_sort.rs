use ghg_dashboard::models::{Country, Observation};
use ghg_dashboard::projection::{SortDirection, SortKey, TableSort, sorted_table};

fn rows() -> Vec<Observation> {
    vec![
        Observation::new("USA", 2001, Some(10.0)),
        Observation::new("JPN", 2000, None),
        Observation::new("CHN", 2002, Some(30.0)),
        Observation::new("DEU", 2000, Some(1.0)),
        Observation::new("USA", 2000, Some(5.0)),
        Observation::new("JPN", 2001, Some(-2.0)),
    ]
}

const SELECTED: [Country; 3] = [Country::Usa, Country::Jpn, Country::Chn];

fn values(rows: &[Observation]) -> Vec<Option<f64>> {
    rows.iter().map(|r| r.value).collect()
}

#[test]
fn filters_to_selected_countries() {
    let out = sorted_table(&rows(), &SELECTED, TableSort::default());
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|r| r.country != "DEU"));
    assert!(sorted_table(&rows(), &[], TableSort::default()).is_empty());
}

#[test]
fn sorts_by_year_stably() {
    let out = sorted_table(&rows(), &SELECTED, TableSort::new(SortKey::Year, SortDirection::Asc));
    let keys: Vec<(&str, i32)> = out.iter().map(|r| (r.country.as_str(), r.year)).collect();
    // ties keep input order
    assert_eq!(
        keys,
        vec![("JPN", 2000), ("USA", 2000), ("USA", 2001), ("JPN", 2001), ("CHN", 2002)]
    );
}

#[test]
fn sorts_by_country_descending() {
    let out = sorted_table(&rows(), &SELECTED, TableSort::new(SortKey::Country, SortDirection::Desc));
    let countries: Vec<&str> = out.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(countries, vec!["USA", "USA", "JPN", "JPN", "CHN"]);
}

#[test]
fn absent_values_sort_last_in_both_directions() {
    let asc = sorted_table(&rows(), &SELECTED, TableSort::new(SortKey::Value, SortDirection::Asc));
    assert_eq!(values(&asc), vec![Some(-2.0), Some(5.0), Some(10.0), Some(30.0), None]);

    let desc = sorted_table(&rows(), &SELECTED, TableSort::new(SortKey::Value, SortDirection::Desc));
    assert_eq!(values(&desc), vec![Some(30.0), Some(10.0), Some(5.0), Some(-2.0), None]);
}

#[test]
fn comparator_is_transitive_with_many_absent_values() {
    let mut input = Vec::new();
    for (i, v) in [None, Some(3.0), None, Some(1.0), Some(2.0), None, Some(0.5)]
        .into_iter()
        .enumerate()
    {
        input.push(Observation::new("USA", 2000 + i as i32, v));
    }
    let out = sorted_table(&input, &[Country::Usa], TableSort::new(SortKey::Value, SortDirection::Asc));
    assert_eq!(
        values(&out),
        vec![Some(0.5), Some(1.0), Some(2.0), Some(3.0), None, None, None]
    );
    // absent rows keep their relative input order
    let absent_years: Vec<i32> = out.iter().filter(|r| r.value.is_none()).map(|r| r.year).collect();
    assert_eq!(absent_years, vec![2000, 2002, 2005]);
}

#[test]
fn header_toggle_flips_or_switches_column() {
    let mut sort = TableSort::default();
    assert_eq!(sort, TableSort::new(SortKey::Year, SortDirection::Asc));
    assert_eq!(sort.marker(SortKey::Year), "▲");
    assert_eq!(sort.marker(SortKey::Value), "");

    sort.toggle(SortKey::Year);
    assert_eq!(sort.direction, SortDirection::Desc);
    assert_eq!(sort.marker(SortKey::Year), "▼");

    sort.toggle(SortKey::Value);
    assert_eq!(sort, TableSort::new(SortKey::Value, SortDirection::Asc));
}
