use ghg_dashboard::format::{NO_DATA, format_number, format_signed, format_value, render_text};
use ghg_dashboard::models::{Country, FilterState, Observation};
use ghg_dashboard::projection::TableSort;
use ghg_dashboard::view::{ViewMode, project};

#[test]
fn numbers_follow_locale_separators() {
    assert_eq!(format_number(1234.5, "en"), "1,234.5");
    assert_eq!(format_number(1234.5, "de"), "1.234,5");
    assert_eq!(format_number(5800.256, "en"), "5,800.26");
    assert_eq!(format_number(42.0, "en"), "42");
    assert_eq!(format_number(-1500.0, "en"), "-1,500");
    assert_eq!(format_number(0.0, "en"), "0");
}

#[test]
fn signed_and_absent_values() {
    assert_eq!(format_signed(50.0, "en"), "+50");
    assert_eq!(format_signed(-3.25, "en"), "-3.25");
    assert_eq!(format_signed(0.0, "en"), "0");
    assert_eq!(format_value(None, "en"), NO_DATA);
    assert_eq!(format_value(Some(2.5), "de"), "2,5");
}

fn sample() -> (Vec<Observation>, FilterState) {
    let rows = vec![
        Observation::new("USA", 2020, Some(100.0)),
        Observation::new("USA", 2021, Some(150.0)),
        Observation::new("USA", 2022, None),
    ];
    let filter = FilterState::new(vec![Country::Usa, Country::Jpn], 2020, 2022).unwrap();
    (rows, filter)
}

#[test]
fn chart_text_has_one_row_per_year() {
    let (rows, filter) = sample();
    let text = render_text(&project(ViewMode::Chart, &rows, &filter, TableSort::default()), "en");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Year") && lines[0].contains("USA") && lines[0].contains("JPN"));
    assert!(lines[1].starts_with("2020") && lines[1].contains("100"));
    assert!(lines[3].contains(NO_DATA));
}

#[test]
fn aggregated_text_separates_no_data_from_zero() {
    let (rows, filter) = sample();
    let text = render_text(
        &project(ViewMode::Aggregated, &rows, &filter, TableSort::default()),
        "en",
    );
    let usa = text.lines().find(|l| l.starts_with("USA")).unwrap();
    assert!(usa.contains("125 Mt CO2e (avg)") && usa.contains("samples=2"));
    let jpn = text.lines().find(|l| l.starts_with("JPN")).unwrap();
    assert!(jpn.contains("No Data / 0") && jpn.contains("samples=0"));
}

#[test]
fn yoy_text_marks_increases() {
    let (rows, filter) = sample();
    let text = render_text(&project(ViewMode::Yoy, &rows, &filter, TableSort::default()), "en");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2021") && lines[1].contains("+50"));
}

#[test]
fn table_text_handles_empty_rows() {
    let filter = FilterState::new(vec![Country::Fra], 2000, 2001).unwrap();
    let text = render_text(&project(ViewMode::Table, &[], &filter, TableSort::default()), "en");
    assert!(text.starts_with("Country"));
    assert!(text.contains("Emissions (Mt CO2e)"));
    assert!(text.contains("No data for selected countries."));
}
