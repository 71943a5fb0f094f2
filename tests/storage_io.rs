use ghg_dashboard::models::{Country, FilterState, Observation};
use ghg_dashboard::projection::TableSort;
use ghg_dashboard::storage::{save_csv, save_projection};
use ghg_dashboard::view::{ViewMode, project};
use std::fs;
use tempfile::tempdir;

fn sample() -> (Vec<Observation>, FilterState) {
    let rows = vec![
        Observation::new("USA", 2020, Some(100.0)),
        Observation::new("USA", 2021, Some(150.0)),
        Observation::new("JPN", 2021, None),
    ];
    let filter = FilterState::new(vec![Country::Usa, Country::Jpn], 2020, 2021).unwrap();
    (rows, filter)
}

#[test]
fn table_csv_keeps_empty_cells_for_absent_values() {
    let (rows, _) = sample();
    let dir = tempdir().unwrap();
    let p = dir.path().join("rows.csv");
    save_csv(&rows, &p).unwrap();
    let text = fs::read_to_string(&p).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "country,year,value");
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "USA,2020,100.0");
    assert_eq!(lines[3], "JPN,2021,");
}

#[test]
fn each_view_exports_its_own_columns() {
    let (rows, filter) = sample();
    let dir = tempdir().unwrap();
    let expected = [
        (ViewMode::Chart, "country,year,value", 4),
        (ViewMode::Table, "country,year,value", 3),
        (ViewMode::Aggregated, "country,mean,sample_count", 2),
        (ViewMode::Yoy, "country,year,delta", 2),
    ];
    for (mode, header, data_rows) in expected {
        let p = dir.path().join(format!("{mode:?}.csv"));
        save_projection(&project(mode, &rows, &filter, TableSort::default()), &p).unwrap();
        let text = fs::read_to_string(&p).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], header, "{mode:?}");
        assert_eq!(lines.len() - 1, data_rows, "{mode:?}");
    }
}

#[test]
fn json_export_round_trips_the_tagged_projection() {
    let (rows, filter) = sample();
    let dir = tempdir().unwrap();
    let p = dir.path().join("yoy.json");
    let projection = project(ViewMode::Yoy, &rows, &filter, TableSort::default());
    save_projection(&projection, &p).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&p).unwrap()).unwrap();
    assert_eq!(v["view"], "yoy");
    assert_eq!(v["data"][0]["points"][0]["delta"], 50.0);
    assert!(v["data"][1]["points"][0]["delta"].is_null());
}

#[test]
fn missing_directory_reports_the_path() {
    let (rows, filter) = sample();
    let dir = tempdir().unwrap();
    let p = dir.path().join("nope").join("out.csv");
    let err = save_projection(&project(ViewMode::Table, &rows, &filter, TableSort::default()), &p)
        .unwrap_err();
    assert!(format!("{err:#}").contains("out.csv"));
}
