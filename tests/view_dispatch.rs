use ghg_dashboard::models::{Country, FilterState, Observation, YearRange};
use ghg_dashboard::projection::{SortDirection, SortKey, TableSort};
use ghg_dashboard::view::{Projection, ViewMode, project};

fn sample() -> (Vec<Observation>, FilterState) {
    let rows = vec![
        Observation::new("CHN", 2010, Some(9000.0)),
        Observation::new("IND", 2010, None),
        Observation::new("CHN", 2011, Some(9500.0)),
        Observation::new("IND", 2011, Some(2500.0)),
    ];
    let filter = FilterState::new(vec![Country::Chn, Country::Ind], 2010, 2011).unwrap();
    (rows, filter)
}

#[test]
fn each_mode_yields_its_own_projection() {
    let (rows, filter) = sample();
    for mode in ViewMode::ALL {
        let p = project(mode, &rows, &filter, TableSort::default());
        assert_eq!(p.mode(), mode);
    }
}

#[test]
fn table_mode_uses_requested_sort() {
    let (rows, filter) = sample();
    let sort = TableSort::new(SortKey::Value, SortDirection::Desc);
    match project(ViewMode::Table, &rows, &filter, sort) {
        Projection::Table(t) => {
            let v: Vec<Option<f64>> = t.iter().map(|r| r.value).collect();
            assert_eq!(v, vec![Some(9500.0), Some(9000.0), Some(2500.0), None]);
        }
        other => panic!("expected table, got {:?}", other.mode()),
    }
}

#[test]
fn labels_and_titles() {
    let range = YearRange::new(1990, 2000).unwrap();
    assert_eq!(ViewMode::default(), ViewMode::Chart);
    assert_eq!(ViewMode::Yoy.button_label(), "YoY Change");
    assert_eq!(
        ViewMode::Aggregated.title(range),
        "Average Emissions by Country (1990 - 2000)"
    );
    assert!(ViewMode::Chart.title(range).contains("Mt CO2e"));
    assert!(!ViewMode::Table.is_chart());
    assert!(ViewMode::Yoy.is_chart());
}

#[test]
fn projection_serializes_with_view_tag() {
    let (rows, filter) = sample();
    let p = project(ViewMode::Aggregated, &rows, &filter, TableSort::default());
    let v: serde_json::Value = serde_json::to_value(&p).unwrap();
    assert_eq!(v["view"], "aggregated");
    assert_eq!(v["data"][1]["country"], "IND");
    assert_eq!(v["data"][1]["sample_count"], 1);
}
