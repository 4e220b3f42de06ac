//! End-to-end axis assignment over series tables.

use matprice::axis::{assign_axes, build_chart, build_legend};
use matprice::config::{AxisConfig, DashboardConfig};
use matprice::models::{AxisSide, Series, SeriesPoint};
use std::collections::HashSet;

fn series(id: &str, name: &str, values: &[Option<f64>]) -> Series {
    Series {
        id: id.into(),
        display_name: name.into(),
        unit: "원/kg".into(),
        points: values
            .iter()
            .enumerate()
            .map(|(i, v)| SeriesPoint::new(format!("2024-{:02}-01", i + 1), *v))
            .collect(),
    }
}

fn mixed_table() -> Vec<Series> {
    vec![
        series("resin", "PP", &[Some(1400.0), Some(1500.0)]),
        series("copper", "Copper", &[Some(12_000.0), None, Some(13_500.0)]),
        series("missing", "No data", &[None, None]),
        series("sand", "Sand", &[Some(20.0), Some(25.0)]),
        series("steel", "Steel", &[Some(900.0), Some(f64::NAN)]),
    ]
}

#[test]
fn magnitude_split_puts_cheap_series_on_the_right() {
    let table = vec![
        series("big", "Nickel", &[Some(48_000.0), Some(50_000.0)]),
        series("small", "Gravel", &[Some(150.0), Some(200.0)]),
    ];
    let a = assign_axes(&table, &AxisConfig::default());
    assert_eq!(a.primary_series_ids, vec!["big"]);
    assert_eq!(a.secondary_series_ids, vec!["small"]);

    let secondary = a.secondary_domain.expect("secondary axis");
    assert_eq!(secondary.ticks, vec![140.0, 157.5, 175.0, 192.5, 210.0]);
    assert!(a.primary_domain.min <= 48_000.0 && a.primary_domain.max >= 50_000.0);
}

#[test]
fn dispersion_isolates_the_largest_low_price_series() {
    let table = vec![
        series("a", "A", &[Some(80.0), Some(100.0)]),
        series("b", "B", &[Some(90.0), Some(120.0)]),
        series("c", "C", &[Some(700.0), Some(900.0)]),
    ];
    let a = assign_axes(&table, &AxisConfig::default());
    assert_eq!(a.primary_series_ids, vec!["c"]);
    assert_eq!(a.secondary_series_ids, vec!["a", "b"]);
    assert!(a.secondary_domain.is_some());
}

#[test]
fn empty_table_gets_the_fallback_axis() {
    let a = assign_axes(&[], &AxisConfig::default());
    assert!(a.primary_series_ids.is_empty());
    assert!(a.secondary_series_ids.is_empty());
    assert_eq!(a.primary_domain.ticks, vec![0.0, 250.0, 500.0, 750.0, 1000.0]);
    assert!(a.secondary_domain.is_none());
}

#[test]
fn series_without_data_never_break_the_pipeline() {
    let table = vec![
        series("x", "X", &[None, None]),
        series("y", "Y", &[Some(f64::NAN)]),
    ];
    let a = assign_axes(&table, &AxisConfig::default());
    assert_eq!(a.primary_series_ids, vec!["x", "y"]);
    assert_eq!(a.primary_domain.max, 1000.0);
    assert!(a.secondary_domain.is_none());
}

#[test]
fn every_series_lands_on_exactly_one_axis() {
    let table = mixed_table();
    let a = assign_axes(&table, &AxisConfig::default());

    let primary: HashSet<&str> = a.primary_series_ids.iter().map(String::as_str).collect();
    let secondary: HashSet<&str> = a.secondary_series_ids.iter().map(String::as_str).collect();
    assert!(primary.is_disjoint(&secondary));
    assert_eq!(
        a.primary_series_ids.len() + a.secondary_series_ids.len(),
        table.len()
    );
    for s in &table {
        assert!(primary.contains(s.id.as_str()) || secondary.contains(s.id.as_str()));
    }
    // copper is the only series above the threshold
    assert_eq!(a.primary_series_ids, vec!["copper", "missing"]);
    assert_eq!(a.secondary_series_ids, vec!["resin", "sand", "steel"]);
}

#[test]
fn assignment_is_idempotent() {
    let table = mixed_table();
    let cfg = AxisConfig::default();
    assert_eq!(assign_axes(&table, &cfg), assign_axes(&table.clone(), &cfg));
}

#[test]
fn valid_points_stay_inside_their_axis_domain() {
    let table = mixed_table();
    let a = assign_axes(&table, &AxisConfig::default());
    let secondary = a.secondary_domain.as_ref().unwrap();
    for s in &table {
        let domain = if a.primary_series_ids.contains(&s.id) {
            &a.primary_domain
        } else {
            secondary
        };
        for v in s.points.iter().filter_map(|p| p.value).filter(|v| v.is_finite()) {
            assert!(domain.min <= v && v <= domain.max, "{v} outside {domain:?}");
        }
    }
}

#[test]
fn legend_colors_follow_input_position_not_axis() {
    let table = vec![
        series("cheap", "Sand", &[Some(20.0)]),
        series("dear", "Nickel", &[Some(30_000.0)]),
    ];
    let a = assign_axes(&table, &AxisConfig::default());
    let legend = build_legend(&table, &a);

    assert_eq!(legend.len(), 2);
    assert_eq!(legend[0].id, "dear");
    assert_eq!(legend[0].axis, AxisSide::Primary);
    assert_eq!(legend[0].color, "#ED7D31");
    assert_eq!(legend[1].id, "cheap");
    assert_eq!(legend[1].axis, AxisSide::Secondary);
    assert_eq!(legend[1].color, "#4472C4");
}

#[test]
fn colliding_display_names_keep_distinct_legend_labels() {
    let table = vec![
        series("steel-a", "Rebar", &[Some(900.0)]),
        series("steel-b", "Rebar", &[Some(950.0)]),
        series("sand", "Sand", &[Some(800.0)]),
    ];
    let a = assign_axes(&table, &AxisConfig::default());
    let legend = build_legend(&table, &a);
    let labels: Vec<&str> = legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Rebar (steel-a)", "Rebar (steel-b)", "Sand"]);
}

#[test]
fn chart_spec_carries_labels_and_units() {
    let table = vec![
        series("big", "Nickel", &[Some(48_000.0), Some(50_000.0)]),
        series("small", "Gravel", &[Some(150.0), Some(200.0)]),
    ];
    let cfg = DashboardConfig {
        locale: "en".into(),
        ..DashboardConfig::default()
    };
    let chart = build_chart(&table, &cfg);
    assert_eq!(chart.primary_axis.unit.as_deref(), Some("원/kg"));
    let secondary = chart.secondary_axis.as_ref().expect("secondary labels");
    assert_eq!(
        secondary.tick_labels,
        vec!["140.0", "157.5", "175.0", "192.5", "210.0"]
    );
    assert_eq!(chart.legend.len(), 2);

    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["assignment"]["primary_series_ids"][0], "big");
    assert_eq!(json["legend"][1]["axis"], "secondary");
}
