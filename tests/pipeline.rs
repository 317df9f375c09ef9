mod common;

use std::sync::Arc;

use serde_json::json;

use common::{StubSource, row, sample_rows};
use league_dash::charts::{
    AxisDirection, BarOrder, CHART_SLOTS, Cell, ChartKind, ChartOptions, ChartSlot,
};
use league_dash::dashboard::Dashboard;
use league_dash::error::DashboardError;
use league_dash::league::{LEAGUE_OPTIONS, League};
use league_dash::top_scorer::TopScorerError;

fn dashboard(source: StubSource) -> Dashboard<StubSource> {
    Dashboard::new(source, ChartOptions::default())
}

#[test]
fn every_league_yields_five_populated_charts() {
    let dash = dashboard(StubSource::with_rows(sample_rows()));
    for league in LEAGUE_OPTIONS {
        let set = dash.update_league(league.label()).expect("pipeline should succeed");
        assert_eq!(set.len(), 5);
        assert_eq!(set.league, league.label());
        let slots: Vec<ChartSlot> = set.charts.iter().map(|c| c.slot).collect();
        assert_eq!(slots, CHART_SLOTS.to_vec());
        assert!(set.charts.iter().all(|c| !c.points.is_empty()));
    }
}

#[test]
fn selector_defaults_to_serie_a() {
    let dash = dashboard(StubSource::with_rows(sample_rows()));
    let selector = dash.selector();
    assert_eq!(selector.default, League::SerieA);
    assert_eq!(selector.options.len(), 5);
    assert_eq!(selector.id, "league-dropdown");
}

#[test]
fn unknown_league_fails_before_fetching() {
    let stub = Arc::new(StubSource::with_rows(sample_rows()));
    let dash = Dashboard::new(Arc::clone(&stub), ChartOptions::default());
    let err = dash.update_league("Eredivisie").unwrap_err();
    assert_eq!(
        err,
        DashboardError::UnknownLeague {
            name: "Eredivisie".to_string()
        }
    );
    assert_eq!(stub.calls(), 0);

    dash.update_league("Serie A").unwrap();
    assert_eq!(stub.calls(), 1);
}

#[test]
fn source_failure_is_data_source_unavailable() {
    let dash = dashboard(StubSource::failing("connection refused"));
    let err = dash.update_league("Serie A").unwrap_err();
    match err {
        DashboardError::DataSourceUnavailable { league, reason } => {
            assert_eq!(league, "Serie A");
            assert!(reason.contains("connection refused"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_or_non_object_payload_is_unavailable() {
    let empty = dashboard(StubSource::with_rows(Vec::new()));
    assert!(matches!(
        empty.update_league("Ligue 1"),
        Err(DashboardError::DataSourceUnavailable { .. })
    ));

    let scalars = dashboard(StubSource::with_rows(vec![json!("Inter"), json!(3)]));
    assert!(matches!(
        scalars.update_league("Ligue 1"),
        Err(DashboardError::DataSourceUnavailable { .. })
    ));
}

#[test]
fn malformed_pos_names_the_column() {
    let mut rows = sample_rows();
    rows[1]["pos"] = json!("abc");
    let dash = dashboard(StubSource::with_rows(rows));
    let err = dash.update_league("La Liga").unwrap_err();
    match err {
        DashboardError::MalformedRecord { row, column, value } => {
            assert_eq!(row, 1);
            assert_eq!(column, "pos");
            assert!(value.contains("abc"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn bad_top_scorer_strings_are_reported() {
    let cases = [
        ("Smith-12", TopScorerError::MissingSeparator),
        ("Smith - twelve", TopScorerError::InvalidGoals("twelve".to_string())),
    ];
    for (raw, expected) in cases {
        let rows = vec![row("Inter", 1, 60, 15, 70, raw)];
        let dash = dashboard(StubSource::with_rows(rows));
        let err = dash.update_league("Serie A").unwrap_err();
        assert_eq!(
            err,
            DashboardError::UnparseableTopScorer {
                row: 0,
                value: raw.to_string(),
                reason: expected,
            }
        );
    }
}

#[test]
fn top_scorer_goals_column_is_derived() {
    let dash = dashboard(StubSource::with_rows(vec![row("Inter", 1, 60, 15, 70, "Smith - 12")]));
    let set = dash.update_league("Serie A").unwrap();
    let chart = set.get(ChartSlot::TopScorers).unwrap();
    assert_eq!(chart.title, "Serie A Top Scorers");
    assert_eq!(chart.points[0].x, Cell::Text("Smith - 12".to_string()));
    assert_eq!(chart.points[0].y, 12);
    let hover: Vec<&str> = chart.points[0].hover.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(hover, vec!["team", "top_scorer"]);
}

#[test]
fn scatter_axis_is_reversed_regardless_of_row_order() {
    let mut rows = sample_rows();
    let forward = dashboard(StubSource::with_rows(rows.clone()))
        .update_league("Bundesliga")
        .unwrap();
    rows.reverse();
    let backward = dashboard(StubSource::with_rows(rows))
        .update_league("Bundesliga")
        .unwrap();

    for set in [&forward, &backward] {
        let scatter = set.get(ChartSlot::PointsGoalDiff).unwrap();
        assert_eq!(scatter.kind, ChartKind::Scatter);
        assert_eq!(scatter.y_axis, AxisDirection::Reversed);
        assert_eq!(scatter.title, "Bundesliga");
        assert_eq!(scatter.axis_label(scatter.x), "Goal Differential");
        assert_eq!(scatter.axis_label(scatter.y), "Points");
    }
}

#[test]
fn scatter_points_carry_team_text_and_hover() {
    let set = dashboard(StubSource::with_rows(sample_rows()))
        .update_league("Premier League")
        .unwrap();
    let scatter = set.get(ChartSlot::PointsGoalDiff).unwrap();
    let first = &scatter.points[0];
    assert_eq!(first.x, Cell::Int(45));
    assert_eq!(first.y, 70);
    assert_eq!(first.text.as_deref(), Some("Inter"));
    assert_eq!(
        first.hover,
        vec![
            ("team".to_string(), "Inter".to_string()),
            ("top_scorer".to_string(), "Lautaro Martinez - 20".to_string()),
        ]
    );
}

#[test]
fn identical_goals_for_are_not_merged() {
    let rows = vec![
        row("Bologna", 1, 40, 20, 50, "Zirkzee - 11"),
        row("Roma", 2, 40, 30, 48, "Dybala - 13"),
    ];
    let set = dashboard(StubSource::with_rows(rows))
        .update_league("Serie A")
        .unwrap();
    let offense = set.get(ChartSlot::Offense).unwrap();
    assert_eq!(offense.title, "Serie A Attack");
    assert_eq!(offense.points.len(), 2);
    assert_eq!(offense.points[0].x, Cell::Text("Bologna".to_string()));
    assert_eq!(offense.points[1].x, Cell::Text("Roma".to_string()));
    assert!(offense.points.iter().all(|p| p.y == 40));
}

#[test]
fn bar_titles_and_labels_follow_league() {
    let set = dashboard(StubSource::with_rows(sample_rows()))
        .update_league("La Liga")
        .unwrap();
    let expected = [
        (ChartSlot::Offense, "La Liga Attack", "goals_for", "Goals For"),
        (ChartSlot::Defense, "La Liga Defense", "goals_against", "Goals Against"),
        (ChartSlot::GoalDiff, "La Liga Goal Differential", "goal_diff", "Goal Differential"),
    ];
    for (slot, title, key, label) in expected {
        let chart = set.get(slot).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.title, title);
        assert_eq!(chart.y.key(), key);
        assert_eq!(chart.labels.get("team").map(String::as_str), Some(""));
        assert_eq!(chart.labels.get(key).map(String::as_str), Some(label));
    }
}

#[test]
fn bars_keep_table_order_unless_value_order_requested() {
    let rows = vec![
        row("Lecce", 1, 20, 50, 25, "Krstovic - 7"),
        row("Inter", 2, 60, 15, 70, "Martinez - 20"),
        row("Genoa", 3, 20, 30, 30, "Retegui - 7"),
    ];

    let table_order = dashboard(StubSource::with_rows(rows.clone()))
        .update_league("Serie A")
        .unwrap();
    let teams: Vec<String> = table_order
        .get(ChartSlot::Offense)
        .unwrap()
        .points
        .iter()
        .map(|p| p.x.to_string())
        .collect();
    assert_eq!(teams, vec!["Lecce", "Inter", "Genoa"]);

    let by_value = Dashboard::new(
        StubSource::with_rows(rows),
        ChartOptions {
            bar_order: BarOrder::Value,
        },
    )
    .update_league("Serie A")
    .unwrap();
    let teams: Vec<String> = by_value
        .get(ChartSlot::Offense)
        .unwrap()
        .points
        .iter()
        .map(|p| p.x.to_string())
        .collect();
    // Ties keep standings order.
    assert_eq!(teams, vec!["Inter", "Lecce", "Genoa"]);
}

#[test]
fn chart_set_serializes_to_json() {
    let set = dashboard(StubSource::with_rows(sample_rows()))
        .update_league("Serie A")
        .unwrap();
    let value = serde_json::to_value(&set).unwrap();
    assert_eq!(value["charts"][0]["kind"], "scatter");
    assert_eq!(value["charts"][0]["y_axis"], "reversed");
    assert_eq!(value["charts"][0]["x"], "goal_diff");
    assert_eq!(value["charts"][4]["y"], "top_scorer_goals");
}
