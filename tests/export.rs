mod common;

use std::fs;
use std::path::PathBuf;

use common::{StubSource, sample_rows};
use league_dash::charts::{ChartOptions, ChartSet};
use league_dash::dashboard::{Dashboard, LeagueView};
use league_dash::export::{default_export_path, export_chart_json, export_xlsx};
use league_dash::league::League;

fn scratch_dir(name: &str) -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("target");
    dir.push("test-exports");
    dir.push(name);
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn serie_a_view() -> LeagueView {
    Dashboard::new(StubSource::with_rows(sample_rows()), ChartOptions::default())
        .view_for(League::SerieA)
        .expect("stub rows build a view")
}

#[test]
fn chart_json_reads_back_unchanged() {
    let view = serie_a_view();
    let dir = scratch_dir("json");
    let path = dir.join("serie_a.json");

    let report = export_chart_json(&path, &view.charts).unwrap();
    assert_eq!(report.path, path);
    assert_eq!(report.charts, 5);
    assert_eq!(report.teams, view.table.len());

    let raw = fs::read_to_string(&path).unwrap();
    let back: ChartSet = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, view.charts);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn chart_json_overwrites_previous_export() {
    let view = serie_a_view();
    let dir = scratch_dir("json_overwrite");
    let path = dir.join("charts.json");
    fs::create_dir_all(&dir).unwrap();
    fs::write(&path, "stale").unwrap();

    export_chart_json(&path, &view.charts).unwrap();
    let back: ChartSet = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back.league, "Serie A");
}

#[test]
fn xlsx_export_reports_counts() {
    let view = serie_a_view();
    let dir = scratch_dir("xlsx");
    let path = dir.join("nested").join("serie_a.xlsx");

    let report = export_xlsx(&path, &view).unwrap();
    assert_eq!(report.teams, 3);
    assert_eq!(report.charts, 5);
    assert!(path.exists());
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn default_path_uses_league_key_and_extension() {
    let view = serie_a_view();
    let path = default_export_path(&PathBuf::from("exports"), &view, "xlsx");
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with(&League::SerieA.file_key()));
    assert!(name.ends_with(".xlsx"));
    assert_eq!(path.parent(), Some(PathBuf::from("exports").as_path()));
}
