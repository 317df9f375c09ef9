use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::charts::ChartSet;
use crate::dashboard::LeagueView;
use crate::record::TeamRow;

pub struct ExportReport {
    pub path: PathBuf,
    pub teams: usize,
    pub charts: usize,
}

/// `<dir>/<league>_<timestamp>.<ext>`
pub fn default_export_path(dir: &Path, view: &LeagueView, ext: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{}_{stamp}.{ext}", view.table.league.file_key()))
}

/// One standings sheet plus one sheet per chart with its plotted values.
pub fn export_xlsx(path: &Path, view: &LeagueView) -> Result<ExportReport> {
    let mut standings_rows = vec![
        [
            "Pos",
            "Team",
            "MP",
            "W",
            "D",
            "L",
            "GF",
            "GA",
            "GD",
            "Pts",
            "Top Scorer",
            "Top Scorer Goals",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>(),
    ];
    standings_rows.extend(view.table.rows.iter().map(standings_row));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Standings").context("name standings sheet")?;
        write_rows(sheet, &standings_rows)?;
    }

    for chart in &view.charts.charts {
        let mut rows = vec![vec![
            chart.axis_label(chart.x),
            chart.axis_label(chart.y),
        ]];
        if rows[0][0].is_empty() {
            rows[0][0] = chart.x.key().to_string();
        }
        rows.extend(
            chart
                .points
                .iter()
                .map(|p| vec![p.x.to_string(), p.y.to_string()]),
        );
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(sheet_name(chart.slot.id()))
            .with_context(|| format!("name sheet {}", chart.slot.id()))?;
        write_rows(sheet, &rows)?;
    }

    ensure_parent(path)?;
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        path: path.to_path_buf(),
        teams: view.table.len(),
        charts: view.charts.len(),
    })
}

pub fn export_chart_json(path: &Path, charts: &ChartSet) -> Result<ExportReport> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(charts).context("serialize chart specs")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write chart specs")?;
    fs::rename(&tmp, path).context("swap chart specs")?;
    Ok(ExportReport {
        path: path.to_path_buf(),
        teams: charts.charts.first().map(|c| c.points.len()).unwrap_or(0),
        charts: charts.len(),
    })
}

fn standings_row(row: &TeamRow) -> Vec<String> {
    let r = &row.record;
    vec![
        r.pos.to_string(),
        r.team.clone(),
        r.matches_played.map(|v| v.to_string()).unwrap_or_default(),
        r.wins.to_string(),
        r.draws.to_string(),
        r.losses.to_string(),
        r.goals_for.to_string(),
        r.goals_against.to_string(),
        r.goal_diff.to_string(),
        r.points.to_string(),
        row.scorer.name.clone(),
        row.top_scorer_goals().to_string(),
    ]
}

// Excel caps sheet names at 31 chars.
fn sheet_name(id: &str) -> String {
    id.trim_end_matches("-graph").chars().take(31).collect()
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            // Numeric cells stay numeric so charts can be built in Excel.
            match value.parse::<f64>() {
                Ok(num) if row_idx > 0 && num.is_finite() => {
                    worksheet
                        .write_number(row_idx as u32, col_idx as u16, num)
                        .context("write xlsx number")?;
                }
                _ => {
                    worksheet
                        .write_string(row_idx as u32, col_idx as u16, value)
                        .context("write xlsx cell")?;
                }
            }
        }
    }
    Ok(())
}
