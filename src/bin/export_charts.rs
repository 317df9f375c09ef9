use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};

use league_dash::config::{DashConfig, SourceKind};
use league_dash::dashboard::Dashboard;
use league_dash::export;

struct Args {
    league: Option<String>,
    json: Option<PathBuf>,
    xlsx: Option<PathBuf>,
    source: Option<SourceKind>,
}

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    let mut config = DashConfig::from_env();
    for warning in &config.warnings {
        eprintln!("{warning}");
    }
    if let Some(source) = args.source {
        config.source = source;
    }

    let dashboard = Dashboard::with_default(
        config.build_source(),
        config.chart_options,
        config.default_league,
    );
    let selection = args
        .league
        .unwrap_or_else(|| dashboard.selector().default.label().to_string());

    let league = league_dash::league::League::from_label(&selection)?;
    let view = dashboard.view_for(league)?;

    println!("{} ({} source)", view.charts.league, dashboard.source_name());
    println!("Teams: {}", view.table.len());
    for chart in &view.charts.charts {
        println!(" - {} [{}]: {} points", chart.title, chart.slot.id(), chart.points.len());
    }

    if let Some(path) = args.json.as_deref() {
        let report = export::export_chart_json(path, &view.charts)?;
        println!("JSON: {}", report.path.display());
    }
    if let Some(path) = args.xlsx.as_deref() {
        let report = export::export_xlsx(path, &view)?;
        println!("XLSX: {}", report.path.display());
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<Args> {
    let mut out = Args {
        league: None,
        json: None,
        xlsx: None,
        source: None,
    };
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg.clone(), None),
        };
        let mut value = || -> Result<String> {
            inline
                .clone()
                .or_else(|| iter.next())
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{flag} needs a value"))
        };
        match flag.as_str() {
            "--league" => out.league = Some(value()?),
            "--json" => out.json = Some(PathBuf::from(value()?)),
            "--xlsx" => out.xlsx = Some(PathBuf::from(value()?)),
            "--source" => {
                let raw = value()?;
                out.source = Some(
                    SourceKind::parse(&raw).with_context(|| format!("unknown source {raw:?}"))?,
                );
            }
            other => anyhow::bail!("unrecognized argument {other:?}"),
        }
    }
    Ok(out)
}
