use std::env;
use std::path::PathBuf;

use crate::charts::{BarOrder, ChartOptions};
use crate::fake_source::FakeStandingsSource;
use crate::http_client::DEFAULT_TIMEOUT_SECS;
use crate::league::{DEFAULT_LEAGUE, League};
use crate::source::StandingsSource;
use crate::standings_fetch::{DEFAULT_STANDINGS_URL, HttpStandingsSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Http,
    Fake,
}

impl SourceKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "http" | "api" => Some(SourceKind::Http),
            "fake" | "offline" => Some(SourceKind::Fake),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashConfig {
    pub source: SourceKind,
    pub api_url: String,
    pub timeout_secs: u64,
    pub default_league: League,
    pub chart_options: ChartOptions,
    pub export_dir: PathBuf,
    /// Problems found while reading the environment, surfaced as log lines.
    pub warnings: Vec<String>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Http,
            api_url: DEFAULT_STANDINGS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_league: DEFAULT_LEAGUE,
            chart_options: ChartOptions::default(),
            export_dir: PathBuf::from("."),
            warnings: Vec::new(),
        }
    }
}

impl DashConfig {
    /// Reads process env. Call `dotenvy` first if `.env` files should apply.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = get("STANDINGS_SOURCE") {
            match SourceKind::parse(&raw) {
                Some(kind) => cfg.source = kind,
                None => cfg
                    .warnings
                    .push(format!("[WARN] STANDINGS_SOURCE={raw:?} not recognized, using http")),
            }
        }
        if let Some(url) = get("STANDINGS_API_URL") {
            cfg.api_url = url.trim().to_string();
        }
        if let Some(secs) = get("STANDINGS_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(val) => cfg.timeout_secs = val.clamp(1, 120),
                Err(_) => cfg
                    .warnings
                    .push(format!("[WARN] STANDINGS_TIMEOUT_SECS={secs:?} is not a number")),
            }
        }
        if let Some(name) = get("DEFAULT_LEAGUE") {
            match League::from_label(&name) {
                Ok(league) => cfg.default_league = league,
                Err(err) => cfg.warnings.push(format!(
                    "[WARN] DEFAULT_LEAGUE: {err}, falling back to {DEFAULT_LEAGUE}"
                )),
            }
        }
        if let Some(order) = get("BAR_ORDER") {
            match BarOrder::parse(&order) {
                Some(bar_order) => cfg.chart_options.bar_order = bar_order,
                None => cfg
                    .warnings
                    .push(format!("[WARN] BAR_ORDER={order:?} not recognized, using table")),
            }
        }
        if let Some(dir) = get("EXPORT_DIR") {
            cfg.export_dir = PathBuf::from(dir.trim());
        }
        cfg
    }

    pub fn build_source(&self) -> Box<dyn StandingsSource> {
        match self.source {
            SourceKind::Http => Box::new(HttpStandingsSource::new(
                self.api_url.clone(),
                self.timeout_secs,
            )),
            SourceKind::Fake => Box::new(FakeStandingsSource::default()),
        }
    }
}
