use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::http_client::http_client;
use crate::league::League;
use crate::source::StandingsSource;

pub const DEFAULT_STANDINGS_URL: &str = "http://localhost:8000/standings";

/// Standings over HTTP: `GET {base_url}/{slug}`.
#[derive(Debug, Clone)]
pub struct HttpStandingsSource {
    base_url: String,
    timeout_secs: u64,
}

impl HttpStandingsSource {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn url_for(&self, league: League) -> String {
        format!("{}/{}", self.base_url, league.slug())
    }

    pub fn fetch_premier_league(&self) -> Result<Vec<Value>> {
        self.fetch_slug(League::PremierLeague)
    }

    pub fn fetch_la_liga(&self) -> Result<Vec<Value>> {
        self.fetch_slug(League::LaLiga)
    }

    pub fn fetch_serie_a(&self) -> Result<Vec<Value>> {
        self.fetch_slug(League::SerieA)
    }

    pub fn fetch_bundesliga(&self) -> Result<Vec<Value>> {
        self.fetch_slug(League::Bundesliga)
    }

    pub fn fetch_ligue_1(&self) -> Result<Vec<Value>> {
        self.fetch_slug(League::Ligue1)
    }

    fn fetch_slug(&self, league: League) -> Result<Vec<Value>> {
        let client = http_client()?;
        let url = self.url_for(league);
        let resp = client
            .get(&url)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout())
            .send()
            .with_context(|| format!("request failed: {url}"))?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("http {}: {}", status, truncate(&body, 200)));
        }
        parse_standings_json(&body)
    }
}

impl StandingsSource for HttpStandingsSource {
    fn fetch(&self, league: League) -> Result<Vec<Value>> {
        match league {
            League::PremierLeague => self.fetch_premier_league(),
            League::LaLiga => self.fetch_la_liga(),
            League::SerieA => self.fetch_serie_a(),
            League::Bundesliga => self.fetch_bundesliga(),
            League::Ligue1 => self.fetch_ligue_1(),
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Accepts a bare array, or an object wrapping it in `standings`/`data`.
pub fn parse_standings_json(raw: &str) -> Result<Vec<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid standings json")?;
    match root {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => {
            for key in ["standings", "data"] {
                match map.remove(key) {
                    Some(Value::Array(rows)) => return Ok(rows),
                    Some(Value::Null) => return Ok(Vec::new()),
                    Some(_) => return Err(anyhow::anyhow!("`{key}` is not an array")),
                    None => {}
                }
            }
            Err(anyhow::anyhow!("standings json has no `standings` array"))
        }
        _ => Err(anyhow::anyhow!("standings json is not an array or object")),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push('…');
    out
}
