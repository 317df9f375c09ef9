#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use serde_json::{Value, json};

use league_dash::league::League;
use league_dash::source::StandingsSource;

/// Returns canned rows and counts calls.
pub struct StubSource {
    pub rows: Vec<Value>,
    pub fail_with: Option<String>,
    pub calls: AtomicUsize,
}

impl StubSource {
    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            rows,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            rows: Vec::new(),
            fail_with: Some(msg.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StandingsSource for StubSource {
    fn fetch(&self, _league: League) -> Result<Vec<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(msg) => Err(anyhow::anyhow!(msg.clone())),
            None => Ok(self.rows.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

pub fn row(
    team: &str,
    pos: i64,
    goals_for: i64,
    goals_against: i64,
    points: i64,
    scorer: &str,
) -> Value {
    json!({
        "team": team,
        "pos": pos.to_string(),
        "wins": "10",
        "losses": "5",
        "draws": "3",
        "goals_for": goals_for.to_string(),
        "goals_against": goals_against.to_string(),
        "goal_diff": format!("{:+}", goals_for - goals_against),
        "points": points.to_string(),
        "top_scorer": scorer,
    })
}

pub fn sample_rows() -> Vec<Value> {
    vec![
        row("Inter", 1, 60, 15, 70, "Lautaro Martinez - 20"),
        row("Juventus", 2, 45, 20, 62, "Dusan Vlahovic - 14"),
        row("Lecce", 3, 20, 50, 25, "Nikola Krstovic - 7"),
    ]
}
