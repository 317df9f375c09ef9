use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DashboardError;
use crate::league::League;
use crate::top_scorer::{TopScorer, parse_top_scorer};

pub type RawRecord = Map<String, Value>;

/// Columns coerced to integers, in coercion order.
pub const INT_COLUMNS: [&str; 8] = [
    "pos",
    "wins",
    "losses",
    "draws",
    "goals_for",
    "goals_against",
    "goal_diff",
    "points",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueRecord {
    pub team: String,
    pub pos: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches_played: Option<i64>,
    pub wins: i64,
    pub losses: i64,
    pub draws: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    /// Reported by the API; not re-derived from goals for/against.
    pub goal_diff: i64,
    pub points: i64,
    pub top_scorer: String,
}

impl LeagueRecord {
    pub fn to_raw(&self) -> RawRecord {
        let mut raw = RawRecord::new();
        raw.insert("team".into(), Value::from(self.team.clone()));
        for (column, value) in INT_COLUMNS.iter().zip(self.int_values()) {
            raw.insert((*column).into(), Value::from(value));
        }
        if let Some(played) = self.matches_played {
            raw.insert("matches_played".into(), Value::from(played));
        }
        raw.insert("top_scorer".into(), Value::from(self.top_scorer.clone()));
        raw
    }

    // Same order as INT_COLUMNS.
    fn int_values(&self) -> [i64; INT_COLUMNS.len()] {
        [
            self.pos,
            self.wins,
            self.losses,
            self.draws,
            self.goals_for,
            self.goals_against,
            self.goal_diff,
            self.points,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRow {
    pub record: LeagueRecord,
    pub scorer: TopScorer,
}

impl TeamRow {
    pub fn top_scorer_goals(&self) -> i64 {
        self.scorer.goals
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueTable {
    pub league: League,
    pub rows: Vec<TeamRow>,
}

impl LeagueTable {
    pub fn from_raw(league: League, raw: &[RawRecord]) -> Result<Self, DashboardError> {
        let records = normalize_records(raw)?;
        let rows = derive_top_scorers(records)?;
        Ok(Self { league, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn normalize_records(raw: &[RawRecord]) -> Result<Vec<LeagueRecord>, DashboardError> {
    raw.iter()
        .enumerate()
        .map(|(row, record)| normalize_record(row, record))
        .collect()
}

pub fn normalize_record(row: usize, raw: &RawRecord) -> Result<LeagueRecord, DashboardError> {
    let mut ints = [0i64; INT_COLUMNS.len()];
    for (slot, column) in ints.iter_mut().zip(INT_COLUMNS) {
        *slot = require_int(row, raw, column)?;
    }
    let [pos, wins, losses, draws, goals_for, goals_against, goal_diff, points] = ints;

    let matches_played = match raw.get("matches_played") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            coerce_int(value).ok_or_else(|| malformed(row, "matches_played", value))?,
        ),
    };

    Ok(LeagueRecord {
        team: require_text(row, raw, "team")?,
        pos,
        matches_played,
        wins,
        losses,
        draws,
        goals_for,
        goals_against,
        goal_diff,
        points,
        top_scorer: require_text(row, raw, "top_scorer")?,
    })
}

pub fn derive_top_scorers(records: Vec<LeagueRecord>) -> Result<Vec<TeamRow>, DashboardError> {
    records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let scorer = parse_top_scorer(&record.top_scorer).map_err(|reason| {
                DashboardError::UnparseableTopScorer {
                    row,
                    value: record.top_scorer.clone(),
                    reason,
                }
            })?;
            Ok(TeamRow { record, scorer })
        })
        .collect()
}

/// Integer coercion for API cells: integers, whole floats, and trimmed
/// signed integer strings such as `"+12"`.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn require_int(row: usize, raw: &RawRecord, column: &str) -> Result<i64, DashboardError> {
    let Some(value) = raw.get(column) else {
        return Err(missing(row, column));
    };
    coerce_int(value).ok_or_else(|| malformed(row, column, value))
}

fn require_text(row: usize, raw: &RawRecord, column: &str) -> Result<String, DashboardError> {
    match raw.get(column) {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(malformed(row, column, other)),
        None => Err(missing(row, column)),
    }
}

fn malformed(row: usize, column: &str, value: &Value) -> DashboardError {
    DashboardError::MalformedRecord {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn missing(row: usize, column: &str) -> DashboardError {
    DashboardError::MalformedRecord {
        row,
        column: column.to_string(),
        value: "<missing>".to_string(),
    }
}
