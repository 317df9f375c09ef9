use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::error::DashboardError;
use crate::league::League;
use crate::record::RawRecord;

pub trait StandingsSource: Send + Sync {
    fn fetch(&self, league: League) -> Result<Vec<Value>>;

    fn name(&self) -> &'static str;
}

impl<S: StandingsSource + ?Sized> StandingsSource for Box<S> {
    fn fetch(&self, league: League) -> Result<Vec<Value>> {
        (**self).fetch(league)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: StandingsSource + ?Sized> StandingsSource for Arc<S> {
    fn fetch(&self, league: League) -> Result<Vec<Value>> {
        (**self).fetch(league)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Calls the source and checks that every row is a JSON object.
pub fn fetch_league_rows<S: StandingsSource + ?Sized>(
    source: &S,
    league: League,
) -> Result<Vec<RawRecord>, DashboardError> {
    let rows = source
        .fetch(league)
        .map_err(|err| unavailable(league, format!("{err:#}")))?;
    if rows.is_empty() {
        return Err(unavailable(league, "no standings rows returned"));
    }

    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| match row {
            Value::Object(map) => Ok(map),
            other => Err(unavailable(
                league,
                format!("row {idx} is not an object: {}", type_name(&other)),
            )),
        })
        .collect()
}

fn unavailable(league: League, reason: impl Into<String>) -> DashboardError {
    DashboardError::DataSourceUnavailable {
        league: league.label().to_string(),
        reason: reason.into(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
