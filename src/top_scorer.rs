use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopScorer {
    pub name: String,
    pub goals: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TopScorerError {
    #[error("missing \" - \" separator")]
    MissingSeparator,
    #[error("separator appears {0} times")]
    AmbiguousSeparator(usize),
    #[error("en/em dash used as separator")]
    DashVariant,
    #[error("empty scorer name")]
    EmptyName,
    #[error("goal count {0:?} is not a non-negative integer")]
    InvalidGoals(String),
}

/// Splits a `"<name> - <goals>"` string.
pub fn parse_top_scorer(raw: &str) -> Result<TopScorer, TopScorerError> {
    let count = raw.matches(SEPARATOR).count();
    if count == 0 {
        if raw.contains('\u{2013}') || raw.contains('\u{2014}') {
            return Err(TopScorerError::DashVariant);
        }
        return Err(TopScorerError::MissingSeparator);
    }
    if count > 1 {
        return Err(TopScorerError::AmbiguousSeparator(count));
    }

    let Some((name, goals)) = raw.split_once(SEPARATOR) else {
        return Err(TopScorerError::MissingSeparator);
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(TopScorerError::EmptyName);
    }
    // Tied scorers joined with a different dash end up on either side.
    if name.contains('\u{2013}') || name.contains('\u{2014}') {
        return Err(TopScorerError::DashVariant);
    }

    let goals_raw = goals.trim();
    let valid_digits = !goals_raw.is_empty() && goals_raw.chars().all(|c| c.is_ascii_digit());
    let goals = valid_digits
        .then(|| goals_raw.parse::<i64>().ok())
        .flatten()
        .ok_or_else(|| TopScorerError::InvalidGoals(goals_raw.to_string()))?;

    Ok(TopScorer {
        name: name.to_string(),
        goals,
    })
}
