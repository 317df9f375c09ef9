use serde::Serialize;
use thiserror::Error;

use crate::top_scorer::TopScorerError;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DashboardError {
    #[error("unknown league: {name:?}")]
    UnknownLeague { name: String },

    #[error("{league} data source unavailable: {reason}")]
    DataSourceUnavailable { league: String, reason: String },

    #[error("malformed record at row {row}: column `{column}` has value {value}")]
    MalformedRecord {
        row: usize,
        column: String,
        value: String,
    },

    #[error("unparseable top scorer at row {row}: {value:?} ({reason})")]
    UnparseableTopScorer {
        row: usize,
        value: String,
        reason: TopScorerError,
    },
}

impl DashboardError {
    /// Short label for banners and log prefixes.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::UnknownLeague { .. } => "Unknown league",
            DashboardError::DataSourceUnavailable { .. } => "Data source unavailable",
            DashboardError::MalformedRecord { .. } => "Malformed record",
            DashboardError::UnparseableTopScorer { .. } => "Unparseable top scorer",
        }
    }
}
