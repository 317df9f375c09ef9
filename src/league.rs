use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    PremierLeague,
    LaLiga,
    SerieA,
    Bundesliga,
    Ligue1,
}

pub const LEAGUE_OPTIONS: [League; 5] = [
    League::PremierLeague,
    League::LaLiga,
    League::SerieA,
    League::Bundesliga,
    League::Ligue1,
];

pub const DEFAULT_LEAGUE: League = League::SerieA;

impl Default for League {
    fn default() -> Self {
        DEFAULT_LEAGUE
    }
}

impl League {
    pub fn label(self) -> &'static str {
        match self {
            League::PremierLeague => "Premier League",
            League::LaLiga => "La Liga",
            League::SerieA => "Serie A",
            League::Bundesliga => "Bundesliga",
            League::Ligue1 => "Ligue 1",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            League::PremierLeague => "eng.1",
            League::LaLiga => "esp.1",
            League::SerieA => "ita.1",
            League::Bundesliga => "ger.1",
            League::Ligue1 => "fra.1",
        }
    }

    /// Parses a selector value. Only the exact option labels are accepted;
    /// surrounding whitespace is ignored.
    pub fn from_label(raw: &str) -> Result<Self, DashboardError> {
        let trimmed = raw.trim();
        LEAGUE_OPTIONS
            .iter()
            .copied()
            .find(|league| league.label() == trimmed)
            .ok_or_else(|| DashboardError::UnknownLeague {
                name: raw.to_string(),
            })
    }

    pub fn index(self) -> usize {
        LEAGUE_OPTIONS
            .iter()
            .position(|league| *league == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        LEAGUE_OPTIONS[(self.index() + 1) % LEAGUE_OPTIONS.len()]
    }

    pub fn prev(self) -> Self {
        let len = LEAGUE_OPTIONS.len();
        LEAGUE_OPTIONS[(self.index() + len - 1) % len]
    }

    /// File-name friendly key, e.g. `serie_a`.
    pub fn file_key(self) -> String {
        self.label().to_lowercase().replace(' ', "_")
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
