use crate::charts::{ChartOptions, ChartSet, build_charts};
use crate::error::DashboardError;
use crate::league::{DEFAULT_LEAGUE, LEAGUE_OPTIONS, League};
use crate::record::LeagueTable;
use crate::source::{StandingsSource, fetch_league_rows};

pub const SELECTOR_ID: &str = "league-dropdown";

#[derive(Debug, Clone, Copy)]
pub struct Selector {
    pub id: &'static str,
    pub options: &'static [League],
    pub default: League,
}

#[derive(Debug, Clone)]
pub struct LeagueView {
    pub table: LeagueTable,
    pub charts: ChartSet,
}

pub struct Dashboard<S> {
    source: S,
    options: ChartOptions,
    selector: Selector,
}

impl<S: StandingsSource> Dashboard<S> {
    pub fn new(source: S, options: ChartOptions) -> Self {
        Self::with_default(source, options, DEFAULT_LEAGUE)
    }

    pub fn with_default(source: S, options: ChartOptions, default: League) -> Self {
        Self {
            source,
            options,
            selector: Selector {
                id: SELECTOR_ID,
                options: &LEAGUE_OPTIONS,
                default,
            },
        }
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Handles a raw selector value.
    pub fn update_league(&self, selection: &str) -> Result<ChartSet, DashboardError> {
        let league = League::from_label(selection)?;
        self.charts_for(league)
    }

    pub fn charts_for(&self, league: League) -> Result<ChartSet, DashboardError> {
        self.view_for(league).map(|view| view.charts)
    }

    pub fn view_for(&self, league: League) -> Result<LeagueView, DashboardError> {
        let table = self.load_table(league)?;
        let charts = build_charts(&table, self.options);
        Ok(LeagueView { table, charts })
    }

    pub fn load_table(&self, league: League) -> Result<LeagueTable, DashboardError> {
        let raw = fetch_league_rows(&self.source, league)?;
        LeagueTable::from_raw(league, &raw)
    }
}
