use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::dashboard::LeagueView;
use crate::error::DashboardError;
use crate::league::{LEAGUE_OPTIONS, League};

#[derive(Debug, Clone)]
pub enum LoadStatus {
    Idle,
    Loading { token: u64, league: League },
    Ready,
    Failed(DashboardError),
}

#[derive(Debug, Clone, Default)]
pub struct Dropdown {
    pub open: bool,
    pub highlighted: usize,
}

#[derive(Debug, Clone)]
pub struct ExportState {
    pub message: String,
    pub ok: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub league: League,
    pub dropdown: Dropdown,
    pub status: LoadStatus,
    pub view: Option<LeagueView>,
    pub updated_at: Option<DateTime<Local>>,
    /// Token of the newest request issued; older replies are dropped.
    pub latest_token: u64,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub export: Option<ExportState>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(League::default())
    }
}

impl AppState {
    pub fn new(league: League) -> Self {
        Self {
            league,
            dropdown: Dropdown {
                open: false,
                highlighted: league.index(),
            },
            status: LoadStatus::Idle,
            view: None,
            updated_at: None,
            latest_token: 0,
            logs: VecDeque::new(),
            help_overlay: false,
            export: None,
        }
    }

    /// Records a new selection and returns the command for the provider.
    pub fn select_league(&mut self, league: League) -> ProviderCommand {
        self.league = league;
        self.dropdown.highlighted = league.index();
        self.latest_token += 1;
        self.status = LoadStatus::Loading {
            token: self.latest_token,
            league,
        };
        ProviderCommand::FetchLeague {
            token: self.latest_token,
            league: league.label().to_string(),
        }
    }

    pub fn refresh(&mut self) -> ProviderCommand {
        self.select_league(self.league)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading { .. })
    }

    pub fn error(&self) -> Option<&DashboardError> {
        match &self.status {
            LoadStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn open_dropdown(&mut self) {
        self.dropdown.open = true;
        self.dropdown.highlighted = self.league.index();
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown.open = false;
    }

    pub fn dropdown_next(&mut self) {
        self.dropdown.highlighted = (self.dropdown.highlighted + 1) % LEAGUE_OPTIONS.len();
    }

    pub fn dropdown_prev(&mut self) {
        let len = LEAGUE_OPTIONS.len();
        self.dropdown.highlighted = (self.dropdown.highlighted + len - 1) % len;
    }

    /// Confirms the highlighted option, if it differs from the current one.
    pub fn dropdown_confirm(&mut self) -> Option<ProviderCommand> {
        self.dropdown.open = false;
        let picked = LEAGUE_OPTIONS[self.dropdown.highlighted % LEAGUE_OPTIONS.len()];
        if picked == self.league && !matches!(self.status, LoadStatus::Failed(_)) {
            return None;
        }
        Some(self.select_league(picked))
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        let stamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    Charts {
        token: u64,
        result: Result<LeagueView, DashboardError>,
    },
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    /// `league` is the raw selector value; the provider validates it.
    FetchLeague { token: u64, league: String },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Log(msg) => state.push_log(msg),
        Delta::Charts { token, result } => {
            if token != state.latest_token {
                state.push_log(format!(
                    "[INFO] Dropped stale result #{token} (latest #{})",
                    state.latest_token
                ));
                return;
            }
            match result {
                Ok(view) => {
                    state.push_log(format!(
                        "[INFO] {}: {} teams, {} charts",
                        view.charts.league,
                        view.table.len(),
                        view.charts.len()
                    ));
                    state.view = Some(view);
                    state.updated_at = Some(Local::now());
                    state.status = LoadStatus::Ready;
                }
                Err(err) => {
                    state.push_log(format!("[WARN] {}: {err}", err.kind()));
                    // Charts from a previous league would be mislabeled.
                    state.view = None;
                    state.status = LoadStatus::Failed(err);
                }
            }
        }
    }
}
