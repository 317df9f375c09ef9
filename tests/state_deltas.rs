mod common;

use common::{StubSource, sample_rows};
use league_dash::charts::ChartOptions;
use league_dash::dashboard::{Dashboard, LeagueView};
use league_dash::error::DashboardError;
use league_dash::league::League;
use league_dash::state::{AppState, Delta, LoadStatus, ProviderCommand, apply_delta};

fn view_for(league: League) -> LeagueView {
    Dashboard::new(StubSource::with_rows(sample_rows()), ChartOptions::default())
        .view_for(league)
        .unwrap()
}

#[test]
fn selection_issues_increasing_tokens() {
    let mut state = AppState::new(League::SerieA);
    let first = state.select_league(League::LaLiga);
    let second = state.select_league(League::Ligue1);
    assert_eq!(
        first,
        ProviderCommand::FetchLeague {
            token: 1,
            league: "La Liga".to_string()
        }
    );
    assert_eq!(
        second,
        ProviderCommand::FetchLeague {
            token: 2,
            league: "Ligue 1".to_string()
        }
    );
    assert!(state.is_loading());
}

#[test]
fn stale_results_are_dropped() {
    let mut state = AppState::new(League::SerieA);
    state.select_league(League::LaLiga);
    state.select_league(League::Bundesliga);

    apply_delta(
        &mut state,
        Delta::Charts {
            token: 1,
            result: Ok(view_for(League::LaLiga)),
        },
    );
    assert!(state.view.is_none());
    assert!(state.is_loading());

    apply_delta(
        &mut state,
        Delta::Charts {
            token: 2,
            result: Ok(view_for(League::Bundesliga)),
        },
    );
    let view = state.view.as_ref().expect("latest result applied");
    assert_eq!(view.charts.league, "Bundesliga");
    assert!(matches!(state.status, LoadStatus::Ready));
    assert!(state.updated_at.is_some());
}

#[test]
fn errors_replace_charts_with_failure_state() {
    let mut state = AppState::new(League::SerieA);
    state.select_league(League::SerieA);
    apply_delta(
        &mut state,
        Delta::Charts {
            token: 1,
            result: Ok(view_for(League::SerieA)),
        },
    );
    assert!(state.view.is_some());

    state.refresh();
    let err = DashboardError::DataSourceUnavailable {
        league: "Serie A".to_string(),
        reason: "timeout".to_string(),
    };
    apply_delta(
        &mut state,
        Delta::Charts {
            token: 2,
            result: Err(err.clone()),
        },
    );
    assert!(state.view.is_none());
    assert_eq!(state.error(), Some(&err));
    assert!(state.logs.iter().any(|l| l.contains("[WARN] Data source unavailable")));
}

#[test]
fn dropdown_confirm_only_fetches_on_change() {
    let mut state = AppState::new(League::SerieA);
    state.status = LoadStatus::Ready;

    state.open_dropdown();
    assert_eq!(state.dropdown.highlighted, League::SerieA.index());
    assert!(state.dropdown_confirm().is_none());
    assert!(!state.dropdown.open);

    state.open_dropdown();
    state.dropdown_next();
    let cmd = state.dropdown_confirm().expect("new league selected");
    assert_eq!(
        cmd,
        ProviderCommand::FetchLeague {
            token: 1,
            league: "Bundesliga".to_string()
        }
    );
    assert_eq!(state.league, League::Bundesliga);
}

#[test]
fn dropdown_wraps() {
    let mut state = AppState::new(League::PremierLeague);
    state.open_dropdown();
    state.dropdown_prev();
    assert_eq!(state.dropdown.highlighted, 4);
    state.dropdown_next();
    assert_eq!(state.dropdown.highlighted, 0);
}

#[test]
fn log_buffer_is_bounded() {
    let mut state = AppState::default();
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert!(state.logs.back().is_some_and(|l| l.ends_with("line 249")));
}
