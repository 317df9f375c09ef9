pub mod chart_view;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod fake_source;
pub mod http_client;
pub mod league;
pub mod provider;
pub mod record;
pub mod source;
pub mod standings_fetch;
pub mod state;
pub mod top_scorer;
