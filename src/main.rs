use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap};

use league_dash::chart_view::{
    axis_value, bar_max, bar_rows, plot_bounds, plot_points, short_label,
};
use league_dash::charts::{ChartSlot, ChartSpec};
use league_dash::config::DashConfig;
use league_dash::dashboard::Dashboard;
use league_dash::export;
use league_dash::league::{LEAGUE_OPTIONS, League};
use league_dash::provider::spawn_provider;
use league_dash::state::{
    AppState, Delta, ExportState, LoadStatus, ProviderCommand, apply_delta,
};

struct App {
    state: AppState,
    config: DashConfig,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
}

impl App {
    fn new(config: DashConfig, cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        let mut state = AppState::new(config.default_league);
        for warning in &config.warnings {
            state.push_log(warning.clone());
        }
        Self {
            state,
            config,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.dropdown.open {
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.state.dropdown_next(),
                KeyCode::Char('k') | KeyCode::Up => self.state.dropdown_prev(),
                KeyCode::Enter => {
                    if let Some(cmd) = self.state.dropdown_confirm() {
                        self.send(cmd);
                    }
                }
                KeyCode::Esc | KeyCode::Char('q') => self.state.close_dropdown(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('l') | KeyCode::Right => self.select(self.state.league.next()),
            KeyCode::Char('h') | KeyCode::Left => self.select(self.state.league.prev()),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = (c as usize) - ('1' as usize);
                self.select(LEAGUE_OPTIONS[idx]);
            }
            KeyCode::Enter | KeyCode::Char('/') => self.state.open_dropdown(),
            KeyCode::Char('r') => {
                let cmd = self.state.refresh();
                self.send(cmd);
            }
            KeyCode::Char('e') => self.export_xlsx(),
            KeyCode::Char('J') => self.export_json(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn select(&mut self, league: League) {
        let cmd = self.state.select_league(league);
        self.send(cmd);
    }

    fn send(&mut self, cmd: ProviderCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Provider thread is gone; restart to fetch");
        }
    }

    fn export_xlsx(&mut self) {
        let Some(view) = self.state.view.as_ref() else {
            self.state.push_log("[INFO] Nothing to export yet");
            return;
        };
        let path = export::default_export_path(&self.config.export_dir, view, "xlsx");
        let result = export::export_xlsx(&path, view);
        self.finish_export(result);
    }

    fn export_json(&mut self) {
        let Some(view) = self.state.view.as_ref() else {
            self.state.push_log("[INFO] Nothing to export yet");
            return;
        };
        let path = export::default_export_path(&self.config.export_dir, view, "json");
        let result = export::export_chart_json(&path, &view.charts);
        self.finish_export(result);
    }

    fn finish_export(&mut self, result: anyhow::Result<export::ExportReport>) {
        let outcome = match result {
            Ok(report) => ExportState {
                message: format!(
                    "Exported {} charts ({} teams) to {}",
                    report.charts,
                    report.teams,
                    report.path.display()
                ),
                ok: true,
            },
            Err(err) => ExportState {
                message: format!("Export failed: {err:#}"),
                ok: false,
            },
        };
        let level = if outcome.ok { "[INFO]" } else { "[WARN]" };
        self.state.push_log(format!("{level} {}", outcome.message));
        self.state.export = Some(outcome);
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = DashConfig::from_env();

    let dashboard = Dashboard::with_default(
        config.build_source(),
        config.chart_options,
        config.default_league,
    );
    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(dashboard, tx, cmd_rx);

    let mut app = App::new(config, cmd_tx);
    let initial = app.state.refresh();
    app.send(initial);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, &app.state))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_header(frame, chunks[0], state);
    render_body(frame, chunks[1], state);
    render_console(frame, chunks[2], state);

    let footer = Paragraph::new(concat!(
        "←/→ League | 1-5 Jump | Enter Dropdown | r Refresh | ",
        "e Export xlsx | J Export json | ? Help | q Quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if state.dropdown.open {
        render_dropdown(frame, frame.size(), state);
    }
    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled(
        " LEAGUE DASH ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for (idx, league) in LEAGUE_OPTIONS.iter().enumerate() {
        let style = if *league == state.league {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} {} ", idx + 1, league.label()), style));
    }

    let status = match &state.status {
        LoadStatus::Idle => "idle".to_string(),
        LoadStatus::Loading { league, .. } => format!("loading {league}..."),
        LoadStatus::Ready => state
            .updated_at
            .map(|t| format!("updated {}", t.format("%H:%M:%S")))
            .unwrap_or_else(|| "ready".to_string()),
        LoadStatus::Failed(err) => format!("error: {}", err.kind()),
    };
    let mut status_spans = vec![
        Span::raw(" "),
        Span::styled(status, Style::default().fg(Color::DarkGray)),
    ];
    if let Some(export) = state.export.as_ref() {
        let color = if export.ok { Color::Green } else { Color::Red };
        status_spans.push(Span::raw("  "));
        status_spans.push(Span::styled(export.message.clone(), Style::default().fg(color)));
    }
    let status_line = Line::from(status_spans);

    let header = Paragraph::new(vec![Line::from(spans), status_line])
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(err) = state.error() {
        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                err.kind(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(err.to_string()),
            Line::from(""),
            Line::from("Press r to retry or pick another league."),
        ])
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("Error").borders(Borders::ALL));
        frame.render_widget(banner, area);
        return;
    }

    let Some(view) = state.view.as_ref() else {
        let msg = if state.is_loading() {
            "Loading standings..."
        } else {
            "No data yet"
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    let charts = &view.charts;
    if let Some(spec) = charts.get(ChartSlot::PointsGoalDiff) {
        render_scatter(frame, top[0], spec);
    }
    let slots = [
        (ChartSlot::TopScorers, top[1]),
        (ChartSlot::Offense, bottom[0]),
        (ChartSlot::Defense, bottom[1]),
        (ChartSlot::GoalDiff, bottom[2]),
    ];
    for (slot, rect) in slots {
        if let Some(spec) = charts.get(slot) {
            render_bar(frame, rect, spec);
        }
    }
}

fn render_scatter(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let points = plot_points(spec);
    let (x_bounds, y_bounds) = plot_bounds(&points);
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    let direction = spec.y_axis;
    let title = format!(
        "{}  x: {}  y: {}",
        spec.title,
        spec.axis_label(spec.x),
        spec.axis_label(spec.y)
    );

    let canvas = Canvas::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Cyan,
            });
            ctx.layer();
            for p in &points {
                ctx.print(
                    p.x,
                    p.y,
                    Span::styled(short_label(&p.label, 12), Style::default().fg(Color::White)),
                );
            }
            let top = axis_value(direction, y_bounds[1]).round();
            let bottom = axis_value(direction, y_bounds[0]).round();
            ctx.print(
                x_bounds[0],
                y_bounds[1],
                Span::styled(format!("{top}"), Style::default().fg(Color::DarkGray)),
            );
            ctx.print(
                x_bounds[0],
                y_bounds[0],
                Span::styled(format!("{bottom}"), Style::default().fg(Color::DarkGray)),
            );
        });
    frame.render_widget(canvas, area);
}

fn render_bar(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let rows = bar_rows(spec);
    let max = bar_max(&rows);
    let label_width = ((area.width as usize) / 3).clamp(6, 18);

    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            let color = if row.value < 0 {
                Color::Red
            } else {
                Color::Green
            };
            Bar::default()
                .value(row.value.unsigned_abs())
                .label(Line::from(short_label(&row.label, label_width)))
                .text_value(row.value.to_string())
                .style(Style::default().fg(color))
        })
        .collect();

    let y_label = spec.axis_label(spec.y);
    let title = if y_label.is_empty() || y_label == spec.y.key() {
        spec.title.clone()
    } else {
        format!("{} ({y_label})", spec.title)
    };

    let chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(max);
    frame.render_widget(chart, area);
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|msg| {
            let style = if msg.contains("[WARN]") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(msg.clone(), style))
        })
        .collect();
    let console =
        Paragraph::new(lines).block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, area);
}

fn render_dropdown(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(30, 40, area);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = LEAGUE_OPTIONS
        .iter()
        .enumerate()
        .map(|(idx, league)| {
            let marker = if *league == state.league { "*" } else { " " };
            let style = if idx == state.dropdown.highlighted {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{marker} {}", league.label()), style))
        })
        .collect();

    let dropdown = Paragraph::new(lines)
        .block(Block::default().title("League").borders(Borders::ALL));
    frame.render_widget(dropdown, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "League Dash - Help",
        "",
        "League:",
        "  ← / → or h / l   Previous / next league",
        "  1-5              Jump to league",
        "  Enter or /       Open dropdown (j/k, Enter, Esc)",
        "  r                Re-fetch current league",
        "",
        "Export:",
        "  e                Standings + chart data (.xlsx)",
        "  J                Chart specs (.json)",
        "",
        "  ?                Toggle help",
        "  q                Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
