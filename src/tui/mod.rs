/// Terminal front end.
///
/// Owns the terminal for the lifetime of the session: raw mode and the
/// alternate screen on entry, restored on exit (including the error
/// paths). The loop alternates between draining widget completions,
/// painting, and polling for input with a 100ms budget so background
/// fetches surface without a keypress.
pub mod app;
pub mod theme;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::widgets::{KeyResult, WidgetConfig, WidgetEvent, WidgetKind};
use app::AppState;

const POLL_INTERVAL_MS: u64 = 100;

pub async fn run(
    mut dashboard: Dashboard,
    mut events: mpsc::UnboundedReceiver<WidgetEvent>,
    config: Config,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut dashboard, &mut events, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    dashboard: &mut Dashboard,
    events: &mut mpsc::UnboundedReceiver<WidgetEvent>,
    config: &Config,
) -> io::Result<()> {
    let mut state = AppState::new();
    state.ensure_valid(dashboard);

    loop {
        while let Ok(event) = events.try_recv() {
            dashboard.deliver(event);
        }

        terminal.draw(|f| draw(f, dashboard, &state, config))?;

        if !event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // The focused widget gets first refusal; unclaimed keys fall
        // through to the dashboard bindings.
        if let Some(widget) = state.focused.and_then(|id| dashboard.widget_mut(id)) {
            if matches!(widget.handle_key(key), KeyResult::Handled) {
                continue;
            }
        }

        match key.code {
            KeyCode::Char('q') => {
                info!("quit requested");
                break;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                info!("quit requested");
                break;
            }
            KeyCode::Tab => state.focus_next(dashboard),
            KeyCode::BackTab => state.focus_prev(dashboard),
            KeyCode::Char('m') => {
                if let Some(widget) = state.focused.and_then(|id| dashboard.widget_mut(id)) {
                    widget.frame_mut().toggle_minimize();
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = state.focused {
                    dashboard.remove_widget(id);
                    state.ensure_valid(dashboard);
                }
            }
            KeyCode::F(n @ 1..=4) => {
                let kind = match n {
                    1 => WidgetKind::Todo,
                    2 => WidgetKind::Quote,
                    3 => WidgetKind::Weather,
                    _ => WidgetKind::News,
                };
                let id = dashboard.add_widget_kind(kind, WidgetConfig::default());
                state.focused = Some(id);
            }
            _ => {}
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, dashboard: &Dashboard, state: &AppState, config: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_title_bar(f, chunks[0]);
    dashboard.render(f, chunks[1], state.focused, &config.theme);
    draw_status_bar(f, chunks[2], dashboard, state);
}

fn draw_title_bar(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Dashboard ", theme::title_style()),
        Span::styled(
            "F1 todo  F2 quote  F3 weather  F4 news",
            theme::hint_style(),
        ),
    ]);
    f.render_widget(line, area);
}

fn draw_status_bar(f: &mut Frame, area: Rect, dashboard: &Dashboard, state: &AppState) {
    let focused_title = state
        .focused
        .and_then(|id| dashboard.widget(id))
        .map(|w| w.title().to_string())
        .unwrap_or_else(|| "none".to_string());
    let line = Line::from(vec![
        Span::styled(
            format!(" {} widgets | focus: {} ", dashboard.len(), focused_title),
            theme::status_normal_style(),
        ),
        Span::styled(
            "Tab focus | m minimize | x close | q quit",
            theme::hint_style(),
        ),
    ]);
    f.render_widget(line, area);
}
