use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use crate::context::AppContext;
use crate::history::AnalysisRecord;
use crate::tier::Tier;

/// Analyses loaded into the dashboard table.
const DASHBOARD_LIMIT: usize = 100;
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn tier_style(tier: Tier) -> Style {
    let color = match tier {
        Tier::Low => Color::Red,
        Tier::Medium => Color::Yellow,
        Tier::High => Color::Green,
    };
    Style::default().fg(color)
}

/// Next selected row when moving down, wrapping to the top.
fn select_next(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match selected {
        Some(i) if i + 1 < len => Some(i + 1),
        _ => Some(0),
    }
}

/// Previous selected row when moving up, wrapping to the bottom.
fn select_previous(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match selected {
        Some(i) if i > 0 && i < len => Some(i - 1),
        _ => Some(len - 1),
    }
}

pub fn run_dashboard(ctx: &AppContext) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = event_loop(&mut terminal, ctx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    outcome
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, ctx: &AppContext) -> anyhow::Result<()> {
    let mut table_state = TableState::default();
    table_state.select(Some(0));

    loop {
        let records = ctx.history(DASHBOARD_LIMIT).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load history");
            Vec::new()
        });
        let title = match ctx.session.user_id() {
            Some(user) => format!("Resume analyses for {user}"),
            None => "Resume analyses (not signed in)".to_string(),
        };
        terminal.draw(|f| ui(f, &title, &records, &mut table_state))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Down => {
                        table_state.select(select_next(table_state.selected(), records.len()))
                    }
                    KeyCode::Up => {
                        table_state.select(select_previous(table_state.selected(), records.len()))
                    }
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, title: &str, records: &[AnalysisRecord], table_state: &mut TableState) {
    let rects = Layout::default()
        .constraints([Constraint::Percentage(100)].as_ref())
        .margin(1)
        .split(f.size());

    let selected_style = Style::default().add_modifier(Modifier::REVERSED).fg(Color::Yellow);
    let normal_style = Style::default().fg(Color::White);
    let header_cells = [
        "Date", "Resume", "Job", "Score", "Keywords", "Skills", "Experience", "Density",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells)
        .style(normal_style)
        .height(1)
        .bottom_margin(1);

    let rows = records.iter().map(|item| {
        let r = &item.result;
        let metric = |score: u8| Cell::from(format!("{score}%")).style(tier_style(Tier::of(score)));
        let cells = vec![
            Cell::from(item.created_at.format("%Y-%m-%d %H:%M").to_string()),
            Cell::from(item.resume_name.clone()),
            Cell::from(item.job_title.clone()),
            metric(r.score),
            metric(r.keyword_score),
            metric(r.skill_score),
            metric(r.experience_score),
            metric(r.density_score),
        ];
        Row::new(cells).style(normal_style)
    });

    let col_widths = vec![
        Constraint::Min(17), // Date
        Constraint::Min(20), // Resume
        Constraint::Min(20), // Job
        Constraint::Min(6),  // Score
        Constraint::Min(9),  // Keywords
        Constraint::Min(7),  // Skills
        Constraint::Min(11), // Experience
        Constraint::Min(8),  // Density
    ];

    let table = Table::new(rows, col_widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .highlight_style(selected_style)
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, rects[0], table_state);
}
