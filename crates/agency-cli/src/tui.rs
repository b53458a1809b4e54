//! Interactive two-pane terminal browser.
//!
//! Left pane: niche menu and sort selector. Right pane: the selected niche's
//! agencies with inline detail. Cursor and focus live here; everything the
//! user actually changes goes through the [`Controller`].

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use agency_client::AgencyClient;
use agency_core::SortMode;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::controller::{Controller, LoadOutcome};
use crate::loader::{spawn_load, LoadResult};
use crate::view::{detail_lines, display_niche, View};

const MENU_WIDTH: u16 = 30;
const HELP: &str =
    "Tab: Switch pane | Up/Down: Move | Enter: Select | 1-3/s: Sort | m: Menu | q: Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    List,
}

/// Cursor and focus; purely navigational.
#[derive(Debug)]
pub struct TuiState {
    pub focus: Focus,
    pub menu_cursor: usize,
    pub list_cursor: usize,
    pub should_quit: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            focus: Focus::Menu,
            menu_cursor: 0,
            list_cursor: 0,
            should_quit: false,
        }
    }
}

/// Runs the browser until the user quits.
///
/// Blocks the calling thread on terminal input, so run it on the blocking
/// pool. It still needs a tokio runtime context to spawn the load task.
///
/// # Errors
///
/// Returns an error if the terminal cannot be put into or restored from raw
/// mode, or if drawing fails.
pub fn run(client: AgencyClient) -> anyhow::Result<()> {
    let mut controller = Controller::new();
    let (tx, mut rx) = mpsc::channel::<LoadResult>(1);
    let ticket = controller.begin_load();
    let _load = spawn_load(Arc::new(client), ticket, tx);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut controller, &mut rx);
    restore_terminal(&mut terminal)?;

    controller.cancel_pending();
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut Controller,
    rx: &mut mpsc::Receiver<LoadResult>,
) -> anyhow::Result<()> {
    let mut ui = TuiState::default();
    loop {
        terminal.draw(|f| render(f, &controller.view(), &ui))?;

        while let Ok((ticket, result)) = rx.try_recv() {
            if let LoadOutcome::Applied { count } = controller.apply_load(ticket, result) {
                tracing::debug!(count, "agency list ready");
                ui.menu_cursor = 0;
                ui.list_cursor = 0;
            }
        }

        if ui.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, controller, &mut ui);
                }
            }
        }
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Applies one key press.
pub fn handle_key(key: KeyEvent, controller: &mut Controller, ui: &mut TuiState) {
    let (niche_count, agency_count) = {
        let view = controller.view();
        (view.niches.len(), view.agencies.len())
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => ui.should_quit = true,
        KeyCode::Tab => {
            ui.focus = match ui.focus {
                Focus::Menu => Focus::List,
                Focus::List if controller.state().menu_visible => Focus::Menu,
                Focus::List => Focus::List,
            };
        }
        KeyCode::Char('m') => {
            controller.open_menu();
            ui.focus = Focus::Menu;
        }
        KeyCode::Char('s') => {
            let next = controller.state().sort_mode.next();
            controller.set_sort_mode(next);
        }
        KeyCode::Char('1') => controller.set_sort_mode(SortMode::Pricing),
        KeyCode::Char('2') => controller.set_sort_mode(SortMode::Review),
        KeyCode::Char('3') => controller.set_sort_mode(SortMode::Latest),
        KeyCode::Up => match ui.focus {
            Focus::Menu => ui.menu_cursor = ui.menu_cursor.saturating_sub(1),
            Focus::List => ui.list_cursor = ui.list_cursor.saturating_sub(1),
        },
        KeyCode::Down => match ui.focus {
            Focus::Menu => ui.menu_cursor = step_down(ui.menu_cursor, niche_count),
            Focus::List => ui.list_cursor = step_down(ui.list_cursor, agency_count),
        },
        KeyCode::Enter => match ui.focus {
            Focus::Menu => {
                let niche = controller
                    .view()
                    .niches
                    .get(ui.menu_cursor)
                    .map(|n| n.name.to_owned());
                if let Some(niche) = niche {
                    if controller.pick_niche(&niche) {
                        ui.focus = Focus::List;
                        ui.list_cursor = 0;
                    }
                }
            }
            Focus::List => {
                let key = controller.view().agencies.get(ui.list_cursor).map(|a| a.key);
                if let Some(key) = key {
                    controller.toggle_agency(key);
                }
            }
        },
        _ => {}
    }
}

fn step_down(cursor: usize, len: usize) -> usize {
    if cursor + 1 < len {
        cursor + 1
    } else {
        cursor
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(f: &mut Frame, view: &View<'_>, ui: &TuiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    if view.menu_visible {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(20)])
            .split(rows[0]);
        render_menu(f, panes[0], view, ui);
        render_agencies(f, panes[1], view, ui);
    } else {
        render_agencies(f, rows[0], view, ui);
    }

    let help = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, rows[1]);
}

fn render_menu(f: &mut Frame, area: Rect, view: &View<'_>, ui: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(area);

    let focused = ui.focus == Focus::Menu;
    let lines: Vec<Line> = view
        .niches
        .iter()
        .enumerate()
        .map(|(i, niche)| {
            let mut style = Style::default();
            if niche.active {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if focused && i == ui.menu_cursor {
                style = style.bg(Color::DarkGray);
            }
            Line::from(Span::styled(
                format!("{} ({})", display_niche(niche.name), niche.count),
                style,
            ))
        })
        .collect();

    let menu = Paragraph::new(lines).block(pane_block(" Niche Menu ", focused));
    f.render_widget(menu, chunks[0]);

    let options: Vec<Line> = SortMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            let selected = *mode == view.sort_mode;
            let marker = if selected { "(*)" } else { "( )" };
            let style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("{} {marker} {}", i + 1, mode.label()),
                style,
            ))
        })
        .collect();
    let sort = Paragraph::new(options).block(pane_block(" Sort by ", false));
    f.render_widget(sort, chunks[1]);
}

fn render_agencies(f: &mut Frame, area: Rect, view: &View<'_>, ui: &TuiState) {
    let focused = ui.focus == Focus::List || !view.menu_visible;
    let block = pane_block(" Agencies by Niche ", focused);

    if view.loading {
        let loading = Paragraph::new("Loading\u{2026}")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0usize;
    if let Some(niche) = view.selected_niche {
        lines.push(Line::from(Span::styled(
            display_niche(niche).to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }

    for (i, item) in view.agencies.iter().enumerate() {
        let selected = focused && i == ui.list_cursor;
        if selected {
            cursor_line = lines.len();
        }
        let name_style = if selected {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let marker = if item.expanded { "\u{25be} " } else { "\u{25b8} " };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(item.record.name.clone(), name_style),
            Span::styled(
                format!(" \u{2b50}{}", item.record.reviews),
                Style::default().fg(Color::Yellow),
            ),
        ]));
        if item.expanded {
            for detail in detail_lines(item.record) {
                lines.push(Line::from(Span::styled(
                    format!("    {detail}"),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
    }

    let visible = usize::from(area.height.saturating_sub(2));
    let scroll = cursor_line.saturating_sub(visible.saturating_sub(1));
    let list = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(list, area);
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}

#[cfg(test)]
#[path = "tui_test.rs"]
mod tests;
