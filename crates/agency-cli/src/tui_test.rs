use agency_core::{AgencyRecord, RecordKey};
use crossterm::event::KeyEvent;

use super::*;

fn agency(id: i64, niche: &str, pricing: &str) -> AgencyRecord {
    AgencyRecord {
        id,
        name: format!("Agency {id}"),
        niche: niche.to_string(),
        pricing: pricing.to_string(),
        ..AgencyRecord::default()
    }
}

fn loaded() -> Controller {
    let mut controller = Controller::new();
    let ticket = controller.begin_load();
    controller.apply_load(
        ticket,
        Ok(vec![
            agency(1, "SEO", "$200"),
            agency(2, "SEO", "$100"),
            agency(3, "PPC", "$50"),
        ]),
    );
    controller
}

fn press(controller: &mut Controller, ui: &mut TuiState, code: KeyCode) {
    handle_key(KeyEvent::from(code), controller, ui);
}

#[test]
fn enter_on_menu_picks_niche_and_focuses_list() {
    let mut controller = loaded();
    let mut ui = TuiState::default();

    press(&mut controller, &mut ui, KeyCode::Down);
    press(&mut controller, &mut ui, KeyCode::Enter);

    assert_eq!(controller.state().selected_niche.as_deref(), Some("PPC"));
    assert!(!controller.state().menu_visible);
    assert_eq!(ui.focus, Focus::List);
    assert_eq!(ui.list_cursor, 0);
}

#[test]
fn enter_on_list_toggles_expansion() {
    let mut controller = loaded();
    let mut ui = TuiState {
        focus: Focus::List,
        ..TuiState::default()
    };

    // First listed SEO agency under pricing order is id 2, fetched second.
    press(&mut controller, &mut ui, KeyCode::Enter);
    assert_eq!(controller.state().expanded, Some(RecordKey(1)));

    press(&mut controller, &mut ui, KeyCode::Enter);
    assert!(controller.state().expanded.is_none());
}

#[test]
fn cursor_stays_within_bounds() {
    let mut controller = loaded();
    let mut ui = TuiState::default();

    for _ in 0..5 {
        press(&mut controller, &mut ui, KeyCode::Down);
    }
    assert_eq!(ui.menu_cursor, 1);

    for _ in 0..5 {
        press(&mut controller, &mut ui, KeyCode::Up);
    }
    assert_eq!(ui.menu_cursor, 0);
}

#[test]
fn sort_keys_change_mode() {
    let mut controller = loaded();
    let mut ui = TuiState::default();

    press(&mut controller, &mut ui, KeyCode::Char('3'));
    assert_eq!(controller.state().sort_mode, SortMode::Latest);

    press(&mut controller, &mut ui, KeyCode::Char('s'));
    assert_eq!(controller.state().sort_mode, SortMode::Pricing);

    press(&mut controller, &mut ui, KeyCode::Char('2'));
    assert_eq!(controller.state().sort_mode, SortMode::Review);
}

#[test]
fn tab_does_not_focus_hidden_menu() {
    let mut controller = loaded();
    let mut ui = TuiState::default();

    press(&mut controller, &mut ui, KeyCode::Enter);
    assert_eq!(ui.focus, Focus::List);

    press(&mut controller, &mut ui, KeyCode::Tab);
    assert_eq!(ui.focus, Focus::List);

    press(&mut controller, &mut ui, KeyCode::Char('m'));
    assert!(controller.state().menu_visible);
    assert_eq!(ui.focus, Focus::Menu);
}

#[test]
fn quit_keys_set_flag() {
    let mut controller = loaded();
    let mut ui = TuiState::default();
    press(&mut controller, &mut ui, KeyCode::Char('q'));
    assert!(ui.should_quit);

    let mut ui = TuiState::default();
    press(&mut controller, &mut ui, KeyCode::Esc);
    assert!(ui.should_quit);
}

#[test]
fn keys_before_load_are_harmless() {
    let mut controller = Controller::new();
    let _ = controller.begin_load();
    let mut ui = TuiState::default();

    press(&mut controller, &mut ui, KeyCode::Enter);
    press(&mut controller, &mut ui, KeyCode::Down);

    assert!(controller.state().selected_niche.is_none());
    assert_eq!(ui.menu_cursor, 0);
}

#[test]
fn render_draws_both_panes() {
    use ratatui::backend::TestBackend;

    let controller = loaded();
    let ui = TuiState::default();
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("test terminal");
    terminal
        .draw(|f| render(f, &controller.view(), &ui))
        .expect("draw should succeed");

    let buffer = terminal.backend().buffer();
    let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("Niche Menu"));
    assert!(text.contains("Agencies by Niche"));
    assert!(text.contains("Agency 2"));
    assert!(text.contains("Pricing"));
}
