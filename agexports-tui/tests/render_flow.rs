//! Drive the TUI with keys and mouse clicks, render into a test backend and
//! check what lands on screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use agexports_core::{DashboardContext, Session};
use agexports_tui::app::{AppState, Focus, Overlay};
use agexports_tui::{input, tile_grid, ui};

const SAMPLE: &str = include_str!("../../agexports-core/tests/fixtures/us_ag_exports_sample.csv");

fn app() -> AppState {
    let ctx = DashboardContext::from_csv_str(SAMPLE).unwrap().shared();
    let session = Session::new(&ctx);
    AppState::new(ctx, session, "fixture")
}

fn press(app: &mut AppState, code: KeyCode) {
    input::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn screen(terminal: &mut Terminal<TestBackend>, app: &AppState) -> String {
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn welcome_then_dashboard() {
    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    let mut app = app();

    let first = screen(&mut terminal, &app);
    assert!(first.contains("US Agricultural Exports (2011)"));
    assert!(first.contains("10 states"));

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.overlay, Overlay::None);
    let dashboard = screen(&mut terminal, &app);
    assert!(dashboard.contains("Exports across country: total exports"));
    assert!(dashboard.contains("Breakdown (0 selected)"));
    assert!(dashboard.contains("Click a state on the map"));
}

#[test]
fn selecting_states_renders_panels() {
    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    let mut app = app();
    app.overlay = Overlay::None;

    app.map_cursor = "CA";
    press(&mut app, KeyCode::Enter);
    app.map_cursor = "TX";
    press(&mut app, KeyCode::Char(' '));

    let text = screen(&mut terminal, &app);
    assert!(text.contains("Breakdown (2 selected)"));
    assert!(text.contains("Exports breakdown for: CA"));
    assert!(text.contains("Exports breakdown for: TX"));
    assert!(text.contains("[CA]"));
    assert!(text.contains("[TX]"));

    // map click on the CA tile deselects it
    let area = app.map_area.get();
    let (col, row) = tile_grid::position("CA").unwrap();
    let (tw, th) = agexports_tui::ui::map_panel::tile_size(area);
    input::handle_mouse(
        &mut app,
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + col * tw,
            row: area.y + row * th,
            modifiers: KeyModifiers::NONE,
        },
    );
    assert_eq!(app.session.selection().codes(), ["TX"]);
    let text = screen(&mut terminal, &app);
    assert!(!text.contains("Exports breakdown for: CA"));
}

#[test]
fn category_cycle_updates_map_title() {
    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    let mut app = app();
    app.overlay = Overlay::None;

    press(&mut app, KeyCode::Char(']'));
    press(&mut app, KeyCode::Char(']'));
    assert_eq!(app.session.category(), Some("corn"));
    let text = screen(&mut terminal, &app);
    assert!(text.contains("Exports across country: corn"));
}

#[test]
fn breakdown_hover_marks_legend() {
    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    let mut app = app();
    app.overlay = Overlay::None;
    app.map_cursor = "CA";
    press(&mut app, KeyCode::Enter);
    app.set_focus(Focus::Breakdown);

    let hovered = app.cursor_sector().map(|(_, c)| c.to_string()).unwrap();
    let text = screen(&mut terminal, &app);
    assert!(text.contains(&format!("▶██ {hovered}")));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
    let mut app = app();
    screen(&mut terminal, &app);
    app.overlay = Overlay::Help;
    screen(&mut terminal, &app);
    app.overlay = Overlay::None;
    app.click(Some("CA"));
    screen(&mut terminal, &app);
}
