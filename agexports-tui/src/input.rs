//! Input dispatch: overlays → global keys → focused-pane handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{AppState, Focus, Overlay};
use crate::tile_grid::{self, Direction};
use crate::ui::map_panel;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.set_focus(app.focus.prev());
            } else {
                app.set_focus(app.focus.next());
            }
            return;
        }
        KeyCode::BackTab => {
            app.set_focus(app.focus.prev());
            return;
        }
        KeyCode::Char('[') => {
            app.cycle_category(-1);
            return;
        }
        KeyCode::Char(']') => {
            app.cycle_category(1);
            return;
        }
        KeyCode::Char('x') => {
            app.clear_selection();
            return;
        }
        _ => {}
    }

    // 3. Focused pane.
    match app.focus {
        Focus::Categories => handle_categories_key(app, key),
        Focus::Map => handle_map_key(app, key),
        Focus::Breakdown => handle_breakdown_key(app, key),
    }
}

fn handle_categories_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.cycle_category(-1),
        KeyCode::Right | KeyCode::Char('l') => app.cycle_category(1),
        KeyCode::Enter | KeyCode::Down | KeyCode::Char('j') => app.set_focus(Focus::Map),
        _ => {}
    }
}

fn handle_map_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_map_cursor(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => app.move_map_cursor(Direction::Right),
        KeyCode::Up | KeyCode::Char('k') => app.move_map_cursor(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_map_cursor(Direction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_at_cursor(),
        _ => {}
    }
}

fn handle_breakdown_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_panel(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_panel(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_sector(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_sector(1),
        KeyCode::Esc => app.set_focus(Focus::Map),
        _ => {}
    }
}

/// Handle a mouse event. Left clicks on the map select or deselect states.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.overlay == Overlay::Welcome {
        app.overlay = Overlay::None;
        return;
    }
    if app.overlay != Overlay::None {
        return;
    }

    let area = app.map_area.get();
    let Some((col, row)) = map_panel::tile_at(area, mouse.column, mouse.row) else {
        return;
    };
    app.set_focus(Focus::Map);
    match tile_grid::code_at(col, row) {
        Some(code) => {
            app.map_cursor = code;
            app.click(Some(code));
        }
        // inside the map, between tiles
        None => app.click(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agexports_core::{DashboardContext, Session};
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    const CSV: &str = "\
code,state,category,total exports,corn,beef
CA,California,state,100,10,20
TX,Texas,state,80,30,0
";

    fn app() -> AppState {
        let ctx = DashboardContext::from_csv_str(CSV).unwrap().shared();
        let session = Session::new(&ctx);
        let mut app = AppState::new(ctx, session, "test");
        app.overlay = Overlay::None;
        app
    }

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click_at(app: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    #[test]
    fn welcome_closes_on_any_key() {
        let mut app = app();
        app.overlay = Overlay::Welcome;
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn release_events_ignored() {
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        handle_key(&mut app, key);
        assert!(app.running);
    }

    #[test]
    fn quit_and_help() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn map_cursor_toggles_states() {
        let mut app = app();
        app.map_cursor = "OR";
        press(&mut app, KeyCode::Down);
        assert_eq!(app.map_cursor, "CA");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.selection().codes(), ["CA"]);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.session.selection().is_empty());
    }

    #[test]
    fn brackets_cycle_category_from_any_pane() {
        let mut app = app();
        app.focus = Focus::Breakdown;
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.session.category(), Some("beef"));
        app.focus = Focus::Categories;
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.session.category(), Some("corn"));
    }

    #[test]
    fn breakdown_keys_hover_sectors() {
        let mut app = app();
        app.click(Some("CA"));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Breakdown);
        assert_eq!(app.view.panels[0].sector("beef").map(|s| s.highlighted), Some(true));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.view.panels[0].sector("corn").map(|s| s.highlighted), Some(true));
        assert_eq!(app.view.panels[0].sector("beef").map(|s| s.highlighted), Some(false));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Map);
        assert!(app.view.panels[0].sectors.iter().all(|s| !s.highlighted));
    }

    #[test]
    fn mouse_clicks_hit_tiles() {
        let mut app = app();
        // 12x8 tiles of 4x2 cells
        app.map_area.set(Rect::new(0, 0, 48, 16));
        // CA sits at tile (1, 4)
        click_at(&mut app, 5, 9);
        assert_eq!(app.session.selection().codes(), ["CA"]);
        assert_eq!(app.map_cursor, "CA");
        // empty tile (0, 3)
        click_at(&mut app, 1, 7);
        assert_eq!(app.session.selection().codes(), ["CA"]);
        // outside the map
        click_at(&mut app, 100, 100);
        click_at(&mut app, 5, 9);
        assert!(app.session.selection().is_empty());
    }

    #[test]
    fn clicks_below_a_short_map_are_ignored() {
        let mut app = app();
        // 1x1 tiles; rows 5..8 are clipped off
        app.map_area.set(Rect::new(0, 0, 10, 5));
        // where TX (4, 7) would sit on an unclipped grid
        click_at(&mut app, 4, 7);
        click_at(&mut app, 11, 0);
        assert!(app.session.selection().is_empty());
        // CA (1, 4) is still on screen
        click_at(&mut app, 1, 4);
        assert_eq!(app.session.selection().codes(), ["CA"]);
    }
}
