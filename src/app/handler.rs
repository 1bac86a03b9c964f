//! Input handling — maps key and mouse events onto the ring controller.
//!
//! The terminal has no native hover, so pointer-motion events are
//! hit-tested against last frame's card rectangles and synthesised into
//! hover-enter/leave transitions.  Click resolution happens on button
//! release: the press and the release must land on the same card, and the
//! controller's drag-slop gate has the final say.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::app::state::AppState;

/// Horizontal pixels one terminal column stands for when feeding drag
/// distances to the controller.  A text cell is far coarser than a mouse
/// pixel; without this factor a full-width drag would barely move the
/// ring.
const CELL_PX: f32 = 8.0;

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
        }
        // Arrow keys behave like wheel notches.
        KeyCode::Left | KeyCode::Char('h') => state.ring.on_wheel(-1.0),
        KeyCode::Right | KeyCode::Char('l') => state.ring.on_wheel(1.0),
        KeyCode::Enter => {
            // Keyboard-only flows have no hover; fall back to whichever
            // card faces the camera.
            if let Some(item) = state.hover.hovered().or_else(|| state.front_item()) {
                state.confirm_click(item);
            }
        }
        _ => {}
    }
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let pos = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.pressed_item = state.item_at(pos);
            state.ring.on_drag_start(mouse.column as f32 * CELL_PX);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            state.ring.on_drag_move(mouse.column as f32 * CELL_PX);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.ring.on_drag_end();
            // A click needs press and release on the same card; the
            // accumulated drag distance then decides click vs. drag.
            if let (Some(pressed), Some(released)) = (state.pressed_item.take(), state.item_at(pos))
            {
                if pressed == released {
                    state.confirm_click(released);
                }
            }
        }
        MouseEventKind::ScrollDown => state.ring.on_wheel(1.0),
        MouseEventKind::ScrollUp => state.ring.on_wheel(-1.0),
        MouseEventKind::Moved => {
            let item = state.item_at(pos);
            state.update_hover(item);
        }
        _ => {}
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::catalog::Catalog;
    use crate::core::viewport::Camera;
    use crate::ui::scene::HitZone;
    use ratatui::layout::Rect;

    fn state_with_zone() -> AppState {
        let mut state = AppState::new(
            Catalog::demo(),
            AppConfig::default(),
            Camera::Perspective {
                fov_deg: 55.0,
                focal_distance: 6.0,
            },
        );
        state.hit_zones = vec![HitZone {
            item: 3,
            rect: Rect::new(10, 5, 20, 8),
        }];
        state
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut state = state_with_zone();
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(state.should_quit);

        let mut state = state_with_zone();
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn pointer_motion_synthesises_hover_transitions() {
        let mut state = state_with_zone();
        handle_mouse(&mut state, mouse(MouseEventKind::Moved, 15, 7));
        assert_eq!(state.hover.hovered(), Some(3));
        assert_eq!(state.ring.locked_item(), Some(3));

        handle_mouse(&mut state, mouse(MouseEventKind::Moved, 0, 0));
        assert_eq!(state.hover.hovered(), None);
    }

    #[test]
    fn press_release_on_the_same_card_is_a_click() {
        let mut state = state_with_zone();
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), 15, 7),
        );
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Up(MouseButton::Left), 15, 7),
        );
        assert_eq!(state.nav_url.as_deref(), Some("/products/4"));
        assert!(state.should_quit);
    }

    #[test]
    fn a_long_drag_releases_without_clicking() {
        let mut state = state_with_zone();
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), 15, 7),
        );
        // 4 columns at 8 px each — well past the 5 px slop.
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Drag(MouseButton::Left), 19, 7),
        );
        let moved = state.ring.angle;
        assert!(moved > 0.0);
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Up(MouseButton::Left), 19, 7),
        );
        assert!(state.nav_url.is_none());
        assert!(!state.should_quit);
    }

    #[test]
    fn scroll_feeds_wheel_impulses() {
        let mut state = state_with_zone();
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 0, 0));
        assert!(state.ring.angular_velocity > 0.0);
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollUp, 0, 0));
        assert_eq!(state.ring.angular_velocity, 0.0);
    }
}
