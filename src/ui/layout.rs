//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the 3D scene, a one-line product detail strip,
/// and a bottom status bar.
pub struct AppLayout {
    pub scene_area: Rect,
    pub detail_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // ring scene (takes all remaining space)
                Constraint::Length(1), // hovered-product detail strip
                Constraint::Length(1), // status / hint bar
            ])
            .split(area);

        Self {
            scene_area: chunks[0],
            detail_area: chunks[1],
            status_area: chunks[2],
        }
    }
}
