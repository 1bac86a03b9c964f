//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

/// Fallback card fills, cycled by slot index when no texture is loaded.
const CARD_FILLS: [Color; 6] = [
    Color::Rgb(96, 76, 140),
    Color::Rgb(52, 101, 120),
    Color::Rgb(140, 92, 60),
    Color::Rgb(70, 110, 70),
    Color::Rgb(120, 64, 84),
    Color::Rgb(80, 84, 128),
];

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    pub fn card_fill(index: usize) -> Color {
        CARD_FILLS[index % CARD_FILLS.len()]
    }

    pub fn card_title_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn hovered_title_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Outline for a card whose texture is missing — the slot stays
    /// reserved even when the visual is skipped.
    pub fn missing_texture_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn detail_style() -> Style {
        Style::default().fg(Color::Gray)
    }
}
