//! Ember & Parchment color theme for the charforge TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Old gold: active tab, focused borders.
pub const PRIMARY: Color = Color::Rgb(0xD4, 0xA8, 0x49);
/// Pale gold: secondary headings, list bullets.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xE8, 0xC9, 0x7A);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Ember: titles, calls to action.
pub const ACCENT: Color = Color::Rgb(0xE0, 0x6C, 0x3C);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Ink: base background.
pub const BG_BASE: Color = Color::Rgb(0x1B, 0x1A, 0x1F);
/// Slate: inline code, elevated panels.
pub const BG_SURFACE: Color = Color::Rgb(0x2A, 0x28, 0x30);
/// Code block background.
pub const BG_CODE: Color = Color::Rgb(0x24, 0x22, 0x2A);
/// Dark red wash behind the raw-text fallback.
pub const BG_RAW: Color = Color::Rgb(0x3A, 0x1F, 0x1F);

// ── Text ────────────────────────────────────────────────────────────────────

/// Parchment: primary text.
pub const TEXT: Color = Color::Rgb(0xE8, 0xE2, 0xD4);
/// Muted text: secondary labels.
pub const TEXT_MUTED: Color = Color::Rgb(0xA0, 0x98, 0x8A);
/// Dim text: faint hints, rules.
pub const TEXT_DIM: Color = Color::Rgb(0x5E, 0x59, 0x66);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xE5, 0x53, 0x4B);
pub const SUCCESS: Color = Color::Rgb(0x7F, 0xB0, 0x69);
pub const WARNING: Color = Color::Rgb(0xE6, 0x9F, 0x2E);
pub const INFO: Color = Color::Rgb(0x6C, 0xA6, 0xD9);

// ── Domain ──────────────────────────────────────────────────────────────────

/// Lawful / Good side of an axis.
pub const LAWFUL: Color = Color::Rgb(0x8F, 0xB8, 0xDE);
/// Chaotic / Evil side of an axis.
pub const CHAOTIC: Color = Color::Rgb(0xD9, 0x7A, 0x9C);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Busy indicator badge.
pub fn busy_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Raw-text fallback body.
pub fn raw_fallback() -> Style {
    Style::default().fg(TEXT).bg(BG_RAW)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block in the error color, for the raw fallback view.
pub fn block_error(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ERROR))
}
