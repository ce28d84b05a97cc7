//! Terminal color theme.

use ratatui::style::Color;

/// Colors used by the terminal renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub surface_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,
    pub accent: Color,
    pub accent_fg: Color,
    pub success: Color,
    pub error: Color,
    pub code_fg: Color,
    pub mark_bg: Color,
    pub selection_bg: Color,
}

impl Theme {
    /// Dark surface with a gold accent.
    pub const fn gold() -> Self {
        Self {
            bg: Color::Rgb(0x11, 0x11, 0x11),
            surface_bg: Color::Rgb(0x1a, 0x1a, 0x1a),
            border: Color::Rgb(0x2a, 0x2a, 0x2a),
            border_focused: Color::Rgb(0xd4, 0xaf, 0x37),
            text: Color::Rgb(0xf5, 0xf5, 0xf0),
            text_muted: Color::Rgb(0xb4, 0xb4, 0xb4),
            text_dim: Color::Rgb(0x8a, 0x8a, 0x8a),
            accent: Color::Rgb(0xd4, 0xaf, 0x37),
            accent_fg: Color::Rgb(0x11, 0x11, 0x11),
            success: Color::Rgb(0x4c, 0xaf, 0x50),
            error: Color::Rgb(0xef, 0x53, 0x50),
            code_fg: Color::Rgb(0xe8, 0xe6, 0xe1),
            mark_bg: Color::Rgb(0x5c, 0x4f, 0x12),
            selection_bg: Color::Rgb(0x26, 0x22, 0x14),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gold()
    }
}
