//! Category tab bar

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::view::{CategoryTabView, Theme};

/// Renders the category filter row
pub struct TabsRenderer;

impl TabsRenderer {
    pub fn render(frame: &mut Frame, area: Rect, tabs: &[CategoryTabView<'_>], theme: &Theme) {
        let mut spans = Vec::new();

        for (idx, tab) in tabs.iter().enumerate() {
            // Active tab: accent background with bold text
            let style = if tab.active {
                Style::default()
                    .fg(theme.accent_fg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted).bg(theme.surface_bg)
            };
            spans.push(Span::styled(format!(" {} ", tab.label), style));

            if idx + 1 < tabs.len() {
                spans.push(Span::styled(" ", Style::default().bg(theme.bg)));
            }
        }

        let block = Block::default().style(Style::default().bg(theme.bg));
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
