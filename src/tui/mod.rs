//! Terminal rendering of a [`PageView`].
//!
//! Layout, top to bottom: search box, category tabs, card list beside the
//! detail pane (or the empty state), status line. Toasts are drawn last, over
//! the top-right corner.

mod tabs;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::model::Priority;
use crate::toast::ToastKind;
use crate::view::markdown_text::markdown_to_text;
use crate::view::model::PREVIEW_LABEL;
use crate::view::{CardView, EmptyStateView, GridView, PageView, SearchView, Theme, ToastView};

pub use tabs::TabsRenderer;

const HELP_TEXT: &str =
    "Ctrl+K search  Tab category  ↑↓ select  PgUp/PgDn scroll  Enter copy  q/Ctrl+Q quit";
const TOAST_MAX_WIDTH: u16 = 48;

/// Draw the whole page into `frame`.
pub fn draw(frame: &mut Frame, page: &PageView<'_>, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

    let [search_area, tabs_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_search(frame, search_area, &page.search, theme);
    TabsRenderer::render(frame, tabs_area, &page.tabs, theme);

    match &page.grid {
        GridView::Empty(empty) => draw_empty(frame, body_area, empty, theme),
        GridView::Cards(cards) => {
            let [list_area, detail_area] =
                Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .areas(body_area);
            draw_list(frame, list_area, cards, theme);
            if let Some(card) = cards.iter().find(|c| c.selected).or(cards.first()) {
                draw_detail(frame, detail_area, card, page.detail_scroll, theme);
            }
        }
    }

    draw_status(frame, status_area, page, theme);
    draw_toasts(frame, area, &page.toasts, theme);
}

fn draw_search(frame: &mut Frame, area: Rect, search: &SearchView<'_>, theme: &Theme) {
    let border = if search.focused {
        theme.border_focused
    } else {
        theme.border
    };
    let block = Block::bordered()
        .title(" Search ")
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.surface_bg));

    let line = if search.text.is_empty() {
        Line::styled(search.placeholder, Style::default().fg(theme.text_dim))
    } else if search.selected {
        Line::styled(
            search.text,
            Style::default().fg(theme.text).bg(theme.selection_bg),
        )
    } else {
        Line::styled(search.text, Style::default().fg(theme.text))
    };
    frame.render_widget(Paragraph::new(line).block(block), area);

    if search.focused {
        let offset = u16::try_from(search.text.width()).unwrap_or(u16::MAX);
        let max_x = area.right().saturating_sub(2);
        let x = area.x.saturating_add(1).saturating_add(offset).min(max_x);
        frame.set_cursor_position((x, area.y.saturating_add(1)));
    }
}

fn priority_color(priority: Priority, theme: &Theme) -> ratatui::style::Color {
    match priority {
        Priority::High => theme.error,
        Priority::Medium => theme.accent,
        Priority::Low => theme.text_dim,
    }
}

fn draw_list(frame: &mut Frame, area: Rect, cards: &[CardView<'_>], theme: &Theme) {
    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| {
            let button_style = if card.copy.copied {
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_dim)
            };
            let title = Line::from(vec![
                Span::styled("● ", Style::default().fg(priority_color(card.priority, theme))),
                Span::styled(
                    card.title,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(format!("[{}]", card.copy.label), button_style),
            ]);
            let description = Line::styled(
                format!("  {}", card.description),
                Style::default().fg(theme.text_muted),
            );
            ListItem::new(Text::from(vec![title, description]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::bordered()
                .title(format!(" Snippets ({}) ", cards.len()))
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(Style::default().bg(theme.selection_bg));

    let mut state = ListState::default();
    state.select(cards.iter().position(|c| c.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Detail pane body for `card`: description, meta line, raw markdown, then
/// the rendered preview.
pub fn detail_text(card: &CardView<'_>, theme: &Theme) -> Text<'static> {
    let mut lines = vec![
        Line::styled(card.description.to_string(), Style::default().fg(theme.text_muted)),
        Line::from(vec![
            Span::styled(card.category_name.to_string(), Style::default().fg(theme.accent)),
            Span::styled(" · ", Style::default().fg(theme.text_dim)),
            Span::styled(
                card.priority.as_str(),
                Style::default().fg(priority_color(card.priority, theme)),
            ),
        ]),
        Line::default(),
    ];
    let code = Style::default().fg(theme.code_fg).bg(theme.surface_bg);
    lines.extend(card.markdown.lines().map(|l| Line::styled(l.to_string(), code)));
    lines.push(Line::default());
    lines.push(Line::styled(
        PREVIEW_LABEL,
        Style::default().fg(theme.text_dim).add_modifier(Modifier::BOLD),
    ));
    lines.extend(markdown_to_text(card.markdown, theme).lines);
    Text::from(lines)
}

/// Rows `text` takes when wrapped to `width` columns. Word wrapping can only
/// add rows, so this is a lower bound.
fn wrapped_rows(text: &Text<'_>, width: u16) -> usize {
    let width = usize::from(width.max(1));
    text.lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

fn draw_detail(frame: &mut Frame, area: Rect, card: &CardView<'_>, scroll: u16, theme: &Theme) {
    let text = detail_text(card, theme);
    // Stop once the last row reaches the bottom border
    let inner = Rect::new(0, 0, area.width.saturating_sub(2), area.height.saturating_sub(2));
    let max_scroll = wrapped_rows(&text, inner.width).saturating_sub(usize::from(inner.height));
    let scroll = scroll.min(u16::try_from(max_scroll).unwrap_or(u16::MAX));

    let button = if card.copy.copied {
        Style::default().fg(theme.success)
    } else {
        Style::default().fg(theme.text_dim)
    };
    let block = Block::bordered()
        .title(format!(" {} ", card.title))
        .title_bottom(Line::styled(format!(" [{}] ", card.copy.label), button).right_aligned())
        .border_style(Style::default().fg(theme.border_focused));
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );
}

fn draw_empty(frame: &mut Frame, area: Rect, empty: &EmptyStateView, theme: &Theme) {
    let text = Text::from(vec![
        Line::default(),
        Line::styled(
            empty.title,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )
        .centered(),
        Line::styled(empty.hint, Style::default().fg(theme.text_dim)).centered(),
    ]);
    let block = Block::bordered().border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_status(frame: &mut Frame, area: Rect, page: &PageView<'_>, theme: &Theme) {
    let shown = page.grid.cards().len();
    let line = Line::from(vec![
        Span::styled(
            format!(" {shown}/{} ", page.total),
            Style::default().fg(theme.accent_fg).bg(theme.accent),
        ),
        Span::styled(format!(" {HELP_TEXT}"), Style::default().fg(theme.text_dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_toasts(frame: &mut Frame, area: Rect, toasts: &[ToastView<'_>], theme: &Theme) {
    let mut y = area.y + 1;
    for toast in toasts {
        let width = (toast.message.width() as u16 + 6)
            .min(TOAST_MAX_WIDTH)
            .min(area.width);
        if y + 3 > area.bottom() {
            break;
        }
        let rect = Rect::new(area.right() - width, y, width, 3);
        let color = match toast.kind {
            ToastKind::Success => theme.success,
            ToastKind::Error => theme.error,
        };
        let mut border = Style::default().fg(color);
        if toast.leaving {
            border = border.add_modifier(Modifier::DIM);
        }
        let line = Line::from(vec![
            Span::styled(format!("{} ", toast.kind.icon()), Style::default().fg(color)),
            Span::styled(toast.message, Style::default().fg(theme.text)),
        ]);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(line).block(
                Block::bordered()
                    .border_style(border)
                    .style(Style::default().bg(theme.surface_bg)),
            ),
            rect,
        );
        y += 3;
    }
}
