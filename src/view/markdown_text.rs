//! Markdown to styled terminal text, for the preview pane.
//!
//! Uses the same parser options as the HTML preview so both targets agree on
//! what counts as a table, task list, math span or `==mark==`.

use pulldown_cmark::{Event, Parser, Tag, TagEnd, TextMergeStream};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::theme::Theme;
use crate::preview::{markdown_options, split_marks, Segment};

const RULE_WIDTH: usize = 24;

/// Render `markdown` as styled lines. Soft breaks start a new line.
pub fn markdown_to_text(markdown: &str, theme: &Theme) -> Text<'static> {
    let mut writer = TextWriter::new(theme);
    for event in TextMergeStream::new(Parser::new_ext(markdown, markdown_options())) {
        writer.event(event);
    }
    writer.finish()
}

struct TextWriter<'t> {
    theme: &'t Theme,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// One entry per open list: next number for ordered lists
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
}

impl<'t> TextWriter<'t> {
    fn new(theme: &'t Theme) -> Self {
        Self {
            theme,
            lines: Vec::new(),
            current: Vec::new(),
            styles: vec![Style::default().fg(theme.text)],
            lists: Vec::new(),
            quote_depth: 0,
            in_code_block: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let style = self.style().patch(patch);
        self.styles.push(style);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn span(&mut self, text: impl Into<String>, style: Style) {
        self.current.push(Span::styled(text.into(), style));
    }

    fn flush_line(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(self.theme.text_dim),
            ));
        }
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn blank_line(&mut self) {
        self.flush_line();
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn code_style(&self) -> Style {
        Style::default().fg(self.theme.code_fg).bg(self.theme.bg)
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => {
                let style = self.code_style();
                for line in text.lines() {
                    self.span(format!("  {line}"), style);
                    self.flush_line();
                }
            }
            Event::Text(text) => {
                let style = self.style();
                for segment in split_marks(&text) {
                    match segment {
                        Segment::Plain(p) => self.span(p.to_string(), style),
                        Segment::Mark(m) => self.span(m.to_string(), style.bg(self.theme.mark_bg)),
                    }
                }
            }
            Event::Code(code) => {
                let style = self.code_style();
                self.span(code.to_string(), style);
            }
            Event::InlineMath(tex) => {
                let style = self.style().fg(self.theme.accent).add_modifier(Modifier::ITALIC);
                self.span(format!("${tex}$"), style);
            }
            Event::DisplayMath(tex) => {
                self.flush_line();
                let style = self.style().fg(self.theme.accent).add_modifier(Modifier::ITALIC);
                self.span(format!("$${tex}$$"), style);
                self.flush_line();
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = Style::default().fg(self.theme.text_dim);
                self.span(html.trim_end().to_string(), style);
            }
            Event::FootnoteReference(label) => {
                let style = Style::default().fg(self.theme.text_dim);
                self.span(format!("[^{label}]"), style);
            }
            Event::SoftBreak | Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                let style = Style::default().fg(self.theme.text_dim);
                self.span("─".repeat(RULE_WIDTH), style);
                self.blank_line();
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                let style = self.style();
                self.span(marker, style);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.blank_line();
                self.push_style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD));
                let style = self.style();
                self.span(format!("{} ", "#".repeat(level as usize)), style);
            }
            Tag::BlockQuote { .. } => {
                self.flush_line();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush_line();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                let style = Style::default().fg(self.theme.accent);
                self.span(format!("{}{marker}", "  ".repeat(depth)), style);
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { .. } => self.push_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Tag::TableHead => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph { .. } => self.blank_line(),
            TagEnd::Heading { .. } => {
                self.pop_style();
                self.blank_line();
            }
            TagEnd::BlockQuote { .. } => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            TagEnd::CodeBlock { .. } => {
                self.in_code_block = false;
                self.blank_line();
            }
            TagEnd::List { .. } => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item { .. } => self.flush_line(),
            TagEnd::Emphasis { .. }
            | TagEnd::Strong { .. }
            | TagEnd::Strikethrough { .. }
            | TagEnd::Link { .. } => self.pop_style(),
            TagEnd::TableHead { .. } => {
                self.pop_style();
                self.flush_line();
            }
            TagEnd::TableCell { .. } => {
                let style = Style::default().fg(self.theme.text_dim);
                self.span(" │ ", style);
            }
            TagEnd::TableRow { .. } => self.flush_line(),
            TagEnd::Table { .. } => self.blank_line(),
            _ => {}
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        Text::from(self.lines)
    }
}
