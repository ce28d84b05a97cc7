//! Markdown preview: snippet markdown to an HTML fragment.
//!
//! The pipeline runs pulldown-cmark with GFM extensions and math parsing,
//! then rewrites the event stream before handing it to the HTML writer:
//! - soft breaks become hard breaks (`breaks: true` behaviour)
//! - `==text==` becomes `<mark>`
//! - fenced code goes through the optional [`CodeHighlighter`]
//! - `$…$` / `$$…$$` go through the optional [`MathRenderer`]

mod highlight;
mod mark;
mod math;

pub use highlight::{CodeHighlighter, DEFAULT_THEME};
pub use mark::{has_marks, split_marks, Segment};
pub use math::{delimited_source, MathError, MathMode, MathRenderer, TexMarkup, KATEX_VERSION};

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};

use crate::config::PreviewConfig;

/// Markdown parser options shared by the HTML and terminal previews.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_MATH
}

/// Escape text for use in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Converts snippet markdown to an HTML preview fragment.
#[derive(Default)]
pub struct PreviewRenderer {
    math: Option<Box<dyn MathRenderer>>,
    highlighter: Option<CodeHighlighter>,
}

impl std::fmt::Debug for PreviewRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRenderer")
            .field("math", &self.math.is_some())
            .field("highlighter", &self.highlighter)
            .finish()
    }
}

impl PreviewRenderer {
    /// Markdown only: no math typesetting, no code highlighting.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_math(mut self, renderer: impl MathRenderer + 'static) -> Self {
        self.math = Some(Box::new(renderer));
        self
    }

    pub fn with_highlighter(mut self, highlighter: CodeHighlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// Build from config. Returns `None` when markdown preview is disabled.
    pub fn from_config(config: &PreviewConfig) -> Option<Self> {
        if !config.markdown {
            return None;
        }
        let mut renderer = Self::new();
        if config.math {
            renderer = renderer.with_math(TexMarkup);
        }
        if config.highlight {
            renderer = renderer.with_highlighter(CodeHighlighter::new(config.highlight_theme.clone()));
        }
        Some(renderer)
    }

    pub fn highlighter(&self) -> Option<&CodeHighlighter> {
        self.highlighter.as_ref()
    }

    /// Head markup the math renderer needs in an exported document.
    pub fn document_head(&self) -> Option<String> {
        self.math.as_ref().and_then(|m| m.document_head())
    }

    /// Render `markdown` to HTML.
    pub fn render(&self, markdown: &str) -> String {
        let parser = TextMergeStream::new(Parser::new_ext(markdown, markdown_options()));
        let events = self.rewrite(parser);

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());
        html
    }

    fn rewrite<'a>(&self, events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::new();
        // Code block being collected: (language, text). Collected even without a
        // highlighter so that mark and math rewriting never touch code.
        let mut code: Option<(Option<String>, String)> = None;

        for event in events {
            if let Some((lang, text)) = code.as_mut() {
                match event {
                    Event::Text(t) => text.push_str(&t),
                    Event::End(TagEnd::CodeBlock) => {
                        let html = self.code_block_html(lang.as_deref(), text);
                        out.push(Event::Html(CowStr::from(html)));
                        code = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::SoftBreak => out.push(Event::HardBreak),
                Event::Text(text) if has_marks(&text) => {
                    for segment in split_marks(&text) {
                        match segment {
                            Segment::Plain(p) => out.push(Event::Text(CowStr::from(p.to_string()))),
                            Segment::Mark(m) => out.push(Event::InlineHtml(CowStr::from(format!(
                                r#"<mark class="highlight">{}</mark>"#,
                                escape_html(m)
                            )))),
                        }
                    }
                }
                Event::InlineMath(tex) => out.push(self.math_event(&tex, MathMode::Inline)),
                Event::DisplayMath(tex) => out.push(self.math_event(&tex, MathMode::Display)),
                other => out.push(other),
            }
        }
        out
    }

    fn math_event<'a>(&self, tex: &str, mode: MathMode) -> Event<'a> {
        let Some(renderer) = &self.math else {
            return Event::Text(CowStr::from(delimited_source(tex, mode)));
        };
        match renderer.render(tex, mode) {
            Ok(html) => Event::InlineHtml(CowStr::from(html)),
            Err(e) => {
                tracing::warn!("Math render failed for {:?}: {}", tex, e);
                Event::Text(CowStr::from(delimited_source(tex, mode)))
            }
        }
    }

    fn code_block_html(&self, lang: Option<&str>, code: &str) -> String {
        let class = lang
            .map(|l| format!(r#" class="language-{}""#, escape_html(l)))
            .unwrap_or_default();

        let body = match &self.highlighter {
            Some(h) => match h.highlight(code, lang) {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Highlight error: {}", e);
                    escape_html(code)
                }
            },
            None => escape_html(code),
        };
        format!("<pre><code{class}>{body}</code></pre>\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = PreviewRenderer::new().render("# Title\n\n**bold** and `code`");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_soft_breaks_become_br() {
        let html = PreviewRenderer::new().render("line one\nline two");
        assert!(html.contains("line one<br />"));
    }

    #[test]
    fn test_gfm_table_and_strikethrough() {
        let html = PreviewRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_mark_extension() {
        let html = PreviewRenderer::new().render("use ==this== flag");
        assert!(html.contains(r#"<mark class="highlight">this</mark>"#));
        assert!(html.contains("use "));
    }

    #[test]
    fn test_mark_must_close_within_one_text_run() {
        let html = PreviewRenderer::new().render("==a *b* c==");
        assert!(!html.contains("<mark"));
        assert!(html.contains("==a <em>b</em> c=="));

        let html = PreviewRenderer::new().render("==first\nsecond==");
        assert!(!html.contains("<mark"));
    }

    #[test]
    fn test_math_without_renderer_stays_literal() {
        let html = PreviewRenderer::new().render("area $\\pi r^2$");
        assert!(html.contains("$\\pi r^2$"));
        assert!(!html.contains("math-inline"));
    }

    #[test]
    fn test_math_with_renderer() {
        let html = PreviewRenderer::new()
            .with_math(TexMarkup)
            .render("inline $x$\n\n$$y$$");
        assert!(html.contains(r#"<span class="math math-inline">\(x\)</span>"#));
        assert!(html.contains(r#"<span class="math math-display">\[y\]</span>"#));
    }

    struct Failing;
    impl MathRenderer for Failing {
        fn render(&self, _tex: &str, _mode: MathMode) -> Result<String, MathError> {
            Err(MathError::Render("boom".into()))
        }
    }

    #[test]
    fn test_math_failure_keeps_source() {
        let html = PreviewRenderer::new().with_math(Failing).render("$x$");
        assert!(html.contains("$x$"));
    }

    #[test]
    fn test_code_block_without_highlighter() {
        let html = PreviewRenderer::new().render("```rust\nlet a = 1 < 2;\n```");
        assert!(html.contains("<pre><code class=\"language-rust\">"));
        assert!(html.contains("1 &lt; 2"));
    }

    #[test]
    fn test_code_block_with_highlighter() {
        let html = PreviewRenderer::new()
            .with_highlighter(CodeHighlighter::default())
            .render("```rust\nfn main() {}\n```\n\nafter");
        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("hl-"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_marks_not_applied_in_code() {
        let html = PreviewRenderer::new().render("`==x==`");
        assert!(!html.contains("<mark"));
    }

    #[test]
    fn test_from_config_disabled() {
        let config = PreviewConfig {
            markdown: false,
            ..Default::default()
        };
        assert!(PreviewRenderer::from_config(&config).is_none());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
    }
}
