//! Math formula rendering contract.
//!
//! The preview pipeline only needs "TeX source in, HTML out". A full
//! typesetter can be plugged in by implementing [`MathRenderer`];
//! [`TexMarkup`] is the built-in one: it emits delimited TeX and declares the
//! KaTeX assets that typeset it in the browser.

use super::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathMode {
    Inline,
    Display,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MathError {
    #[error("empty math expression")]
    Empty,
    #[error("math render failed: {0}")]
    Render(String),
}

/// Render a TeX expression to an HTML fragment.
pub trait MathRenderer: Send + Sync {
    fn render(&self, tex: &str, mode: MathMode) -> Result<String, MathError>;

    /// Markup a standalone document must carry in its `<head>` for the
    /// rendered fragments to display. `None` when the output is self-contained.
    fn document_head(&self) -> Option<String> {
        None
    }
}

pub const KATEX_VERSION: &str = "0.16.11";

/// Typesets every `.math` element once the deferred KaTeX scripts have run.
/// Only the delimiters [`TexMarkup`] emits are recognised, so a stray `$` in
/// prose is never touched.
const KATEX_AUTO_RENDER: &str = r#"<script>
document.addEventListener("DOMContentLoaded", function () {
  document.querySelectorAll(".math").forEach(function (el) {
    renderMathInElement(el, {
      delimiters: [
        { left: "\\[", right: "\\]", display: true },
        { left: "\\(", right: "\\)", display: false }
      ],
      throwOnError: false
    });
  });
});
</script>
"#;

/// Emits `\( … \)` / `\[ … \]` wrapped in `math` spans for client-side typesetting.
#[derive(Debug, Clone, Copy, Default)]
pub struct TexMarkup;

impl MathRenderer for TexMarkup {
    fn render(&self, tex: &str, mode: MathMode) -> Result<String, MathError> {
        let tex = tex.trim();
        if tex.is_empty() {
            return Err(MathError::Empty);
        }
        let escaped = escape_html(tex);
        Ok(match mode {
            MathMode::Inline => format!(r#"<span class="math math-inline">\({escaped}\)</span>"#),
            MathMode::Display => format!(r#"<span class="math math-display">\[{escaped}\]</span>"#),
        })
    }

    fn document_head(&self) -> Option<String> {
        let base = format!("https://cdn.jsdelivr.net/npm/katex@{KATEX_VERSION}/dist");
        Some(format!(
            "<link rel=\"stylesheet\" href=\"{base}/katex.min.css\">\n\
             <script defer src=\"{base}/katex.min.js\"></script>\n\
             <script defer src=\"{base}/contrib/auto-render.min.js\"></script>\n\
             {KATEX_AUTO_RENDER}"
        ))
    }
}

/// The source text as written in markdown, used when rendering fails.
pub fn delimited_source(tex: &str, mode: MathMode) -> String {
    match mode {
        MathMode::Inline => format!("${tex}$"),
        MathMode::Display => format!("$${tex}$$"),
    }
}
