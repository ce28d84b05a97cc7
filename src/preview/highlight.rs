//! Code block syntax highlighting with syntect.
//!
//! Output uses CSS classes (`hl-` prefixed) rather than inline colors, so a
//! page carries one stylesheet generated from the configured theme.

use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_name: String,
}

impl std::fmt::Debug for CodeHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeHighlighter")
            .field("syntaxes", &self.syntax_set.syntaxes().len())
            .field("theme_name", &self.theme_name)
            .finish()
    }
}

impl CodeHighlighter {
    pub fn new(theme_name: impl Into<String>) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_name: theme_name.into(),
        }
    }

    /// Pick a grammar: the fence language if known, else a guess from the
    /// first line (shebangs, `<?xml`, ...), else plain text.
    fn syntax_for(&self, code: &str, lang: Option<&str>) -> &SyntaxReference {
        lang.filter(|l| !l.is_empty())
            .and_then(|l| self.syntax_set.find_syntax_by_token(l))
            .or_else(|| {
                code.lines()
                    .next()
                    .and_then(|first| self.syntax_set.find_syntax_by_first_line(first))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Highlight `code` to classed HTML spans (no surrounding `<pre>`).
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> Result<String, syntect::Error> {
        let syntax = self.syntax_for(code, lang);
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }

    /// CSS for the configured theme. Unknown theme names fall back to the default.
    pub fn stylesheet(&self) -> Option<String> {
        let themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .get(&self.theme_name)
            .or_else(|| {
                tracing::warn!(
                    "Unknown highlight theme {:?}, using {}",
                    self.theme_name,
                    DEFAULT_THEME
                );
                themes.themes.get(DEFAULT_THEME)
            })?;
        match css_for_theme_with_class_style(theme, CLASS_STYLE) {
            Ok(css) => Some(css),
            Err(e) => {
                tracing::warn!("Failed to build highlight stylesheet: {}", e);
                None
            }
        }
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_gets_classes() {
        let h = CodeHighlighter::default();
        let html = h.highlight("fn main() {}\n", Some("rust")).unwrap();
        assert!(html.contains("hl-"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_still_escapes() {
        let h = CodeHighlighter::default();
        let html = h.highlight("<b>&</b>\n", Some("no-such-lang")).unwrap();
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_stylesheet_for_default_theme() {
        let css = CodeHighlighter::default().stylesheet().unwrap();
        assert!(css.contains(".hl-"));
    }
}
