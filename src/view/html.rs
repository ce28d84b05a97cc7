//! HTML rendering target.
//!
//! Builds a small node tree from a [`PageView`] and serializes it. Class
//! names are stable hooks for an external stylesheet; a minimal one is
//! embedded in exported documents.

use std::fmt::Write as _;

use super::model::{
    CardView, CategoryTabView, GridView, PageView, ToastView, PREVIEW_LABEL, PREVIEW_UNAVAILABLE,
};
use crate::preview::{escape_html, PreviewRenderer};
use crate::toast::ToastKind;

/// A DOM-like node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Pre-rendered, trusted HTML (the markdown preview)
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Elements with no closing tag.
fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "input" | "meta" | "link")
}

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Raw(html) => out.push_str(html),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(out, r#" {}="{}""#, name, escape_html(value));
                }
                out.push('>');
                if is_void(el.tag) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

fn tab_node(tab: &CategoryTabView<'_>) -> Node {
    let class = if tab.active {
        "category-btn active"
    } else {
        "category-btn"
    };
    Element::new("button")
        .class(class)
        .attr("data-category", tab.id)
        .attr("role", "tab")
        .attr("aria-selected", tab.active.to_string())
        .text(tab.label)
        .into()
}

fn card_node(card: &CardView<'_>, preview: Option<&PreviewRenderer>) -> Node {
    let copy_class = if card.copy.copied {
        "copy-btn copied"
    } else {
        "copy-btn"
    };

    let header = Element::new("div")
        .class("card-header")
        .child(
            Element::new("div")
                .class("card-title-group")
                .child(Element::new("h3").class("card-title").text(card.title))
                .child(Element::new("p").class("card-description").text(card.description)),
        )
        .child(
            Element::new("div")
                .class("card-actions")
                .child(Element::new("span").class("category-badge").text(card.category_name))
                .child(
                    Element::new("button")
                        .class(copy_class)
                        .attr("aria-label", "Copy to clipboard")
                        .attr("data-snippet", card.id.0.to_string())
                        .child(Element::new("span").class("copy-text").text(card.copy.label)),
                ),
        );

    let code = Element::new("div")
        .class("code-wrapper")
        .child(Element::new("pre").class("code-block").text(card.markdown));

    let preview_content = match preview {
        Some(renderer) => Element::new("div")
            .class("preview-content")
            .child(Node::Raw(renderer.render(card.markdown))),
        None => Element::new("div")
            .class("preview-content")
            .text(PREVIEW_UNAVAILABLE),
    };

    Element::new("article")
        .class(format!("snippet-card priority-{}", card.priority.as_str()))
        .attr("id", card.id.to_string())
        .child(header)
        .child(code)
        .child(
            Element::new("div")
                .class("preview-container")
                .child(Element::new("div").class("preview-label").text(PREVIEW_LABEL))
                .child(preview_content),
        )
        .into()
}

fn toast_node(toast: &ToastView<'_>) -> Node {
    let kind = match toast.kind {
        ToastKind::Success => "success",
        ToastKind::Error => "error",
    };
    let class = if toast.leaving {
        format!("toast toast-{kind} leaving")
    } else {
        format!("toast toast-{kind}")
    };
    Element::new("div")
        .class(class)
        .attr("role", "status")
        .child(Element::new("span").class("toast-icon").text(toast.kind.icon()))
        .child(Element::new("span").class("toast-message").text(toast.message))
        .into()
}

/// Render the page body: search box, category tabs, grid or empty state, toasts.
pub fn render_page(page: &PageView<'_>, preview: Option<&PreviewRenderer>) -> Node {
    let search = Element::new("input")
        .attr("id", "searchInput")
        .attr("type", "search")
        .attr("placeholder", page.search.placeholder)
        .attr("value", page.search.text);

    let tabs = Element::new("nav")
        .attr("id", "categoryFilters")
        .attr("role", "tablist")
        .children(page.tabs.iter().map(tab_node));

    let (grid, empty) = match &page.grid {
        GridView::Cards(cards) => (
            Element::new("section")
                .attr("id", "snippetsGrid")
                .class("snippets-grid")
                .children(cards.iter().map(|c| card_node(c, preview))),
            Element::new("div").attr("id", "emptyState").class("empty-state hidden"),
        ),
        GridView::Empty(state) => (
            Element::new("section")
                .attr("id", "snippetsGrid")
                .class("snippets-grid"),
            Element::new("div")
                .attr("id", "emptyState")
                .class("empty-state")
                .child(Element::new("h2").text(state.title))
                .child(Element::new("p").text(state.hint)),
        ),
    };

    let toasts = Element::new("div")
        .attr("id", "toastContainer")
        .class("toast-container")
        .children(page.toasts.iter().map(toast_node));

    Element::new("main")
        .class("snipgrid")
        .child(Element::new("header").child(search).child(tabs))
        .child(grid)
        .child(empty)
        .child(toasts)
        .into()
}

const BASE_CSS: &str = "\
body{background:#111;color:#f5f5f0;font-family:system-ui,sans-serif;margin:0;padding:2rem}
.category-btn{background:#1a1a1a;color:#b4b4b4;border:1px solid #2a2a2a;border-radius:.5rem;padding:.4rem .9rem;margin:.2rem}
.category-btn.active{background:#d4af37;color:#111;border-color:#d4af37}
.snippets-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(28rem,1fr));gap:1.5rem;margin-top:1.5rem}
.snippet-card{background:#1a1a1a;border:1px solid #2a2a2a;border-radius:1rem;padding:1.5rem;display:flex;flex-direction:column;gap:1.25rem}
.card-header{display:flex;justify-content:space-between;gap:1rem}
.card-description{color:#b4b4b4;font-size:.9rem}
.category-badge{font-size:.75rem;color:#b4b4b4;border:1px solid #1f1f1f;border-radius:.5rem;padding:.3rem .7rem}
.copy-btn{background:#111;color:#b4b4b4;border:1px solid #2a2a2a;border-radius:.5rem;padding:.4rem 1rem}
.copy-btn.copied{background:#4caf50;border-color:#4caf50;color:#fff}
.code-wrapper,.preview-container{background:#111;border:1px solid #2a2a2a;border-radius:.75rem;padding:1.25rem;overflow-x:auto}
.code-block{white-space:pre;margin:0;font-family:ui-monospace,monospace;color:#e8e6e1}
.preview-label{font-size:.75rem;color:#8a8a8a;text-transform:uppercase;letter-spacing:.05em;margin-bottom:.75rem}
.highlight{background:rgba(250,204,21,.3);color:#f5f5f0;padding:0 .25rem;border-radius:.25rem}
.empty-state{text-align:center;color:#8a8a8a;margin-top:4rem}
.hidden{display:none}
.toast-container{position:fixed;bottom:1.5rem;right:1.5rem;display:flex;flex-direction:column;gap:.5rem}
.toast{background:#1a1a1a;border:2px solid;border-radius:.75rem;padding:1rem 1.25rem;min-width:280px}
.toast-success{border-color:#4caf50}
.toast-error{border-color:#ef5350}
.toast.leaving{opacity:.4}
";

/// A complete standalone HTML document for `page`.
pub fn render_document(title: &str, page: &PageView<'_>, preview: Option<&PreviewRenderer>) -> String {
    let mut css = BASE_CSS.to_string();
    if let Some(extra) = preview.and_then(|p| p.highlighter()).and_then(|h| h.stylesheet()) {
        css.push_str(&extra);
    }

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(title));
    let _ = writeln!(out, "<style>\n{css}</style>");
    if let Some(head) = preview.and_then(|p| p.document_head()) {
        out.push_str(&head);
    }
    out.push_str("</head>\n<body>\n");
    render_page(page, preview).write_html(&mut out);
    out.push_str("\n</body>\n</html>\n");
    out
}
