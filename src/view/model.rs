//! Page view model.
//!
//! [`build_page`] is a pure function from application state to a description
//! of what is on screen. Rendering targets (terminal, HTML) consume a
//! [`PageView`] and never look at the state directly.

use std::time::Instant;

use crate::clipboard::{CopyButtons, COPIED_LABEL};
use crate::filter::CategoryFilter;
use crate::input::SearchInput;
use crate::model::{Priority, SnippetId};
use crate::state::AppState;
use crate::toast::{ToastKind, ToastPhase, ToastStack};

pub const ALL_TAB_LABEL: &str = "All";
pub const SEARCH_PLACEHOLDER: &str = "Search snippets...";
pub const EMPTY_TITLE: &str = "No snippets found";
pub const EMPTY_HINT: &str = "Try a different search or category";
pub const PREVIEW_LABEL: &str = "Preview";
pub const PREVIEW_UNAVAILABLE: &str = "Markdown preview unavailable";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    pub search: SearchView<'a>,
    pub tabs: Vec<CategoryTabView<'a>>,
    pub grid: GridView<'a>,
    pub toasts: Vec<ToastView<'a>>,
    /// Snippets in the whole catalog, for the status line
    pub total: usize,
    /// Rows scrolled off the top of the detail pane
    pub detail_scroll: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView<'a> {
    pub text: &'a str,
    pub placeholder: &'static str,
    pub focused: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTabView<'a> {
    /// `"all"` for the All tab
    pub id: &'a str,
    pub label: &'a str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView<'a> {
    Empty(EmptyStateView),
    Cards(Vec<CardView<'a>>),
}

impl GridView<'_> {
    pub fn cards(&self) -> &[CardView<'_>] {
        match self {
            GridView::Empty(_) => &[],
            GridView::Cards(cards) => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GridView::Empty(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyStateView {
    pub title: &'static str,
    pub hint: &'static str,
}

impl Default for EmptyStateView {
    fn default() -> Self {
        Self {
            title: EMPTY_TITLE,
            hint: EMPTY_HINT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub id: SnippetId,
    pub title: &'a str,
    pub description: &'a str,
    pub category_name: &'a str,
    /// Raw markdown: shown verbatim and converted for the preview
    pub markdown: &'a str,
    pub priority: Priority,
    pub copy: CopyButtonView,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyButtonView {
    pub label: &'static str,
    pub copied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView<'a> {
    pub message: &'a str,
    pub kind: ToastKind,
    pub leaving: bool,
}

/// Everything a page is built from.
#[derive(Debug, Clone, Copy)]
pub struct PageSources<'a> {
    pub state: &'a AppState,
    pub search: &'a SearchInput,
    pub buttons: &'a CopyButtons,
    pub toasts: &'a ToastStack,
    pub selected: Option<SnippetId>,
    pub detail_scroll: u16,
    pub now: Instant,
}

pub fn build_page<'a>(sources: PageSources<'a>) -> PageView<'a> {
    let state = sources.state;

    let tabs = std::iter::once(CategoryTabView {
        id: "all",
        label: ALL_TAB_LABEL,
        active: *state.category() == CategoryFilter::All,
    })
    .chain(state.categories().iter().map(|c| CategoryTabView {
        id: &c.id,
        label: &c.name,
        active: state.category().as_id() == c.id && *state.category() != CategoryFilter::All,
    }))
    .collect();

    let grid = if state.is_empty_result() {
        GridView::Empty(EmptyStateView::default())
    } else {
        GridView::Cards(
            state
                .filtered()
                .map(|(id, snippet)| {
                    let button = sources.buttons.get(id).at(sources.now);
                    CardView {
                        id,
                        title: &snippet.title,
                        description: &snippet.description,
                        category_name: &snippet.category_name,
                        markdown: &snippet.markdown,
                        priority: snippet.priority,
                        copy: CopyButtonView {
                            label: button.label(),
                            copied: button.label() == COPIED_LABEL,
                        },
                        selected: sources.selected == Some(id),
                    }
                })
                .collect(),
        )
    };

    let toasts = sources
        .toasts
        .visible(sources.now)
        .map(|(toast, phase)| ToastView {
            message: &toast.message,
            kind: toast.kind,
            leaving: phase == ToastPhase::Leaving,
        })
        .collect();

    PageView {
        search: SearchView {
            text: sources.search.text(),
            placeholder: SEARCH_PLACEHOLDER,
            focused: sources.search.is_focused(),
            selected: sources.search.is_selected(),
        },
        tabs,
        grid,
        toasts,
        total: state.catalog().len(),
        detail_scroll: sources.detail_scroll,
    }
}
