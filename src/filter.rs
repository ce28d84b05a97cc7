//! Filter engine: which snippets are visible for a category and search text.

use std::fmt;

use crate::model::{Snippet, SnippetId};

/// The active category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Id(String),
}

impl CategoryFilter {
    /// `"all"` selects every category, anything else a single category id.
    pub fn from_id(id: &str) -> Self {
        if id == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Id(id.to_string())
        }
    }

    pub fn as_id(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Id(id) => id,
        }
    }

    pub fn matches(&self, snippet: &Snippet) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Id(id) => snippet.category_id == *id,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_id())
    }
}

/// Ids of the snippets matching `category` and `query`, in catalog order.
///
/// The query matches case-insensitively as a substring of the title,
/// description or markdown. An empty query matches everything.
pub fn filter_snippets(snippets: &[Snippet], category: &CategoryFilter, query: &str) -> Vec<SnippetId> {
    let needle = query.to_lowercase();
    snippets
        .iter()
        .enumerate()
        .filter(|(_, s)| category.matches(s) && s.matches_query(&needle))
        .map(|(i, _)| SnippetId(i))
        .collect()
}
