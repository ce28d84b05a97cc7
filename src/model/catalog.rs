//! Snippet catalog: the JSON document shape and its flattened, sorted form.
//!
//! The on-disk document nests snippets inside categories. [`Catalog`] flattens
//! that into a single list where every snippet carries its category id and
//! name, ordered by priority and then by title.

use std::cmp::Ordering;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::primitives::collate::collate;

/// Identifier of a snippet: its index in the flattened, sorted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(pub usize);

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snippet-{}", self.0)
    }
}

/// Sort priority of a snippet. Lower rank sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high = 0, medium = 1, low = 2.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Parse a priority name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Document records (what the JSON file contains)
// ---------------------------------------------------------------------------

/// Root of a catalog document: `{ "categories": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogFile {
    pub categories: Vec<CategoryRecord>,
}

/// A category as written in the document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub snippets: Vec<SnippetRecord>,
}

/// A snippet as written in the document.
///
/// Every field is optional at this level so that one bad entry does not
/// reject the whole catalog; [`Catalog::from_file`] decides what to keep.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SnippetRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// One of `high`, `medium`, `low`. Missing or unknown means `medium`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

// ---------------------------------------------------------------------------
// Flattened catalog
// ---------------------------------------------------------------------------

/// Category id and display name, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
}

/// A snippet annotated with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub title: String,
    pub description: String,
    pub markdown: String,
    pub priority: Priority,
    pub category_id: String,
    pub category_name: String,
    /// Lowercased title, description and markdown for substring search
    #[serde(skip)]
    search_key: SearchKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct SearchKey {
    title: String,
    description: String,
    markdown: String,
}

impl Snippet {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        markdown: impl Into<String>,
        priority: Priority,
        category: &CategoryInfo,
    ) -> Self {
        let title = title.into();
        let description = description.into();
        let markdown = markdown.into();
        let search_key = SearchKey {
            title: title.to_lowercase(),
            description: description.to_lowercase(),
            markdown: markdown.to_lowercase(),
        };
        Self {
            title,
            description,
            markdown,
            priority,
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            search_key,
        }
    }

    /// True when `needle` (already lowercased) occurs in the title,
    /// description or raw markdown. An empty needle matches everything.
    pub fn matches_query(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.search_key.title.contains(needle)
            || self.search_key.description.contains(needle)
            || self.search_key.markdown.contains(needle)
    }
}

/// Order by priority (high first), then by title.
pub fn compare_snippets(a: &Snippet, b: &Snippet) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| collate(&a.title, &b.title))
}

/// Why a snippet record was dropped while flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingTitle,
    MissingMarkdown,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingTitle => write!(f, "missing title"),
            SkipReason::MissingMarkdown => write!(f, "missing markdown"),
        }
    }
}

/// A snippet record that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSnippet {
    pub category_id: String,
    /// Position of the record inside its category's `snippets` array
    pub index: usize,
    pub reason: SkipReason,
}

/// The loaded catalog: categories in document order and snippets sorted.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<CategoryInfo>,
    snippets: Vec<Snippet>,
    skipped: Vec<SkippedSnippet>,
}

impl Catalog {
    /// Parse a JSON catalog document.
    pub fn from_json_str(json: &str) -> Result<Self, super::CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file))
    }

    /// Flatten and sort a parsed document.
    pub fn from_file(file: CatalogFile) -> Self {
        let mut categories = Vec::with_capacity(file.categories.len());
        let mut snippets = Vec::new();
        let mut skipped = Vec::new();

        for record in file.categories {
            let info = CategoryInfo {
                id: record.id,
                name: record.name,
            };

            for (index, snippet) in record.snippets.into_iter().enumerate() {
                let Some(title) = snippet.title else {
                    skipped.push(SkippedSnippet {
                        category_id: info.id.clone(),
                        index,
                        reason: SkipReason::MissingTitle,
                    });
                    continue;
                };
                let Some(markdown) = snippet.markdown else {
                    skipped.push(SkippedSnippet {
                        category_id: info.id.clone(),
                        index,
                        reason: SkipReason::MissingMarkdown,
                    });
                    continue;
                };

                let priority = match snippet.priority.as_deref() {
                    None => Priority::default(),
                    Some(name) => Priority::from_name(name).unwrap_or_else(|| {
                        tracing::warn!(
                            "Unknown priority {:?} on snippet {:?} in category {:?}, using medium",
                            name,
                            title,
                            info.id
                        );
                        Priority::default()
                    }),
                };

                snippets.push(Snippet::new(
                    title,
                    snippet.description.unwrap_or_default(),
                    markdown,
                    priority,
                    &info,
                ));
            }

            categories.push(info);
        }

        for skip in &skipped {
            tracing::warn!(
                "Skipping snippet #{} in category {:?}: {}",
                skip.index,
                skip.category_id,
                skip.reason
            );
        }

        // sort_by is stable: equal keys keep document order
        snippets.sort_by(compare_snippets);

        Self {
            categories,
            snippets,
            skipped,
        }
    }

    pub fn categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn skipped(&self) -> &[SkippedSnippet] {
        &self.skipped
    }

    pub fn get(&self, id: SnippetId) -> Option<&Snippet> {
        self.snippets.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&CategoryInfo> {
        self.categories.iter().find(|c| c.id == id)
    }
}
