//! Application state: the loaded catalog plus the current filter inputs and
//! the subset they select.

use crate::filter::{filter_snippets, CategoryFilter};
use crate::model::{Catalog, CategoryInfo, Snippet, SnippetId};

/// The catalog and everything derived from the user's filter choices.
///
/// `filtered` is always the result of running the filter engine over
/// `catalog` with `category` and `query`; every setter recomputes it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    catalog: Catalog,
    filtered: Vec<SnippetId>,
    category: CategoryFilter,
    query: String,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        let mut state = Self {
            catalog,
            ..Default::default()
        };
        state.refilter();
        state
    }

    /// Replace the catalog wholesale, keeping the filter inputs.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.refilter();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn categories(&self) -> &[CategoryInfo] {
        self.catalog.categories()
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.refilter();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    /// Ids of the visible snippets in display order.
    pub fn filtered_ids(&self) -> &[SnippetId] {
        &self.filtered
    }

    /// The visible snippets in display order.
    pub fn filtered(&self) -> impl Iterator<Item = (SnippetId, &Snippet)> + '_ {
        self.filtered
            .iter()
            .filter_map(|id| self.catalog.get(*id).map(|s| (*id, s)))
    }

    pub fn is_empty_result(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Category tab order: "all" first, then categories in document order.
    pub fn category_cycle(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(
                self.catalog
                    .categories()
                    .iter()
                    .map(|c| CategoryFilter::Id(c.id.clone())),
            )
            .collect()
    }

    fn refilter(&mut self) {
        self.filtered = filter_snippets(self.catalog.snippets(), &self.category, &self.query);
        tracing::debug!(
            "Filtered {} of {} snippets (category={}, query={:?})",
            self.filtered.len(),
            self.catalog.len(),
            self.category,
            self.query
        );
    }
}
