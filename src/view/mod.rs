//! View layer: a target-independent page model plus its renderers.
//!
//! - `model`: pure mapping from application state to a [`PageView`]
//! - `html`: `PageView` to an HTML node tree / document
//! - `markdown_text`: markdown preview as styled terminal text
//! - `theme`: terminal colors

pub mod html;
pub mod markdown_text;
pub mod model;
pub mod theme;

pub use model::{
    build_page, CardView, CategoryTabView, CopyButtonView, EmptyStateView, GridView, PageSources,
    PageView, SearchView, ToastView,
};
pub use theme::Theme;
