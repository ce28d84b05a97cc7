//! Input handling.

pub mod keybindings;
pub mod search;

pub use keybindings::{resolve, Action};
pub use search::SearchInput;
