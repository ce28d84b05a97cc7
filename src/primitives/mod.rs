//! Small self-contained building blocks with no UI or I/O dependencies.

pub mod collate;
pub mod debounce;
