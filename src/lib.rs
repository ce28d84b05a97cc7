// Library crate: the browser's state, view model and renderers.
// The binary in main.rs wires them to a real terminal.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod filter;
pub mod input;
pub mod model;
pub mod preview;
pub mod primitives;
pub mod services;
pub mod state;
pub mod toast;
pub mod tui;
pub mod view;
