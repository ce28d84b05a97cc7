//! Process-level services: where logs go and how tracing is wired.

pub mod log_dirs;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
