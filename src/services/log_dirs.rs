//! Log file locations.
//!
//! Logs never go to the terminal while the browser owns it, so they are
//! written under the user's state directory (falling back to the cache
//! directory, then the temp directory).

use std::path::PathBuf;

use crate::config::APP_DIR_NAME;

pub const LOG_FILE_NAME: &str = "snipgrid.log";

/// Directory holding the log files.
pub fn log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

/// Default path of the main log file.
pub fn main_log_path() -> PathBuf {
    log_dir().join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_log_path_layout() {
        let path = main_log_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(LOG_FILE_NAME));
        assert_eq!(
            path.parent().and_then(|p| p.file_name()).and_then(|n| n.to_str()),
            Some(APP_DIR_NAME)
        );
    }
}
