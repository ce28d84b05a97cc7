//! Clipboard access with a fallback path.
//!
//! A copy first goes to the primary backend (the system clipboard). When that
//! backend is unavailable or its write fails, the fallback backend (an OSC 52
//! terminal escape sequence) is tried. Failures are reported in the returned
//! result and logged.

mod button;
mod osc52;
#[cfg(feature = "runtime")]
mod system;

pub use button::{CopyButton, CopyButtons, COPIED_LABEL, COPY_LABEL};
pub use osc52::Osc52Clipboard;
#[cfg(feature = "runtime")]
pub use system::SystemClipboard;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Something that can receive copied text.
pub trait ClipboardBackend {
    /// Short name for logs and toasts.
    fn name(&self) -> &'static str;

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Primary backend plus fallback.
pub struct Clipboard {
    primary: Option<Box<dyn ClipboardBackend>>,
    fallback: Option<Box<dyn ClipboardBackend>>,
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("primary", &self.primary.as_ref().map(|b| b.name()))
            .field("fallback", &self.fallback.as_ref().map(|b| b.name()))
            .finish()
    }
}

impl Clipboard {
    pub fn new(
        primary: Option<Box<dyn ClipboardBackend>>,
        fallback: Option<Box<dyn ClipboardBackend>>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// A clipboard with no backends; every copy fails.
    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    /// System clipboard if one can be opened, OSC 52 on stdout as fallback.
    #[cfg(feature = "runtime")]
    pub fn system() -> Self {
        let primary: Option<Box<dyn ClipboardBackend>> = match SystemClipboard::new() {
            Ok(clipboard) => Some(Box::new(clipboard)),
            Err(e) => {
                tracing::warn!("System clipboard not available: {}", e);
                None
            }
        };
        Self::new(primary, Some(Box::new(Osc52Clipboard::stdout())))
    }

    /// Copy `text`. Returns the name of the backend that took it.
    pub fn copy(&mut self, text: &str) -> Result<&'static str, ClipboardError> {
        if let Some(primary) = self.primary.as_mut() {
            match primary.set_text(text) {
                Ok(()) => {
                    tracing::debug!("Copied {} bytes via {}", text.len(), primary.name());
                    return Ok(primary.name());
                }
                Err(e) => {
                    tracing::warn!("{} copy failed, trying fallback: {}", primary.name(), e);
                }
            }
        }

        let Some(fallback) = self.fallback.as_mut() else {
            return Err(ClipboardError::Unavailable(
                "no clipboard backend available".to_string(),
            ));
        };
        match fallback.set_text(text) {
            Ok(()) => {
                tracing::debug!("Copied {} bytes via {}", text.len(), fallback.name());
                Ok(fallback.name())
            }
            Err(e) => {
                tracing::error!("Copy failed: {}", e);
                Err(e)
            }
        }
    }
}
