//! Copy button feedback state: `Idle → Copied (timed) → Idle`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::model::SnippetId;

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyButton {
    #[default]
    Idle,
    Copied { until: Instant },
}

impl CopyButton {
    pub fn label(&self) -> &'static str {
        match self {
            CopyButton::Idle => COPY_LABEL,
            CopyButton::Copied { .. } => COPIED_LABEL,
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, CopyButton::Copied { .. })
    }

    /// Enter `Copied` for `feedback`. Copying again while already `Copied`
    /// restarts the timer.
    pub fn copied(now: Instant, feedback: Duration) -> Self {
        CopyButton::Copied {
            until: now + feedback,
        }
    }

    /// The state at `now`: `Copied` reverts to `Idle` once its time is up.
    pub fn at(self, now: Instant) -> Self {
        match self {
            CopyButton::Copied { until } if now >= until => CopyButton::Idle,
            other => other,
        }
    }
}

/// Per-card copy button states. Cards not in the map are `Idle`.
#[derive(Debug, Clone, Default)]
pub struct CopyButtons {
    feedback: Duration,
    copied: HashMap<SnippetId, Instant>,
}

impl CopyButtons {
    pub fn new(feedback: Duration) -> Self {
        Self {
            feedback,
            copied: HashMap::new(),
        }
    }

    pub fn get(&self, id: SnippetId) -> CopyButton {
        self.copied
            .get(&id)
            .map(|until| CopyButton::Copied { until: *until })
            .unwrap_or_default()
    }

    pub fn mark_copied(&mut self, id: SnippetId, now: Instant) {
        self.copied.insert(id, now + self.feedback);
    }

    /// Revert every button whose feedback time has passed.
    pub fn tick(&mut self, now: Instant) {
        self.copied.retain(|_, until| now < *until);
    }

    /// Earliest pending revert.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.copied.values().min().copied()
    }

    pub fn clear(&mut self) {
        self.copied.clear();
    }
}
