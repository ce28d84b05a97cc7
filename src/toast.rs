//! Transient notifications.
//!
//! A toast is fully visible for its display duration, then spends a short
//! leaving phase (rendered dimmed) before it is removed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    leave_at: Instant,
    remove_at: Instant,
}

impl Toast {
    pub fn phase(&self, now: Instant) -> Option<ToastPhase> {
        if now < self.leave_at {
            Some(ToastPhase::Visible)
        } else if now < self.remove_at {
            Some(ToastPhase::Leaving)
        } else {
            None
        }
    }
}

/// Toasts in the order they were shown, oldest first.
#[derive(Debug, Clone)]
pub struct ToastStack {
    duration: Duration,
    exit: Duration,
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn new(duration: Duration, exit: Duration) -> Self {
        Self {
            duration,
            exit,
            toasts: Vec::new(),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        let message = message.into();
        tracing::debug!("Toast ({:?}): {}", kind, message);
        self.toasts.push(Toast {
            message,
            kind,
            leave_at: now + self.duration,
            remove_at: now + self.duration + self.exit,
        });
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, ToastKind::Success, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, ToastKind::Error, now);
    }

    /// Drop toasts whose leaving phase has ended.
    pub fn tick(&mut self, now: Instant) {
        self.toasts.retain(|t| now < t.remove_at);
    }

    /// Toasts still on screen at `now`, with their phase.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = (&Toast, ToastPhase)> + '_ {
        self.toasts
            .iter()
            .filter_map(move |t| t.phase(now).map(|phase| (t, phase)))
    }

    /// Next moment a toast changes phase or disappears.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.toasts
            .iter()
            .flat_map(|t| [t.leave_at, t.remove_at])
            .filter(|at| *at > now)
            .min()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
