//! OSC 52 clipboard: ask the terminal emulator to set its selection.
//!
//! Works over SSH and without a display server, but there is no way to know
//! whether the terminal honoured the request; only the write can fail.

use std::io::{self, Write};

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;

use super::{ClipboardBackend, ClipboardError};

pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        execute!(self.out, CopyToClipboard::to_clipboard_from(text))
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
