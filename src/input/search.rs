//! The search box: its text, focus, and whole-text selection.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    text: String,
    focused: bool,
    /// Whole text selected: the next edit replaces it
    selected: bool,
}

impl SearchInput {
    /// An unfocused box already holding `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_selected(&self) -> bool {
        self.selected && !self.text.is_empty()
    }

    /// Focus and select all, like a browser's `focus(); select()`.
    pub fn focus(&mut self) {
        self.focused = true;
        self.selected = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.selected = false;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.selected = false;
    }

    pub fn insert(&mut self, c: char) {
        if self.selected {
            self.text.clear();
            self.selected = false;
        }
        self.text.push(c);
    }

    /// Delete the last character, or everything when selected.
    pub fn delete_backward(&mut self) {
        if self.selected {
            self.clear();
        } else {
            self.text.pop();
        }
    }
}
