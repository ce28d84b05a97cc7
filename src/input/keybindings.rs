//! Keyboard mapping: crossterm key events to browser actions.
//!
//! The mapping depends on whether the search box has focus: while it does,
//! printable characters edit the query instead of triggering shortcuts.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Focus the search box and select its text (Ctrl/Cmd+K, `/`)
    FocusSearch,
    /// Leave the search box, keeping its text
    BlurSearch,
    /// Empty the search box and show everything (Esc while searching)
    ClearSearch,
    InsertChar(char),
    DeleteBackward,
    NextCategory,
    PrevCategory,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    /// Scroll the detail pane (PageDown/PageUp, Shift+Down/Up)
    ScrollDetailDown,
    ScrollDetailUp,
    CopySelected,
    Quit,
    None,
}

/// Platform "command" modifier: Ctrl everywhere, Cmd (Super) where the
/// terminal reports it.
fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

/// Resolve a key event given the current search focus.
pub fn resolve(key: KeyEvent, search_focused: bool) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    let command = has_command_modifier(key.modifiers);

    // Shortcuts that work regardless of focus
    match key.code {
        KeyCode::Char('k') | KeyCode::Char('K') if command => return Action::FocusSearch,
        KeyCode::Char('q') if command => return Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
        KeyCode::Tab => return Action::NextCategory,
        KeyCode::BackTab => return Action::PrevCategory,
        KeyCode::PageDown => return Action::ScrollDetailDown,
        KeyCode::PageUp => return Action::ScrollDetailUp,
        KeyCode::Down if key.modifiers.contains(KeyModifiers::SHIFT) => {
            return Action::ScrollDetailDown
        }
        KeyCode::Up if key.modifiers.contains(KeyModifiers::SHIFT) => return Action::ScrollDetailUp,
        KeyCode::Up => return Action::SelectPrev,
        KeyCode::Down => return Action::SelectNext,
        _ => {}
    }

    if search_focused {
        return match key.code {
            KeyCode::Esc => Action::ClearSearch,
            KeyCode::Enter => Action::BlurSearch,
            KeyCode::Backspace => Action::DeleteBackward,
            KeyCode::Char(c) if !command => Action::InsertChar(c),
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('/') => Action::FocusSearch,
        KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Char('k') => Action::SelectPrev,
        KeyCode::Char('g') | KeyCode::Home => Action::SelectFirst,
        KeyCode::Char('G') | KeyCode::End => Action::SelectLast,
        KeyCode::Char('l') | KeyCode::Right => Action::NextCategory,
        KeyCode::Char('h') | KeyCode::Left => Action::PrevCategory,
        KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('y') => Action::CopySelected,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_focus_search_shortcut() {
        assert_eq!(resolve(ctrl('k'), false), Action::FocusSearch);
        assert_eq!(resolve(ctrl('k'), true), Action::FocusSearch);
        assert_eq!(
            resolve(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER), false),
            Action::FocusSearch
        );
        assert_eq!(resolve(key(KeyCode::Char('/')), false), Action::FocusSearch);
    }

    #[test]
    fn test_escape_clears_only_when_focused() {
        assert_eq!(resolve(key(KeyCode::Esc), true), Action::ClearSearch);
        assert_eq!(resolve(key(KeyCode::Esc), false), Action::None);
    }

    #[test]
    fn test_typing_goes_to_search_when_focused() {
        assert_eq!(resolve(key(KeyCode::Char('q')), true), Action::InsertChar('q'));
        assert_eq!(
            resolve(KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT), true),
            Action::InsertChar('Q')
        );
        assert_eq!(resolve(key(KeyCode::Char('q')), false), Action::Quit);
        assert_eq!(resolve(key(KeyCode::Backspace), true), Action::DeleteBackward);
    }

    #[test]
    fn test_navigation_and_copy() {
        assert_eq!(resolve(key(KeyCode::Down), true), Action::SelectNext);
        assert_eq!(resolve(key(KeyCode::Char('j')), false), Action::SelectNext);
        assert_eq!(resolve(key(KeyCode::Tab), false), Action::NextCategory);
        assert_eq!(resolve(key(KeyCode::BackTab), true), Action::PrevCategory);
        assert_eq!(resolve(key(KeyCode::Enter), false), Action::CopySelected);
        assert_eq!(resolve(key(KeyCode::Enter), true), Action::BlurSearch);
    }

    #[test]
    fn test_detail_scroll_keys() {
        assert_eq!(resolve(key(KeyCode::PageDown), false), Action::ScrollDetailDown);
        assert_eq!(resolve(key(KeyCode::PageUp), true), Action::ScrollDetailUp);
        assert_eq!(
            resolve(KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT), false),
            Action::ScrollDetailDown
        );
        assert_eq!(
            resolve(KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT), true),
            Action::ScrollDetailUp
        );
    }

    #[test]
    fn test_ctrl_c_quits_in_both_modes() {
        assert_eq!(resolve(ctrl('c'), false), Action::Quit);
        assert_eq!(resolve(ctrl('c'), true), Action::Quit);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = ctrl('k');
        event.kind = KeyEventKind::Release;
        assert_eq!(resolve(event, false), Action::None);
    }
}
