//! End-to-end flows: catalog file on disk, key events in, rendered screen out.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use snipgrid::app::{App, COPY_FAILURE_MESSAGE, COPY_SUCCESS_MESSAGE, LOAD_FAILURE_MESSAGE};
use snipgrid::clipboard::{Clipboard, ClipboardBackend, ClipboardError, COPIED_LABEL, COPY_LABEL};
use snipgrid::config::Config;
use snipgrid::model::{load_catalog, CatalogSource};
use snipgrid::tui;
use snipgrid::view::model::{EMPTY_TITLE, PREVIEW_LABEL};
use snipgrid::view::Theme;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;

const CATALOG: &str = r#"{
  "categories": [
    {
      "id": "git",
      "name": "Git",
      "snippets": [
        {"title": "Undo commit", "description": "Keep changes staged", "markdown": "git reset --soft HEAD~1", "priority": "medium"},
        {"title": "Stash", "description": "Shelve work", "markdown": "git stash push -m wip", "priority": "high"}
      ]
    },
    {
      "id": "math",
      "name": "Math",
      "snippets": [
        {"title": "Euler", "description": "Identity", "markdown": "$e^{i\\pi} + 1 = 0$", "priority": "low"}
      ]
    }
  ]
}"#;

/// Clipboard backend shared with the test body.
#[derive(Clone, Default)]
struct SharedClipboard {
    writes: Arc<Mutex<Vec<String>>>,
    broken: bool,
}

impl ClipboardBackend for SharedClipboard {
    fn name(&self) -> &'static str {
        "shared"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct Harness {
    app: App,
    clock: Instant,
    terminal: Terminal<TestBackend>,
    _dir: TempDir,
}

impl Harness {
    fn new(clipboard: SharedClipboard) -> Self {
        Self::with_catalog(CATALOG, clipboard)
    }

    fn with_catalog(json: &str, clipboard: SharedClipboard) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snippets.json");
        std::fs::write(&path, json).unwrap();
        Self::with_source(CatalogSource::Path(path), clipboard, dir)
    }

    fn with_source(source: CatalogSource, clipboard: SharedClipboard, dir: TempDir) -> Self {
        let clock = Instant::now();
        let mut app = App::new(
            &Config::default(),
            Clipboard::new(Some(Box::new(clipboard)), None),
        );
        app.load(load_catalog(&source), clock);
        Self {
            app,
            clock,
            terminal: Terminal::new(TestBackend::new(110, 32)).unwrap(),
            _dir: dir,
        }
    }

    fn advance(&mut self, ms: u64) {
        self.clock += Duration::from_millis(ms);
        self.app.tick(self.clock);
    }

    fn key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.app.handle_key(KeyEvent::new(code, modifiers), self.clock);
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(KeyCode::Char(c), KeyModifiers::NONE);
            self.advance(20);
        }
    }

    fn screen(&mut self) -> String {
        let page = self.app.page(self.clock);
        self.terminal
            .draw(|frame| tui::draw(frame, &page, &Theme::default()))
            .unwrap();
        let buffer = self.terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn visible_titles(&self) -> Vec<String> {
        self.app
            .state()
            .filtered()
            .map(|(_, s)| s.title.clone())
            .collect()
    }
}

#[test]
fn test_initial_screen_sorted_by_priority() {
    let mut h = Harness::new(SharedClipboard::default());
    assert_eq!(h.visible_titles(), vec!["Stash", "Undo commit", "Euler"]);

    let screen = h.screen();
    assert!(screen.contains("Snippets (3)"));
    assert!(screen.contains("git stash push -m wip"));
}

#[test]
fn test_ctrl_k_search_is_debounced() {
    let mut h = Harness::new(SharedClipboard::default());
    h.key(KeyCode::Char('k'), KeyModifiers::CONTROL);
    assert!(h.app.search().is_focused());

    h.type_text("EULER");
    assert_eq!(h.visible_titles().len(), 3);

    h.advance(300);
    assert_eq!(h.visible_titles(), vec!["Euler"]);
    assert!(h.screen().contains("EULER"));
}

#[test]
fn test_escape_clears_search() {
    let mut h = Harness::new(SharedClipboard::default());
    h.key(KeyCode::Char('k'), KeyModifiers::CONTROL);
    h.type_text("zzz");
    h.advance(300);
    assert!(h.screen().contains(EMPTY_TITLE));

    h.key(KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(h.app.search().text(), "");
    assert_eq!(h.visible_titles().len(), 3);
}

#[test]
fn test_escape_outside_search_does_nothing() {
    let mut h = Harness::new(SharedClipboard::default());
    h.key(KeyCode::Char('k'), KeyModifiers::CONTROL);
    h.type_text("stash");
    h.advance(300);
    h.key(KeyCode::Enter, KeyModifiers::NONE);
    assert!(!h.app.search().is_focused());

    h.key(KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(h.app.search().text(), "stash");
    assert_eq!(h.visible_titles(), vec!["Stash"]);
}

#[test]
fn test_tab_cycles_categories() {
    let mut h = Harness::new(SharedClipboard::default());
    h.key(KeyCode::Tab, KeyModifiers::NONE);
    assert_eq!(h.visible_titles(), vec!["Stash", "Undo commit"]);
    h.key(KeyCode::Tab, KeyModifiers::NONE);
    assert_eq!(h.visible_titles(), vec!["Euler"]);
    h.key(KeyCode::BackTab, KeyModifiers::SHIFT);
    assert_eq!(h.visible_titles().len(), 2);
}

#[test]
fn test_copy_selected_shows_feedback_then_reverts() {
    let clipboard = SharedClipboard::default();
    let writes = clipboard.writes.clone();
    let mut h = Harness::new(clipboard);

    h.key(KeyCode::Down, KeyModifiers::NONE);
    h.key(KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(*writes.lock().unwrap(), vec!["git reset --soft HEAD~1"]);

    let screen = h.screen();
    assert!(screen.contains(&format!("[{COPIED_LABEL}]")));
    assert!(screen.contains(COPY_SUCCESS_MESSAGE));

    h.advance(2000);
    let screen = h.screen();
    assert!(!screen.contains(&format!("[{COPIED_LABEL}]")));
    assert!(screen.contains(&format!("[{COPY_LABEL}]")));

    h.advance(1500);
    assert!(h.app.toasts().is_empty());
}

#[test]
fn test_copy_failure_shows_error_toast() {
    let mut h = Harness::new(SharedClipboard {
        broken: true,
        ..SharedClipboard::default()
    });
    h.key(KeyCode::Char('c'), KeyModifiers::NONE);

    let screen = h.screen();
    assert!(screen.contains(COPY_FAILURE_MESSAGE));
    assert!(!screen.contains(&format!("[{COPIED_LABEL}]")));
}

#[test]
fn test_missing_catalog_shows_error_and_empty_state() {
    let dir = TempDir::new().unwrap();
    let missing = PathBuf::from(dir.path()).join("absent.json");
    let mut h = Harness::with_source(
        CatalogSource::Path(missing),
        SharedClipboard::default(),
        dir,
    );

    assert!(h.app.state().catalog().is_empty());
    let screen = h.screen();
    assert!(screen.contains(LOAD_FAILURE_MESSAGE));
    assert!(screen.contains(EMPTY_TITLE));
}

#[test]
fn test_quit_keys() {
    let mut h = Harness::new(SharedClipboard::default());
    h.key(KeyCode::Char('q'), KeyModifiers::NONE);
    assert!(h.app.should_quit());

    let mut h = Harness::new(SharedClipboard::default());
    h.key(KeyCode::Char('k'), KeyModifiers::CONTROL);
    h.key(KeyCode::Char('q'), KeyModifiers::NONE);
    assert!(!h.app.should_quit(), "q typed into search must not quit");
    h.key(KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert!(h.app.should_quit());
}

/// A snippet whose raw markdown alone is taller than the detail pane.
fn tall_catalog() -> String {
    let rows: Vec<String> = (1..40).map(|i| format!("row {i}")).collect();
    let markdown = format!("**bold head**\\n{}", rows.join("\\n"));
    format!(
        r#"{{"categories":[{{"id":"notes","name":"Notes","snippets":[
            {{"title":"Long notes","description":"Many rows","markdown":"{markdown}","priority":"high"}},
            {{"title":"Short","description":"One row","markdown":"tiny","priority":"low"}}
        ]}}]}}"#
    )
}

#[test]
fn test_page_down_reaches_rendered_preview() {
    let mut h = Harness::with_catalog(&tall_catalog(), SharedClipboard::default());
    let screen = h.screen();
    assert!(screen.contains("**bold head**"));
    assert!(!screen.contains(PREVIEW_LABEL));

    for _ in 0..4 {
        h.key(KeyCode::PageDown, KeyModifiers::NONE);
    }
    let screen = h.screen();
    assert!(screen.contains(PREVIEW_LABEL));
    assert!(screen.contains("bold head"));
    assert!(!screen.contains("**bold head**"));

    h.key(KeyCode::PageUp, KeyModifiers::NONE);
    h.key(KeyCode::Up, KeyModifiers::SHIFT);
    assert_eq!(h.app.detail_scroll(), 20);
}

#[test]
fn test_selection_change_resets_detail_scroll() {
    let mut h = Harness::with_catalog(&tall_catalog(), SharedClipboard::default());
    h.key(KeyCode::Down, KeyModifiers::SHIFT);
    assert_eq!(h.app.detail_scroll(), 10);

    h.key(KeyCode::Down, KeyModifiers::NONE);
    assert_eq!(h.app.detail_scroll(), 0);
    h.key(KeyCode::Up, KeyModifiers::NONE);
    assert_eq!(h.app.detail_scroll(), 0);
    assert!(h.screen().contains("**bold head**"));
}

#[test]
fn test_ctrl_c_quits_while_searching() {
    let mut h = Harness::new(SharedClipboard::default());
    h.key(KeyCode::Char('k'), KeyModifiers::CONTROL);
    h.type_text("sta");
    h.key(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(h.app.should_quit());
    assert_eq!(h.app.search().text(), "sta");
}
