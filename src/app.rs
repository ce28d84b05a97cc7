//! Application controller.
//!
//! [`App`] owns the state and reacts to actions and clock ticks. It never
//! touches the terminal, so it can be driven directly from tests: feed it
//! key events with explicit timestamps and inspect the resulting page.

use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::clipboard::{Clipboard, CopyButtons};
use crate::config::Config;
use crate::filter::CategoryFilter;
use crate::input::{resolve, Action, SearchInput};
use crate::model::{Catalog, CatalogError, SnippetId};
use crate::primitives::debounce::Debouncer;
use crate::state::AppState;
use crate::toast::ToastStack;
use crate::tui::detail_text;
use crate::view::{build_page, PageSources, PageView, Theme};

pub const COPY_SUCCESS_MESSAGE: &str = "Copied to clipboard!";
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy";
pub const LOAD_FAILURE_MESSAGE: &str = "Error loading snippets";

/// Rows moved per detail scroll step
pub const DETAIL_SCROLL_STEP: u16 = 10;

#[derive(Debug)]
pub struct App {
    state: AppState,
    search: SearchInput,
    debounce: Debouncer<String>,
    buttons: CopyButtons,
    toasts: ToastStack,
    clipboard: Clipboard,
    /// Position of the selected card within the filtered list
    selected: usize,
    /// Rows of the detail pane scrolled off the top; reset on every selection change
    detail_scroll: u16,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, clipboard: Clipboard) -> Self {
        Self {
            state: AppState::default(),
            search: SearchInput::default(),
            debounce: Debouncer::new(config.search_debounce()),
            buttons: CopyButtons::new(config.copy_feedback()),
            toasts: ToastStack::new(config.toast_duration(), config.toast_exit()),
            clipboard,
            selected: 0,
            detail_scroll: 0,
            should_quit: false,
        }
    }

    /// Install a loaded catalog, or report the load failure. On failure the
    /// list stays empty.
    pub fn load(&mut self, result: Result<Catalog, CatalogError>, now: Instant) {
        match result {
            Ok(catalog) => {
                self.state.replace_catalog(catalog);
                self.buttons.clear();
                self.selected = 0;
                self.detail_scroll = 0;
            }
            Err(e) => {
                tracing::error!("Error loading snippets: {}", e);
                self.toasts.error(LOAD_FAILURE_MESSAGE, now);
            }
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected_id(&self) -> Option<SnippetId> {
        self.state.filtered_ids().get(self.selected).copied()
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    /// The page as it should be drawn at `now`.
    pub fn page(&self, now: Instant) -> PageView<'_> {
        build_page(PageSources {
            state: &self.state,
            search: &self.search,
            buttons: &self.buttons,
            toasts: &self.toasts,
            selected: self.selected_id(),
            detail_scroll: self.detail_scroll,
            now,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let action = resolve(key, self.search.is_focused());
        self.handle_action(action, now);
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::FocusSearch => self.search.focus(),
            Action::BlurSearch => self.search.blur(),
            Action::ClearSearch => {
                self.search.clear();
                // A pending keystroke must not bring the old query back
                self.debounce.cancel();
                self.apply_query(String::new());
            }
            Action::InsertChar(c) => {
                self.search.insert(c);
                self.debounce.schedule(self.search.text().to_string(), now);
            }
            Action::DeleteBackward => {
                self.search.delete_backward();
                self.debounce.schedule(self.search.text().to_string(), now);
            }
            Action::NextCategory => self.cycle_category(1),
            Action::PrevCategory => self.cycle_category(-1),
            Action::SelectNext => self.move_selection(1),
            Action::SelectPrev => self.move_selection(-1),
            Action::SelectFirst => self.select(0),
            Action::SelectLast => self.select(self.state.filtered_ids().len().saturating_sub(1)),
            Action::ScrollDetailDown => self.scroll_detail(i32::from(DETAIL_SCROLL_STEP), now),
            Action::ScrollDetailUp => self.scroll_detail(-i32::from(DETAIL_SCROLL_STEP), now),
            Action::CopySelected => {
                if let Some(id) = self.selected_id() {
                    self.copy_snippet(id, now);
                }
            }
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }
    }

    /// Advance timers: run a due search, revert copy buttons, expire toasts.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debounce.poll(now) {
            self.apply_query(query);
        }
        self.buttons.tick(now);
        self.toasts.tick(now);
    }

    /// The earliest moment something on screen changes without input.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        [
            self.debounce.deadline(),
            self.buttons.next_deadline(),
            self.toasts.next_deadline(now),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        let keep = self.selected_id();
        self.state.set_category(category);
        self.restore_selection(keep);
    }

    /// Copy a snippet's markdown and give feedback. Never fails outward.
    pub fn copy_snippet(&mut self, id: SnippetId, now: Instant) {
        let Some(snippet) = self.state.catalog().get(id) else {
            return;
        };
        match self.clipboard.copy(&snippet.markdown) {
            Ok(_) => {
                self.buttons.mark_copied(id, now);
                self.toasts.success(COPY_SUCCESS_MESSAGE, now);
            }
            Err(e) => {
                tracing::error!("Copy failed: {}", e);
                self.toasts.error(COPY_FAILURE_MESSAGE, now);
            }
        }
    }

    fn apply_query(&mut self, query: String) {
        let keep = self.selected_id();
        self.state.set_query(query);
        self.restore_selection(keep);
    }

    fn cycle_category(&mut self, step: isize) {
        let cycle = self.state.category_cycle();
        let current = cycle
            .iter()
            .position(|c| c == self.state.category())
            .unwrap_or(0);
        let len = cycle.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;
        if let Some(category) = cycle.into_iter().nth(next) {
            self.set_category(category);
        }
    }

    fn move_selection(&mut self, step: isize) {
        let len = self.state.filtered_ids().len();
        if len == 0 {
            self.select(0);
            return;
        }
        self.select((self.selected as isize + step).clamp(0, len as isize - 1) as usize);
    }

    /// Keep the same snippet selected across a refilter when it is still
    /// visible, else start from the top.
    fn restore_selection(&mut self, keep: Option<SnippetId>) {
        let index = keep
            .and_then(|id| self.state.filtered_ids().iter().position(|x| *x == id))
            .unwrap_or(0);
        self.select(index);
    }

    fn select(&mut self, index: usize) {
        let before = self.selected_id();
        self.selected = index;
        if self.selected_id() != before {
            self.detail_scroll = 0;
        }
    }

    /// Scroll the detail pane, never past its last unwrapped line. The
    /// renderer clamps again against the real pane size.
    fn scroll_detail(&mut self, delta: i32, now: Instant) {
        let Some(max) = self.detail_line_count(now).map(|n| n.saturating_sub(1)) else {
            self.detail_scroll = 0;
            return;
        };
        let next = (i64::from(self.detail_scroll) + i64::from(delta)).clamp(0, max as i64);
        self.detail_scroll = u16::try_from(next).unwrap_or(u16::MAX);
    }

    fn detail_line_count(&self, now: Instant) -> Option<usize> {
        let id = self.selected_id()?;
        let page = self.page(now);
        let card = page.grid.cards().iter().find(|c| c.id == id)?;
        Some(detail_text(card, &Theme::default()).lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::tests::RecordingBackend;
    use crate::clipboard::{ClipboardBackend, COPIED_LABEL, COPY_LABEL};
    use crate::toast::ToastKind;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    const CATALOG: &str = r#"{"categories":[
        {"id":"git","name":"Git","snippets":[
            {"title":"Stash","description":"Save work","markdown":"git stash","priority":"high"},
            {"title":"Rebase","description":"Rewrite","markdown":"git rebase -i"}
        ]},
        {"id":"sql","name":"SQL","snippets":[
            {"title":"Join","description":"Tables","markdown":"SELECT 1","priority":"low"}
        ]}
    ]}"#;

    fn app_with(fail: bool) -> (App, Rc<RefCell<Vec<String>>>) {
        let writes = Rc::new(RefCell::new(Vec::new()));
        let backend: Box<dyn ClipboardBackend> = Box::new(RecordingBackend {
            name: "test",
            fail,
            writes: writes.clone(),
        });
        let mut app = App::new(&Config::default(), Clipboard::new(Some(backend), None));
        app.load(Catalog::from_json_str(CATALOG), Instant::now());
        (app, writes)
    }

    fn titles(app: &App) -> Vec<String> {
        app.state()
            .filtered()
            .map(|(_, s)| s.title.clone())
            .collect()
    }

    #[test]
    fn test_typing_is_debounced() {
        let (mut app, _) = app_with(false);
        let t0 = Instant::now();
        app.handle_action(Action::FocusSearch, t0);
        for (i, c) in "join".chars().enumerate() {
            app.handle_action(Action::InsertChar(c), t0 + Duration::from_millis(50 * i as u64));
        }

        app.tick(t0 + Duration::from_millis(300));
        assert_eq!(titles(&app).len(), 3, "search ran before the quiet period");

        app.tick(t0 + Duration::from_millis(450));
        assert_eq!(titles(&app), vec!["Join"]);
        assert_eq!(app.state().query(), "join");
    }

    #[test]
    fn test_escape_clears_and_cancels_pending() {
        let (mut app, _) = app_with(false);
        let t0 = Instant::now();
        app.handle_action(Action::FocusSearch, t0);
        app.handle_action(Action::InsertChar('x'), t0);
        app.handle_action(Action::ClearSearch, t0 + Duration::from_millis(10));

        app.tick(t0 + Duration::from_secs(1));
        assert_eq!(app.search().text(), "");
        assert_eq!(app.state().query(), "");
        assert_eq!(titles(&app).len(), 3);
    }

    #[test]
    fn test_category_cycle_wraps() {
        let (mut app, _) = app_with(false);
        let t0 = Instant::now();
        app.handle_action(Action::NextCategory, t0);
        assert_eq!(app.state().category(), &CategoryFilter::from_id("git"));
        app.handle_action(Action::NextCategory, t0);
        assert_eq!(titles(&app), vec!["Join"]);
        app.handle_action(Action::NextCategory, t0);
        assert_eq!(app.state().category(), &CategoryFilter::All);
        app.handle_action(Action::PrevCategory, t0);
        assert_eq!(app.state().category(), &CategoryFilter::from_id("sql"));
    }

    #[test]
    fn test_copy_success_changes_label_then_reverts() {
        let (mut app, writes) = app_with(false);
        let t0 = Instant::now();
        app.handle_action(Action::CopySelected, t0);

        assert_eq!(*writes.borrow(), vec!["git stash"]);
        let id = app.selected_id().unwrap();
        let page = app.page(t0);
        let card = page.grid.cards().iter().find(|c| c.id == id).unwrap();
        assert_eq!(card.copy.label, COPIED_LABEL);
        assert_eq!(page.toasts[0].message, COPY_SUCCESS_MESSAGE);

        let later = t0 + Duration::from_millis(2000);
        app.tick(later);
        let page = app.page(later);
        let card = page.grid.cards().iter().find(|c| c.id == id).unwrap();
        assert_eq!(card.copy.label, COPY_LABEL);
    }

    #[test]
    fn test_copy_failure_keeps_label_and_shows_error() {
        let (mut app, _) = app_with(true);
        let t0 = Instant::now();
        app.handle_action(Action::CopySelected, t0);

        let page = app.page(t0);
        assert!(page.grid.cards().iter().all(|c| c.copy.label == COPY_LABEL));
        assert_eq!(page.toasts.len(), 1);
        assert_eq!(page.toasts[0].kind, ToastKind::Error);
        assert_eq!(page.toasts[0].message, COPY_FAILURE_MESSAGE);
    }

    #[test]
    fn test_load_failure_shows_toast_and_stays_empty() {
        let mut app = App::new(&Config::default(), Clipboard::disabled());
        let t0 = Instant::now();
        app.load(Catalog::from_json_str("{"), t0);

        assert!(app.state().catalog().is_empty());
        let page = app.page(t0);
        assert!(page.grid.is_empty());
        assert_eq!(page.toasts[0].message, LOAD_FAILURE_MESSAGE);
    }

    #[test]
    fn test_selection_survives_refilter() {
        let (mut app, _) = app_with(false);
        let t0 = Instant::now();
        app.handle_action(Action::SelectNext, t0);
        let rebase = app.selected_id();

        app.set_category(CategoryFilter::from_id("git"));
        assert_eq!(app.selected_id(), rebase);

        app.set_category(CategoryFilter::from_id("sql"));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_next_deadline_tracks_debounce() {
        let (mut app, _) = app_with(false);
        let t0 = Instant::now();
        assert_eq!(app.next_deadline(t0), None);

        app.handle_action(Action::FocusSearch, t0);
        app.handle_action(Action::InsertChar('a'), t0);
        assert_eq!(app.next_deadline(t0), Some(t0 + Duration::from_millis(300)));
    }

    #[test]
    fn test_detail_scroll_clamps_and_resets_on_selection() {
        let (mut app, _) = app_with(false);
        let t0 = Instant::now();
        app.handle_action(Action::ScrollDetailUp, t0);
        assert_eq!(app.detail_scroll(), 0);

        // "git stash": description, meta, blank, one raw line, blank, label, one preview line
        app.handle_action(Action::ScrollDetailDown, t0);
        assert_eq!(app.detail_scroll(), 6);
        assert_eq!(app.page(t0).detail_scroll, 6);

        app.handle_action(Action::SelectNext, t0);
        assert_eq!(app.detail_scroll(), 0);

        app.handle_action(Action::ScrollDetailDown, t0);
        app.handle_action(Action::SelectNext, t0);
        app.handle_action(Action::SelectNext, t0);
        assert_eq!(titles(&app)[app.selected], "Join");
        app.handle_action(Action::ScrollDetailDown, t0);
        app.handle_action(Action::SelectLast, t0);
        assert_ne!(app.detail_scroll(), 0, "same card stays scrolled");
        app.handle_action(Action::SelectFirst, t0);
        assert_eq!(app.detail_scroll(), 0);
    }

    #[test]
    fn test_quit() {
        let (mut app, _) = app_with(false);
        app.handle_action(Action::Quit, Instant::now());
        assert!(app.should_quit());
    }
}
