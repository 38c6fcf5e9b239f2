use crate::client::SearchClient;
use crate::prefs::{PreferenceStore, DEFAULT_SEARCH_TERM, SEARCH_TERM_KEY};
use crate::story::{StoriesAction, StoriesState, Story};
use crate::tui::search::SearchInput;
use crate::tui::table::{SortColumn, SortOrder, TableState};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Outcome of one background search request.
///
/// `seq` identifies the submit that produced it; the UI loop drops any
/// outcome whose `seq` is not the most recent, so a slow superseded
/// request can never overwrite a newer result.
pub struct FetchOutcome {
    pub seq: u64,
    pub result: crate::error::Result<Vec<Story>>,
}

pub struct App {
    // Data
    pub stories: StoriesState,
    /// Display order: indices into `stories.data`, permuted by the active
    /// sort. The reducer data itself is never reordered.
    pub view: Vec<usize>,

    // Sub-states
    pub search: SearchInput,
    pub table: TableState,

    // Fetch orchestration
    client: Arc<SearchClient>,
    latest_seq: u64,
    outcome_tx: Sender<FetchOutcome>,
    outcome_rx: Receiver<FetchOutcome>,

    // Preferences
    prefs: Box<dyn PreferenceStore>,
    persisted_term: String,

    pub status_message: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: Arc<SearchClient>, prefs: Box<dyn PreferenceStore>) -> Self {
        let term = prefs.load(SEARCH_TERM_KEY, DEFAULT_SEARCH_TERM);
        let (outcome_tx, outcome_rx) = channel();

        let mut app = Self {
            stories: StoriesState::default(),
            view: Vec::new(),
            search: SearchInput::with_term(term.clone()),
            table: TableState::default(),
            client,
            latest_seq: 0,
            outcome_tx,
            outcome_rx,
            prefs,
            persisted_term: term,
            status_message: "Ready".to_string(),
            should_quit: false,
        };

        // Fetch the persisted term on startup, like a fresh page load.
        app.submit_search();
        app
    }

    pub fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend<Error = std::io::Error>>,
    ) -> crate::error::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    self.handle_key(key);
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_outcomes();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Submit the current search term: persist it if it changed, then
    /// either clear the list (empty term) or fire one background request.
    pub fn submit_search(&mut self) {
        let term = self.search.term.clone();

        // Only a changed term is written back, so startup never re-writes
        // the value it just read.
        if term != self.persisted_term {
            match self.prefs.save(SEARCH_TERM_KEY, &term) {
                Ok(()) => self.persisted_term = term.clone(),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to persist search term");
                    self.status_message = format!("Could not save preferences: {e}");
                }
            }
        }

        if term.is_empty() {
            // An empty submit never touches the network; it resets to a
            // clean idle list instead of wedging in a loading state.
            self.dispatch(StoriesAction::Clear);
            self.status_message = "Cleared".to_string();
            return;
        }

        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.dispatch(StoriesAction::FetchInit);
        self.status_message = format!("Searching for '{term}'...");
        tracing::info!(seq, %term, "search submitted");

        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        thread::spawn(move || {
            let result = client.search(&term);
            let _ = tx.send(FetchOutcome { seq, result });
        });
    }

    fn process_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.handle_outcome(outcome);
        }
    }

    fn handle_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.seq != self.latest_seq {
            tracing::debug!(
                seq = outcome.seq,
                latest = self.latest_seq,
                "dropping stale search response"
            );
            return;
        }

        match outcome.result {
            Ok(stories) => {
                self.status_message = format!("{} stories", stories.len());
                self.dispatch(StoriesAction::FetchSuccess(stories));
                self.table.selected = if self.view.is_empty() { None } else { Some(0) };
                self.table.scroll_offset = 0;
            }
            Err(e) => {
                tracing::warn!(error = %e, "search request failed");
                self.status_message = e.to_string();
                self.dispatch(StoriesAction::FetchFailure);
            }
        }
    }

    /// Run one reducer transition and refresh the derived view order.
    fn dispatch(&mut self, action: StoriesAction) {
        let state = std::mem::take(&mut self.stories);
        self.stories = state.reduce(action);
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        self.view = (0..self.stories.data.len()).collect();
        let data = &self.stories.data;
        match self.table.sort_column {
            SortColumn::Relevance => {}
            SortColumn::Title => self.view.sort_by(|&a, &b| {
                data[a]
                    .title
                    .to_lowercase()
                    .cmp(&data[b].title.to_lowercase())
            }),
            SortColumn::Author => self.view.sort_by(|&a, &b| {
                data[a]
                    .author
                    .to_lowercase()
                    .cmp(&data[b].author.to_lowercase())
            }),
            SortColumn::Comments => self
                .view
                .sort_by_key(|&i| data[i].num_comments),
            SortColumn::Points => self.view.sort_by_key(|&i| data[i].points),
        }
        if self.table.sort_order == SortOrder::Descending {
            self.view.reverse();
        }
        self.table.clamp(self.view.len());
    }

    pub fn selected_story(&self) -> Option<&Story> {
        let idx = *self.view.get(self.table.selected?)?;
        self.stories.data.get(idx)
    }

    fn remove_selected(&mut self) {
        let Some(story) = self.selected_story().cloned() else {
            return;
        };
        self.status_message = format!("Removed '{}'", story.title);
        self.dispatch(StoriesAction::RemoveStory(story));
    }

    fn open_selected(&mut self) {
        let Some(url) = self.selected_story().map(|s| s.url.clone()) else {
            return;
        };
        if url.is_empty() {
            self.status_message = "Story has no link".to_string();
            return;
        }
        match open::that_detached(&url) {
            Ok(()) => self.status_message = format!("Opened {url}"),
            Err(e) => {
                tracing::warn!(error = %e, %url, "failed to open browser");
                self.status_message = format!("Could not open link: {e}");
            }
        }
    }

    fn yank_selected(&mut self) {
        let Some(url) = self.selected_story().map(|s| s.url.clone()) else {
            return;
        };
        if url.is_empty() {
            self.status_message = "Story has no link".to_string();
            return;
        }
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url)) {
            Ok(()) => self.status_message = "Link copied".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                self.status_message = format!("Could not copy link: {e}");
            }
        }
    }

    fn handle_sort(&mut self, column: SortColumn) {
        if self.table.sort_column == column {
            self.table.sort_order = self.table.sort_order.toggled();
        } else {
            self.table.sort_column = column;
            self.table.sort_order = SortOrder::Ascending;
        }
        self.rebuild_view();
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if self.search.focused && !self.search.term.is_empty() {
                    self.search.clear();
                } else if self.search.focused {
                    self.search.focused = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        if self.search.focused {
            self.handle_search_key(key);
        } else {
            self.handle_table_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.submit_search();
                self.search.focused = false;
            }
            KeyCode::Char(c) => self.search.insert(c),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.home(),
            KeyCode::End => self.search.end(),
            KeyCode::Tab | KeyCode::Down => self.search.focused = false,
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let total = self.view.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::PageUp => self.table.page_up(),
            KeyCode::PageDown => self.table.page_down(total),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(total),

            KeyCode::Tab | KeyCode::Char('/') => self.search.focused = true,

            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
            KeyCode::Char('y') => self.yank_selected(),
            KeyCode::Delete | KeyCode::Char('x') => self.remove_selected(),
            KeyCode::Char('r') => self.submit_search(),

            // Sort columns
            KeyCode::F(1) => self.handle_sort(SortColumn::Title),
            KeyCode::F(2) => self.handle_sort(SortColumn::Author),
            KeyCode::F(3) => self.handle_sort(SortColumn::Comments),
            KeyCode::F(4) => self.handle_sort(SortColumn::Points),
            KeyCode::F(5) => self.handle_sort(SortColumn::Relevance),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::error::{HnSearchError, Result};
    use crate::prefs::MemoryPrefs;

    /// Preference double that counts writes, to pin down the
    /// only-write-on-change behavior.
    #[derive(Default)]
    struct CountingPrefs {
        inner: MemoryPrefs,
        saves: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl PreferenceStore for CountingPrefs {
        fn load(&self, key: &str, default: &str) -> String {
            self.inner.load(key, default)
        }

        fn save(&mut self, key: &str, value: &str) -> Result<()> {
            self.saves
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.inner.save(key, value)
        }
    }

    fn test_client() -> Arc<SearchClient> {
        // Unroutable endpoint; requests fail fast and tests never hit the
        // real API.
        Arc::new(
            SearchClient::new(ClientConfig {
                endpoint: "http://127.0.0.1:1/search".to_string(),
                timeout: Duration::from_secs(1),
            })
            .expect("client"),
        )
    }

    fn test_app() -> App {
        App::new(test_client(), Box::<MemoryPrefs>::default())
    }

    fn story(id: &str) -> Story {
        Story {
            object_id: id.to_string(),
            title: format!("story {id}"),
            url: format!("https://example.com/{id}"),
            author: "dang".to_string(),
            num_comments: 1,
            points: 10,
            created_at: None,
        }
    }

    #[test]
    fn startup_fetches_the_default_term() {
        let app = test_app();
        assert_eq!(app.search.term, DEFAULT_SEARCH_TERM);
        assert_eq!(app.latest_seq, 1);
        assert!(app.stories.is_loading);
        assert!(app.search.focused);
    }

    #[test]
    fn success_outcome_applies_and_selects_the_first_row() {
        let mut app = test_app();
        app.handle_outcome(FetchOutcome {
            seq: 1,
            result: Ok(vec![story("1"), story("2")]),
        });
        assert_eq!(app.stories.data.len(), 2);
        assert!(!app.stories.is_loading);
        assert!(!app.stories.is_error);
        assert_eq!(app.table.selected, Some(0));
    }

    #[test]
    fn failure_outcome_sets_error_and_keeps_stale_data() {
        let mut app = test_app();
        app.handle_outcome(FetchOutcome {
            seq: 1,
            result: Ok(vec![story("1")]),
        });

        app.submit_search();
        assert_eq!(app.latest_seq, 2);
        app.handle_outcome(FetchOutcome {
            seq: 2,
            result: Err(HnSearchError::MalformedResponse("boom".into())),
        });
        assert!(app.stories.is_error);
        assert!(!app.stories.is_loading);
        assert_eq!(app.stories.data.len(), 1);
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut app = test_app();
        app.submit_search(); // seq 2 supersedes the startup fetch
        assert_eq!(app.latest_seq, 2);

        app.handle_outcome(FetchOutcome {
            seq: 1,
            result: Ok(vec![story("1")]),
        });
        // The superseded response never reaches the reducer.
        assert!(app.stories.is_loading);
        assert!(app.stories.data.is_empty());

        app.handle_outcome(FetchOutcome {
            seq: 2,
            result: Ok(vec![story("2")]),
        });
        assert!(!app.stories.is_loading);
        assert_eq!(app.stories.data[0].object_id, "2");
    }

    #[test]
    fn search_then_remove_round_trip() {
        let mut app = test_app();
        app.handle_outcome(FetchOutcome {
            seq: 1,
            result: Ok(vec![story("1"), story("2")]),
        });

        // Unfocus the search bar so 'x' reaches the table.
        app.search.focused = false;
        app.table.selected = Some(0);
        app.handle_key(KeyEvent::from(KeyCode::Char('x')));

        assert_eq!(app.stories.data.len(), 1);
        assert_eq!(app.stories.data[0].object_id, "2");
        assert_eq!(app.table.selected, Some(0));
    }

    #[test]
    fn empty_submit_clears_without_a_request() {
        let mut app = test_app();
        app.handle_outcome(FetchOutcome {
            seq: 1,
            result: Ok(vec![story("1")]),
        });

        app.search.clear();
        app.submit_search();

        assert_eq!(app.latest_seq, 1, "no new request may be issued");
        assert_eq!(app.stories, StoriesState::default());
        assert_eq!(app.table.selected, None);
    }

    #[test]
    fn term_is_persisted_only_when_it_changes() {
        let saves = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let prefs = CountingPrefs {
            inner: MemoryPrefs::default(),
            saves: Arc::clone(&saves),
        };
        let mut app = App::new(test_client(), Box::new(prefs));

        // Startup submit re-uses the loaded value: no write.
        assert_eq!(saves.load(std::sync::atomic::Ordering::SeqCst), 0);

        app.search.clear();
        for c in "rust".chars() {
            app.search.insert(c);
        }
        app.submit_search();
        assert_eq!(saves.load(std::sync::atomic::Ordering::SeqCst), 1);

        // Resubmitting the same term is not a change.
        app.submit_search();
        assert_eq!(saves.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn sorting_permutes_the_view_not_the_data() {
        let mut app = test_app();
        let mut a = story("1");
        a.points = 5;
        let mut b = story("2");
        b.points = 50;
        app.handle_outcome(FetchOutcome {
            seq: 1,
            result: Ok(vec![a.clone(), b.clone()]),
        });

        app.handle_sort(SortColumn::Points);
        app.handle_sort(SortColumn::Points); // toggle to descending
        assert_eq!(app.view, vec![1, 0]);
        // Reducer data keeps the API order.
        assert_eq!(app.stories.data, vec![a, b]);
    }
}
