use std::time::Duration;

use crate::{book::Book, error::ServiceError, query::SearchMode};

pub const NO_RESULTS_MESSAGE: &str = "No books found. Try a different search term.";

/// What the search screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<Book>),
    Empty,
    Failed(String),
}

impl SearchState {
    pub fn books(&self) -> &[Book] {
        match self {
            SearchState::Success(books) => books.as_slice(),
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SearchState::Empty => Some(NO_RESULTS_MESSAGE),
            SearchState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub query: String,
    pub mode: SearchMode,
}

/// Work the session asks its driver to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call `debounce_elapsed(generation)` after `delay`. Replaces any
    /// timer scheduled earlier.
    ScheduleDebounce { generation: u64, delay: Duration },
    /// Run the search and report back through `fetch_completed`.
    Fetch(FetchRequest),
}

#[derive(Debug)]
pub struct SearchSession {
    text: String,
    mode: SearchMode,
    state: SearchState,
    debounce: Duration,
    generation: u64,
    next_request: u64,
    in_flight: Option<RequestId>,
}

impl SearchSession {
    pub fn new(debounce: Duration) -> Self {
        Self {
            text: String::new(),
            mode: SearchMode::default(),
            state: SearchState::Idle,
            debounce,
            generation: 0,
            next_request: 0,
            in_flight: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn input_changed(&mut self, text: impl Into<String>) -> Effect {
        self.text = text.into();
        self.rearm()
    }

    /// Switching modes searches the current text again once the input is
    /// quiet.
    pub fn mode_changed(&mut self, mode: SearchMode) -> Option<Effect> {
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        Some(self.rearm())
    }

    pub fn debounce_elapsed(&mut self, generation: u64) -> Option<Effect> {
        if generation != self.generation {
            return None;
        }
        self.start_fetch()
    }

    /// Drops the text and results at once, without waiting for a timer.
    pub fn clear(&mut self) {
        self.text.clear();
        self.generation += 1;
        self.reset();
    }

    /// Runs the current search again immediately.
    pub fn retry(&mut self) -> Option<Effect> {
        if self.text.trim().is_empty() {
            return None;
        }
        self.generation += 1;
        self.start_fetch()
    }

    /// Applies a finished fetch. Returns `false` when the response belongs to
    /// a request that has since been superseded; it is then ignored.
    pub fn fetch_completed(
        &mut self,
        id: RequestId,
        result: Result<Vec<Book>, ServiceError>,
    ) -> bool {
        if self.in_flight != Some(id) {
            tracing::warn!("discarding stale search response {:?}", id);
            return false;
        }
        self.in_flight = None;
        self.state = match result {
            Ok(books) if books.is_empty() => SearchState::Empty,
            Ok(books) => SearchState::Success(books),
            Err(e) => SearchState::Failed(e.to_string()),
        };
        true
    }

    fn rearm(&mut self) -> Effect {
        self.generation += 1;
        Effect::ScheduleDebounce {
            generation: self.generation,
            delay: self.debounce,
        }
    }

    fn reset(&mut self) {
        self.in_flight = None;
        self.state = SearchState::Idle;
    }

    fn start_fetch(&mut self) -> Option<Effect> {
        let query = self.text.trim();
        if query.is_empty() {
            self.reset();
            return None;
        }

        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.in_flight = Some(id);
        self.state = SearchState::Loading;
        tracing::debug!("search {:?}: {:?} ({})", id, query, self.mode);

        Some(Effect::Fetch(FetchRequest {
            id,
            query: query.to_string(),
            mode: self.mode,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::normalize;

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn books(n: usize) -> Vec<Book> {
        (0..n).map(|_| normalize(None)).collect()
    }

    fn scheduled(effect: Effect) -> u64 {
        match effect {
            Effect::ScheduleDebounce { generation, delay } => {
                assert_eq!(delay, DEBOUNCE);
                generation
            }
            other => panic!("expected debounce, got {:?}", other),
        }
    }

    fn fetched(effect: Option<Effect>) -> FetchRequest {
        match effect {
            Some(Effect::Fetch(request)) => request,
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_only_latest_keystroke_fetches() {
        let mut session = SearchSession::new(DEBOUNCE);
        let first = scheduled(session.input_changed("d"));
        let second = scheduled(session.input_changed("du"));
        let last = scheduled(session.input_changed("  dune "));

        assert_eq!(session.debounce_elapsed(first), None);
        assert_eq!(session.debounce_elapsed(second), None);
        assert_eq!(session.state(), &SearchState::Idle);

        let request = fetched(session.debounce_elapsed(last));
        assert_eq!(request.query, "dune");
        assert_eq!(request.mode, SearchMode::General);
        assert!(session.state().is_loading());
    }

    #[test]
    fn test_blank_input_clears_without_fetch() {
        let mut session = SearchSession::new(DEBOUNCE);
        let generation = scheduled(session.input_changed("dune"));
        let request = fetched(session.debounce_elapsed(generation));
        assert!(session.fetch_completed(request.id, Ok(books(2))));
        assert_eq!(session.state().books().len(), 2);

        let generation = scheduled(session.input_changed("   "));
        assert_eq!(session.debounce_elapsed(generation), None);
        assert_eq!(session.state(), &SearchState::Idle);
    }

    #[test]
    fn test_empty_and_failed_results() {
        let mut session = SearchSession::new(DEBOUNCE);
        let generation = scheduled(session.input_changed("zzzz"));
        let request = fetched(session.debounce_elapsed(generation));
        session.fetch_completed(request.id, Ok(vec![]));
        assert_eq!(session.state(), &SearchState::Empty);
        assert_eq!(session.state().message(), Some(NO_RESULTS_MESSAGE));

        let request = fetched(session.retry());
        session.fetch_completed(request.id, Err(ServiceError::Search));
        assert_eq!(
            session.state().message(),
            Some("Failed to search books. Please check your connection.")
        );
        assert!(session.state().books().is_empty());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = SearchSession::new(DEBOUNCE);
        let generation = scheduled(session.input_changed("slow"));
        let slow = fetched(session.debounce_elapsed(generation));
        let generation = scheduled(session.input_changed("fast"));
        let fast = fetched(session.debounce_elapsed(generation));
        assert!(fast.id > slow.id);

        assert!(session.fetch_completed(fast.id, Ok(books(1))));
        assert!(!session.fetch_completed(slow.id, Ok(books(3))));
        assert_eq!(session.state().books().len(), 1);
    }

    #[test]
    fn test_clear_cancels_timer_and_in_flight() {
        let mut session = SearchSession::new(DEBOUNCE);
        let generation = scheduled(session.input_changed("dune"));
        let request = fetched(session.debounce_elapsed(generation));

        let pending = scheduled(session.input_changed("dune messiah"));
        session.clear();
        assert_eq!(session.text(), "");
        assert_eq!(session.state(), &SearchState::Idle);
        assert_eq!(session.debounce_elapsed(pending), None);
        assert!(!session.fetch_completed(request.id, Ok(books(1))));
        assert_eq!(session.state(), &SearchState::Idle);
        assert_eq!(session.retry(), None);
    }

    #[test]
    fn test_mode_change_searches_again() {
        let mut session = SearchSession::new(DEBOUNCE);
        assert_eq!(session.mode_changed(SearchMode::General), None);

        session.input_changed("herbert");
        let generation = scheduled(session.mode_changed(SearchMode::Author).unwrap());
        let request = fetched(session.debounce_elapsed(generation));
        assert_eq!(request.query, "herbert");
        assert_eq!(request.mode, SearchMode::Author);
    }

    #[test]
    fn test_retry_supersedes_pending_timer() {
        let mut session = SearchSession::new(DEBOUNCE);
        let generation = scheduled(session.input_changed("dune"));
        let request = fetched(session.retry());
        assert_eq!(request.query, "dune");
        assert_eq!(session.debounce_elapsed(generation), None);
    }
}
