//! Coordinator - sequences API calls, store updates and render calls
//!
//! Every operation is split in two:
//!
//! - `begin` runs synchronously: busy indicator on, phase updated, and a
//!   `'static` future returned that performs the requests.
//! - [`Coordinator::complete`] applies the finished future's outcome.
//!
//! The event loop keeps polling terminal input while requests are in
//! flight. Each `begin` takes a fresh generation number; a completion
//! whose generation is no longer the latest is dropped, so a slow early
//! response can never overwrite a newer one.

use std::sync::Arc;
use std::time::Instant;

use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;

use crate::api::PokemonApi;
use crate::config::ERROR_DISPLAY;
use crate::error::{PokedexError, Result};
use crate::model::DetailRecord;
use crate::store::{PaginationCursor, StateStore};
use crate::tui::View;

const LIST_FAILED: &str = "Failed to load the Pokémon list";
const DETAIL_FAILED: &str = "Failed to load Pokémon details";
const SEARCH_FAILED: &str = "Search failed. Try again in a moment.";

// ─────────────────────────────────────────────────────────────────────────────
// Events and phases
// ─────────────────────────────────────────────────────────────────────────────

/// Abstract input surfaced by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Card activated, by name
    Select(String),
    /// Search submitted, raw term
    Search(String),
    /// Detail surface or backdrop clicked
    Dismiss,
    NextPage,
    PrevPage,
}

/// Which surface a failed operation falls back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    List,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingList,
    LoadingDetail,
    ListView,
    DetailView,
    /// Transient; returns to `resume` once the error banner has expired
    Error { resume: Surface },
}

impl Phase {
    /// The view this phase settles on
    pub fn settled(self) -> Phase {
        match self {
            Phase::Error {
                resume: Surface::List,
            } => Phase::ListView,
            Phase::Error {
                resume: Surface::Detail,
            } => Phase::DetailView,
            other => other,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::LoadingList => write!(f, "LOADING"),
            Self::LoadingDetail => write!(f, "LOADING"),
            Self::ListView => write!(f, "LIST"),
            Self::DetailView => write!(f, "DETAIL"),
            Self::Error { .. } => write!(f, "ERROR"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-flight operations
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Card,
    Search,
}

enum Outcome {
    List(Result<Vec<DetailRecord>>),
    Detail {
        origin: Origin,
        result: Result<DetailRecord>,
    },
}

/// Result of an in-flight operation, tagged with its generation
pub struct Completion {
    generation: u64,
    outcome: Outcome,
}

impl Completion {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Future returned by every `begin`
pub type Pending = BoxFuture<'static, Completion>;

/// Fetch one page of summaries, then every summary's full record concurrently.
///
/// All-or-nothing: the first failing detail fails the whole page.
async fn load_page(api: &dyn PokemonApi, offset: u32, limit: u32) -> Result<Vec<DetailRecord>> {
    let entries = api.fetch_listing(offset, limit).await?;
    try_join_all(entries.iter().map(|e| api.fetch_detail(&e.name))).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Coordinator
// ─────────────────────────────────────────────────────────────────────────────

pub struct Coordinator<V: View> {
    api: Arc<dyn PokemonApi>,
    store: StateStore,
    view: V,
    phase: Phase,
    generation: u64,
    error_since: Option<Instant>,
}

impl<V: View> Coordinator<V> {
    pub fn new(api: Arc<dyn PokemonApi>, view: V) -> Self {
        Self {
            api,
            store: StateStore::new(),
            view,
            phase: Phase::Idle,
            generation: 0,
            error_since: None,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Latest generation handed out
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Initial list load
    pub fn start(&mut self) -> Pending {
        tracing::info!(client = self.api.name(), "Starting Pokédex");
        self.begin_list()
    }

    /// Begin the operation an input event asks for
    pub fn handle(&mut self, event: UiEvent) -> Pending {
        tracing::debug!(?event, phase = %self.phase, "UI event");
        match event {
            UiEvent::Select(name) => self.begin_detail(&name, Origin::Card),
            UiEvent::Search(term) => {
                let term = term.trim();
                if term.is_empty() {
                    self.store.set_offset(0);
                    self.begin_list()
                } else {
                    self.begin_detail(&term.to_lowercase(), Origin::Search)
                }
            }
            UiEvent::Dismiss => {
                self.view.dismiss_detail();
                self.store.set_selected(None);
                self.begin_list()
            }
            UiEvent::NextPage => {
                let cursor = self.store.cursor();
                self.store
                    .set_offset(cursor.offset.saturating_add(cursor.limit));
                self.begin_list()
            }
            UiEvent::PrevPage => {
                let cursor = self.store.cursor();
                self.store
                    .set_offset(cursor.offset.saturating_sub(cursor.limit));
                self.begin_list()
            }
        }
    }

    /// Start then finish an operation in one go
    pub async fn dispatch(&mut self, event: UiEvent) {
        let pending = self.handle(event);
        let completion = pending.await;
        self.complete(completion);
    }

    /// Return from the transient error phase once its banner has expired
    pub fn tick(&mut self, now: Instant) {
        if let (Phase::Error { .. }, Some(since)) = (self.phase, self.error_since) {
            if now >= since + ERROR_DISPLAY {
                self.phase = self.phase.settled();
                self.error_since = None;
            }
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn begin_list(&mut self) -> Pending {
        let generation = self.next_generation();
        let PaginationCursor { offset, limit } = self.store.cursor();
        self.phase = Phase::LoadingList;
        self.view.show_busy();

        tracing::info!(generation, offset, limit, "Loading list");

        let api = Arc::clone(&self.api);
        async move {
            let result = load_page(api.as_ref(), offset, limit).await;
            Completion {
                generation,
                outcome: Outcome::List(result),
            }
        }
        .boxed()
    }

    fn begin_detail(&mut self, identifier: &str, origin: Origin) -> Pending {
        let generation = self.next_generation();
        self.phase = Phase::LoadingDetail;
        self.view.show_busy();

        tracing::info!(generation, identifier, ?origin, "Loading detail");

        let api = Arc::clone(&self.api);
        let identifier = identifier.to_string();
        async move {
            let result = api.fetch_detail(&identifier).await;
            Completion {
                generation,
                outcome: Outcome::Detail { origin, result },
            }
        }
        .boxed()
    }

    /// Apply a finished operation
    pub fn complete(&mut self, completion: Completion) {
        if completion.generation != self.generation {
            tracing::debug!(
                generation = completion.generation,
                latest = self.generation,
                "Discarding stale response"
            );
            return;
        }

        self.view.hide_busy();

        match completion.outcome {
            Outcome::List(Ok(records)) => {
                tracing::info!(count = records.len(), "List loaded");
                self.store.set_list(records);
                self.store.set_selected(None);
                self.view.render_list(self.store.list());
                self.phase = Phase::ListView;
            }
            Outcome::List(Err(e)) => {
                tracing::error!(error = %e, "List load failed");
                self.store.set_list(Vec::new());
                self.store.set_selected(None);
                self.view.render_list(self.store.list());
                self.fail(LIST_FAILED, Surface::List);
            }
            Outcome::Detail {
                result: Ok(record), ..
            } => {
                tracing::info!(id = record.id, name = %record.name, "Detail loaded");
                self.view.render_detail(&record);
                self.store.set_selected(Some(record));
                self.phase = Phase::DetailView;
            }
            Outcome::Detail {
                origin,
                result: Err(e),
            } => {
                tracing::error!(error = %e, ?origin, "Detail load failed");
                let message = match (&e, origin) {
                    (PokedexError::NotFound { identifier }, _) => {
                        format!("Pokémon \"{}\" not found. Try another name or id.", identifier)
                    }
                    (_, Origin::Card) => DETAIL_FAILED.to_string(),
                    (_, Origin::Search) => SEARCH_FAILED.to_string(),
                };
                let resume = match self.store.selected() {
                    Some(_) if origin == Origin::Search => Surface::Detail,
                    _ => Surface::List,
                };
                self.fail(&message, resume);
            }
        }
    }

    fn fail(&mut self, message: &str, resume: Surface) {
        self.view.show_error(message);
        self.phase = Phase::Error { resume };
        self.error_since = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPokemonApi;
    use crate::model::fixtures::record;
    use futures::stream::{FuturesUnordered, StreamExt};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    // ─────────────────────────────────────────────────────────────────────
    // Recording view
    // ─────────────────────────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ShowBusy,
        HideBusy,
        ShowError(String),
        RenderList(Vec<String>),
        RenderDetail(String),
        DismissDetail,
    }

    #[derive(Default)]
    struct RecordingView {
        calls: Vec<Call>,
        busy: bool,
        overlay: bool,
    }

    impl RecordingView {
        fn renders(&self) -> Vec<&Vec<String>> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::RenderList(names) => Some(names),
                    _ => None,
                })
                .collect()
        }

        fn errors(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::ShowError(m) => Some(m.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn count(&self, call: &Call) -> usize {
            self.calls.iter().filter(|c| *c == call).count()
        }
    }

    impl View for RecordingView {
        fn show_busy(&mut self) {
            self.busy = true;
            self.calls.push(Call::ShowBusy);
        }

        fn hide_busy(&mut self) {
            self.busy = false;
            self.calls.push(Call::HideBusy);
        }

        fn show_error(&mut self, message: &str) {
            self.calls.push(Call::ShowError(message.to_string()));
        }

        fn render_list(&mut self, records: &[DetailRecord]) {
            self.overlay = false;
            self.calls
                .push(Call::RenderList(records.iter().map(|r| r.name.clone()).collect()));
        }

        fn render_detail(&mut self, record: &DetailRecord) {
            self.overlay = true;
            self.calls.push(Call::RenderDetail(record.name.clone()));
        }

        fn dismiss_detail(&mut self) {
            self.overlay = false;
            self.calls.push(Call::DismissDetail);
        }
    }

    fn dex(count: u32) -> Vec<DetailRecord> {
        (1..=count)
            .map(|i| record(i, &format!("mon{:03}", i), &["normal"]))
            .collect()
    }

    fn setup(records: Vec<DetailRecord>) -> (Arc<MockPokemonApi>, Coordinator<RecordingView>) {
        let api = Arc::new(MockPokemonApi::new(records));
        let coordinator = Coordinator::new(api.clone(), RecordingView::default());
        (api, coordinator)
    }

    async fn started(records: Vec<DetailRecord>) -> (Arc<MockPokemonApi>, Coordinator<RecordingView>) {
        let (api, mut coordinator) = setup(records);
        let pending = coordinator.start();
        let completion = pending.await;
        coordinator.complete(completion);
        (api, coordinator)
    }

    // ─────────────────────────────────────────────────────────────────────
    // List loading
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_startup_loads_full_page_in_order() {
        let (api, coordinator) = started(dex(30)).await;

        assert_eq!(api.listing_calls(), 1);
        assert_eq!(api.detail_requests().len(), 24);

        let expected: Vec<String> = (1..=24).map(|i| format!("mon{:03}", i)).collect();
        assert_eq!(coordinator.view().renders(), vec![&expected]);
        assert_eq!(coordinator.store().list().len(), 24);
        assert_eq!(coordinator.store().list()[23].id, 24);
        assert_eq!(coordinator.phase(), Phase::ListView);
        assert!(!coordinator.view().busy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_details_are_fetched_concurrently() {
        let (api, mut coordinator) = setup(dex(10));
        let delay = Duration::from_millis(100);
        for i in 1..=10 {
            api.delay_detail(&format!("mon{:03}", i), delay);
        }

        let began = tokio::time::Instant::now();
        let completion = coordinator.start().await;
        coordinator.complete(completion);
        let elapsed = began.elapsed();

        assert_eq!(coordinator.store().list().len(), 10);
        // One delay period for the whole page, not one per entry
        assert!(elapsed >= delay, "{elapsed:?}");
        assert!(elapsed < delay * 2, "{elapsed:?}");
    }

    #[tokio::test]
    async fn test_one_failing_detail_blanks_the_page() {
        let (api, mut coordinator) = setup(dex(5));
        api.fail_detail("mon003");

        let completion = coordinator.start().await;
        coordinator.complete(completion);

        assert!(coordinator.store().list().is_empty());
        assert_eq!(coordinator.view().renders(), vec![&Vec::<String>::new()]);
        assert_eq!(coordinator.view().errors(), vec![LIST_FAILED]);
        assert!(!coordinator.view().busy);
        assert_eq!(
            coordinator.phase(),
            Phase::Error {
                resume: Surface::List
            }
        );
        assert_eq!(coordinator.phase().settled(), Phase::ListView);
    }

    #[tokio::test]
    async fn test_listing_failure_leaves_list_empty() {
        let (api, mut coordinator) = setup(dex(5));
        api.fail_listing(503);

        let completion = coordinator.start().await;
        coordinator.complete(completion);

        assert!(coordinator.store().list().is_empty());
        assert!(api.detail_requests().is_empty());
        assert_eq!(coordinator.view().errors().len(), 1);
        assert!(!coordinator.view().busy);
    }

    #[tokio::test]
    async fn test_empty_listing_renders_empty_list() {
        let (api, coordinator) = started(Vec::new()).await;

        assert!(api.detail_requests().is_empty());
        assert_eq!(coordinator.view().renders().len(), 1);
        assert!(coordinator.view().errors().is_empty());
        assert_eq!(coordinator.phase(), Phase::ListView);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_select_opens_detail() {
        let (_api, mut coordinator) =
            started(vec![record(132, "ditto", &["normal"])]).await;

        coordinator.dispatch(UiEvent::Select("ditto".to_string())).await;

        assert_eq!(coordinator.store().selected().map(|r| r.id), Some(132));
        assert_eq!(
            coordinator.view().calls.last(),
            Some(&Call::RenderDetail("ditto".to_string()))
        );
        assert!(coordinator.view().overlay);
        assert_eq!(coordinator.phase(), Phase::DetailView);
    }

    #[tokio::test]
    async fn test_select_not_found_returns_to_list() {
        let (_api, mut coordinator) = started(dex(3)).await;

        coordinator
            .dispatch(UiEvent::Select("notapokemon".to_string()))
            .await;

        assert!(coordinator.store().selected().is_none());
        assert!(coordinator.view().errors()[0].contains("not found"));
        assert!(!coordinator.view().overlay);
        assert_eq!(coordinator.phase().settled(), Phase::ListView);
        assert!(!coordinator.view().busy);
    }

    #[tokio::test]
    async fn test_select_network_failure_generic_message() {
        let (api, mut coordinator) = started(dex(3)).await;
        api.fail_detail("mon002");

        coordinator.dispatch(UiEvent::Select("mon002".to_string())).await;

        assert_eq!(coordinator.view().errors(), vec![DETAIL_FAILED]);
        assert!(coordinator.store().selected().is_none());
        assert_eq!(coordinator.phase().settled(), Phase::ListView);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_blank_search_resets_offset_and_reloads() {
        let (api, mut coordinator) = started(dex(60)).await;
        coordinator.dispatch(UiEvent::NextPage).await;
        assert_eq!(coordinator.store().offset(), 24);

        coordinator.dispatch(UiEvent::Search("   ".to_string())).await;

        assert_eq!(coordinator.store().offset(), 0);
        assert_eq!(api.listing_calls(), 3);
        assert_eq!(coordinator.store().list()[0].name, "mon001");
    }

    #[tokio::test]
    async fn test_search_is_lowercased_exact_lookup() {
        let (api, mut coordinator) =
            started(vec![record(132, "ditto", &["normal"])]).await;

        coordinator.dispatch(UiEvent::Search(" DiTTo ".to_string())).await;

        assert_eq!(api.detail_requests().last().map(String::as_str), Some("ditto"));
        assert_eq!(coordinator.store().selected().map(|r| r.id), Some(132));
        assert_eq!(coordinator.phase(), Phase::DetailView);
    }

    #[tokio::test]
    async fn test_search_not_found_keeps_selection() {
        let (_api, mut coordinator) = started(vec![
            record(132, "ditto", &["normal"]),
            record(25, "pikachu", &["electric"]),
        ])
        .await;
        coordinator.dispatch(UiEvent::Select("pikachu".to_string())).await;

        coordinator
            .dispatch(UiEvent::Search("notapokemon".to_string()))
            .await;

        assert_eq!(coordinator.store().selected().map(|r| r.id), Some(25));
        let errors = coordinator.view().errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("not found"));
        assert_eq!(coordinator.phase().settled(), Phase::DetailView);
        assert!(!coordinator.view().busy);
    }

    #[tokio::test]
    async fn test_search_failure_generic_message() {
        let (api, mut coordinator) = started(dex(3)).await;
        api.fail_detail("mon001");

        coordinator.dispatch(UiEvent::Search("mon001".to_string())).await;

        assert_eq!(coordinator.view().errors(), vec![SEARCH_FAILED]);
        assert!(coordinator.store().selected().is_none());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Dismissal and paging
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_dismiss_triggers_exactly_one_reload() {
        let (api, mut coordinator) =
            started(vec![record(132, "ditto", &["normal"])]).await;
        coordinator.dispatch(UiEvent::Select("ditto".to_string())).await;
        let before = api.listing_calls();

        coordinator.dispatch(UiEvent::Dismiss).await;

        assert_eq!(api.listing_calls(), before + 1);
        assert!(coordinator.store().selected().is_none());
        assert_eq!(coordinator.view().count(&Call::DismissDetail), 1);
        assert!(!coordinator.view().overlay);
        assert_eq!(coordinator.phase(), Phase::ListView);
    }

    #[tokio::test]
    async fn test_dismiss_from_list_still_reloads() {
        let (api, mut coordinator) = started(dex(2)).await;

        coordinator.dispatch(UiEvent::Dismiss).await;

        assert_eq!(api.listing_calls(), 2);
    }

    #[tokio::test]
    async fn test_paging_moves_offset_by_page_size() {
        let (_api, mut coordinator) = started(dex(50)).await;

        coordinator.dispatch(UiEvent::NextPage).await;
        assert_eq!(coordinator.store().offset(), 24);
        assert_eq!(coordinator.store().list()[0].id, 25);

        coordinator.dispatch(UiEvent::NextPage).await;
        assert_eq!(coordinator.store().list().len(), 2);

        coordinator.dispatch(UiEvent::PrevPage).await;
        coordinator.dispatch(UiEvent::PrevPage).await;
        coordinator.dispatch(UiEvent::PrevPage).await;
        assert_eq!(coordinator.store().offset(), 0);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Busy indicator and stale responses
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_busy_paired_on_every_path() {
        let (api, mut coordinator) = started(dex(3)).await;
        api.fail_detail("mon002");

        coordinator.dispatch(UiEvent::Select("mon001".to_string())).await;
        coordinator.dispatch(UiEvent::Select("mon002".to_string())).await;
        coordinator.dispatch(UiEvent::Search("nobody".to_string())).await;
        coordinator.dispatch(UiEvent::Dismiss).await;

        let view = coordinator.view();
        assert_eq!(view.count(&Call::ShowBusy), view.count(&Call::HideBusy));
        assert!(!view.busy);
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let (_api, mut coordinator) = started(vec![
            record(132, "ditto", &["normal"]),
            record(25, "pikachu", &["electric"]),
        ])
        .await;

        let slow = coordinator.handle(UiEvent::Select("pikachu".to_string()));
        let fast = coordinator.handle(UiEvent::Search("ditto".to_string()));

        let fast_done = fast.await;
        coordinator.complete(fast_done);
        let slow_done = slow.await;
        assert!(slow_done.generation() < coordinator.generation());
        coordinator.complete(slow_done);

        assert_eq!(coordinator.store().selected().map(|r| r.id), Some(132));
        assert_eq!(
            coordinator.view().count(&Call::RenderDetail("pikachu".to_string())),
            0
        );
        assert!(!coordinator.view().busy);
    }

    #[tokio::test]
    async fn test_slow_response_loses_race() {
        let (api, mut coordinator) = started(vec![
            record(132, "ditto", &["normal"]),
            record(25, "pikachu", &["electric"]),
        ])
        .await;
        api.delay_detail("pikachu", Duration::from_millis(50));

        let mut in_flight = FuturesUnordered::new();
        in_flight.push(coordinator.handle(UiEvent::Select("pikachu".to_string())));
        in_flight.push(coordinator.handle(UiEvent::Select("ditto".to_string())));

        let mut order = Vec::new();
        while let Some(done) = in_flight.next().await {
            order.push(done.generation());
            coordinator.complete(done);
        }

        assert_eq!(order, vec![3, 2]);
        assert_eq!(coordinator.store().selected().map(|r| r.name.as_str()), Some("ditto"));
    }

    #[tokio::test]
    async fn test_error_phase_settles_after_banner() {
        let (api, mut coordinator) = setup(dex(2));
        api.fail_listing(500);
        let completion = coordinator.start().await;
        coordinator.complete(completion);

        let now = Instant::now();
        coordinator.tick(now);
        assert!(matches!(coordinator.phase(), Phase::Error { .. }));

        coordinator.tick(now + ERROR_DISPLAY + Duration::from_millis(10));
        assert_eq!(coordinator.phase(), Phase::ListView);
    }
}
