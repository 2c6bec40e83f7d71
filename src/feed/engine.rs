//! Paginated loading of the review feed.
//!
//! [`PaginationEngine`] owns the [`FeedState`] and is driven from a single
//! task: it spawns page fetches onto the runtime and gets their results back
//! as [`PageResponse`] messages, which the owner feeds to
//! [`PaginationEngine::handle_response`]. Every request carries the
//! generation it was issued under; a refresh bumps the generation, so a
//! response that was in flight across a refresh is dropped on arrival.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::items::{ExpandHandle, ItemId, ListItem, ReviewItem, SummaryItem};
use super::pluralize::Pluralizer;
use super::record::ReviewRecord;
use super::source::ReviewSource;
use super::state::{DEFAULT_PAGE_SIZE, FeedState, GENERIC_ERROR_MESSAGE, LoadingStage};
use super::{DEFAULT_COLLAPSED_LINES, FeedError, ReviewPage};

/// The next page is requested once less than this many viewports of content
/// remain below the visible area.
pub const DEFAULT_LOOK_AHEAD_SCREENS: f32 = 2.5;

/// Scroll geometry reported by the screen, in any consistent unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollSignal {
    pub content_extent: u32,
    pub viewport_extent: u32,
    pub offset: u32,
}

impl ScrollSignal {
    /// Scrollable distance left below the viewport.
    pub fn remaining(&self) -> u32 {
        self.content_extent
            .saturating_sub(self.viewport_extent)
            .saturating_sub(self.offset)
    }
}

#[derive(Debug)]
pub struct PageResponse {
    generation: u64,
    offset: usize,
    result: Result<ReviewPage, FeedError>,
}

/// Requests sent to the engine by the items it created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    Expand(ItemId),
}

/// Receiving ends the owner has to poll and feed back into the engine.
pub struct FeedChannels {
    pub responses: UnboundedReceiver<PageResponse>,
    pub commands: UnboundedReceiver<FeedCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub page_size: usize,
    pub look_ahead_screens: f32,
    pub collapsed_lines: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            look_ahead_screens: DEFAULT_LOOK_AHEAD_SCREENS,
            collapsed_lines: DEFAULT_COLLAPSED_LINES,
        }
    }
}

type StateCallback = Box<dyn FnMut(&FeedState)>;
type RefreshCallback = Box<dyn FnMut()>;

pub struct PaginationEngine {
    state: FeedState,
    source: Arc<dyn ReviewSource>,
    pluralizer: Box<dyn Pluralizer>,
    look_ahead_screens: f32,
    collapsed_lines: usize,

    generation: u64,
    pending: bool,
    started: bool,
    /// Set by `refresh` until the first response of the new generation lands.
    refreshing: bool,
    next_item_id: u64,

    responses: UnboundedSender<PageResponse>,
    commands: UnboundedSender<FeedCommand>,

    on_state_change: Option<StateCallback>,
    on_refresh_finished: Option<RefreshCallback>,
}

impl PaginationEngine {
    pub fn new(
        source: Arc<dyn ReviewSource>,
        pluralizer: Box<dyn Pluralizer>,
        options: EngineOptions,
    ) -> (Self, FeedChannels) {
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let engine = Self {
            state: FeedState::new(options.page_size),
            source,
            pluralizer,
            look_ahead_screens: options.look_ahead_screens.max(0.0),
            collapsed_lines: options.collapsed_lines,
            generation: 0,
            pending: false,
            started: false,
            refreshing: false,
            next_item_id: 0,
            responses: responses_tx,
            commands: commands_tx,
            on_state_change: None,
            on_refresh_finished: None,
        };

        let channels = FeedChannels {
            responses: responses_rx,
            commands: commands_rx,
        };

        (engine, channels)
    }

    pub fn on_state_change(&mut self, callback: impl FnMut(&FeedState) + 'static) {
        self.on_state_change = Some(Box::new(callback));
    }

    pub fn on_refresh_finished(&mut self, callback: impl FnMut() + 'static) {
        self.on_refresh_finished = Some(Box::new(callback));
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Whether a page request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Whether a refresh is waiting for its first page.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Issue the first page request. Later calls do nothing unless the last
    /// load failed, in which case this retries it.
    pub fn start(&mut self) {
        if self.pending {
            return;
        }
        if !self.state.can_load_more && self.state.stage != LoadingStage::Refreshing {
            return;
        }
        if self.started && self.state.stage != LoadingStage::Failed {
            return;
        }

        if self.started {
            self.begin_retry();
        } else {
            log::info!("Starting review feed from {}", self.source.name());
            self.started = true;
            self.state.stage = LoadingStage::InitialLoading;
        }

        self.request_page();
    }

    /// Request the next page when the user is close enough to the bottom.
    /// Returns whether a request was issued.
    pub fn load_more_if_needed(&mut self, signal: ScrollSignal) -> bool {
        if !self.started || self.pending || !self.state.can_load_more {
            return false;
        }

        let threshold = self.look_ahead_screens * signal.viewport_extent as f32;
        if signal.remaining() as f32 > threshold {
            return false;
        }

        log::debug!(
            "Loading more: {} remaining, threshold {:.1}",
            signal.remaining(),
            threshold
        );
        self.begin_retry();
        self.request_page();
        true
    }

    /// Drop everything loaded so far and start over from offset 0. A response
    /// still in flight is ignored when it arrives.
    pub fn refresh(&mut self) {
        log::info!("Refreshing review feed");
        self.generation += 1;
        self.pending = false;
        self.started = true;
        self.refreshing = true;
        self.state.reset_for_refresh();
        self.emit_state_change();
        self.request_page();
    }

    /// Show the full text of one review. Returns `false` for unknown ids.
    pub fn expand_review(&mut self, id: ItemId) -> bool {
        let Some(review) = self.state.find_review_mut(id) else {
            log::debug!("Ignoring expand for unknown item {id}");
            return false;
        };
        review.expanded = true;
        self.emit_state_change();
        true
    }

    pub fn handle_command(&mut self, command: FeedCommand) -> bool {
        match command {
            FeedCommand::Expand(id) => self.expand_review(id),
        }
    }

    /// Apply a finished page request. Returns `false` if the response was
    /// stale and therefore ignored.
    pub fn handle_response(&mut self, response: PageResponse) -> bool {
        if response.generation != self.generation {
            log::debug!(
                "Dropping stale page response (offset {}, generation {} != {})",
                response.offset,
                response.generation,
                self.generation
            );
            return false;
        }

        self.pending = false;
        match response.result {
            Ok(page) => self.apply_page(page),
            Err(e) => self.apply_failure(response.offset, &e),
        }

        if std::mem::take(&mut self.refreshing)
            && let Some(callback) = self.on_refresh_finished.as_mut()
        {
            callback();
        }
        self.emit_state_change();
        true
    }

    fn apply_page(&mut self, page: ReviewPage) {
        let received = page.items.len();
        let mut appended = 0;

        for (index, value) in page.items.into_iter().enumerate() {
            match ReviewRecord::from_value(self.state.next_offset + index, value) {
                Ok(record) => {
                    let item = self.review_from_record(record);
                    self.state.items.push(ListItem::Review(item));
                    appended += 1;
                }
                Err(e) => {
                    log::warn!("Skipping review: {e}");
                    self.state.skipped_records += 1;
                }
            }
        }

        self.state.next_offset += received;
        self.state.can_load_more = received > 0 && self.state.next_offset < page.count;
        self.state.stage = LoadingStage::Loaded;
        self.state.error_message = None;

        log::info!(
            "Loaded {appended} of {received} reviews, offset now {} of {}",
            self.state.next_offset,
            page.count
        );

        if !self.state.can_load_more && !self.state.has_summary() {
            let id = self.next_id();
            let summary = SummaryItem::new(id, page.count, self.pluralizer.as_ref());
            self.state.items.push(ListItem::Summary(summary));
        }
    }

    fn apply_failure(&mut self, offset: usize, error: &FeedError) {
        log::warn!("Failed to load reviews at offset {offset}: {error}");
        self.state.can_load_more = true;
        self.state.error_message = Some(GENERIC_ERROR_MESSAGE.to_string());
        self.state.stage = LoadingStage::Failed;
    }

    /// Leave the failed stage before a page is requested again, whichever
    /// path triggered the retry.
    fn begin_retry(&mut self) {
        if self.state.stage != LoadingStage::Failed {
            return;
        }
        log::info!("Retrying page at offset {}", self.state.next_offset);
        self.state.error_message = None;
        self.state.stage = if self.state.items.is_empty() {
            LoadingStage::InitialLoading
        } else {
            LoadingStage::Loaded
        };
        self.emit_state_change();
    }

    fn review_from_record(&mut self, record: ReviewRecord) -> ReviewItem {
        let id = self.next_id();
        let handle = ExpandHandle::new(id, self.commands.clone());
        ReviewItem::from_record(id, record, self.collapsed_lines, handle)
    }

    fn next_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        id
    }

    fn request_page(&mut self) {
        let offset = self.state.next_offset;
        let limit = self.state.page_size;
        let generation = self.generation;
        let fetch = self.source.fetch_page(offset, limit);
        let responses = self.responses.clone();

        log::debug!("Requesting reviews offset={offset} limit={limit} (generation {generation})");
        self.pending = true;

        tokio::spawn(async move {
            let result = fetch.await;
            let response = PageResponse {
                generation,
                offset,
                result,
            };
            if responses.send(response).is_err() {
                log::debug!("Page response at offset {offset} dropped, feed is gone");
            }
        });
    }

    fn emit_state_change(&mut self) {
        if let Some(callback) = self.on_state_change.as_mut() {
            callback(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::pluralize::ReviewCountDeclension;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tokio::sync::oneshot;

    struct PendingCall {
        offset: usize,
        limit: usize,
        reply: oneshot::Sender<Result<ReviewPage, FeedError>>,
    }

    /// Source whose pages are answered by the test, one call at a time.
    #[derive(Default)]
    struct ScriptedSource {
        calls: Mutex<Vec<PendingCall>>,
    }

    impl ScriptedSource {
        fn take_call(&self) -> PendingCall {
            let mut calls = self.calls.lock();
            assert!(!calls.is_empty(), "expected a page request");
            calls.remove(0)
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    impl ReviewSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        fn fetch_page(
            &self,
            offset: usize,
            limit: usize,
        ) -> BoxFuture<'static, Result<ReviewPage, FeedError>> {
            let (reply, rx) = oneshot::channel();
            self.calls.lock().push(PendingCall {
                offset,
                limit,
                reply,
            });
            async move {
                rx.await
                    .unwrap_or_else(|_| Err(FeedError::Transport("dropped".into())))
            }
            .boxed()
        }
    }

    fn record(i: usize) -> serde_json::Value {
        json!({
            "text": format!("Отзыв номер {i}"),
            "created": "13 мая 2024",
            "first_name": "Иван",
            "last_name": "Петров",
            "rating": 5,
            "avatar_url": format!("https://example.com/{i}.png")
        })
    }

    fn page(start: usize, len: usize, count: usize) -> ReviewPage {
        ReviewPage {
            items: (start..start + len).map(record).collect(),
            count,
        }
    }

    struct Harness {
        engine: PaginationEngine,
        channels: FeedChannels,
        source: Arc<ScriptedSource>,
        state_changes: Rc<Cell<usize>>,
        refreshes_finished: Rc<Cell<usize>>,
    }

    impl Harness {
        fn new() -> Self {
            let source = Arc::new(ScriptedSource::default());
            let (mut engine, channels) = PaginationEngine::new(
                source.clone(),
                Box::new(ReviewCountDeclension),
                EngineOptions::default(),
            );

            let state_changes = Rc::new(Cell::new(0));
            let counter = state_changes.clone();
            engine.on_state_change(move |_| counter.set(counter.get() + 1));

            let refreshes_finished = Rc::new(Cell::new(0));
            let counter = refreshes_finished.clone();
            engine.on_refresh_finished(move || counter.set(counter.get() + 1));

            Self {
                engine,
                channels,
                source,
                state_changes,
                refreshes_finished,
            }
        }

        async fn next_response(&mut self) -> PageResponse {
            self.channels.responses.recv().await.unwrap()
        }

        /// Answer the oldest request and apply its response.
        async fn answer(&mut self, result: Result<ReviewPage, FeedError>) -> bool {
            let call = self.source.take_call();
            call.reply.send(result).ok();
            let response = self.next_response().await;
            self.engine.handle_response(response)
        }
    }

    fn near_bottom() -> ScrollSignal {
        ScrollSignal {
            content_extent: 100,
            viewport_extent: 20,
            offset: 70,
        }
    }

    #[tokio::test]
    async fn test_two_pages_end_with_summary() {
        let mut h = Harness::new();
        h.engine.start();
        assert_eq!(h.engine.state().stage(), LoadingStage::InitialLoading);

        let call = h.source.take_call();
        assert_eq!((call.offset, call.limit), (0, 20));
        call.reply.send(Ok(page(0, 20, 25))).ok();
        let response = h.next_response().await;
        assert!(h.engine.handle_response(response));

        let state = h.engine.state();
        assert!(state.can_load_more());
        assert_eq!(state.next_offset(), 20);
        assert_eq!(state.review_count(), 20);
        assert!(!state.has_summary());
        assert_eq!(state.stage(), LoadingStage::Loaded);

        assert!(h.engine.load_more_if_needed(near_bottom()));
        let call = h.source.take_call();
        assert_eq!((call.offset, call.limit), (20, 20));
        call.reply.send(Ok(page(20, 5, 25))).ok();
        let response = h.next_response().await;
        assert!(h.engine.handle_response(response));

        let state = h.engine.state();
        assert!(!state.can_load_more());
        assert_eq!(state.next_offset(), 25);
        assert_eq!(state.review_count(), 25);
        assert_eq!(state.items().len(), 26);
        let summaries: Vec<_> = state.items().iter().filter(|i| i.is_summary()).collect();
        assert_eq!(summaries.len(), 1);
        match state.items().last() {
            Some(ListItem::Summary(summary)) => {
                assert_eq!(summary.total_count, 25);
                assert_eq!(summary.label, "25 отзывов");
            }
            other => panic!("expected summary last, got {other:?}"),
        }

        // Exhausted feed never asks again
        assert!(!h.engine.load_more_if_needed(near_bottom()));
        h.engine.start();
        assert_eq!(h.source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let mut h = Harness::new();
        h.engine.start();
        h.engine.start();
        assert_eq!(h.source.call_count(), 1);

        h.answer(Ok(page(0, 20, 100))).await;
        h.engine.start();
        assert_eq!(h.source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_second_request_while_pending() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Ok(page(0, 20, 100))).await;

        assert!(h.engine.load_more_if_needed(near_bottom()));
        for offset in 0..50 {
            let signal = ScrollSignal { offset, ..near_bottom() };
            assert!(!h.engine.load_more_if_needed(signal));
        }
        assert_eq!(h.source.call_count(), 1);
        assert!(h.engine.is_loading());
    }

    #[tokio::test]
    async fn test_look_ahead_threshold() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Ok(page(0, 20, 100))).await;

        // 200 - 20 - 100 = 80 remaining > 2.5 * 20
        let far = ScrollSignal {
            content_extent: 200,
            viewport_extent: 20,
            offset: 100,
        };
        assert!(!h.engine.load_more_if_needed(far));

        // exactly 50 remaining
        let at_threshold = ScrollSignal { offset: 130, ..far };
        assert_eq!(at_threshold.remaining(), 50);
        assert!(h.engine.load_more_if_needed(at_threshold));
    }

    #[tokio::test]
    async fn test_load_more_before_start_does_nothing() {
        let mut h = Harness::new();
        assert!(!h.engine.load_more_if_needed(near_bottom()));
        assert_eq!(h.source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_ignores_late_stale_response() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Ok(page(0, 20, 100))).await;

        assert!(h.engine.load_more_if_needed(near_bottom()));
        let stale = h.source.take_call();
        assert_eq!(stale.offset, 20);

        h.engine.refresh();
        assert_eq!(h.engine.state().stage(), LoadingStage::Refreshing);
        assert!(h.engine.state().items().is_empty());
        let fresh = h.source.take_call();
        assert_eq!(fresh.offset, 0);

        // Fresh answer first, then the stale one shows up
        fresh.reply.send(Ok(page(500, 20, 40))).ok();
        let response = h.next_response().await;
        assert!(h.engine.handle_response(response));

        let changes_before = h.state_changes.get();
        stale.reply.send(Ok(page(20, 20, 100))).ok();
        let response = h.next_response().await;
        assert!(!h.engine.handle_response(response));
        assert_eq!(h.state_changes.get(), changes_before);

        let state = h.engine.state();
        assert_eq!(state.review_count(), 20);
        assert_eq!(state.next_offset(), 20);
        let first = state.items()[0].as_review().unwrap();
        assert_eq!(first.text, "Отзыв номер 500");
        assert_eq!(h.refreshes_finished.get(), 1);
    }

    #[tokio::test]
    async fn test_refresh_stale_response_arrives_first() {
        let mut h = Harness::new();
        h.engine.start();
        let stale = h.source.take_call();

        h.engine.refresh();
        let fresh = h.source.take_call();

        stale.reply.send(Ok(page(0, 20, 25))).ok();
        let response = h.next_response().await;
        assert!(!h.engine.handle_response(response));
        assert!(h.engine.state().items().is_empty());
        assert!(h.engine.is_loading());
        assert_eq!(h.refreshes_finished.get(), 0);

        fresh.reply.send(Ok(page(100, 5, 5))).ok();
        let response = h.next_response().await;
        assert!(h.engine.handle_response(response));

        let state = h.engine.state();
        assert_eq!(state.stage(), LoadingStage::Loaded);
        assert_eq!(state.review_count(), 5);
        assert!(state.has_summary());
        assert_eq!(h.refreshes_finished.get(), 1);
    }

    #[tokio::test]
    async fn test_refresh_finished_fires_once_even_on_failure() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Ok(page(0, 20, 100))).await;

        h.engine.refresh();
        h.answer(Err(FeedError::Transport("timeout".into()))).await;
        assert_eq!(h.refreshes_finished.get(), 1);
        assert_eq!(h.engine.state().stage(), LoadingStage::Failed);

        h.engine.start();
        h.answer(Ok(page(0, 20, 100))).await;
        assert_eq!(h.refreshes_finished.get(), 1);
    }

    #[tokio::test]
    async fn test_mid_pagination_failure_keeps_rows() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Ok(page(0, 20, 100))).await;
        let before: Vec<ListItem> = h.engine.state().items().to_vec();

        assert!(h.engine.load_more_if_needed(near_bottom()));
        h.answer(Err(FeedError::Decode("bad json".into()))).await;

        let state = h.engine.state();
        assert_eq!(state.stage(), LoadingStage::Failed);
        assert_eq!(state.error_message(), Some(GENERIC_ERROR_MESSAGE));
        assert!(state.can_load_more());
        assert!(!state.is_blocking_error());
        assert_eq!(state.items(), before.as_slice());
        assert_eq!(state.next_offset(), 20);

        // Next scroll trigger retries the same offset and leaves the failed stage
        assert!(h.engine.load_more_if_needed(near_bottom()));
        let state = h.engine.state();
        assert_eq!(state.stage(), LoadingStage::Loaded);
        assert!(state.error_message().is_none());
        assert!(h.engine.is_loading());
        let call = h.source.take_call();
        assert_eq!(call.offset, 20);
    }

    #[tokio::test]
    async fn test_scroll_retry_after_first_page_failure_clears_error() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Err(FeedError::Transport("offline".into()))).await;
        assert!(h.engine.state().is_blocking_error());

        let changes_before = h.state_changes.get();
        let empty_screen = ScrollSignal {
            content_extent: 0,
            viewport_extent: 10,
            offset: 0,
        };
        assert!(h.engine.load_more_if_needed(empty_screen));

        let state = h.engine.state();
        assert_eq!(state.stage(), LoadingStage::InitialLoading);
        assert!(state.error_message().is_none());
        assert!(!state.is_blocking_error());
        assert_eq!(h.state_changes.get(), changes_before + 1);

        // The explicit retry has nothing left to do while the request is out
        h.engine.start();
        assert_eq!(h.source.call_count(), 1);
        assert_eq!(h.source.take_call().offset, 0);
    }

    #[tokio::test]
    async fn test_first_page_failure_is_blocking_and_retryable() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Err(FeedError::Transport("offline".into()))).await;
        assert!(h.engine.state().is_blocking_error());

        h.engine.start();
        assert_eq!(h.engine.state().stage(), LoadingStage::InitialLoading);
        assert!(h.engine.state().error_message().is_none());
        h.answer(Ok(page(0, 3, 3))).await;

        let state = h.engine.state();
        assert_eq!(state.stage(), LoadingStage::Loaded);
        assert_eq!(state.review_count(), 3);
        assert!(state.has_summary());
    }

    #[tokio::test]
    async fn test_one_state_change_per_response() {
        let mut h = Harness::new();
        h.engine.start();
        assert_eq!(h.state_changes.get(), 0);

        h.answer(Ok(page(0, 20, 100))).await;
        assert_eq!(h.state_changes.get(), 1);

        h.engine.load_more_if_needed(near_bottom());
        h.answer(Err(FeedError::Transport("reset".into()))).await;
        assert_eq!(h.state_changes.get(), 2);
    }

    #[tokio::test]
    async fn test_expand_mutates_only_target() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Ok(page(0, 5, 5))).await;

        let before: Vec<ListItem> = h.engine.state().items().to_vec();
        let target = before[2].id();

        // Expansion goes through the item's own handle
        before[2].as_review().unwrap().show_more();
        let command = h.channels.commands.recv().await.unwrap();
        assert!(h.engine.handle_command(command));

        let after = h.engine.state().items();
        for (old, new) in before.iter().zip(after) {
            if old.id() == target {
                assert!(new.as_review().unwrap().expanded);
                let mut expected = old.as_review().unwrap().clone();
                expected.expanded = true;
                assert_eq!(new.as_review(), Some(&expected));
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[tokio::test]
    async fn test_expand_unknown_or_summary_is_ignored() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Ok(page(0, 2, 2))).await;

        let summary_id = h.engine.state().items().last().unwrap().id();
        let changes = h.state_changes.get();
        assert!(!h.engine.expand_review(summary_id));
        assert!(!h.engine.expand_review(ItemId(9999)));
        assert_eq!(h.state_changes.get(), changes);
    }

    #[tokio::test]
    async fn test_malformed_record_is_skipped() {
        let mut h = Harness::new();
        h.engine.start();

        let mut bad_page = page(0, 4, 10);
        bad_page.items[1] = json!({ "text": "no rating" });
        bad_page.items[3]["rating"] = json!(9);
        h.answer(Ok(bad_page)).await;

        let state = h.engine.state();
        assert_eq!(state.review_count(), 2);
        assert_eq!(state.skipped_records(), 2);
        assert_eq!(state.next_offset(), 4);
        assert_eq!(state.next_offset(), state.review_count() + state.skipped_records());
        assert!(state.can_load_more());
    }

    #[tokio::test]
    async fn test_empty_page_ends_pagination() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Ok(page(0, 20, 50))).await;
        h.engine.load_more_if_needed(near_bottom());
        h.answer(Ok(ReviewPage {
            items: Vec::new(),
            count: 50,
        }))
        .await;

        let state = h.engine.state();
        assert!(!state.can_load_more());
        assert!(state.has_summary());
        assert_eq!(state.items().len(), 21);
    }

    #[tokio::test]
    async fn test_item_ids_are_unique_across_refresh() {
        let mut h = Harness::new();
        h.engine.start();
        h.answer(Ok(page(0, 3, 3))).await;
        let first: Vec<ItemId> = h.engine.state().items().iter().map(ListItem::id).collect();

        h.engine.refresh();
        h.answer(Ok(page(0, 3, 3))).await;
        let second: Vec<ItemId> = h.engine.state().items().iter().map(ListItem::id).collect();

        assert!(first.iter().all(|id| !second.contains(id)));
    }

    #[tokio::test]
    async fn test_state_callback_sees_current_state() {
        let mut h = Harness::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        h.engine
            .on_state_change(move |state| log.borrow_mut().push((state.stage(), state.items().len())));

        h.engine.start();
        h.answer(Ok(page(0, 20, 25))).await;
        h.engine.refresh();

        assert_eq!(
            *seen.borrow(),
            vec![(LoadingStage::Loaded, 20), (LoadingStage::Refreshing, 0)]
        );
    }
}
