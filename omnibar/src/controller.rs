use std::sync::Arc;

use omnibar_api_types::{ResultSet, SearchResult};
use suggest_client::{Error, SearchEngine, SuggestClient, SuggestResponse, SuggestSource};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::cache::ResultCache;
use crate::config::OmnibarConfig;
use crate::mapping::build_result_set;
use crate::session::{SessionState, Transition};
use crate::sink::{Navigator, ResultsSink};

/// Outcome of one fetch, stamped with the sequence number it was issued under.
#[derive(Debug)]
pub struct FetchCompletion {
    seq: u64,
    epoch: u64,
    query: String,
    outcome: Result<SuggestResponse, Error>,
}

impl FetchCompletion {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Decides per keystroke whether to reuse cached results or fetch, and owns the cache.
///
/// All state lives behind `&mut self`. Fetches run on spawned tasks and report back
/// through an internal channel, their results are only applied by
/// [`QueryController::apply_completion`], so cache and session are never touched
/// from another task. Methods that fetch must be called inside a tokio runtime.
///
/// Only the fetch issued by the most recent keystroke may change what is displayed.
/// A response for an older query still lands in the cache under its own key, unless
/// the session was cleared after it was issued.
///
/// Every fetch runs under a child of the session token. Clearing the session,
/// tearing it down or dropping the controller cancels whatever is still in flight.
pub struct QueryController {
    source: Arc<dyn SuggestSource>,
    engine: SearchEngine,
    sink: Arc<dyn ResultsSink>,
    navigator: Arc<dyn Navigator>,
    session: SessionState,
    cache: ResultCache,
    cancel_superseded: bool,
    next_seq: u64,
    /// bumped on every reset so in-flight fetches from before it are dropped
    epoch: u64,
    awaiting: Option<u64>,
    fetches: CancellationToken,
    /// token of the most recently issued fetch
    in_flight: Option<CancellationToken>,
    completion_tx: UnboundedSender<FetchCompletion>,
    pub(crate) completion_rx: UnboundedReceiver<FetchCompletion>,
}

impl QueryController {
    pub fn new(
        source: Arc<dyn SuggestSource>,
        engine: SearchEngine,
        sink: Arc<dyn ResultsSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (completion_tx, completion_rx) = unbounded_channel();
        Self {
            source,
            engine,
            sink,
            navigator,
            session: SessionState::default(),
            cache: ResultCache::default(),
            cancel_superseded: false,
            next_seq: 0,
            epoch: 0,
            awaiting: None,
            fetches: CancellationToken::new(),
            in_flight: None,
            completion_tx,
            completion_rx,
        }
    }

    /// Wires a [`SuggestClient`] for the configured engine.
    pub fn from_config(
        config: &OmnibarConfig,
        sink: Arc<dyn ResultsSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, Error> {
        let client = match config.request_timeout() {
            Some(timeout) => {
                SuggestClient::with_timeout(config.engine.clone(), &config.user_agent, timeout)?
            }
            None => SuggestClient::new(config.engine.clone(), &config.user_agent)?,
        };
        Ok(Self::new(Arc::new(client), config.engine.clone(), sink, navigator)
            .cancel_superseded(config.cancel_superseded))
    }

    /// Cancel the previous fetch before every new one.
    pub fn cancel_superseded(mut self, cancel: bool) -> Self {
        self.cancel_superseded = cancel;
        self
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Whether the current keystroke is still waiting on its fetch.
    pub fn is_awaiting(&self) -> bool {
        self.awaiting.is_some()
    }

    #[instrument(skip(self))]
    pub fn update_query(&mut self, query: &str) {
        // whatever was in flight no longer belongs to what is on screen
        self.awaiting = None;
        match self.session.advance(query) {
            Transition::Reset => {
                self.clear_cache();
                self.push(Arc::new(ResultSet::empty()));
            }
            Transition::Backspace { evicted } => {
                self.cache.remove(&evicted);
                match self.cache.get(query) {
                    Some(results) => {
                        debug!("reusing cached results");
                        self.push(results);
                    }
                    None => self.fetch(query),
                }
            }
            Transition::Extend => self.fetch(query),
            Transition::Unchanged => {
                debug!("length unchanged or several characters removed, keeping results")
            }
        }
    }

    /// Applies a finished fetch. Stale completions never reach the sink.
    pub fn apply_completion(&mut self, completion: FetchCompletion) {
        let FetchCompletion {
            seq,
            epoch,
            query,
            outcome,
        } = completion;
        if epoch != self.epoch {
            debug!(seq, "dropping fetch from a cleared session");
            return;
        }
        let current = self.awaiting == Some(seq);
        if current {
            self.awaiting = None;
        }
        match outcome {
            Ok(response) => {
                let results = Arc::new(build_result_set(&query, response, &self.engine));
                self.cache.insert(query, results.clone());
                if current {
                    self.push(results);
                } else {
                    debug!(seq, "cached superseded response");
                }
            }
            Err(Error::Cancelled) => debug!(seq, "fetch cancelled"),
            Err(e) if current => {
                warn!(seq, "suggest fetch failed: {e}");
                self.sink.on_fetch_failed(&query, &e);
                self.push(Arc::new(ResultSet::empty()));
            }
            Err(e) => debug!(seq, "superseded fetch failed: {e}"),
        }
    }

    /// Waits for the next fetch to finish and applies it.
    pub async fn process_next_completion(&mut self) -> bool {
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Call once per render of a result, not on every redraw.
    pub fn did_show(&self, result: &SearchResult) {
        self.source.request_impression(result.impression_ref());
    }

    pub fn did_select(&self, result: &SearchResult) {
        self.navigator.open_link(result.url(), result.query());
    }

    pub fn did_long_press(&self, result: &SearchResult) {
        self.navigator.long_press(result);
    }

    /// Ends the session: empties cache and typing state and clears the display.
    pub fn teardown(&mut self) {
        info!("tearing down search session");
        self.session.reset();
        self.awaiting = None;
        self.clear_cache();
        self.push(Arc::new(ResultSet::empty()));
    }

    fn clear_cache(&mut self) {
        self.cache.clear();
        self.epoch += 1;
        self.cancel_fetches();
    }

    fn cancel_fetches(&mut self) {
        self.fetches.cancel();
        self.fetches = CancellationToken::new();
        self.in_flight = None;
    }

    fn fetch(&mut self, query: &str) {
        if self.cancel_superseded {
            if let Some(previous) = self.in_flight.take() {
                previous.cancel();
            }
            self.source.cancel_pending_request();
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        self.awaiting = Some(seq);
        debug!(seq, "issuing suggest fetch");
        let token = self.fetches.child_token();
        self.in_flight = Some(token.clone());
        let source = self.source.clone();
        let completion_tx = self.completion_tx.clone();
        let epoch = self.epoch;
        let query = query.to_string();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => Err(Error::Cancelled),
                outcome = source.query(&query) => outcome,
            };
            let _ = completion_tx.send(FetchCompletion {
                seq,
                epoch,
                query,
                outcome,
            });
        });
    }

    fn push(&self, results: Arc<ResultSet>) {
        self.sink.on_results_changed(results);
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        self.fetches.cancel();
    }
}
