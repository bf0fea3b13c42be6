use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use omnibar_api_types::{ResultSet, SearchResult, Url};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Where result sets go every time the displayed set changes, including to empty.
pub trait ResultsSink: Send + Sync {
    fn on_results_changed(&self, results: Arc<ResultSet>);

    /// Diagnostic only. The displayed set has already been cleared when this is called.
    fn on_fetch_failed(&self, _query: &str, _error: &suggest_client::Error) {}
}

/// Opens what the user picked. Lives outside the suggestion engine.
pub trait Navigator: Send + Sync {
    fn open_link(&self, url: &Url, query: &str);

    fn long_press(&self, _result: &SearchResult) {}
}

/// Navigator that only logs, for hosts that handle selection elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn open_link(&self, url: &Url, query: &str) {
        info!(%url, query, "result selected");
    }

    fn long_press(&self, result: &SearchResult) {
        info!(url = %result.url(), "result long pressed");
    }
}

/// Sink that forwards every result set into a [`ResultsStream`].
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<Arc<ResultSet>>,
}

impl ChannelSink {
    pub fn new() -> (Self, ResultsStream) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, ResultsStream { receiver })
    }
}

impl ResultsSink for ChannelSink {
    fn on_results_changed(&self, results: Arc<ResultSet>) {
        if self.sender.send(results).is_err() {
            debug!("results stream dropped");
        }
    }
}

pub struct ResultsStream {
    receiver: UnboundedReceiver<Arc<ResultSet>>,
}

impl ResultsStream {
    /// Next set if one is already waiting.
    pub fn try_next(&mut self) -> Option<Arc<ResultSet>> {
        self.receiver.try_recv().ok()
    }
}

impl Stream for ResultsStream {
    type Item = Arc<ResultSet>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
