mod engine;
mod response;
mod source;

pub use engine::{SearchEngine, SEARCH_TERMS};
pub use response::{NavigationRecord, SuggestResponse};
pub use source::SuggestSource;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Method, Request, StatusCode, Url};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Search engine has no suggest URL for this query")]
    InvalidEngine,
    #[error("HTTP Error: {0}")]
    TransportError(#[from] reqwest::Error),
    #[error("Invalid suggest response: {0}")]
    InvalidResponse(#[from] InvalidResponse),
    #[error("Suggest request was cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum InvalidResponse {
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("unparsable body {0}")]
    Body(#[from] serde_json::Error),
}

struct PendingRequest {
    id: u64,
    token: CancellationToken,
}

/// Client for a single suggest endpoint.
///
/// Every call to [`SuggestClient::query`] becomes the tracked request and replaces the previous
/// one without cancelling it, so an older call still resolves when its response arrives.
pub struct SuggestClient {
    client: Client,
    engine: SearchEngine,
    pending: Mutex<Option<PendingRequest>>,
    next_request_id: AtomicU64,
}

impl SuggestClient {
    pub fn new(engine: SearchEngine, user_agent: impl ToString) -> Result<Self, Error> {
        Self::build(engine, user_agent.to_string(), None)
    }

    /// Same as [`SuggestClient::new`] but every request gives up after `timeout`.
    pub fn with_timeout(
        engine: SearchEngine,
        user_agent: impl ToString,
        timeout: Duration,
    ) -> Result<Self, Error> {
        Self::build(engine, user_agent.to_string(), Some(timeout))
    }

    fn build(
        engine: SearchEngine,
        user_agent: String,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(SuggestClient {
            client: builder.build()?,
            engine,
            pending: Mutex::new(None),
            next_request_id: AtomicU64::new(0),
        })
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub async fn query(&self, query: &str) -> Result<SuggestResponse, Error> {
        let url = self
            .engine
            .suggest_url_for_query(query)
            .ok_or(Error::InvalidEngine)?;
        let (id, token) = self.track();
        let result = tokio::select! {
            _ = token.cancelled() => Err(Error::Cancelled),
            response = self.fetch(url) => response,
        };
        self.untrack(id);
        result
    }

    pub fn cancel_pending_request(&self) {
        if let Some(pending) = self.pending().take() {
            debug!("cancelling suggest request {}", pending.id);
            pending.token.cancel();
        }
    }

    pub fn request_impression(&self, locator: Option<&str>) -> bool {
        let Some(url) = locator.and_then(impression_url) else {
            debug!("ignoring unresolvable impression locator {locator:?}");
            return false;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no runtime to send impression {url}");
            return false;
        };
        let request = self.client.get(url);
        runtime.spawn(async move {
            if let Err(e) = request.send().await {
                debug!("impression ping failed {e}");
            }
        });
        true
    }

    async fn fetch(&self, url: Url) -> Result<SuggestResponse, Error> {
        let request = Request::new(Method::GET, url);
        info!("Getting search suggestions: {}", request.url());
        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InvalidResponse::Status(status).into());
        }
        let body = response.bytes().await?;
        Ok(SuggestResponse::from_slice(&body).map_err(InvalidResponse::from)?)
    }

    fn track(&self) -> (u64, CancellationToken) {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        *self.pending() = Some(PendingRequest {
            id,
            token: token.clone(),
        });
        (id, token)
    }

    fn untrack(&self, id: u64) {
        let mut pending = self.pending();
        if pending.as_ref().is_some_and(|p| p.id == id) {
            *pending = None;
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<PendingRequest>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn impression_url(locator: &str) -> Option<Url> {
    let url = Url::parse(locator).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

#[async_trait]
impl SuggestSource for SuggestClient {
    async fn query(&self, text: &str) -> Result<SuggestResponse, Error> {
        SuggestClient::query(self, text).await
    }

    fn cancel_pending_request(&self) {
        SuggestClient::cancel_pending_request(self)
    }

    fn request_impression(&self, locator: Option<&str>) -> bool {
        SuggestClient::request_impression(self, locator)
    }
}
