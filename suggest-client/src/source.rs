use async_trait::async_trait;

use crate::{Error, SuggestResponse};

/// Anything the address bar can ask for suggestions.
#[async_trait]
pub trait SuggestSource: Send + Sync + 'static {
    async fn query(&self, text: &str) -> Result<SuggestResponse, Error>;

    /// Cancels the tracked in-flight request, if there is one.
    fn cancel_pending_request(&self);

    /// Fire and forget. Returns whether a ping was sent.
    fn request_impression(&self, locator: Option<&str>) -> bool;
}
