use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use omnibar_api_types::{ResultSet, SearchResult, Url};
use serde_json::json;
use suggest_client::{Error, InvalidResponse, NavigationRecord, SuggestResponse, SuggestSource};
use tokio::sync::oneshot;

use crate::sink::{Navigator, ResultsSink};

type Scripted = Result<SuggestResponse, Error>;

/// One suggestion and one complete navigation record derived from `text`.
pub(crate) fn response_for(text: &str) -> SuggestResponse {
    let record = json!({
        "type": "NAVIGATION",
        "title": format!("Site for {text}"),
        "q": "site!",
        "url": format!("https://site.example/{text}"),
        "image": "https://icons.example/site.png",
        "impression": format!("https://imp.example/{text}"),
    });
    SuggestResponse {
        suggestions: vec![format!("{text} suggestion")],
        navigations: vec![NavigationRecord(record.as_object().cloned().unwrap())],
    }
}

pub(crate) async fn transport_error() -> Error {
    let error = reqwest::Client::new()
        .get("not a url")
        .send()
        .await
        .unwrap_err();
    Error::TransportError(error)
}

pub(crate) fn invalid_status() -> Error {
    Error::InvalidResponse(InvalidResponse::Status(reqwest::StatusCode::BAD_GATEWAY))
}

/// Answers with [`response_for`] unless a gate was registered for the query,
/// in which case the call waits until the test releases it.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<Scripted>>>,
    impressions: Mutex<Vec<Option<String>>>,
    cancels: AtomicUsize,
}

impl ScriptedSource {
    pub(crate) fn gate(&self, text: &str) -> oneshot::Sender<Scripted> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(text.to_string(), rx);
        tx
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn impressions(&self) -> Vec<Option<String>> {
        self.impressions.lock().unwrap().clone()
    }

    pub(crate) fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SuggestSource for ScriptedSource {
    async fn query(&self, text: &str) -> Result<SuggestResponse, Error> {
        self.calls.lock().unwrap().push(text.to_string());
        let gate = self.gates.lock().unwrap().remove(text);
        match gate {
            Some(gate) => gate.await.unwrap_or(Err(Error::Cancelled)),
            None => Ok(response_for(text)),
        }
    }

    fn cancel_pending_request(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }

    fn request_impression(&self, locator: Option<&str>) -> bool {
        self.impressions
            .lock()
            .unwrap()
            .push(locator.map(str::to_string));
        locator.is_some()
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    pushes: Mutex<Vec<Arc<ResultSet>>>,
    failures: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub(crate) fn last(&self) -> Option<Arc<ResultSet>> {
        self.pushes.lock().unwrap().last().cloned()
    }

    pub(crate) fn count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }

    pub(crate) fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl ResultsSink for RecordingSink {
    fn on_results_changed(&self, results: Arc<ResultSet>) {
        self.pushes.lock().unwrap().push(results);
    }

    fn on_fetch_failed(&self, query: &str, _error: &Error) {
        self.failures.lock().unwrap().push(query.to_string());
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    opened: Mutex<Vec<(String, String)>>,
    long_pressed: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn opened(&self) -> Vec<(String, String)> {
        self.opened.lock().unwrap().clone()
    }

    pub(crate) fn long_pressed(&self) -> Vec<String> {
        self.long_pressed.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open_link(&self, url: &Url, query: &str) {
        self.opened
            .lock()
            .unwrap()
            .push((url.to_string(), query.to_string()));
    }

    fn long_press(&self, result: &SearchResult) {
        self.long_pressed
            .lock()
            .unwrap()
            .push(result.title().to_string());
    }
}
