use omnibar_api_types::SearchResult;
use thiserror::Error;
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::controller::QueryController;

/// Everything the presentation layer can tell a running session.
#[derive(Debug, Clone)]
pub enum Command {
    UpdateQuery(String),
    DidShow(SearchResult),
    DidSelect(SearchResult),
    DidLongPress(SearchResult),
    Teardown,
}

#[derive(Debug, Error)]
pub enum OmnibarError {
    #[error("Search session has shut down")]
    Closed,
}

/// Cloneable sender for a session started with [`QueryController::spawn`].
#[derive(Debug, Clone)]
pub struct OmnibarHandle {
    sender: Sender<Command>,
}

impl OmnibarHandle {
    pub async fn send(&self, command: Command) -> Result<(), OmnibarError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| OmnibarError::Closed)
    }

    pub async fn update_query(&self, query: impl Into<String>) -> Result<(), OmnibarError> {
        self.send(Command::UpdateQuery(query.into())).await
    }

    pub async fn did_show(&self, result: SearchResult) -> Result<(), OmnibarError> {
        self.send(Command::DidShow(result)).await
    }

    pub async fn did_select(&self, result: SearchResult) -> Result<(), OmnibarError> {
        self.send(Command::DidSelect(result)).await
    }

    pub async fn did_long_press(&self, result: SearchResult) -> Result<(), OmnibarError> {
        self.send(Command::DidLongPress(result)).await
    }

    pub async fn teardown(&self) -> Result<(), OmnibarError> {
        self.send(Command::Teardown).await
    }
}

impl QueryController {
    /// Runs the session on its own task until every handle is dropped or `token` is cancelled.
    pub fn spawn(self, token: CancellationToken) -> (OmnibarHandle, JoinHandle<()>) {
        let (sender, receiver) = channel(64);
        let task = tokio::spawn(self.run(receiver, token));
        (OmnibarHandle { sender }, task)
    }

    /// Applies commands and fetch completions one at a time. Tears the session down on exit.
    pub async fn run(mut self, mut commands: Receiver<Command>, token: CancellationToken) {
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("search session cancelled");
                    break;
                }
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => {
                        info!("all search handles dropped");
                        break;
                    }
                },
                Some(completion) = self.completion_rx.recv() => self.apply_completion(completion),
            }
        }
        self.teardown();
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::UpdateQuery(query) => self.update_query(&query),
            Command::DidShow(result) => self.did_show(&result),
            Command::DidSelect(result) => self.did_select(&result),
            Command::DidLongPress(result) => self.did_long_press(&result),
            Command::Teardown => self.teardown(),
        }
    }
}
