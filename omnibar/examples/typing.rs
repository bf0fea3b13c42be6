use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::StreamExt;
use omnibar::{ChannelSink, LogNavigator, OmnibarConfig, QueryController};
use tokio_util::sync::CancellationToken;
use tracing::info;

// Types a word one keystroke at a time against the endpoint in OMNIBAR_SUGGEST_TEMPLATE,
// then deletes the last character to show a cache hit.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let config = OmnibarConfig::from_env()?;
    let word = std::env::args().nth(1).unwrap_or_else(|| "rust".to_string());

    let (sink, mut results) = ChannelSink::new();
    let controller = QueryController::from_config(&config, Arc::new(sink), Arc::new(LogNavigator))?;
    let token = CancellationToken::new();
    let (handle, task) = controller.spawn(token.clone());

    tokio::spawn(async move {
        while let Some(set) = results.next().await {
            println!("--- {} results", set.len());
            for result in set.iter() {
                println!("{:?} {} -> {}", result.kind(), result.title(), result.url());
            }
        }
    });

    let mut typed = String::new();
    for c in word.chars() {
        typed.push(c);
        info!("typed {typed}");
        handle.update_query(typed.clone()).await?;
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    typed.pop();
    handle.update_query(typed).await?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    token.cancel();
    task.await?;
    Ok(())
}
