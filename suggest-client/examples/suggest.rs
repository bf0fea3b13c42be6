use clap::Parser;
use log::info;
use suggest_client::{SearchEngine, SuggestClient};

/// Ask a suggest endpoint for one query and print what came back
#[derive(Parser, Debug)]
struct Args {
    /// Suggest endpoint template, `{searchTerms}` is replaced with the query
    #[arg(long)]
    suggest_template: String,
    /// Search template used to print suggestion destinations
    #[arg(long, default_value = "https://duckduckgo.com/?q={searchTerms}")]
    search_template: String,
    #[arg(long, default_value = "omnibar-suggest-example")]
    user_agent: String,
    query: String,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();
    let engine = SearchEngine::new(
        "example",
        args.search_template,
        Some(args.suggest_template),
    );
    let client = SuggestClient::new(engine, args.user_agent).unwrap();
    let response = client.query(&args.query).await.unwrap();
    for suggestion in &response.suggestions {
        let url = client.engine().search_url_for_query(suggestion);
        println!("{suggestion} -> {url:?}");
    }
    for navigation in &response.navigations {
        info!("navigation record {navigation:?}");
        println!(
            "{} ({})",
            navigation.get_str("title").unwrap_or_default(),
            navigation.get_str("url").unwrap_or_default()
        );
    }
}
