use omnibar_api_types::{ResultSet, SearchResult, Url};
use suggest_client::{NavigationRecord, SearchEngine, SuggestResponse};
use tracing::debug;

/// Turns a parsed suggest response into what the address bar shows for `query`.
pub fn build_result_set(query: &str, response: SuggestResponse, engine: &SearchEngine) -> ResultSet {
    let navigations = response
        .navigations
        .iter()
        .filter_map(|record| navigation_result(query, record))
        .collect();
    let suggestions = response
        .suggestions
        .into_iter()
        .filter_map(|phrase| suggestion_result(engine, phrase))
        .collect();
    ResultSet::assemble(navigations, suggestions)
}

/// All of title, url, description (`q`), image and impression must be present.
/// The url must be absolute, relative or scheme-less locators are dropped.
pub(crate) fn navigation_result(query: &str, record: &NavigationRecord) -> Option<SearchResult> {
    let (Some(title), Some(description), Some(url), Some(image), Some(impression)) = (
        record.get_str("title"),
        record.get_str("q"),
        record.get_str("url"),
        record.get_str("image"),
        record.get_str("impression"),
    ) else {
        debug!("dropping incomplete navigation record");
        return None;
    };
    let Ok(url) = Url::parse(url) else {
        debug!(url, "dropping navigation record without an absolute url");
        return None;
    };
    Some(SearchResult::navigation(
        query,
        title,
        url,
        description.replacen('!', "", 1),
        image,
        impression,
    ))
}

pub(crate) fn suggestion_result(engine: &SearchEngine, phrase: String) -> Option<SearchResult> {
    let Some(url) = engine.search_url_for_query(&phrase) else {
        debug!(%phrase, "dropping suggestion without a search url");
        return None;
    };
    Some(SearchResult::suggestion(phrase, url))
}
