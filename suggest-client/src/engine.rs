use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

pub const SEARCH_TERMS: &str = "{searchTerms}";
const INPUT_ENCODING: &str = "{inputEncoding}";
const OUTPUT_ENCODING: &str = "{outputEncoding}";

/// OpenSearch style description of a search engine.
///
/// Templates are plain URLs with `{searchTerms}` where the query goes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchEngine {
    pub name: String,
    pub search_template: String,
    #[serde(default)]
    pub suggest_template: Option<String>,
}

impl SearchEngine {
    pub fn new(
        name: impl Into<String>,
        search_template: impl Into<String>,
        suggest_template: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            search_template: search_template.into(),
            suggest_template,
        }
    }

    /// `None` when the engine has no suggest endpoint or the template does not produce a URL.
    pub fn suggest_url_for_query(&self, query: &str) -> Option<Url> {
        self.suggest_template
            .as_deref()
            .and_then(|template| Self::url_from_template(template, query))
    }

    pub fn search_url_for_query(&self, query: &str) -> Option<Url> {
        Self::url_from_template(&self.search_template, query)
    }

    fn url_from_template(template: &str, query: &str) -> Option<Url> {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let filled = template
            .replace(SEARCH_TERMS, &encoded)
            .replace(INPUT_ENCODING, "UTF-8")
            .replace(OUTPUT_ENCODING, "UTF-8");
        let url = Url::parse(&filled).ok()?;
        if url.cannot_be_a_base() {
            return None;
        }
        Some(url)
    }
}
