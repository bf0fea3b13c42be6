use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ResultKind {
    /// Plain completion of the typed text, opens a search for the phrase
    Suggestion,
    /// Rich result pointing at a specific site
    Navigation,
}

/// A single row the address bar can show.
///
/// Values are immutable once built. Only navigation results carry a
/// description, an icon locator and an impression locator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "ResultFields")]
pub struct SearchResult {
    kind: ResultKind,
    query: String,
    title: String,
    url: Url,
    description: Option<String>,
    image_ref: Option<String>,
    impression_ref: Option<String>,
}

impl SearchResult {
    /// Suggestions echo the suggested phrase as both query and title.
    pub fn suggestion(phrase: impl Into<String>, url: Url) -> Self {
        let phrase = phrase.into();
        Self {
            kind: ResultKind::Suggestion,
            title: phrase.clone(),
            query: phrase,
            url,
            description: None,
            image_ref: None,
            impression_ref: None,
        }
    }

    pub fn navigation(
        query: impl Into<String>,
        title: impl Into<String>,
        url: Url,
        description: impl Into<String>,
        image_ref: impl Into<String>,
        impression_ref: impl Into<String>,
    ) -> Self {
        Self {
            kind: ResultKind::Navigation,
            query: query.into(),
            title: title.into(),
            url,
            description: Some(description.into()),
            image_ref: Some(image_ref.into()),
            impression_ref: Some(impression_ref.into()),
        }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    /// The text that produced this result.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    pub fn impression_ref(&self) -> Option<&str> {
        self.impression_ref.as_deref()
    }

    pub fn is_navigation(&self) -> bool {
        self.kind == ResultKind::Navigation
    }
}

/// Wire form of a [`SearchResult`], checked against the per-kind field rules.
#[derive(Deserialize)]
struct ResultFields {
    kind: ResultKind,
    query: String,
    title: String,
    url: Url,
    description: Option<String>,
    image_ref: Option<String>,
    impression_ref: Option<String>,
}

impl TryFrom<ResultFields> for SearchResult {
    type Error = &'static str;

    fn try_from(fields: ResultFields) -> Result<Self, Self::Error> {
        match (
            fields.kind,
            fields.description,
            fields.image_ref,
            fields.impression_ref,
        ) {
            (ResultKind::Suggestion, None, None, None) if fields.query == fields.title => {
                Ok(Self::suggestion(fields.query, fields.url))
            }
            (ResultKind::Suggestion, ..) => {
                Err("suggestion must echo its query and carry no navigation fields")
            }
            (ResultKind::Navigation, Some(description), Some(image_ref), Some(impression_ref)) => {
                Ok(Self::navigation(
                    fields.query,
                    fields.title,
                    fields.url,
                    description,
                    image_ref,
                    impression_ref,
                ))
            }
            (ResultKind::Navigation, ..) => {
                Err("navigation needs a description, image and impression")
            }
        }
    }
}
