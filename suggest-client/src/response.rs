use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const QUERY_TYPE: &str = "QUERY";
const NAVIGATION_TYPE: &str = "NAVIGATION";

/// A `NAVIGATION` element exactly as the service sent it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct NavigationRecord(pub Map<String, Value>);

impl NavigationRecord {
    /// Only string values count, anything else reads as missing.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Parsed body of a suggest request, both lists in service order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
    pub navigations: Vec<NavigationRecord>,
}

impl SuggestResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        Ok(Self::from_value(value))
    }

    /// Elements that are not objects, lack a string `type`, or carry an
    /// unknown type are skipped. A body without a `results` array is empty.
    pub fn from_value(value: Value) -> Self {
        let mut response = Self::default();
        let results = match value {
            Value::Object(mut map) => match map.remove("results") {
                Some(Value::Array(results)) => results,
                _ => return response,
            },
            _ => return response,
        };
        for element in results {
            let Value::Object(record) = element else {
                debug!("skipping non-object suggest element");
                continue;
            };
            match record.get("type").and_then(Value::as_str) {
                Some(QUERY_TYPE) => match record.get("q").and_then(Value::as_str) {
                    Some(q) if !q.trim().is_empty() => response.suggestions.push(q.to_string()),
                    _ => debug!("skipping query element without text"),
                },
                Some(NAVIGATION_TYPE) => response.navigations.push(NavigationRecord(record)),
                other => debug!("skipping suggest element of type {other:?}"),
            }
        }
        response
    }
}
