use std::time::Duration;

use serde::{Deserialize, Serialize};
use suggest_client::{SearchEngine, SEARCH_TERMS};
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str = concat!("omnibar/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Search template has no {{searchTerms}} placeholder: {0}")]
    MissingSearchTerms(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmnibarConfig {
    pub engine: SearchEngine,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Cancel the previous fetch whenever a new one is issued.
    #[serde(default)]
    pub cancel_superseded: bool,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for OmnibarConfig {
    fn default() -> Self {
        Self {
            engine: SearchEngine::new("DuckDuckGo", "https://duckduckgo.com/?q={searchTerms}", None),
            user_agent: default_user_agent(),
            cancel_superseded: false,
            request_timeout_secs: None,
        }
    }
}

impl OmnibarConfig {
    /// Reads `OMNIBAR_*` variables on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(name) = lookup("OMNIBAR_ENGINE_NAME") {
            config.engine.name = name;
        }
        if let Some(template) = lookup("OMNIBAR_SEARCH_TEMPLATE") {
            config.engine.search_template = template;
        }
        if let Some(template) = lookup("OMNIBAR_SUGGEST_TEMPLATE") {
            config.engine.suggest_template = Some(template).filter(|t| !t.is_empty());
        }
        if let Some(user_agent) = lookup("OMNIBAR_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(flag) = lookup("OMNIBAR_CANCEL_SUPERSEDED") {
            config.cancel_superseded = match flag.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(ConfigError::InvalidValue("OMNIBAR_CANCEL_SUPERSEDED", flag)),
            };
        }
        if let Some(secs) = lookup("OMNIBAR_REQUEST_TIMEOUT_SECS") {
            let parsed = secs
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue("OMNIBAR_REQUEST_TIMEOUT_SECS", secs))?;
            config.request_timeout_secs = Some(parsed);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.engine.search_template.contains(SEARCH_TERMS) {
            return Err(ConfigError::MissingSearchTerms(
                self.engine.search_template.clone(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = OmnibarConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, OmnibarConfig::default());
        assert!(config.engine.suggest_template.is_none());
        assert!(config.request_timeout().is_none());
        assert!(config.user_agent.starts_with("omnibar/"));
    }

    #[test]
    fn reads_every_variable() {
        let config = OmnibarConfig::from_lookup(lookup(&[
            ("OMNIBAR_ENGINE_NAME", "Local"),
            ("OMNIBAR_SEARCH_TEMPLATE", "https://s.example/?q={searchTerms}"),
            ("OMNIBAR_SUGGEST_TEMPLATE", "https://s.example/suggest?q={searchTerms}"),
            ("OMNIBAR_USER_AGENT", "test-agent"),
            ("OMNIBAR_CANCEL_SUPERSEDED", "TRUE"),
            ("OMNIBAR_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.engine.name, "Local");
        assert_eq!(
            config.engine.suggest_template.as_deref(),
            Some("https://s.example/suggest?q={searchTerms}")
        );
        assert_eq!(config.user_agent, "test-agent");
        assert!(config.cancel_superseded);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            OmnibarConfig::from_lookup(lookup(&[("OMNIBAR_CANCEL_SUPERSEDED", "maybe")])),
            Err(ConfigError::InvalidValue(
                "OMNIBAR_CANCEL_SUPERSEDED",
                "maybe".to_string()
            ))
        );
        assert!(matches!(
            OmnibarConfig::from_lookup(lookup(&[("OMNIBAR_REQUEST_TIMEOUT_SECS", "-1")])),
            Err(ConfigError::InvalidValue("OMNIBAR_REQUEST_TIMEOUT_SECS", _))
        ));
        assert!(matches!(
            OmnibarConfig::from_lookup(lookup(&[(
                "OMNIBAR_SEARCH_TEMPLATE",
                "https://s.example/"
            )])),
            Err(ConfigError::MissingSearchTerms(_))
        ));
    }

    #[test]
    fn deserializes_host_json() {
        let config: OmnibarConfig = serde_json::from_str(
            r#"{"engine":{"name":"x","searchTemplate":"https://s.example/?q={searchTerms}",
                "suggestTemplate":"https://s.example/s?q={searchTerms}"},"cancelSuperseded":true}"#,
        )
        .unwrap();
        assert!(config.cancel_superseded);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.validate().is_ok());
    }
}
