//! Keystroke driven search suggestions for an address bar.
//!
//! The presentation layer pushes the full text of the input on every keystroke
//! through [`QueryController::update_query`] (or an [`OmnibarHandle`] when the
//! controller runs on its own task) and receives display-ready
//! [`ResultSet`]s through a [`ResultsSink`].

mod cache;
mod config;
mod controller;
mod event;
mod mapping;
mod session;
mod sink;
#[cfg(test)]
mod test_support;

pub use cache::ResultCache;
pub use config::{ConfigError, OmnibarConfig, DEFAULT_USER_AGENT};
pub use controller::{FetchCompletion, QueryController};
pub use event::{Command, OmnibarError, OmnibarHandle};
pub use mapping::build_result_set;
pub use session::{SessionState, Transition};
pub use sink::{ChannelSink, LogNavigator, Navigator, ResultsSink, ResultsStream};

pub use omnibar_api_types::{ResultGroup, ResultKind, ResultSet, SearchResult, Url};
pub use suggest_client::{Error as SuggestError, SearchEngine, SuggestClient, SuggestSource};
