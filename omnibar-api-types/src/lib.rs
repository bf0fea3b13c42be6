mod result_set;
mod search;

pub use result_set::{ResultGroup, ResultSet};
pub use search::{ResultKind, SearchResult};
pub use url::Url;
