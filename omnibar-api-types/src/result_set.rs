use serde::{Deserialize, Serialize};

use crate::search::{ResultKind, SearchResult};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "GroupFields")]
pub struct ResultGroup {
    kind: ResultKind,
    results: Vec<SearchResult>,
}

impl ResultGroup {
    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }
}

#[derive(Deserialize)]
struct GroupFields {
    kind: ResultKind,
    results: Vec<SearchResult>,
}

impl TryFrom<GroupFields> for ResultGroup {
    type Error = &'static str;

    fn try_from(fields: GroupFields) -> Result<Self, Self::Error> {
        if fields.results.is_empty() {
            return Err("result groups are never empty");
        }
        if fields.results.iter().any(|r| r.kind() != fields.kind) {
            return Err("every result in a group shares the group kind");
        }
        Ok(Self {
            kind: fields.kind,
            results: fields.results,
        })
    }
}

/// Display-ready results for one query: navigation group first, then suggestions.
///
/// Groups are never empty, so a set holds zero, one or two groups. An empty
/// set is a real answer ("the service had nothing"), callers that need to
/// express "not fetched yet" wrap it in an `Option`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(try_from = "SetFields")]
pub struct ResultSet {
    groups: Vec<ResultGroup>,
}

#[derive(Deserialize)]
struct SetFields {
    groups: Vec<ResultGroup>,
}

impl TryFrom<SetFields> for ResultSet {
    type Error = &'static str;

    fn try_from(fields: SetFields) -> Result<Self, Self::Error> {
        let kinds: Vec<_> = fields.groups.iter().map(ResultGroup::kind).collect();
        match kinds.as_slice() {
            [] | [_] | [ResultKind::Navigation, ResultKind::Suggestion] => Ok(Self {
                groups: fields.groups,
            }),
            _ => Err("at most one navigation group followed by one suggestion group"),
        }
    }
}

impl ResultSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Source order inside each group is kept as given.
    pub fn assemble(navigations: Vec<SearchResult>, suggestions: Vec<SearchResult>) -> Self {
        let mut groups = Vec::with_capacity(2);
        if !navigations.is_empty() {
            groups.push(ResultGroup {
                kind: ResultKind::Navigation,
                results: navigations,
            });
        }
        if !suggestions.is_empty() {
            groups.push(ResultGroup {
                kind: ResultKind::Suggestion,
                results: suggestions,
            });
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[ResultGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of results across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.results.len()).sum()
    }

    /// Every result in display order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchResult> {
        self.groups.iter().flat_map(|g| g.results.iter())
    }

    pub fn navigations(&self) -> impl Iterator<Item = &SearchResult> {
        self.iter().filter(|r| r.is_navigation())
    }
}
