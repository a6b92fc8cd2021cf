use crate::schema::Runner;

/// Display language of the consuming view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLang {
    Th,
    En,
}

/// Outcome of the single match lookup. A blank query is its own state and
/// must not be rendered as a miss.
#[derive(Debug, PartialEq)]
pub enum SearchHit {
    Found(Runner),
    NotFound,
    NoQuery,
}

/// Outcome of the multi match lookup
#[derive(Debug, PartialEq)]
pub enum SearchMatches {
    Found(Vec<Runner>),
    NotFound,
    NoQuery,
}
