//! Graph lookup helpers — find the node an incoming query or originator
//! refers to in an already-built graph, for cross-query merging.

use crate::model::{Originator, Relation, RelationGraph};

/// A parsed query string: `word`, `word#Lang`, or `word#Lang$id` (the
/// trailing session id is ignored for matching).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub word: String,
    pub lang: Option<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.split_once('#') {
            Some((word, rest)) => {
                let lang = rest.split_once('$').map_or(rest, |(lang, _)| lang);
                Self {
                    word: word.to_string(),
                    lang: (!lang.is_empty()).then(|| lang.to_string()),
                }
            }
            None => {
                let word = raw.split_once('$').map_or(raw, |(word, _)| word);
                Self { word: word.to_string(), lang: None }
            }
        }
    }
}

/// Find the relation node matching a query string.
///
/// Zero matches warns and returns `None`; several matches warn and return
/// the first encountered — insertion order, with no stronger guarantee.
pub fn find_by_query<'g>(graph: &'g RelationGraph, query: &str) -> Option<&'g Relation> {
    let parsed = Query::parse(query);
    find_first(graph, &parsed, "query")
}

/// Find the relation node matching an originator's identity. Same
/// tie-break contract as [`find_by_query`].
pub fn find_by_origin<'g>(
    graph: &'g RelationGraph,
    origin: &Originator,
) -> Option<&'g Relation> {
    let parsed = Query { word: origin.word.clone(), lang: Some(origin.lang.clone()) };
    find_first(graph, &parsed, "origin")
}

fn find_first<'g>(
    graph: &'g RelationGraph,
    query: &Query,
    what: &'static str,
) -> Option<&'g Relation> {
    let mut matches = graph.relations().filter(|(_, r)| r.matches_query(query));
    match matches.next() {
        None => {
            tracing::warn!(word = %query.word, "no matching node found for {what}");
            None
        }
        Some((_, relation)) => {
            if matches.next().is_some() {
                tracing::warn!(
                    word = %query.word,
                    "found more than one match for {what}, picking the first"
                );
            }
            Some(relation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_only() {
        assert_eq!(Query::parse("sol"), Query { word: "sol".into(), lang: None });
    }

    #[test]
    fn test_parse_word_and_lang() {
        assert_eq!(
            Query::parse("sol#Spanish"),
            Query { word: "sol".into(), lang: Some("Spanish".into()) }
        );
    }

    #[test]
    fn test_parse_strips_session_id() {
        assert_eq!(
            Query::parse("sol#Spanish$3"),
            Query { word: "sol".into(), lang: Some("Spanish".into()) }
        );
        assert_eq!(Query::parse("sol$3"), Query { word: "sol".into(), lang: None });
    }

    #[test]
    fn test_parse_empty_lang() {
        assert_eq!(Query::parse("sol#"), Query { word: "sol".into(), lang: None });
    }
}
