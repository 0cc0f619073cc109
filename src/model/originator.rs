//! Root identity of a query.

use serde::Serialize;

/// The word/language pair a query started from, plus a monotonically
/// increasing id distinguishing successive queries in one session.
/// The id participates in identity: asking for the same word twice
/// produces two distinct originators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Originator {
    pub word: String,
    pub lang: String,
    pub o_id: u32,
}

impl Originator {
    pub fn new(word: impl Into<String>, lang: impl Into<String>, o_id: u32) -> Self {
        Self { word: word.into(), lang: lang.into(), o_id }
    }

    /// The query string this originator answers, without the session id.
    pub fn query(&self) -> String {
        format!("{}#{}", self.word, self.lang)
    }
}

impl std::fmt::Display for Originator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}${}", self.word, self.lang, self.o_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_session_id() {
        let o = Originator::new("adelante", "es", 0);
        assert_eq!(o.to_string(), "adelante#es$0");
        assert_eq!(o.query(), "adelante#es");
    }

    #[test]
    fn test_identity_distinguishes_queries() {
        let a = Originator::new("sol", "es", 0);
        let b = Originator::new("sol", "es", 1);
        assert_ne!(a, b);
    }
}
