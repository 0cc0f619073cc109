//! Typed relation nodes — one per extracted template occurrence.

use serde::Serialize;
use smallvec::SmallVec;

use crate::lookup::Query;
use crate::wikitext::Template;

/// The three closed families of etymological template codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationFamily {
    /// Inheritance, derivation, borrowing and their variants.
    Etymological,
    /// Affixation and compounding.
    Affix,
    /// Mentions, cognates and other sideways references.
    Mention,
}

/// A typed relation extracted from a template occurrence.
///
/// Identity is structural: two relations built from identical template
/// arguments compare equal regardless of where they were allocated, so
/// nodes can be deduplicated and compared across independently-built
/// graphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Relation {
    Ety(EtyRelation),
    Lemma(LemmaRelation),
    Descent(DescentRelation),
}

/// An etymological template occurrence in an etymology paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EtyRelation {
    pub family: RelationFamily,
    /// The template name as written (`"bor"`, `"inherited"`, ...).
    pub rtype: String,
    pub lang: String,
    pub word: String,
    /// Remaining positional arguments (alternate display form, gloss).
    pub args: SmallVec<[String; 4]>,
}

impl EtyRelation {
    /// Extract language/word from the template's positional arguments.
    ///
    /// Etymological-family templates name the borrowing language first, so
    /// the source language and word sit at positions 1 and 2; affix and
    /// mention templates put them at 0 and 1.
    pub fn from_template(family: RelationFamily, template: &Template) -> Self {
        let positional: Vec<String> =
            template.positional().map(|a| a.text()).collect();
        let first = match family {
            RelationFamily::Etymological => 1,
            RelationFamily::Affix | RelationFamily::Mention => 0,
        };
        let lang = positional.get(first).cloned().unwrap_or_default();
        let word = positional.get(first + 1).cloned().unwrap_or_default();
        let args = positional
            .into_iter()
            .skip(first + 2)
            .collect::<SmallVec<[String; 4]>>();
        Self { family, rtype: template.name.clone(), lang, word, args }
    }
}

/// An inflected/alternate-form-of pointer found in a definition section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LemmaRelation {
    /// The full template name, always ending in `" of"`.
    pub rtype: String,
    pub lang: String,
    pub word: String,
}

impl LemmaRelation {
    pub fn from_template(template: &Template) -> Self {
        let positional: Vec<String> =
            template.positional().map(|a| a.text()).collect();
        let (lang, word) = match positional.as_slice() {
            [] => (String::new(), String::new()),
            [word] => (String::new(), word.clone()),
            [lang, word, ..] => (lang.clone(), word.clone()),
        };
        Self { rtype: template.name.clone(), lang, word }
    }
}

/// A descendant-language entry found in a Descendants section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DescentRelation {
    pub lang: String,
    pub word: String,
    /// Set when a "see descendants" marker immediately followed this
    /// candidate: the listed word leads to further descendants elsewhere.
    pub more_descendants: bool,
}

impl DescentRelation {
    pub fn from_template(template: &Template) -> Self {
        let lang = template.positional_text(0).unwrap_or_default();
        let word = template.positional_text(1).unwrap_or_default();
        Self { lang, word, more_descendants: false }
    }
}

impl Relation {
    pub fn type_name(&self) -> &'static str {
        match self {
            Relation::Ety(_) => "ety",
            Relation::Lemma(_) => "lemma",
            Relation::Descent(_) => "descent",
        }
    }

    pub fn lang(&self) -> &str {
        match self {
            Relation::Ety(r) => &r.lang,
            Relation::Lemma(r) => &r.lang,
            Relation::Descent(r) => &r.lang,
        }
    }

    pub fn word(&self) -> &str {
        match self {
            Relation::Ety(r) => &r.word,
            Relation::Lemma(r) => &r.word,
            Relation::Descent(r) => &r.word,
        }
    }

    /// Whether this relation answers the given query: words must match,
    /// and the language must match when the query names one.
    pub fn matches_query(&self, query: &Query) -> bool {
        query.word == self.word()
            && query.lang.as_deref().is_none_or(|lang| lang == self.lang())
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Ety(r) => write!(f, "{{{}|{}|{}}}", r.rtype, r.lang, r.word),
            Relation::Lemma(r) => write!(f, "{{{}|{}|{}}}", r.rtype, r.lang, r.word),
            Relation::Descent(r) => {
                write!(f, "{{desc|{}|{}}}", r.lang, r.word)?;
                if r.more_descendants {
                    write!(f, "+")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ety_relation_argument_positions() {
        // {{bor|es|la|verbum}}: source language and word at 1 and 2.
        let t = Template::new("bor").arg("es").arg("la").arg("verbum");
        let r = EtyRelation::from_template(RelationFamily::Etymological, &t);
        assert_eq!(r.lang, "la");
        assert_eq!(r.word, "verbum");
        assert!(r.args.is_empty());

        // {{m|la|verbum||word}}: language and word at 0 and 1, rest kept.
        let t = Template::new("m").arg("la").arg("verbum").arg("").arg("word");
        let r = EtyRelation::from_template(RelationFamily::Mention, &t);
        assert_eq!(r.lang, "la");
        assert_eq!(r.word, "verbum");
        assert_eq!(r.args.as_slice(), ["", "word"]);
    }

    #[test]
    fn test_structural_equality() {
        let t = Template::new("m").arg("la").arg("verbum");
        let a = EtyRelation::from_template(RelationFamily::Mention, &t);
        let b = EtyRelation::from_template(RelationFamily::Mention, &t.clone());
        assert_eq!(a, b);
    }

    #[test]
    fn test_lemma_relation_single_positional() {
        let t = Template::new("es-verb form of").arg("adelantar");
        let r = LemmaRelation::from_template(&t);
        assert_eq!(r.lang, "");
        assert_eq!(r.word, "adelantar");
    }

    #[test]
    fn test_matches_query() {
        let rel = Relation::Ety(EtyRelation {
            family: RelationFamily::Mention,
            rtype: "m".into(),
            lang: "es".into(),
            word: "delante".into(),
            args: SmallVec::new(),
        });
        assert!(rel.matches_query(&Query::parse("delante#es")));
        assert!(rel.matches_query(&Query::parse("delante")));
        assert!(!rel.matches_query(&Query::parse("delante#la")));
        assert!(!rel.matches_query(&Query::parse("atras#es")));
    }
}
