//! Fixed lookup tables — part-of-speech categories and relation codes.
//!
//! Both tables are external data to the extraction core: the bundled
//! contents mirror the English Wiktionary conventions, and callers may
//! supply their own via [`PosTable::from_categories`] /
//! [`AbbrevTable::from_families`].

use hashbrown::{HashMap, HashSet};

use crate::model::RelationFamily;

/// Section categories that mark a Definition header.
#[derive(Debug, Clone)]
pub struct PosTable {
    categories: HashSet<String>,
}

/// The standard Wiktionary part-of-speech headers.
const WIKTIONARY_POS: &[&str] = &[
    "Adjective", "Adverb", "Ambiposition", "Article", "Circumfix",
    "Circumposition", "Classifier", "Combining form", "Conjunction",
    "Contraction", "Counter", "Determiner", "Ideophone", "Infix",
    "Interfix", "Interjection", "Noun", "Numeral", "Participle",
    "Particle", "Phrase", "Postposition", "Prefix", "Preposition",
    "Prepositional phrase", "Pronoun", "Proper noun", "Proverb",
    "Punctuation mark", "Root", "Suffix", "Symbol", "Verb",
];

impl PosTable {
    pub fn wiktionary() -> Self {
        Self::from_categories(WIKTIONARY_POS.iter().copied())
    }

    pub fn from_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { categories: categories.into_iter().map(Into::into).collect() }
    }

    pub fn is_definition(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}

impl Default for PosTable {
    fn default() -> Self {
        Self::wiktionary()
    }
}

/// Template name that marks "the preceding descendant continues further"
/// inside a Descendants section.
pub const SEE_DESCENDANTS_MARKER: &str = "see desc";

/// Section category holding descendant-language entries.
pub const DESCENDANTS_CATEGORY: &str = "Descendants";

/// Relation-code table: three disjoint closed families of template names.
///
/// Each family maps abbreviated code to full template name; a lookup
/// matches on either form (`"bor"` and `"borrowed"` both classify as
/// [`RelationFamily::Etymological`]).
#[derive(Debug, Clone)]
pub struct AbbrevTable {
    ety: HashMap<String, String>,
    aff: HashMap<String, String>,
    sim: HashMap<String, String>,
}

const WIKTIONARY_ETY: &[(&str, &str)] = &[
    ("inh", "inherited"),
    ("der", "derived"),
    ("bor", "borrowed"),
    ("lbor", "learned borrowing"),
    ("slbor", "semi-learned borrowing"),
    ("obor", "orthographic borrowing"),
    ("cal", "calque"),
    ("sml", "semantic loan"),
];

const WIKTIONARY_AFF: &[(&str, &str)] = &[
    ("af", "affix"),
    ("pre", "prefix"),
    ("suf", "suffix"),
    ("con", "confix"),
    ("com", "compound"),
];

const WIKTIONARY_SIM: &[(&str, &str)] = &[
    ("m", "mention"),
    ("cog", "cognate"),
    ("nc", "noncognate"),
    ("doublet", "doublet"),
];

impl AbbrevTable {
    pub fn wiktionary() -> Self {
        Self::from_families(WIKTIONARY_ETY, WIKTIONARY_AFF, WIKTIONARY_SIM)
    }

    pub fn from_families(
        ety: &[(&str, &str)],
        aff: &[(&str, &str)],
        sim: &[(&str, &str)],
    ) -> Self {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        Self { ety: to_map(ety), aff: to_map(aff), sim: to_map(sim) }
    }

    /// Classify a template name into its relation family, if recognized.
    pub fn classify(&self, name: &str) -> Option<RelationFamily> {
        if is_in(&self.ety, name) {
            Some(RelationFamily::Etymological)
        } else if is_in(&self.aff, name) {
            Some(RelationFamily::Affix)
        } else if is_in(&self.sim, name) {
            Some(RelationFamily::Mention)
        } else {
            None
        }
    }
}

impl Default for AbbrevTable {
    fn default() -> Self {
        Self::wiktionary()
    }
}

/// A code matches a family if it appears as either the abbreviation or the
/// full name.
fn is_in(map: &HashMap<String, String>, name: &str) -> bool {
    map.contains_key(name) || map.values().any(|v| v == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_table_contains_standard_headers() {
        let pos = PosTable::wiktionary();
        assert!(pos.is_definition("Verb"));
        assert!(pos.is_definition("Proper noun"));
        assert!(!pos.is_definition("Etymology"));
        assert!(!pos.is_definition("Pronunciation"));
    }

    #[test]
    fn test_classify_by_abbreviation() {
        let table = AbbrevTable::wiktionary();
        assert_eq!(table.classify("bor"), Some(RelationFamily::Etymological));
        assert_eq!(table.classify("inh"), Some(RelationFamily::Etymological));
        assert_eq!(table.classify("af"), Some(RelationFamily::Affix));
        assert_eq!(table.classify("m"), Some(RelationFamily::Mention));
        assert_eq!(table.classify("cog"), Some(RelationFamily::Mention));
    }

    #[test]
    fn test_classify_by_full_name() {
        let table = AbbrevTable::wiktionary();
        assert_eq!(table.classify("borrowed"), Some(RelationFamily::Etymological));
        assert_eq!(table.classify("compound"), Some(RelationFamily::Affix));
        assert_eq!(table.classify("mention"), Some(RelationFamily::Mention));
    }

    #[test]
    fn test_unrecognized_code() {
        let table = AbbrevTable::wiktionary();
        assert_eq!(table.classify("es-IPA"), None);
        assert_eq!(table.classify(""), None);
    }
}
