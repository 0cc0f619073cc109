//! Entry assembler — lexes an ordered heading sequence into word-sense
//! entries, enforcing the single- vs multi-etymology structural rules.

use hashbrown::HashSet;
use serde::Serialize;

use crate::tables::PosTable;
use crate::wikitext::HeadingSpan;
use crate::{Error, Result};

use super::Header;

/// One word sense: an optional etymology section plus the extra sections
/// (pronunciation, definitions, descendant lists) belonging to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub etymology: Option<Header>,
    pub extras: Vec<Header>,
}

impl Entry {
    /// An entry cannot be blank: at least one of the two parts is present.
    pub fn new(etymology: Option<Header>, extras: Vec<Header>) -> Result<Self> {
        if etymology.is_none() && extras.is_empty() {
            return Err(Error::Consistency(
                "entry must have an etymology or at least one extra section".into(),
            ));
        }
        Ok(Self { etymology, extras })
    }

    /// Extras flagged as Definition headers.
    pub fn definition_sections(&self) -> impl Iterator<Item = &Header> {
        self.extras.iter().filter(|h| h.is_definition)
    }

    /// Extras holding descendant-language lists.
    pub fn descendant_sections(&self) -> impl Iterator<Item = &Header> {
        self.extras
            .iter()
            .filter(|h| h.category == crate::tables::DESCENDANTS_CATEGORY)
    }
}

/// The entries of one language block, with the structural flags observed
/// while lexing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entries {
    pub entries: Vec<Entry>,
    pub is_multi_etymology: bool,
    pub saw_etymology: bool,
    pub saw_definition: bool,
}

impl Entries {
    /// Resolve a 1-based definition id, matching the document's own
    /// numbering. Out-of-range ids are a fatal lookup error.
    pub fn by_definition_id(&self, id: usize) -> Result<&Entry> {
        if id == 0 || id > self.entries.len() {
            return Err(Error::Lookup(format!(
                "definition id {id} out of range 1..={}",
                self.entries.len()
            )));
        }
        Ok(&self.entries[id - 1])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Undetermined,
    Single,
    Multi,
}

/// Lex an ordered sequence of same-level heading spans into [`Entries`].
///
/// Single pass in document order. Pages mixing a bare `Etymology` section
/// with indexed `Etymology N` sections are rejected, as are duplicate
/// indices, definitions preceding the first etymology, and top-level
/// definitions on multi-etymology pages.
pub fn assemble(spans: Vec<HeadingSpan>, pos: &PosTable) -> Result<Entries> {
    let mut mode = Mode::Undetermined;
    let mut pre: Vec<Header> = Vec::new();
    let mut main: Vec<Header> = Vec::new();
    let mut saw_definition = false;
    let mut seen_indices: HashSet<u32> = HashSet::new();

    for span in spans {
        let header = Header::classify(span, pos)?;
        if header.category == "Etymology" {
            if saw_definition {
                // Lemmas nest under their etymology; a definition can only
                // legally precede an Etymology heading on pages without one.
                return Err(Error::Format {
                    heading: header.exact_heading(),
                    message: "Etymology must precede lemmas".into(),
                });
            }
            match header.index {
                None => {
                    match mode {
                        Mode::Multi => {
                            return Err(Error::Format {
                                heading: header.exact_heading(),
                                message: "bare Etymology section on a multi-etymology page"
                                    .into(),
                            });
                        }
                        Mode::Single => {
                            return Err(Error::Format {
                                heading: header.exact_heading(),
                                message: "second Etymology section on a single-etymology page"
                                    .into(),
                            });
                        }
                        Mode::Undetermined => mode = Mode::Single,
                    }
                    main.push(header);
                }
                Some(idx) => {
                    if mode == Mode::Single {
                        return Err(Error::Format {
                            heading: header.exact_heading(),
                            message: "indexed Etymology section on a single-etymology page"
                                .into(),
                        });
                    }
                    mode = Mode::Multi;
                    if !seen_indices.insert(idx) {
                        return Err(Error::Format {
                            heading: header.exact_heading(),
                            message: format!("duplicate etymology index {idx}"),
                        });
                    }
                    main.push(header);
                }
            }
        } else if header.is_definition {
            if mode == Mode::Multi {
                return Err(Error::Format {
                    heading: header.exact_heading(),
                    message: "definitions must nest under an Etymology section, not sit at \
                              top level"
                        .into(),
                });
            }
            saw_definition = true;
            match mode {
                Mode::Undetermined => pre.push(header),
                _ => main.push(header),
            }
        } else {
            match mode {
                Mode::Undetermined => pre.push(header),
                Mode::Single => main.push(header),
                Mode::Multi => {
                    tracing::debug!(
                        heading = %header.exact_heading(),
                        "dropping top-level section on multi-etymology page"
                    );
                }
            }
        }
    }

    let saw_etymology = mode != Mode::Undetermined;
    match mode {
        Mode::Multi => {
            if !pre.is_empty() {
                // Known information loss: sections preceding the first
                // Etymology heading have no entry to belong to.
                tracing::debug!(
                    count = pre.len(),
                    "discarding pre-etymology sections on multi-etymology page"
                );
            }
            let mut entries = Vec::with_capacity(main.len());
            for mut ety in main {
                let subordinates = std::mem::take(&mut ety.subordinates);
                let mut extras = Vec::new();
                for sub in subordinates {
                    if sub.level == ety.level + 1 {
                        extras.push(Header::classify(sub, pos)?);
                    } else {
                        tracing::debug!(
                            heading = %sub.heading,
                            "skipping subordinate nested deeper than one level"
                        );
                    }
                }
                entries.push(Entry::new(Some(ety), extras)?);
            }
            Ok(Entries {
                entries,
                is_multi_etymology: true,
                saw_etymology,
                saw_definition,
            })
        }
        Mode::Single | Mode::Undetermined => {
            let mut headers = pre;
            headers.append(&mut main);
            let mut iter = headers.into_iter();
            let Some(first) = iter.next() else {
                return Err(Error::Format {
                    heading: String::new(),
                    message: "page has no sections at this level".into(),
                });
            };
            let (etymology, mut extras) = if first.category == "Etymology" {
                (Some(first), Vec::new())
            } else {
                (None, vec![first])
            };
            for header in iter {
                if header.index.is_some() || header.category == "Etymology" {
                    return Err(Error::Format {
                        heading: header.exact_heading(),
                        message: "unexpected Etymology section among extras".into(),
                    });
                }
                extras.push(header);
            }
            let entry = Entry::new(etymology, extras)?;
            Ok(Entries {
                entries: vec![entry],
                is_multi_etymology: false,
                saw_etymology,
                saw_definition,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> PosTable {
        PosTable::wiktionary()
    }

    fn span(heading: &str, level: usize) -> HeadingSpan {
        HeadingSpan::new(heading, level)
    }

    #[test]
    fn test_single_etymology_with_siblings() {
        let entries = assemble(
            vec![
                span("===Etymology===", 3),
                span("===Verb===", 3),
                span("===Further reading===", 3),
            ],
            &pos(),
        )
        .unwrap();
        assert!(!entries.is_multi_etymology);
        assert!(entries.saw_etymology);
        assert!(entries.saw_definition);
        assert_eq!(entries.len(), 1);
        let entry = &entries.entries[0];
        assert_eq!(entry.etymology.as_ref().unwrap().category, "Etymology");
        let extras: Vec<_> = entry.extras.iter().map(|h| h.category.as_str()).collect();
        assert_eq!(extras, vec!["Verb", "Further reading"]);
    }

    #[test]
    fn test_zero_etymology_page() {
        let entries = assemble(
            vec![span("===Pronunciation===", 3), span("===Noun===", 3)],
            &pos(),
        )
        .unwrap();
        assert!(!entries.is_multi_etymology);
        assert!(!entries.saw_etymology);
        assert!(entries.saw_definition);
        assert_eq!(entries.len(), 1);
        assert!(entries.entries[0].etymology.is_none());
        assert_eq!(entries.entries[0].extras.len(), 2);
    }

    #[test]
    fn test_multi_etymology_nests_extras() {
        let entries = assemble(
            vec![
                span("===Etymology 1===", 3)
                    .with_subordinates(vec![span("====Adverb====", 4)]),
                span("===Etymology 2===", 3)
                    .with_subordinates(vec![span("====Verb====", 4)]),
            ],
            &pos(),
        )
        .unwrap();
        assert!(entries.is_multi_etymology);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.entries[0].etymology.as_ref().unwrap().index, Some(1));
        assert_eq!(entries.entries[0].extras[0].category, "Adverb");
        assert!(entries.entries[0].extras[0].is_definition);
        assert_eq!(entries.entries[1].etymology.as_ref().unwrap().index, Some(2));
        assert_eq!(entries.entries[1].extras[0].category, "Verb");
    }

    #[test]
    fn test_non_contiguous_indices_allowed() {
        let entries = assemble(
            vec![span("===Etymology 2===", 3), span("===Etymology 5===", 3)],
            &pos(),
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.by_definition_id(1).unwrap().etymology.as_ref().unwrap().index, Some(2));
        assert_eq!(entries.by_definition_id(2).unwrap().etymology.as_ref().unwrap().index, Some(5));
    }

    #[test]
    fn test_mixed_markers_are_fatal() {
        // Indexed after bare.
        assert!(assemble(
            vec![span("===Etymology===", 3), span("===Etymology 2===", 3)],
            &pos(),
        )
        .is_err());
        // Bare after indexed.
        assert!(assemble(
            vec![span("===Etymology 1===", 3), span("===Etymology===", 3)],
            &pos(),
        )
        .is_err());
    }

    #[test]
    fn test_second_bare_etymology_is_fatal() {
        assert!(assemble(
            vec![span("===Etymology===", 3), span("===Etymology===", 3)],
            &pos(),
        )
        .is_err());
    }

    #[test]
    fn test_duplicate_index_is_fatal() {
        assert!(assemble(
            vec![span("===Etymology 1===", 3), span("===Etymology 1===", 3)],
            &pos(),
        )
        .is_err());
    }

    #[test]
    fn test_definition_before_etymology_is_fatal() {
        let err = assemble(
            vec![span("===Verb===", 3), span("===Etymology===", 3)],
            &pos(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_top_level_definition_on_multi_page_is_fatal() {
        assert!(assemble(
            vec![span("===Etymology 1===", 3), span("===Verb===", 3)],
            &pos(),
        )
        .is_err());
    }

    #[test]
    fn test_pre_etymology_sections_discarded_in_multi_mode() {
        let entries = assemble(
            vec![
                span("===Pronunciation===", 3),
                span("===Etymology 1===", 3),
                span("===Etymology 2===", 3),
            ],
            &pos(),
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.extras.is_empty()));
    }

    #[test]
    fn test_empty_page_is_fatal() {
        assert!(assemble(Vec::new(), &pos()).is_err());
    }

    #[test]
    fn test_by_definition_id_bounds() {
        let entries = assemble(vec![span("===Noun===", 3)], &pos()).unwrap();
        assert!(entries.by_definition_id(1).is_ok());
        assert!(entries.by_definition_id(0).is_err());
        assert!(entries.by_definition_id(2).is_err());
    }
}
