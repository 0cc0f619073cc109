//! Section classifier — labels one heading span.

use serde::Serialize;

use crate::tables::PosTable;
use crate::wikitext::{self, HeadingSpan, InlineNode, Template};
use crate::{Error, Result};

/// A classified section heading.
///
/// `"===Etymology 2==="` classifies to category `"Etymology"`, index 2.
/// Anything whose category appears in the part-of-speech table is a
/// Definition header. Immutable once constructed; subordinate spans stay
/// unclassified until the entry assembler needs them at the level below.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub category: String,
    pub index: Option<u32>,
    pub is_definition: bool,
    pub level: usize,
    pub content: Vec<InlineNode>,
    pub subordinates: Vec<HeadingSpan>,
}

impl Header {
    /// Classify a span at its declared level.
    pub fn classify(span: HeadingSpan, pos: &PosTable) -> Result<Self> {
        Self::classify_with_flag(span, pos, None)
    }

    /// Classify with an explicit definition flag. The flag must agree with
    /// the value derived from the part-of-speech table.
    pub fn classify_with_flag(
        span: HeadingSpan,
        pos: &PosTable,
        definition_override: Option<bool>,
    ) -> Result<Self> {
        let HeadingSpan { heading, level, content, subordinates } = span;
        let delim = "=".repeat(level);

        let rest = heading.strip_prefix(delim.as_str()).ok_or_else(|| Error::Format {
            heading: heading.clone(),
            message: format!("heading does not open with {level} delimiter characters"),
        })?;
        if rest.starts_with('=') {
            return Err(Error::Format {
                heading: heading.clone(),
                message: format!("heading is nested deeper than its declared level {level}"),
            });
        }
        let end = rest.find(delim.as_str()).ok_or_else(|| Error::Format {
            heading: heading.clone(),
            message: format!("heading does not close with {level} delimiter characters"),
        })?;
        let raw = &rest[..end];

        let (category, index) = if let Some(tail) = raw.strip_prefix("Etymology ") {
            let idx: u32 = tail.trim().parse().map_err(|_| Error::Format {
                heading: heading.clone(),
                message: format!("etymology index '{tail}' is not an integer"),
            })?;
            if idx == 0 {
                return Err(Error::Format {
                    heading: heading.clone(),
                    message: "etymology index must be positive".into(),
                });
            }
            ("Etymology".to_string(), Some(idx))
        } else {
            (raw.to_string(), None)
        };

        let derived = pos.is_definition(&category);
        if let Some(flag) = definition_override {
            if flag != derived {
                return Err(Error::Format {
                    heading,
                    message: format!(
                        "explicit definition flag {flag} disagrees with part-of-speech table"
                    ),
                });
            }
        }

        Ok(Self { category, index, is_definition: derived, level, content, subordinates })
    }

    /// Reconstruct the bracketed heading text. For headers classified
    /// without an explicit index or override this reproduces the original
    /// span byte-for-byte.
    pub fn exact_heading(&self) -> String {
        let delim = "=".repeat(self.level);
        match self.index {
            Some(idx) => format!("{delim}{} {idx}{delim}", self.category),
            None => format!("{delim}{}{delim}", self.category),
        }
    }

    /// Direct template children of this section's own content.
    pub fn direct_templates(&self) -> impl Iterator<Item = &Template> {
        wikitext::direct_templates(&self.content)
    }

    /// Every template under this section, recursing into template
    /// arguments and subordinate sections, in document order.
    pub fn descendant_templates(&self) -> Vec<&Template> {
        let mut out = wikitext::descendant_templates(&self.content);
        collect_from_spans(&self.subordinates, &mut out);
        out
    }
}

fn collect_from_spans<'a>(spans: &'a [HeadingSpan], out: &mut Vec<&'a Template>) {
    for span in spans {
        out.extend(wikitext::descendant_templates(&span.content));
        collect_from_spans(&span.subordinates, out);
    }
}
