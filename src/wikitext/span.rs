//! Heading spans — the section splitter's output.

use serde::Serialize;

use super::InlineNode;

/// One raw section span as delivered by the section-splitting collaborator.
///
/// The heading text is bracketed by runs of `=` whose length equals the
/// nesting level (`"===Etymology==="` is level 3). `subordinates` holds
/// every strictly deeper span that followed this heading, up to the next
/// heading of equal or shallower level, tree-shaped and in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingSpan {
    pub heading: String,
    pub level: usize,
    /// The span's own inline content, excluding subordinate sections.
    pub content: Vec<InlineNode>,
    pub subordinates: Vec<HeadingSpan>,
}

impl HeadingSpan {
    pub fn new(heading: impl Into<String>, level: usize) -> Self {
        Self {
            heading: heading.into(),
            level,
            content: Vec::new(),
            subordinates: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: Vec<InlineNode>) -> Self {
        self.content = content;
        self
    }

    pub fn with_subordinates(mut self, subordinates: Vec<HeadingSpan>) -> Self {
        self.subordinates = subordinates;
        self
    }
}
