//! # Relation graph builder
//!
//! Walks one selected [`Entry`] and produces a [`RelationGraph`]: the
//! etymology paragraph drives a parent-chase chain, Descendants sections
//! fan out from the attach node, and definition sections contribute
//! lemma pointers. All configuration (palette, mention handling, language
//! filter) is explicit on the builder — nothing ambient.

pub mod history;

use hashbrown::HashSet;

use crate::model::{
    DescentRelation, EtyRelation, GraphNode, LemmaRelation, NodeId, Originator, Relation,
    RelationFamily, RelationGraph,
};
use crate::section::Entry;
use crate::tables::{AbbrevTable, SEE_DESCENDANTS_MARKER};
use crate::wikitext::InlineNode;
use crate::{Error, Result};

pub use history::History;

/// Color given to the session's true origin (`o_id == 0`).
pub const TRUE_ORIGIN_COLOR: &str = "#ff0000";

/// Tokens of look-back retained during an etymology scan.
const HISTORY_CAPACITY: usize = 4;

/// Display colors assigned to graph nodes, cycled by query id.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
}

const DEFAULT_PALETTE: &[&str] = &[
    "#B1D4E0", "#2E8BC0", "#878E88", "#F7CB15",
    "#76BED0", "#0C2D48", "#145DA0", "#1f78b4",
];

impl Palette {
    /// A palette from the given colors; an empty list falls back to the
    /// default palette.
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    pub fn pick(&self, o_id: u32) -> &str {
        &self.colors[o_id as usize % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self { colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect() }
    }
}

/// Builds a [`RelationGraph`] from one entry.
///
/// Each `build*` call owns its graph exclusively until it returns; callers
/// extending a shared graph across queries must serialize those calls.
#[derive(Debug)]
pub struct GraphBuilder<'t> {
    abbrevs: &'t AbbrevTable,
    mention_sideways: bool,
    language_filter: Option<HashSet<String>>,
    palette: Palette,
}

impl<'t> GraphBuilder<'t> {
    pub fn new(abbrevs: &'t AbbrevTable) -> Self {
        Self {
            abbrevs,
            mention_sideways: false,
            language_filter: None,
            palette: Palette::default(),
        }
    }

    /// Record mention/similar relations without extending the primary
    /// derivation chain.
    pub fn mention_sideways(mut self, yes: bool) -> Self {
        self.mention_sideways = yes;
        self
    }

    /// Restrict descendant relations to the given language names. `None`
    /// (the default) retains every candidate.
    pub fn language_filter<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.language_filter = Some(langs.into_iter().map(Into::into).collect());
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Build a fresh graph rooted at the originator.
    pub fn build(&self, entry: &Entry, origin: &Originator) -> Result<RelationGraph> {
        self.build_attached(entry, origin, GraphNode::Origin(origin.clone()))
    }

    /// Build a graph whose relations hang off an existing node — the way
    /// successive queries extend one session graph. The attach node is
    /// inserted into the fresh graph; merging with the caller's existing
    /// graph happens on the caller's side.
    pub fn build_attached(
        &self,
        entry: &Entry,
        origin: &Originator,
        attach: GraphNode,
    ) -> Result<RelationGraph> {
        let mut graph = RelationGraph::new();
        let attach_color = match &attach {
            GraphNode::Origin(o) if o.o_id == 0 => TRUE_ORIGIN_COLOR,
            _ => self.palette.pick(origin.o_id),
        };
        let attach_color = attach_color.to_string();
        let attach_id = graph.add_node(attach, attach_color);
        let color = self.palette.pick(origin.o_id).to_string();

        // Etymology paragraph: one active parent-chase chain.
        let mut prev = attach_id;
        let mut ety_flag = false;
        if let Some(ety) = &entry.etymology {
            ety_flag = !ety.content.is_empty();
            prev = self.scan_etymology(&mut graph, &ety.content, attach_id, &color);
        }

        self.scan_descendants(&mut graph, entry, origin, attach_id, &color);

        let lemma_flag = self.scan_lemmas(&mut graph, entry, origin, ety_flag, prev, &color)?;

        if !ety_flag && !lemma_flag {
            return Err(Error::MissingData {
                missing: "etymology or lemma",
                graph: Box::new(graph),
            });
        }
        Ok(graph)
    }

    /// Walk the paragraph's first sentence and chain recognized relation
    /// tokens. Returns the final chain head.
    fn scan_etymology(
        &self,
        graph: &mut RelationGraph,
        content: &[InlineNode],
        attach_id: NodeId,
        color: &str,
    ) -> NodeId {
        let mut prev = attach_id;
        let mut between = String::new();
        let mut history = History::with_capacity(HISTORY_CAPACITY);

        for node in content {
            match node {
                InlineNode::Template(template) => {
                    history.put(template.clone());
                    match self.abbrevs.classify(&template.name) {
                        None => {
                            tracing::warn!(
                                template = %template.name,
                                "unrecognized relation template, skipping"
                            );
                        }
                        Some(family) => {
                            let rel = EtyRelation::from_template(family, template);
                            let node = GraphNode::Relation(Relation::Ety(rel));
                            if between.contains('+') {
                                // Affix/compound construction: fan out from
                                // the chain head's own parent.
                                let target = graph.first_target(prev);
                                let id = graph.add_node(node, color);
                                if let Some(target) = target {
                                    graph.add_edge(id, target);
                                }
                            } else {
                                let id = graph.add_node(node, color);
                                graph.add_edge(id, prev);
                                if !(self.mention_sideways
                                    && family == RelationFamily::Mention)
                                {
                                    prev = id;
                                }
                            }
                        }
                    }
                    between.clear();
                }
                InlineNode::Text(text) => {
                    if let Some(dot) = text.find('.') {
                        // First sentence ends here; the truncated fragment
                        // is the last token considered.
                        between.push_str(&text[..=dot]);
                        break;
                    }
                    between.push_str(text);
                }
            }
        }
        prev
    }

    /// Collect descendant candidates from every Descendants section and
    /// fan them out from the attach node.
    fn scan_descendants(
        &self,
        graph: &mut RelationGraph,
        entry: &Entry,
        origin: &Originator,
        attach_id: NodeId,
        color: &str,
    ) {
        if entry.descendant_sections().count() > 1 {
            // Most pages have a single root Descendants section.
            tracing::warn!(origin = %origin, "more than one descendants section");
        }
        for section in entry.descendant_sections() {
            let mut retained: Vec<DescentRelation> = Vec::new();
            let mut previous: Option<(DescentRelation, bool)> = None;

            for template in section.descendant_templates() {
                if template.name == SEE_DESCENDANTS_MARKER {
                    match previous.as_mut() {
                        Some((candidate, was_retained)) => {
                            candidate.more_descendants = true;
                            if *was_retained {
                                if let Some(last) = retained.last_mut() {
                                    last.more_descendants = true;
                                }
                            } else {
                                // The marker promises further descendants:
                                // include the candidate even though the
                                // language filter excluded it.
                                retained.push(candidate.clone());
                                *was_retained = true;
                            }
                        }
                        None => {
                            tracing::debug!(
                                origin = %origin,
                                "descendants marker with no preceding candidate"
                            );
                        }
                    }
                    continue;
                }
                let candidate = DescentRelation::from_template(template);
                let keep = self
                    .language_filter
                    .as_ref()
                    .is_none_or(|filter| filter.contains(&candidate.lang));
                if keep {
                    retained.push(candidate.clone());
                }
                previous = Some((candidate, keep));
            }

            for rel in retained {
                let id = graph.add_node(GraphNode::Relation(Relation::Descent(rel)), color);
                graph.add_edge(id, attach_id);
            }
        }
    }

    /// Collect "* of" lemma pointers from definition sections. Returns
    /// whether any lemma relation was found.
    fn scan_lemmas(
        &self,
        graph: &mut RelationGraph,
        entry: &Entry,
        origin: &Originator,
        ety_flag: bool,
        prev: NodeId,
        color: &str,
    ) -> Result<bool> {
        let mut seen: Vec<LemmaRelation> = Vec::new();
        for definition in entry.definition_sections() {
            for template in definition.direct_templates() {
                if !template.name.ends_with(" of") {
                    continue;
                }
                if ety_flag {
                    return Err(Error::Consistency(format!(
                        "entry for {origin} has both an etymology paragraph and lemma \
                         templates"
                    )));
                }
                let rel = LemmaRelation::from_template(template);
                if seen.contains(&rel) {
                    continue;
                }
                seen.push(rel.clone());
                let id = graph.add_node(GraphNode::Relation(Relation::Lemma(rel)), color);
                graph.add_edge(id, prev);
            }
        }
        Ok(!seen.is_empty())
    }
}
