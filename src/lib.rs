//! # etygraph-rs — Etymology Relation Graphs from Wikitext
//!
//! Extracts structured etymological information from loosely-structured
//! encyclopedic wikitext and assembles it into a directed relation graph:
//! how a word descends from, borrows from, or is cognate with other words.
//!
//! ## Design Principles
//!
//! 1. **Narrow boundaries**: tokenizing, fetching, language normalization
//!    and rendering are external; they meet this crate at plain data types
//!    (`HeadingSpan`, `InlineNode`, `RelationGraph`)
//! 2. **Clean DTOs**: `Header`, `Entry`, `Relation` cross all boundaries
//!    and are immutable once constructed
//! 3. **Value identity**: relation nodes compare structurally, so graphs
//!    built from separate queries can be merged and deduplicated
//! 4. **Explicit configuration**: palette, mention handling and language
//!    filters are builder parameters, never ambient state
//!
//! ## Quick Start
//!
//! ```rust
//! use etygraph_rs::{Extractor, HeadingSpan, InlineNode, Originator, Template};
//!
//! # fn main() -> etygraph_rs::Result<()> {
//! // One level-3 section, as the section splitter would deliver it.
//! let ety = HeadingSpan::new("===Etymology===", 3).with_content(vec![
//!     InlineNode::text("From "),
//!     Template::new("bor").arg("es").arg("la").arg("verbum").into(),
//!     InlineNode::text("."),
//! ]);
//!
//! let extractor = Extractor::new();
//! let entries = extractor.entries(vec![ety])?;
//! let entry = entries.by_definition_id(1)?;
//!
//! let origin = Originator::new("palabra", "es", 0);
//! let graph = extractor.graph(entry, &origin)?;
//! assert_eq!(graph.node_count(), 2); // origin + one borrowing relation
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod builder;
pub mod export;
pub mod lookup;
pub mod model;
pub mod section;
pub mod tables;
pub mod wikitext;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    DescentRelation, EtyRelation, GraphNode, LemmaRelation, NodeId, Originator, Relation,
    RelationFamily, RelationGraph,
};

// ============================================================================
// Re-exports: Section layer
// ============================================================================

pub use section::{Entries, Entry, Header, assemble};

// ============================================================================
// Re-exports: Builder and lookup
// ============================================================================

pub use builder::{GraphBuilder, Palette};
pub use lookup::{Query, find_by_origin, find_by_query};
pub use tables::{AbbrevTable, PosTable};
pub use wikitext::{HeadingSpan, InlineNode, Template, TemplateArg};

// ============================================================================
// Top-level Extractor handle
// ============================================================================

/// The primary entry point. An `Extractor` bundles the fixed lookup
/// tables and runs the section lexer and graph builder against them.
pub struct Extractor {
    pos: PosTable,
    abbrevs: AbbrevTable,
}

impl Extractor {
    /// An extractor with the bundled Wiktionary tables.
    pub fn new() -> Self {
        Self { pos: PosTable::wiktionary(), abbrevs: AbbrevTable::wiktionary() }
    }

    /// An extractor with caller-supplied tables.
    pub fn with_tables(pos: PosTable, abbrevs: AbbrevTable) -> Self {
        Self { pos, abbrevs }
    }

    /// Lex one language block's level-3 spans into entries.
    pub fn entries(&self, spans: Vec<HeadingSpan>) -> Result<Entries> {
        section::lexer::assemble(spans, &self.pos)
    }

    /// A graph builder over this extractor's relation-code table.
    pub fn builder(&self) -> GraphBuilder<'_> {
        GraphBuilder::new(&self.abbrevs)
    }

    /// Build a relation graph for one entry with default options.
    pub fn graph(&self, entry: &Entry, origin: &Originator) -> Result<RelationGraph> {
        self.builder().build(entry, origin)
    }

    pub fn pos_table(&self) -> &PosTable {
        &self.pos
    }

    pub fn abbrev_table(&self) -> &AbbrevTable {
        &self.abbrevs
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structural parse failure, naming the offending heading. Aborts the
    /// current page/language block.
    #[error("Section format error at '{heading}': {message}")]
    Format { heading: String, message: String },

    /// An entry that contradicts itself; aborts the graph build.
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Neither etymology nor lemma found. Recoverable: the graph built so
    /// far is attached, and callers may accept it as a degraded result.
    #[error("Missing data ({missing}): partial graph attached")]
    MissingData { missing: &'static str, graph: Box<model::RelationGraph> },

    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
