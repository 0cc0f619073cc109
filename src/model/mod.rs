//! # Relation graph model
//!
//! Clean DTOs crossing every boundary: section layer ↔ builder ↔ lookup
//! ↔ export. This module is pure data — no I/O, no state.

pub mod graph;
pub mod originator;
pub mod relation;

pub use graph::{GraphNode, NodeId, RelationGraph};
pub use originator::Originator;
pub use relation::{DescentRelation, EtyRelation, LemmaRelation, Relation, RelationFamily};
