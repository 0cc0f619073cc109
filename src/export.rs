//! JSON export — serialize a graph for the rendering collaborator.
//!
//! The layout/drawing side consumes node labels, colors, and edge index
//! pairs; it owes nothing to this crate's relation types.

use std::io::Write;

use serde_json::json;

use crate::model::RelationGraph;
use crate::Result;

/// Write a graph as a JSON document:
///
/// ```text
/// {"nodes": [{"id": 0, "label": "...", "kind": "origin", "color": "#ff0000"}, ...],
///  "edges": [[1, 0], ...]}
/// ```
pub fn export_json(graph: &RelationGraph, writer: &mut dyn Write) -> Result<()> {
    let nodes: Vec<_> = graph
        .nodes()
        .map(|(id, node)| {
            let kind = match node.as_relation() {
                Some(rel) => rel.type_name(),
                None => "origin",
            };
            json!({
                "id": id.0,
                "label": node.to_string(),
                "kind": kind,
                "color": graph.color(id),
            })
        })
        .collect();
    let edges: Vec<_> = graph.edges().iter().map(|(s, d)| json!([s.0, d.0])).collect();

    let doc = json!({ "nodes": nodes, "edges": edges });
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphNode, Originator};

    #[test]
    fn test_export_shape() {
        let mut graph = RelationGraph::new();
        let origin = GraphNode::Origin(Originator::new("sol", "es", 0));
        graph.add_node(origin, "#ff0000");

        let mut out = Vec::new();
        export_json(&graph, &mut out).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(doc["nodes"][0]["id"], 0);
        assert_eq!(doc["nodes"][0]["label"], "sol#es$0");
        assert_eq!(doc["nodes"][0]["kind"], "origin");
        assert_eq!(doc["nodes"][0]["color"], "#ff0000");
        assert_eq!(doc["edges"].as_array().unwrap().len(), 0);
    }
}
