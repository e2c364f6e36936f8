use std::fmt;

use serde::Serialize;

use crate::{
    graph::ArborGraph,
    types::{EdgeId, NodeId},
};

/// Counts of structural inconsistencies found by [`validate_integrity`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Edges with an endpoint that is not a live node.
    pub orphan_edges: usize,
    /// Edges the source node's adjacency does not point back to.
    pub unindexed_edges: usize,
    /// Edges missing their mirror entry on the target node.
    pub asymmetric_relations: usize,
    /// Adjacency entries naming an edge that does not join the two nodes.
    pub dangling_relations: usize,
    /// Live ids at or above their allocation counter, or a root that is gone.
    pub id_violations: usize,
}

impl IntegrityReport {
    pub fn merge(&mut self, other: &IntegrityReport) {
        self.total_nodes = self.total_nodes.max(other.total_nodes);
        self.total_edges = self.total_edges.max(other.total_edges);
        self.orphan_edges += other.orphan_edges;
        self.unindexed_edges += other.unindexed_edges;
        self.asymmetric_relations += other.asymmetric_relations;
        self.dangling_relations += other.dangling_relations;
        self.id_violations += other.id_violations;
    }

    pub fn has_issues(&self) -> bool {
        self.orphan_edges > 0
            || self.unindexed_edges > 0
            || self.asymmetric_relations > 0
            || self.dangling_relations > 0
            || self.id_violations > 0
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug)]
pub struct IntegrityError {
    pub report: IntegrityReport,
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "integrity violations detected: {}", self.report.to_json())
    }
}

impl std::error::Error for IntegrityError {}

pub fn validate_integrity(graph: &ArborGraph) -> IntegrityReport {
    let mut report = IntegrityReport {
        total_nodes: graph.node_count(),
        total_edges: graph.edge_count(),
        ..IntegrityReport::default()
    };
    let directed = graph.is_directed();

    for (edge, record) in graph.edges() {
        if edge >= graph.next_edge_id() {
            report.id_violations += 1;
        }
        let (Some(source), Some(target)) = (
            graph.nodes.get(&record.source),
            graph.nodes.get(&record.target),
        ) else {
            report.orphan_edges += 1;
            continue;
        };
        if source.outgoing.get(&record.target) != Some(&edge) {
            report.unindexed_edges += 1;
        }
        let mirror = if directed {
            target.incoming.get(&record.source)
        } else {
            target.outgoing.get(&record.source)
        };
        if mirror != Some(&edge) {
            report.asymmetric_relations += 1;
        }
    }

    for (&node, row) in &graph.nodes {
        if node >= graph.next_node_id() {
            report.id_violations += 1;
        }
        for (&other, &edge) in &row.outgoing {
            if !joins(graph, edge, node, other, directed) {
                report.dangling_relations += 1;
            }
        }
        for (&other, &edge) in &row.incoming {
            if !directed || !joins(graph, edge, other, node, true) {
                report.dangling_relations += 1;
            }
        }
    }

    if let Some(root) = graph.root() {
        if !graph.contains_node(root) {
            report.id_violations += 1;
        }
    }
    report
}

pub fn ensure_integrity(graph: &ArborGraph) -> Result<IntegrityReport, IntegrityError> {
    let report = validate_integrity(graph);
    if report.has_issues() {
        Err(IntegrityError { report })
    } else {
        Ok(report)
    }
}

// Whether `edge` is the relation `from -> to`; undirected edges match either way.
fn joins(graph: &ArborGraph, edge: EdgeId, from: NodeId, to: NodeId, directed: bool) -> bool {
    match graph.edges.get(&edge) {
        Some(record) if record.source == from && record.target == to => true,
        Some(record) => !directed && record.source == to && record.target == from,
        None => false,
    }
}
