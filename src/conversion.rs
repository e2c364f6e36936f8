//! Switching a graph between directed and undirected adjacency.
//!
//! Both conversions rebuild adjacency from the edge table, which records every
//! edge in the orientation it was linked with. Edge ids survive conversion.

use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::{
    errors::{ArborGraphError, Result},
    graph::ArborGraph,
    types::canonical_pair,
};

impl ArborGraph {
    /// Keeps one direction per relation: the one the edge was linked with.
    pub fn make_directed(&mut self) {
        if self.directed {
            return;
        }
        self.directed = true;
        self.rebuild_adjacency();
        tracing::debug!(edges = self.edges.len(), "converted graph to directed");
    }

    /// Mirrors every directed relation.
    ///
    /// Fails without touching the graph when a pair of nodes is joined in both
    /// directions, since the two edges cannot collapse into one.
    pub fn make_undirected(&mut self) -> Result<()> {
        if !self.directed {
            return Ok(());
        }
        if self.contains_reciprocal_relations()? {
            return Err(ArborGraphError::invalid_conversion(
                "directed graph contains reciprocal relations",
            ));
        }
        self.directed = false;
        self.rebuild_adjacency();
        tracing::debug!(edges = self.edges.len(), "converted graph to undirected");
        Ok(())
    }

    /// Whether some pair of nodes is joined by both `a -> b` and `b -> a`.
    pub fn contains_reciprocal_relations(&self) -> Result<bool> {
        if !self.directed {
            return Err(ArborGraphError::NotDirected);
        }
        let mut met = AHashSet::new();
        for (&a, row) in &self.nodes {
            for &b in row.outgoing.keys() {
                if !met.insert(canonical_pair(a, b)) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn rebuild_adjacency(&mut self) {
        for row in self.nodes.values_mut() {
            row.clear();
        }
        let edges: Vec<_> = self.edges().collect();
        let mut converted = BTreeSet::new();
        for (edge, record) in edges {
            // `link` refuses duplicates and reciprocals were checked, so pairs are unique
            let fresh = converted.insert(record.canonical());
            debug_assert!(fresh, "pair linked twice: {edge}");
            self.link_in_node_structure(record.source, record.target, edge);
        }
    }
}
