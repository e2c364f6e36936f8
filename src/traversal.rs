//! Leaf enumeration and tree classification.
//!
//! Traversals are depth-first, visit neighbors in ascending id order and never
//! step back to the node they arrived from. A global visited set turns any
//! cycle into `CycleDetected` rather than an endless walk.

use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::{
    errors::{ArborGraphError, Result},
    graph::ArborGraph,
    types::NodeId,
};

struct Frame {
    node: NodeId,
    parent: Option<NodeId>,
    budget: Option<u32>,
}

impl ArborGraph {
    /// Leaves reachable from the root.
    ///
    /// A leaf has at most one neighbor. The root is reported when it has at
    /// most one neighbor, and the walk continues through it.
    ///
    /// ```rust
    /// use arborgraph::ArborGraph;
    ///
    /// let mut graph = ArborGraph::undirected();
    /// let a = graph.create_node();
    /// let b = graph.create_node_from_node(a)?;
    /// let c = graph.create_node_from_node(b)?;
    /// assert_eq!(graph.leaves()?, vec![a, c]);
    /// # Ok::<(), arborgraph::ArborGraphError>(())
    /// ```
    pub fn leaves(&self) -> Result<Vec<NodeId>> {
        let root = self.root_node()?;
        self.collect_leaves(root, None)
    }

    /// Leaves reachable from `node`, cut after `max_depth` steps.
    ///
    /// `max_depth == 0` means no limit. An internal node reached once the
    /// budget is spent is reported as a leaf.
    pub fn leaves_from_node(&self, node: NodeId, max_depth: u32) -> Result<Vec<NodeId>> {
        let budget = (max_depth != 0).then_some(max_depth);
        self.collect_leaves(node, budget)
    }

    /// Whether the graph is a tree hanging from the root.
    ///
    /// Only outgoing relations are followed, so a directed graph must point
    /// away from the root. Every node has to be met exactly once.
    pub fn is_tree(&self) -> Result<bool> {
        let root = self.root_node()?;
        let mut met = AHashSet::new();
        let mut stack = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            if !met.insert(node) {
                return Ok(false);
            }
            for &next in self.record(node)?.outgoing.keys().rev() {
                if Some(next) == parent {
                    continue;
                }
                stack.push((next, Some(node)));
            }
        }
        Ok(met.len() == self.node_count())
    }

    fn collect_leaves(&self, anchor: NodeId, budget: Option<u32>) -> Result<Vec<NodeId>> {
        self.node_must_exist(anchor)?;
        let mut leaves = Vec::new();
        let mut visited = AHashSet::new();
        let mut stack = vec![Frame {
            node: anchor,
            parent: None,
            budget,
        }];

        while let Some(Frame {
            node,
            parent,
            budget,
        }) = stack.pop()
        {
            if !visited.insert(node) {
                return Err(ArborGraphError::CycleDetected(node));
            }
            let neighbors = self.distinct_neighbors(node)?;
            if neighbors.len() <= 1 {
                leaves.push(node);
                if parent.is_some() {
                    continue;
                }
            } else if budget == Some(0) {
                leaves.push(node);
                continue;
            }

            let budget = budget.map(|left| left.saturating_sub(1));
            for &next in neighbors.iter().rev() {
                if Some(next) == parent {
                    continue;
                }
                stack.push(Frame {
                    node: next,
                    parent: Some(node),
                    budget,
                });
            }
        }
        Ok(leaves)
    }

    // A reciprocal directed pair counts as one neighbor.
    fn distinct_neighbors(&self, node: NodeId) -> Result<BTreeSet<NodeId>> {
        let record = self.record(node)?;
        Ok(record
            .outgoing
            .keys()
            .chain(record.incoming.keys())
            .copied()
            .collect())
    }
}
