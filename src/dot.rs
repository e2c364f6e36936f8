//! Graphviz dump of the part of the graph reachable from the root.

use std::io;

use ahash::AHashSet;

use crate::{
    errors::{ArborGraphError, Result},
    graph::ArborGraph,
    types::NodeId,
};

const INDENT: &str = "    ";

impl ArborGraph {
    /// Writes the graph as a `graph`/`digraph` block named `name`.
    pub fn output_to_dot<W: io::Write>(&self, out: &mut W, name: &str) -> Result<()> {
        let text = self.to_dot(name)?;
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| ArborGraphError::write(e.to_string()))
    }

    /// Renders the dot text.
    ///
    /// Relations are followed depth-first from the root; each one is written
    /// once and chains end with `;`.
    ///
    /// ```rust
    /// use arborgraph::ArborGraph;
    ///
    /// let mut graph = ArborGraph::undirected();
    /// let a = graph.create_node();
    /// let b = graph.create_node_from_node(a)?;
    /// graph.create_node_from_node(b)?;
    /// assert_eq!(graph.to_dot("T")?, "graph T {\n    0 -- 1 -- 2;\n}\n");
    /// # Ok::<(), arborgraph::ArborGraphError>(())
    /// ```
    pub fn to_dot(&self, name: &str) -> Result<String> {
        let root = self.root_node()?;
        let kind = if self.directed { "digraph" } else { "graph" };
        let mut text = format!("{kind} {name} {{\n{INDENT}");
        let mut emitted = AHashSet::new();
        self.node_to_dot(root, &mut text, &mut emitted)?;
        text.truncate(text.trim_end_matches(INDENT).len());
        text.push_str("}\n");
        Ok(text)
    }

    // Each push consumes one unemitted relation, so the walk ends even on
    // cyclic graphs.
    fn node_to_dot(
        &self,
        root: NodeId,
        text: &mut String,
        emitted: &mut AHashSet<(NodeId, NodeId)>,
    ) -> Result<()> {
        let arrow = if self.directed { "->" } else { "--" };
        let mut stack = vec![self.dot_frame(root)?];
        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let Some(&child) = frame.children.get(frame.next) else {
                if frame.chain_end {
                    text.push_str(&format!("{node};\n{INDENT}"));
                }
                stack.pop();
                continue;
            };
            frame.next += 1;
            if emitted.contains(&(node, child))
                || (!self.directed && emitted.contains(&(child, node)))
            {
                continue;
            }
            emitted.insert((node, child));
            frame.chain_end = false;
            text.push_str(&format!("{node} {arrow} "));
            stack.push(self.dot_frame(child)?);
        }
        Ok(())
    }

    fn dot_frame(&self, node: NodeId) -> Result<DotFrame> {
        Ok(DotFrame {
            node,
            children: self.record(node)?.outgoing.keys().copied().collect(),
            next: 0,
            chain_end: true,
        })
    }
}

struct DotFrame {
    node: NodeId,
    children: Vec<NodeId>,
    next: usize,
    chain_end: bool,
}
