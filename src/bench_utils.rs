use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{errors::Result, graph::ArborGraph, types::EdgeId};

#[derive(Clone, Debug)]
pub enum GraphShape {
    Line,
    Star,
    /// A spine of `spine` nodes, each carrying one pendant leaf.
    Caterpillar { spine: usize },
    /// Grown from a single edge by random edge splits and pendant attachments.
    RandomTree,
}

/// Builds a graph of roughly `node_count` nodes with the requested shape.
///
/// Node 0 is the root. The same seed always yields the same graph.
pub fn generate_graph(
    shape: GraphShape,
    node_count: usize,
    seed: u64,
    directed: bool,
) -> Result<ArborGraph> {
    assert!(node_count > 1, "node_count must exceed 1");
    let mut graph = ArborGraph::new(directed);
    match shape {
        GraphShape::Line => build_line(&mut graph, node_count)?,
        GraphShape::Star => build_star(&mut graph, node_count)?,
        GraphShape::Caterpillar { spine } => build_caterpillar(&mut graph, spine)?,
        GraphShape::RandomTree => build_random_tree(&mut graph, node_count, seed)?,
    }
    Ok(graph)
}

fn build_line(graph: &mut ArborGraph, count: usize) -> Result<()> {
    let mut tail = graph.create_node();
    for _ in 1..count {
        tail = graph.create_node_from_node(tail)?;
    }
    Ok(())
}

fn build_star(graph: &mut ArborGraph, count: usize) -> Result<()> {
    let center = graph.create_node();
    for _ in 1..count {
        graph.create_node_from_node(center)?;
    }
    Ok(())
}

fn build_caterpillar(graph: &mut ArborGraph, spine: usize) -> Result<()> {
    assert!(spine > 0, "spine must not be empty");
    let mut tail = graph.create_node();
    graph.create_node_from_node(tail)?;
    for _ in 1..spine {
        tail = graph.create_node_from_node(tail)?;
        graph.create_node_from_node(tail)?;
    }
    Ok(())
}

fn build_random_tree(graph: &mut ArborGraph, count: usize, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let root = graph.create_node();
    graph.create_node_from_node(root)?;
    while graph.node_count() < count {
        let edges: Vec<EdgeId> = graph.edges().map(|(id, _)| id).collect();
        let edge = edges[rng.gen_range(0..edges.len())];
        if graph.node_count() + 2 <= count && rng.gen_bool(0.5) {
            graph.create_node_from_edge(edge)?;
        } else {
            let (source, target) = graph.edge_endpoints(edge)?;
            let origin = if rng.gen_bool(0.5) { source } else { target };
            graph.create_node_from_node(origin)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_tree_is_reproducible() {
        let a = generate_graph(GraphShape::RandomTree, 40, 7, false).unwrap();
        let b = generate_graph(GraphShape::RandomTree, 40, 7, false).unwrap();
        let edges_a: Vec<_> = a.edges().collect();
        let edges_b: Vec<_> = b.edges().collect();
        assert_eq!(edges_a, edges_b);
        assert_eq!(a.node_count(), 40);
    }
}
