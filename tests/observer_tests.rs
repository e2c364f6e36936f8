use std::{cell::RefCell, rc::Rc};

use arborgraph::{ArborGraph, ArborGraphError, DeletionLog, EdgeId, GraphObserver, NodeId};

/// Keeps a per-edge label index in sync with the graph, the way a branch
/// length table would.
#[derive(Default)]
struct EdgeLabels {
    labels: RefCell<Vec<(EdgeId, String)>>,
    dropped_nodes: RefCell<Vec<NodeId>>,
}

impl EdgeLabels {
    fn label(&self, edge: EdgeId, text: &str) {
        self.labels.borrow_mut().push((edge, text.to_string()));
    }

    fn labelled(&self) -> Vec<EdgeId> {
        self.labels.borrow().iter().map(|(id, _)| *id).collect()
    }
}

impl GraphObserver for EdgeLabels {
    fn on_edges_deleted(&self, edges: &[EdgeId]) {
        self.labels
            .borrow_mut()
            .retain(|(id, _)| !edges.contains(id));
    }

    fn on_nodes_deleted(&self, nodes: &[NodeId]) {
        self.dropped_nodes.borrow_mut().extend_from_slice(nodes);
    }
}

#[test]
fn test_register_twice_fails() -> Result<(), ArborGraphError> {
    let mut graph = ArborGraph::undirected();
    let log = Rc::new(DeletionLog::new());
    graph.register_observer(&log)?;
    assert_eq!(
        graph.register_observer(&log),
        Err(ArborGraphError::AlreadyRegistered)
    );
    assert_eq!(graph.observer_count(), 1);
    Ok(())
}

#[test]
fn test_unregister_unknown_fails() -> Result<(), ArborGraphError> {
    let mut graph = ArborGraph::undirected();
    let log = Rc::new(DeletionLog::new());
    assert_eq!(
        graph.unregister_observer(&log),
        Err(ArborGraphError::NotRegistered)
    );
    graph.register_observer(&log)?;
    graph.unregister_observer(&log)?;
    assert_eq!(
        graph.unregister_observer(&log),
        Err(ArborGraphError::NotRegistered)
    );
    assert_eq!(graph.observer_count(), 0);
    Ok(())
}

#[test]
fn test_unregistered_observer_stops_receiving() -> Result<(), ArborGraphError> {
    let mut graph = ArborGraph::undirected();
    let a = graph.create_node();
    let b = graph.create_node_from_node(a)?;
    let c = graph.create_node_from_node(b)?;
    let log = Rc::new(DeletionLog::new());
    graph.register_observer(&log)?;

    graph.unlink(a, b)?;
    graph.unregister_observer(&log)?;
    graph.unlink(b, c)?;

    assert_eq!(log.deleted_edges(), vec![EdgeId(0)]);
    Ok(())
}

#[test]
fn test_every_registered_observer_is_notified() -> Result<(), ArborGraphError> {
    let mut graph = ArborGraph::undirected();
    let a = graph.create_node();
    let b = graph.create_node_from_node(a)?;
    let first = Rc::new(DeletionLog::new());
    let second = Rc::new(DeletionLog::new());
    graph.register_observer(&first)?;
    graph.register_observer(&second)?;

    graph.delete_node(b)?;

    assert_eq!(first.events(), second.events());
    assert_eq!(first.deleted_edges(), vec![EdgeId(0)]);
    assert_eq!(first.deleted_nodes(), vec![b]);
    Ok(())
}

#[test]
fn test_dropped_observer_is_skipped() -> Result<(), ArborGraphError> {
    let mut graph = ArborGraph::undirected();
    let a = graph.create_node();
    let b = graph.create_node_from_node(a)?;
    let kept = Rc::new(DeletionLog::new());
    {
        let transient = Rc::new(DeletionLog::new());
        graph.register_observer(&transient)?;
        graph.register_observer(&kept)?;
        assert_eq!(graph.observer_count(), 2);
    }
    assert_eq!(graph.observer_count(), 1);

    graph.unlink(a, b)?;
    assert_eq!(kept.deleted_edges(), vec![EdgeId(0)]);
    Ok(())
}

#[test]
fn test_observer_keeps_label_index_consistent() -> Result<(), ArborGraphError> {
    let mut graph = ArborGraph::undirected();
    let labels = Rc::new(EdgeLabels::default());
    graph.register_observer(&labels)?;

    let root = graph.create_node();
    let left = graph.create_node_from_node(root)?;
    let right = graph.create_node_from_node(root)?;
    let left_edge = graph.edge_between(root, left)?;
    let right_edge = graph.edge_between(root, right)?;
    labels.label(left_edge, "0.12");
    labels.label(right_edge, "0.40");

    let mid = graph.create_node_on_edge(left_edge)?;
    assert_eq!(labels.labelled(), vec![right_edge]);

    graph.delete_node(mid)?;
    assert_eq!(labels.labelled(), vec![right_edge]);
    assert_eq!(*labels.dropped_nodes.borrow(), vec![mid]);
    Ok(())
}
