use std::{
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::{
    config::GraphConfig,
    errors::{ArborGraphError, Result},
    observer::{GraphObserver, ObserverRegistry},
    types::{EdgeId, EdgeRecord, NodeId, NodeRecord},
};

/// Mutable graph with stable, never-reused node and edge identifiers.
///
/// Adjacency is kept in ordered maps so every query returns neighbors in
/// ascending [`NodeId`] order. Structural deletions are pushed to registered
/// [`GraphObserver`]s before the mutating call returns.
pub struct ArborGraph {
    pub(crate) directed: bool,
    auto_root: bool,
    pub(crate) root: Option<NodeId>,
    pub(crate) nodes: BTreeMap<NodeId, NodeRecord>,
    pub(crate) edges: BTreeMap<EdgeId, EdgeRecord>,
    next_node_id: u64,
    next_edge_id: u64,
    observers: ObserverRegistry,
}

impl Default for ArborGraph {
    fn default() -> Self {
        Self::with_config(GraphConfig::default())
    }
}

impl ArborGraph {
    pub fn new(directed: bool) -> Self {
        Self::with_config(GraphConfig {
            directed,
            ..GraphConfig::default()
        })
    }

    pub fn directed() -> Self {
        Self::with_config(GraphConfig::directed())
    }

    pub fn undirected() -> Self {
        Self::with_config(GraphConfig::undirected())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            directed: config.directed,
            auto_root: config.auto_root,
            root: None,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            next_node_id: 0,
            next_edge_id: 0,
            observers: ObserverRegistry::default(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Id the next created node will receive.
    pub fn next_node_id(&self) -> NodeId {
        NodeId(self.next_node_id)
    }

    /// Id the next created edge will receive.
    pub fn next_edge_id(&self) -> EdgeId {
        EdgeId(self.next_edge_id)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(&edge)
    }

    /// Live node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Live edges with their endpoints, in ascending id order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, EdgeRecord)> + '_ {
        self.edges.iter().map(|(&id, &record)| (id, record))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) -> Result<()> {
        self.node_must_exist(root)?;
        self.root = Some(root);
        Ok(())
    }

    pub fn create_node(&mut self) -> NodeId {
        let node = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.insert(node, NodeRecord::default());
        if self.auto_root && node == NodeId(0) {
            self.root = Some(node);
        }
        tracing::trace!(%node, "created node");
        node
    }

    /// Links `a` to `b` and returns the new edge.
    ///
    /// In an undirected graph the relation is visible from both endpoints'
    /// outgoing side. A second relation between the same pair is rejected.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> Result<EdgeId> {
        self.node_must_exist(a)?;
        self.node_must_exist(b)?;
        if a == b {
            return Err(ArborGraphError::SelfLoop(a));
        }
        if self.nodes[&a].outgoing.contains_key(&b) {
            return Err(ArborGraphError::duplicate_relation(a, b));
        }

        let edge = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.link_in_node_structure(a, b, edge);
        self.edges.insert(edge, EdgeRecord::new(a, b));
        tracing::trace!(%edge, from = %a, to = %b, "linked");
        Ok(edge)
    }

    /// Removes the relation between `a` and `b` and returns the removed edges.
    ///
    /// The relation `a -> b` is looked up first; in a directed graph `b -> a`
    /// is used when no forward relation exists.
    pub fn unlink(&mut self, a: NodeId, b: NodeId) -> Result<Vec<EdgeId>> {
        self.node_must_exist(a)?;
        self.node_must_exist(b)?;
        let edge = self.find_relation(a, b)?;

        self.remove_edge(edge);
        let deleted = vec![edge];
        tracing::debug!(%edge, from = %a, to = %b, "unlinked");
        self.observers.notify_edges_deleted(&deleted);
        Ok(deleted)
    }

    /// Deletes `node` after unlinking every incident relation.
    ///
    /// Observers see one edge notification per neighbor, then one node
    /// notification. Deleting the root leaves the graph without one.
    pub fn delete_node(&mut self, node: NodeId) -> Result<()> {
        self.node_must_exist(node)?;
        for neighbor in self.neighbors(node)? {
            self.unlink(node, neighbor)?;
        }
        self.nodes.remove(&node);
        if self.root == Some(node) {
            self.root = None;
        }
        tracing::debug!(%node, "deleted node");
        self.observers.notify_nodes_deleted(&[node]);
        Ok(())
    }

    /// Creates a node hanging from `origin` through a new `origin -> new` edge.
    pub fn create_node_from_node(&mut self, origin: NodeId) -> Result<NodeId> {
        self.node_must_exist(origin)?;
        let node = self.create_node();
        self.link(origin, node)?;
        Ok(node)
    }

    /// Splits `edge = (a, b)` into `a -> new` and `new -> b`.
    ///
    /// Observers see the deletion of `edge`; the two replacement edges receive
    /// fresh ids.
    pub fn create_node_on_edge(&mut self, edge: EdgeId) -> Result<NodeId> {
        let EdgeRecord { source, target } = self.edge_endpoints_record(edge)?;
        let node = self.create_node();
        self.unlink(source, target)?;
        self.link(source, node)?;
        self.link(node, target)?;
        Ok(node)
    }

    /// Splits `origin` and grows a pendant node from the midpoint.
    pub fn create_node_from_edge(&mut self, origin: EdgeId) -> Result<NodeId> {
        self.edge_must_exist(origin)?;
        let anchor = self.create_node_on_edge(origin)?;
        self.create_node_from_node(anchor)
    }

    pub fn outgoing_neighbors(&self, node: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.record(node)?.outgoing.keys().copied().collect())
    }

    pub fn incoming_neighbors(&self, node: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.record(node)?.incoming.keys().copied().collect())
    }

    /// Outgoing neighbors followed by incoming ones.
    ///
    /// A node joined by reciprocal directed relations appears twice.
    pub fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>> {
        let record = self.record(node)?;
        Ok(record
            .outgoing
            .keys()
            .chain(record.incoming.keys())
            .copied()
            .collect())
    }

    pub fn degree(&self, node: NodeId) -> Result<usize> {
        Ok(self.record(node)?.degree())
    }

    /// Edge stored for the relation `a -> b`.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Result<EdgeId> {
        let row = self.record(a)?;
        self.node_must_exist(b)?;
        row.outgoing
            .get(&b)
            .copied()
            .ok_or_else(|| ArborGraphError::relation_not_found(a, b))
    }

    pub fn edge_endpoints(&self, edge: EdgeId) -> Result<(NodeId, NodeId)> {
        let record = self.edge_endpoints_record(edge)?;
        Ok((record.source, record.target))
    }

    pub fn register_observer<O: GraphObserver + 'static>(
        &mut self,
        observer: &Rc<O>,
    ) -> Result<()> {
        self.observers.register(downgrade(observer))
    }

    pub fn unregister_observer<O: GraphObserver + 'static>(
        &mut self,
        observer: &Rc<O>,
    ) -> Result<()> {
        self.observers.unregister(&downgrade(observer))
    }

    /// Number of registered observers that are still alive.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl ArborGraph {
    pub(crate) fn node_must_exist(&self, node: NodeId) -> Result<()> {
        if self.nodes.contains_key(&node) {
            Ok(())
        } else {
            Err(ArborGraphError::NodeNotFound(node))
        }
    }

    pub(crate) fn edge_must_exist(&self, edge: EdgeId) -> Result<()> {
        self.edge_endpoints_record(edge).map(|_| ())
    }

    pub(crate) fn record(&self, node: NodeId) -> Result<&NodeRecord> {
        self.nodes
            .get(&node)
            .ok_or(ArborGraphError::NodeNotFound(node))
    }

    pub(crate) fn root_node(&self) -> Result<NodeId> {
        self.root.ok_or(ArborGraphError::RootNotSet)
    }

    /// Writes adjacency for `a -> b` according to the current directedness.
    pub(crate) fn link_in_node_structure(&mut self, a: NodeId, b: NodeId, edge: EdgeId) {
        let directed = self.directed;
        if let Some(row) = self.nodes.get_mut(&a) {
            row.outgoing.insert(b, edge);
        }
        if let Some(row) = self.nodes.get_mut(&b) {
            if directed {
                row.incoming.insert(a, edge);
            } else {
                row.outgoing.insert(a, edge);
            }
        }
    }

    fn edge_endpoints_record(&self, edge: EdgeId) -> Result<EdgeRecord> {
        self.edges
            .get(&edge)
            .copied()
            .ok_or(ArborGraphError::EdgeNotFound(edge))
    }

    fn find_relation(&self, a: NodeId, b: NodeId) -> Result<EdgeId> {
        if let Some(&edge) = self.nodes[&a].outgoing.get(&b) {
            return Ok(edge);
        }
        if self.directed {
            if let Some(&edge) = self.nodes[&b].outgoing.get(&a) {
                return Ok(edge);
            }
        }
        Err(ArborGraphError::relation_not_found(a, b))
    }

    fn remove_edge(&mut self, edge: EdgeId) {
        let Some(EdgeRecord { source, target }) = self.edges.remove(&edge) else {
            return;
        };
        let directed = self.directed;
        if let Some(row) = self.nodes.get_mut(&source) {
            row.outgoing.remove(&target);
        }
        if let Some(row) = self.nodes.get_mut(&target) {
            if directed {
                row.incoming.remove(&source);
            } else {
                row.outgoing.remove(&source);
            }
        }
    }
}

fn downgrade<O: GraphObserver + 'static>(observer: &Rc<O>) -> Weak<dyn GraphObserver> {
    let weak: Weak<O> = Rc::downgrade(observer);
    weak
}
