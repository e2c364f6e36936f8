//! Deletion notifications for components that index graph structure.
//!
//! The graph holds observers through [`Weak`] handles: registering never
//! extends an observer's lifetime, and an observer dropped while still
//! registered is skipped and pruned on the next notification.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    errors::{ArborGraphError, Result},
    types::{EdgeId, NodeId},
};

/// Receives structural deletions from a graph.
///
/// Callbacks run synchronously, before the mutating call returns. Observers
/// needing to record state use interior mutability.
pub trait GraphObserver {
    fn on_edges_deleted(&self, edges: &[EdgeId]);

    fn on_nodes_deleted(&self, nodes: &[NodeId]);
}

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    observers: Vec<Weak<dyn GraphObserver>>,
}

impl ObserverRegistry {
    pub(crate) fn register(&mut self, observer: Weak<dyn GraphObserver>) -> Result<()> {
        self.prune();
        if self.position(&observer).is_some() {
            return Err(ArborGraphError::AlreadyRegistered);
        }
        self.observers.push(observer);
        Ok(())
    }

    pub(crate) fn unregister(&mut self, observer: &Weak<dyn GraphObserver>) -> Result<()> {
        let idx = self
            .position(observer)
            .ok_or(ArborGraphError::NotRegistered)?;
        self.observers.remove(idx);
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.observers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub(crate) fn notify_edges_deleted(&mut self, edges: &[EdgeId]) {
        for observer in self.live() {
            observer.on_edges_deleted(edges);
        }
    }

    pub(crate) fn notify_nodes_deleted(&mut self, nodes: &[NodeId]) {
        for observer in self.live() {
            observer.on_nodes_deleted(nodes);
        }
    }

    fn position(&self, observer: &Weak<dyn GraphObserver>) -> Option<usize> {
        self.observers
            .iter()
            .position(|known| known.strong_count() > 0 && Weak::ptr_eq(known, observer))
    }

    // Upgrades every handle up front so callbacks never see the registry mid-edit.
    fn live(&mut self) -> Vec<Rc<dyn GraphObserver>> {
        self.prune();
        self.observers.iter().filter_map(Weak::upgrade).collect()
    }

    fn prune(&mut self) {
        let before = self.observers.len();
        self.observers.retain(|weak| weak.strong_count() > 0);
        let dropped = before - self.observers.len();
        if dropped > 0 {
            tracing::warn!(dropped, "pruned observers dropped without unregistering");
        }
    }
}

/// A single notification received by a [`DeletionLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionEvent {
    Edges(Vec<EdgeId>),
    Nodes(Vec<NodeId>),
}

/// Observer that records every notification it receives, in order.
#[derive(Debug, Default)]
pub struct DeletionLog {
    events: RefCell<Vec<DeletionEvent>>,
}

impl DeletionLog {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<DeletionEvent> {
        self.events.borrow().clone()
    }

    /// Every deleted edge id, flattened across notifications.
    pub fn deleted_edges(&self) -> Vec<EdgeId> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                DeletionEvent::Edges(ids) => Some(ids.clone()),
                DeletionEvent::Nodes(_) => None,
            })
            .flatten()
            .collect()
    }

    pub fn deleted_nodes(&self) -> Vec<NodeId> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                DeletionEvent::Nodes(ids) => Some(ids.clone()),
                DeletionEvent::Edges(_) => None,
            })
            .flatten()
            .collect()
    }

    pub fn edge_notification_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, DeletionEvent::Edges(_)))
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl GraphObserver for DeletionLog {
    fn on_edges_deleted(&self, edges: &[EdgeId]) {
        self.events.borrow_mut().push(DeletionEvent::Edges(edges.to_vec()));
    }

    fn on_nodes_deleted(&self, nodes: &[NodeId]) {
        self.events.borrow_mut().push(DeletionEvent::Nodes(nodes.to_vec()));
    }
}
