//! Mutable multigraph engine for building and editing trees incrementally.
//!
//! Nodes and edges receive monotonically increasing ids that are never reused.
//! Edges can be split to insert nodes, the whole graph can switch between
//! directed and undirected adjacency, and registered observers hear about
//! every edge and node deletion so derived indexes stay consistent.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use arborgraph::{ArborGraph, DeletionLog};
//!
//! let mut graph = ArborGraph::undirected();
//! let log = Rc::new(DeletionLog::new());
//! graph.register_observer(&log)?;
//!
//! let root = graph.create_node();
//! let leaf = graph.create_node_from_node(root)?;
//! let edge = graph.edge_between(root, leaf)?;
//! let mid = graph.create_node_on_edge(edge)?;
//!
//! assert_eq!(graph.neighbors(mid)?, vec![root, leaf]);
//! assert_eq!(log.deleted_edges(), vec![edge]);
//! assert!(graph.is_tree()?);
//! # Ok::<(), arborgraph::ArborGraphError>(())
//! ```
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod bench_utils;
pub mod config;
pub mod conversion;
pub mod dot;
pub mod errors;
pub mod graph;
pub mod observer;
pub mod safety;
pub mod traversal;
pub mod types;

pub use crate::config::GraphConfig;
pub use crate::errors::{ArborGraphError, Result};
pub use crate::graph::ArborGraph;
pub use crate::observer::{DeletionEvent, DeletionLog, GraphObserver};
pub use crate::safety::{IntegrityError, IntegrityReport, ensure_integrity, validate_integrity};
pub use crate::types::{EdgeId, EdgeRecord, NodeId, NodeRecord};
