//! Construction-time options for [`ArborGraph`](crate::ArborGraph).

use serde::{Deserialize, Serialize};

use crate::errors::{ArborGraphError, Result};

/// Configuration applied when a graph is created.
///
/// # Examples
///
/// ```rust
/// use arborgraph::{ArborGraph, GraphConfig};
///
/// let graph = ArborGraph::with_config(GraphConfig::directed());
/// assert!(graph.is_directed());
///
/// let cfg = GraphConfig::from_json_str(r#"{ "directed": false, "auto_root": false }"#).unwrap();
/// assert!(!cfg.auto_root);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Whether relations are one-way.
    ///
    /// **Default:** `false`
    pub directed: bool,

    /// Whether the first node ever created becomes the root.
    ///
    /// Applies once: after the root is deleted, only `set_root` installs a new one.
    ///
    /// **Default:** `true`
    ///
    /// With `false` the root stays unset until
    /// [`set_root`](crate::ArborGraph::set_root) is called, and root-anchored
    /// queries fail with `RootNotSet`.
    pub auto_root: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            auto_root: true,
        }
    }
}

impl GraphConfig {
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    pub fn undirected() -> Self {
        Self::default()
    }

    pub fn with_auto_root(mut self, auto_root: bool) -> Self {
        self.auto_root = auto_root;
        self
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ArborGraphError::invalid_config(e.to_string()))
    }
}
