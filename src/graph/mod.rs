//! Resource graph snapshot model
//!
//! The editing surface owns and mutates the design graph; the engine only
//! ever reads an immutable snapshot of it. This module defines that
//! snapshot: nodes (one infrastructure resource each), undirected edges,
//! and the typed attribute model, plus JSON loading for the snapshot
//! format the editor exports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Resource type tags used on nodes.
///
/// Tags are plain strings on the wire; unknown tags are tolerated
/// everywhere and simply match no containment rule and no security rule.
pub mod kind {
    pub const VPC: &str = "vpc";
    pub const SUBNET: &str = "subnet";
    pub const INSTANCE: &str = "instance";
    pub const SECURITY_GROUP: &str = "security_group";
    pub const BUCKET: &str = "bucket";
    pub const DATABASE: &str = "database";
    pub const LOAD_BALANCER: &str = "load_balancer";
    pub const INTERNET_GATEWAY: &str = "internet_gateway";
    pub const NAT_GATEWAY: &str = "nat_gateway";
    pub const FUNCTION: &str = "function";
}

/// One allowed inbound range on a security group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngressRule {
    pub protocol: String,
    pub from_port: u16,
    pub to_port: u16,
    pub cidr: String,
}

impl IngressRule {
    /// Whether `port` falls inside this rule's range.
    pub fn covers_port(&self, port: u16) -> bool {
        self.from_port <= port && port <= self.to_port
    }
}

/// Typed per-resource configuration
///
/// Recognized attributes get typed fields so rules can rely on them;
/// anything else lands in `extra` and survives round-trips, tolerating
/// schema evolution on the editor side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeAttributes {
    /// Encryption setting, e.g. "aes256", "kms", "none"
    pub encryption: Option<String>,
    pub public_access: Option<bool>,
    pub versioning: Option<bool>,
    pub access_logging: Option<bool>,
    pub flow_logs: Option<bool>,
    pub backup_retention_days: Option<u32>,
    pub multi_az: Option<bool>,
    /// Listener protocol for load balancers, e.g. "https", "http"
    pub listener_protocol: Option<String>,
    pub ingress: Vec<IngressRule>,
    /// Bootstrap script attached to an instance
    pub user_data: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One infrastructure resource on the design graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub resource_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub attributes: NodeAttributes,
}

impl Node {
    pub fn is_kind(&self, kind: &str) -> bool {
        self.resource_type == kind
    }

    /// Label if present, otherwise the id.
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// An undirected logical connection between two nodes
///
/// Either endpoint may reference a node that no longer exists; the
/// context builder skips such edges rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// The full design graph snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Errors from loading or validating a graph snapshot
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("failed to read graph snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed graph snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate node id '{0}' in graph snapshot")]
    DuplicateNodeId(String),
}

impl Graph {
    /// Parse a snapshot from the editor's JSON export.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let graph: Graph = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Reject structurally invalid snapshots. Node ids must be unique;
    /// everything else (dangling edges, unknown types) degrades gracefully
    /// downstream.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = rustc_hash::FxHashSet::default();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNodeId(node.id.clone()));
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
