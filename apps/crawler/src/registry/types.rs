use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attribute key requesting last-hop latency measurements.
pub const ATTR_LATENCY: &str = "latency";
/// Attribute key requesting hop-count measurements.
pub const ATTR_DISTANCE: &str = "distance";

/// Weighted attribute slot on a node record.
///
/// The crawler only cares about which keys exist; the stored value and its
/// weight belong to the balancer.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct Attribute {
    pub value: f64,
    pub weight: f64,
}

/// One balanced upstream host.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub host: String,
    #[allow(dead_code)]
    pub port: u16,
    #[allow(dead_code)]
    pub weight: f64,
    #[serde(default)]
    pub attributes: HashMap<String, Attribute>,
}

/// A named cluster of nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeGroup {
    pub nodes: HashMap<String, Node>,
}

/// Full registry snapshot, keyed by group name.
pub type NodeGroups = HashMap<String, NodeGroup>;

/// Body of an attribute update request.
#[derive(Debug, Serialize)]
pub struct ValueUpdate {
    pub value: u64,
}
