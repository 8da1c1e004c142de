//! Client for the balancer registry API.
//!
//! The registry is the source of the crawl plan (which nodes exist and
//! which measurements they request) and the sink for measured values.

pub mod client;
pub mod types;


pub use client::{Registry, RegistryClient, RegistryError};
pub use types::{ATTR_DISTANCE, ATTR_LATENCY, Attribute, Node, NodeGroup, NodeGroups};
