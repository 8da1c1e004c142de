use tracing::{info, warn};

use crate::probe::Prober;
use crate::registry::{ATTR_DISTANCE, ATTR_LATENCY, Node, Registry};

/// One node's probe-and-report sequence for a single cycle.
#[derive(Debug, Clone)]
pub struct MeasurementJob {
    pub group: String,
    pub node: String,
    pub host: String,
    pub wants_latency: bool,
    pub wants_distance: bool,
}

impl MeasurementJob {
    /// Derive the job for a node record. The presence of a measured
    /// attribute key is the node's request for that measurement.
    pub fn for_node(group: &str, name: &str, node: &Node) -> Self {
        Self {
            group: group.to_string(),
            node: name.to_string(),
            host: node.host.clone(),
            wants_latency: node.attributes.contains_key(ATTR_LATENCY),
            wants_distance: node.attributes.contains_key(ATTR_DISTANCE),
        }
    }

    /// True when at least one measurement is requested.
    pub fn is_eligible(&self) -> bool {
        self.wants_latency || self.wants_distance
    }

    /// Probe the node's channel and submit the requested attributes.
    ///
    /// Submissions are best-effort and independent: a failed latency update
    /// never blocks the distance update, and vice versa.
    pub async fn run(&self, registry: &dyn Registry, prober: &dyn Prober) {
        info!(
            "Analyzing status of the network channel to node '{}' from group '{}'...",
            self.node, self.group
        );

        let stats = match prober.probe(&self.host).await {
            Ok(stats) => stats,
            Err(error) => {
                warn!(
                    "Cannot analyze network status of node '{}' from group '{}' - {}",
                    self.node, self.group, error
                );
                return;
            }
        };

        if self.wants_latency {
            self.submit(registry, ATTR_LATENCY, stats.latency_ms).await;
        }
        if self.wants_distance {
            self.submit(registry, ATTR_DISTANCE, u64::from(stats.hops)).await;
        }
    }

    async fn submit(&self, registry: &dyn Registry, attribute: &str, value: u64) {
        info!(
            "Submitting {} of node '{}' from group '{}'...",
            attribute, self.node, self.group
        );

        if let Err(error) =
            registry.update_attribute(&self.group, &self.node, attribute, value).await
        {
            warn!(
                "Cannot submit {} of node '{}' from group '{}' - {}",
                attribute, self.node, self.group, error
            );
        }
    }
}
