use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info};

use super::dispatcher::NodeDispatcher;
use crate::config::Config;
use crate::registry::Registry;

/// Periodic fetch-and-dispatch loop.
///
/// Keeps no state between cycles: every cycle loads a fresh snapshot and
/// re-measures from scratch, which is also the only retry mechanism.
pub struct Poller {
    registry: Arc<dyn Registry>,
    dispatcher: NodeDispatcher,
    interval: Duration,
    drain_cycles: bool,
}

impl Poller {
    pub fn new(registry: Arc<dyn Registry>, dispatcher: NodeDispatcher, config: &Config) -> Self {
        Self {
            registry,
            dispatcher,
            interval: config.interval,
            drain_cycles: config.drain_cycles,
        }
    }

    /// Run the crawl loop forever. The first fetch happens one interval
    /// after startup.
    pub async fn run(&self) {
        loop {
            sleep(self.interval).await;

            info!("Trying to load node groups...");
            let groups = match self.registry.node_groups().await {
                Ok(groups) => groups,
                Err(error) => {
                    error!("Failed to load node groups - {}", error);
                    continue;
                }
            };
            info!("Successfully loaded node groups!");

            let cycle = self.dispatcher.dispatch(groups);
            if self.drain_cycles {
                cycle.finished().await;
            }
        }
    }
}
