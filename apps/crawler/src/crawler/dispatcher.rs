use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::debug;

use super::task::MeasurementJob;
use crate::config::Config;
use crate::probe::Prober;
use crate::registry::{NodeGroups, Registry};

/// Completion signal for one dispatched cycle.
///
/// Resolves once every task launched for the cycle has finished. Dropping
/// the handle never cancels the tasks.
pub struct CycleHandle {
    done: mpsc::Receiver<()>,
}

impl CycleHandle {
    /// Wait until all of the cycle's tasks have finished.
    pub async fn finished(mut self) {
        // Senders never send; the channel closes when the last task drops
        // its clone.
        let _ = self.done.recv().await;
    }
}

/// Fans a node-group snapshot out into bounded measurement tasks.
pub struct NodeDispatcher {
    registry: Arc<dyn Registry>,
    prober: Arc<dyn Prober>,
    permits: Arc<Semaphore>,
}

impl NodeDispatcher {
    pub fn new(registry: Arc<dyn Registry>, prober: Arc<dyn Prober>, config: &Config) -> Self {
        Self {
            registry,
            prober,
            permits: Arc::new(Semaphore::new(config.max_in_flight)),
        }
    }

    /// Launch one measurement task per node that requests a measurement.
    ///
    /// Returns immediately; tasks queue on the permit pool and run with at
    /// most `max_in_flight` of them active at once.
    pub fn dispatch(&self, groups: NodeGroups) -> CycleHandle {
        let (done_tx, done_rx) = mpsc::channel::<()>(1);
        let mut launched = 0usize;

        for (group_name, group) in groups {
            for (node_name, node) in group.nodes {
                let job = MeasurementJob::for_node(&group_name, &node_name, &node);
                if !job.is_eligible() {
                    continue;
                }

                let registry = Arc::clone(&self.registry);
                let prober = Arc::clone(&self.prober);
                let permits = Arc::clone(&self.permits);
                let done = done_tx.clone();

                tokio::spawn(async move {
                    let _done = done;
                    let _permit = match permits.acquire_owned().await {
                        Ok(permit) => permit,
                        // The pool is never closed while the crawler runs.
                        Err(_) => return,
                    };

                    job.run(registry.as_ref(), prober.as_ref()).await;
                });

                launched += 1;
            }
        }

        debug!("Dispatched {} measurement tasks", launched);

        CycleHandle { done: done_rx }
    }
}
