use std::io;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::net::lookup_host;
use tokio::task::JoinError;
use tracert::trace::Tracer;
use tracing::debug;

/// Upper bound on path length explored per probe.
const MAX_HOPS: u8 = 30;
/// Extra whole-trace attempts after an engine failure.
const PROBE_RETRIES: u32 = 1;
/// Per-hop answer deadline.
const HOP_TIMEOUT: Duration = Duration::from_millis(100);
/// Pause between successive probe packets.
const SEND_RATE: Duration = Duration::from_millis(1);

/// Outcome of probing one network channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStats {
    /// Number of path points that answered.
    pub hops: u32,
    /// Round-trip time of the last answering point, in whole milliseconds.
    pub latency_ms: u64,
}

impl ChannelStats {
    /// Collapse a traced path into the reported pair. An empty path has no
    /// last hop to time, so its latency is zero.
    fn from_path(hops: usize, last_rtt: Option<Duration>) -> Self {
        Self {
            hops: hops as u32,
            latency_ms: last_rtt.map_or(0, |rtt| rtt.as_millis() as u64),
        }
    }
}

/// Errors raised while probing a channel.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to resolve host '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("host '{host}' resolved to no addresses")]
    NoAddress { host: String },
    #[error("trace to {target} failed: {reason}")]
    Engine { target: IpAddr, reason: String },
    #[error("probe task failed: {0}")]
    Task(#[from] JoinError),
}

/// A measurement probe over one network channel.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Measure hop count and last-hop latency toward `host`.
    async fn probe(&self, host: &str) -> Result<ChannelStats, ProbeError>;
}

/// Traceroute-backed prober.
///
/// Walks the path with increasing TTLs and keeps every answering point.
/// The trace itself is a blocking raw-socket affair, so it runs on the
/// blocking thread pool.
#[derive(Debug, Default)]
pub struct ChannelProber;

impl ChannelProber {
    pub fn new() -> Self {
        Self
    }

    async fn resolve(&self, host: &str) -> Result<IpAddr, ProbeError> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let mut addresses = lookup_host((host, 0))
            .await
            .map_err(|source| ProbeError::Resolve { host: host.to_string(), source })?;

        addresses
            .next()
            .map(|address| address.ip())
            .ok_or_else(|| ProbeError::NoAddress { host: host.to_string() })
    }

    async fn trace(&self, target: IpAddr) -> Result<ChannelStats, ProbeError> {
        let outcome = tokio::task::spawn_blocking(move || {
            let mut tracer = Tracer::new(target)?;
            tracer.max_hop = MAX_HOPS;
            tracer.receive_timeout = HOP_TIMEOUT;
            tracer.trace_timeout = HOP_TIMEOUT * u32::from(MAX_HOPS);
            tracer.send_rate = SEND_RATE;
            tracer.trace()
        })
        .await?;

        match outcome {
            Ok(trace) => Ok(ChannelStats::from_path(
                trace.nodes.len(),
                trace.nodes.last().map(|node| node.rtt),
            )),
            Err(reason) => Err(ProbeError::Engine { target, reason }),
        }
    }
}

#[async_trait]
impl Prober for ChannelProber {
    async fn probe(&self, host: &str) -> Result<ChannelStats, ProbeError> {
        let target = self.resolve(host).await?;

        let mut attempt = 0;
        loop {
            match self.trace(target).await {
                Ok(stats) => return Ok(stats),
                Err(error) if attempt < PROBE_RETRIES => {
                    attempt += 1;
                    debug!("Retrying trace to {} after error: {}", target, error);
                }
                Err(error) => return Err(error),
            }
        }
    }
}
