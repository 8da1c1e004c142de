use std::sync::Arc;

use anyhow::Result;
use logger::init_tracing;
use tracing::info;

mod config;
mod crawler;
mod probe;
mod registry;

use config::Config;
use crawler::{NodeDispatcher, Poller};
use probe::{ChannelProber, Prober};
use registry::{Registry, RegistryClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    info!(
        "Starting network crawler: polling {} every {}s with up to {} tasks in flight",
        config.api_url,
        config.interval.as_secs(),
        config.max_in_flight
    );

    let registry: Arc<dyn Registry> = Arc::new(RegistryClient::new(config.api_url.clone())?);
    let prober: Arc<dyn Prober> = Arc::new(ChannelProber::new());

    let dispatcher = NodeDispatcher::new(Arc::clone(&registry), prober, &config);
    let poller = Poller::new(registry, dispatcher, &config);

    poller.run().await;

    Ok(())
}
