//! Path probing for measured network channels.

pub mod prober;

pub use prober::{ChannelProber, ChannelStats, ProbeError, Prober};
