//! Tracing initialization shared by the workspace binaries.

mod tracing;

pub use crate::tracing::init_tracing;
