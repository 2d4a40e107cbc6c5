//! Adapters - Concrete implementations of ports and delivery surfaces.

pub mod http;
pub mod orchestrator;
