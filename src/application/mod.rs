//! Application Layer
//!
//! Use cases orchestrating the domain ports.

mod proxy_registry;
mod topology_service;

pub use proxy_registry::{ProxyRegistry, ACTIVE_PROXY_KEY};
pub use topology_service::TopologyService;
