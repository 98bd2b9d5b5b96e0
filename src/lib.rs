//! Broker Console Library
//!
//! Proxy endpoint registry and broker topology shaping for the broker
//! administration console, exposed for integration tests and embedding.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{ProxyRegistry, TopologyService, ACTIVE_PROXY_KEY};
pub use config::load_config;
pub use domain::entities::{BrokerInstanceRecord, ClusterQuery, ProxyRegistryState};
pub use domain::errors::{RegistryError, ServiceError};
pub use domain::ports::{ClusterService, ConfigService, KeyValueStore};
pub use domain::services::TopologyNormalizer;
pub use domain::value_objects::{OperatorRole, ProxyAddress};
