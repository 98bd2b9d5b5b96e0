//! Config Service Port
//!
//! Defines the interface to the backend that owns proxy configuration.
//! Implementations may talk HTTP or be in-memory fakes.

use crate::domain::entities::{HomePage, ProxyConfig};
use crate::domain::errors::ServiceError;
use crate::domain::value_objects::ProxyAddress;
use async_trait::async_trait;

/// Remote authority for the proxy list and per-proxy configuration.
///
/// This is an outbound port. Every call either returns the decoded payload
/// or a [`ServiceError`] carrying the backend's message unmodified.
/// Timeouts are the implementation's concern.
#[async_trait]
pub trait ConfigService: Send + Sync {
    /// Known proxy addresses and the backend's current selection.
    async fn get_home_page(&self) -> Result<HomePage, ServiceError>;

    /// Detailed configuration of one proxy.
    async fn get_proxy_detail_config(
        &self,
        address: &ProxyAddress,
    ) -> Result<ProxyConfig, ServiceError>;

    /// Make `address` the backend's active proxy.
    async fn set_active_proxy_addr(&self, address: &ProxyAddress) -> Result<(), ServiceError>;

    /// Register a new proxy address.
    async fn add_proxy_addr(&self, address: &ProxyAddress) -> Result<(), ServiceError>;
}
