//! Cluster Service Port
//!
//! Defines the interface for querying the broker cluster layout.

use crate::domain::entities::{ClusterList, ClusterQuery};
use crate::domain::errors::ServiceError;
use async_trait::async_trait;

/// Source of the cluster list payload consumed by the topology view.
#[async_trait]
pub trait ClusterService: Send + Sync {
    async fn get_cluster_list(&self, query: &ClusterQuery) -> Result<ClusterList, ServiceError>;
}
