//! Topology Service - Broker table use case
//!
//! Fetches the cluster list and flattens its broker section for display.

use crate::domain::entities::{BrokerInstanceRecord, ClusterQuery};
use crate::domain::errors::RegistryError;
use crate::domain::ports::ClusterService;
use crate::domain::services::TopologyNormalizer;
use std::sync::Arc;

/// Topology service. Shares no state with the proxy registry.
pub struct TopologyService {
    cluster_service: Arc<dyn ClusterService>,
}

impl TopologyService {
    pub fn new(cluster_service: Arc<dyn ClusterService>) -> Self {
        Self { cluster_service }
    }

    /// Broker instances of the cluster, one record per (brokerName, brokerIndex).
    pub async fn broker_instances(
        &self,
        query: &ClusterQuery,
    ) -> Result<Vec<BrokerInstanceRecord>, RegistryError> {
        let list = self
            .cluster_service
            .get_cluster_list(query)
            .await
            .map_err(|e| {
                tracing::warn!("cluster list fetch failed: {}", e);
                RegistryError::from(e)
            })?;

        let records = TopologyNormalizer::normalize(Some(&list.broker_server));
        tracing::debug!("cluster list normalized into {} broker rows", records.len());
        Ok(records)
    }
}
