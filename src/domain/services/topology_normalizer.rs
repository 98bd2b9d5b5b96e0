//! Topology Normalizer Service
//!
//! Pure domain logic for flattening the nested broker topology into
//! table rows. This service has NO external dependencies beyond the JSON model.

use crate::domain::entities::{BrokerInstanceRecord, BrokerTopology};
use serde_json::Value;

/// Keys the record owns. Same-named fields in the server detail are replaced.
const RESERVED_KEYS: [&str; 3] = ["compositeId", "brokerName", "brokerIndex"];

/// Flattens `brokerName -> brokerIndex -> detail` into one record per leaf.
///
/// Output is grouped by broker name in input order, then by broker index in
/// input order. Nothing is re-sorted and the input is never mutated.
pub struct TopologyNormalizer;

impl TopologyNormalizer {
    /// Normalize a raw `brokerServer` value.
    ///
    /// Absent, null or wrongly shaped input yields an empty collection.
    pub fn normalize(topology: Option<&Value>) -> Vec<BrokerInstanceRecord> {
        Self::flatten(&BrokerTopology::from_value(topology))
    }

    /// Flatten an already parsed topology.
    pub fn flatten(topology: &BrokerTopology) -> Vec<BrokerInstanceRecord> {
        let mut records = Vec::with_capacity(topology.instance_count());

        for group in &topology.groups {
            for instance in &group.instances {
                let fields = instance
                    .detail
                    .iter()
                    .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();

                records.push(BrokerInstanceRecord {
                    composite_id: Self::composite_id(&group.broker_name, &instance.broker_index),
                    broker_name: group.broker_name.clone(),
                    broker_index: instance.broker_index.clone(),
                    fields,
                });
            }
        }

        records
    }

    /// Row key for a broker instance: `brokerName_brokerIndex`.
    pub fn composite_id(broker_name: &str, broker_index: &str) -> String {
        format!("{}_{}", broker_name, broker_index)
    }
}
