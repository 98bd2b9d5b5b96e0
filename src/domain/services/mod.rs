mod topology_normalizer;

pub use topology_normalizer::TopologyNormalizer;
