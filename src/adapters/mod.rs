//! Adapters Layer
//!
//! Inbound adapters drive the application (HTTP API for the UI).
//! Outbound adapters implement the domain ports.

pub mod inbound;
pub mod outbound;
