//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of a reachable proxy instance (`host:port` or a logical name).
///
/// The value is opaque to the console and kept exactly as given; the only
/// rule enforced here is that it is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyAddress(String);

impl ProxyAddress {
    /// Build an address, rejecting blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProxyAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProxyAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Role of the operator driving the console session.
///
/// `Normal` is the restricted role: it can browse but not change
/// which proxy is active or register new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorRole {
    /// Full access (role code `1`)
    Admin,
    /// Read-only access (role code `0`)
    Normal,
}

impl OperatorRole {
    /// Whether this role may perform mutating operations.
    pub fn can_write(&self) -> bool {
        *self != Self::Normal
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Normal => "normal",
        }
    }
}

impl Default for OperatorRole {
    fn default() -> Self {
        Self::Admin
    }
}

impl FromStr for OperatorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "1" => Ok(Self::Admin),
            "normal" | "0" => Ok(Self::Normal),
            other => Err(format!("unknown operator role: {:?}", other)),
        }
    }
}

impl std::fmt::Display for OperatorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
