//! Domain Layer
//!
//! Entities, value objects, ports and pure services. Nothing here knows
//! about HTTP, SQLite or the runtime.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;
