//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for local simulation and testing.

mod directory;
mod relay;

pub use directory::InMemoryNameDirectory;
pub use relay::{DeliveryReport, LocalRelay};
