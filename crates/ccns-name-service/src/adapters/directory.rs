//! In-Memory Name Directory Adapter
//!
//! Implements the `NameDirectory` port over a process-local map. One
//! instance per simulated network; single-writer discipline comes from the
//! owning service holding the handle.

use crate::domain::{Address, NameRecord, ZERO_ADDRESS};
use crate::ports::outbound::NameDirectory;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory name directory.
#[derive(Default)]
pub struct InMemoryNameDirectory {
    records: RwLock<HashMap<String, Address>>,
}

impl InMemoryNameDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of names ever set.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if nothing was ever set.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Snapshot of all records, in no particular order.
    pub fn records(&self) -> Vec<NameRecord> {
        self.records
            .read()
            .iter()
            .map(|(name, owner)| NameRecord::new(name.clone(), *owner))
            .collect()
    }
}

impl NameDirectory for InMemoryNameDirectory {
    fn set(&self, name: &str, owner: Address) {
        debug!("[ccns] directory set {} -> 0x{}", name, hex::encode(owner));
        self.records.write().insert(name.to_string(), owner);
    }

    fn get(&self, name: &str) -> Address {
        self.records
            .read()
            .get(name)
            .copied()
            .unwrap_or(ZERO_ADDRESS)
    }
}
