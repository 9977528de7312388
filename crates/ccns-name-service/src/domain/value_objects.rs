//! # Domain Value Objects
//!
//! Immutable value types for the cross-chain name service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Address type (20-byte account identifier).
pub type Address = [u8; 20];

/// Transport-assigned message identifier (32-byte).
pub type MessageId = [u8; 32];

/// Sentinel owner returned by lookups for names that were never registered.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Render an address as `0x`-prefixed hex for logs and error messages.
pub fn display_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Network identifier (chain selector).
///
/// An opaque `u64` selector assigned per network; equality is the only
/// relation the protocol relies on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Raw selector value.
    pub fn selector(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain-{}", self.0)
    }
}

/// The single (source chain, sender) pair a receiver accepts messages from.
///
/// Capability-style trust: bound once at receiver construction and compared
/// by exact equality against every inbound message. Never a mutable
/// allow-list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedSender {
    /// Chain the messages must originate from.
    pub source_chain: ChainId,
    /// Register service address on that chain.
    pub sender: Address,
}

impl TrustedSender {
    /// Bind a new trusted origin.
    pub fn new(source_chain: ChainId, sender: Address) -> Self {
        Self {
            source_chain,
            sender,
        }
    }

    /// Check an inbound origin against the binding.
    pub fn matches(&self, source_chain: ChainId, sender: Address) -> bool {
        self.source_chain == source_chain && self.sender == sender
    }
}

/// Outcome of applying one delivered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Validated and written to the local directory.
    Applied,
    /// Valid, but older than a registration already applied for the name.
    StaleSequence,
}
