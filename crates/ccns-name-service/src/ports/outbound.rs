//! # Outbound Ports
//!
//! Traits for external dependencies (message transport, name directory).

use crate::domain::{Address, ChainId, MessageId, NameServiceError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;

/// Cross-chain message transport - outbound port.
///
/// The transport guarantees at-least-once, possibly reordered delivery to a
/// registered receiver. `send` is fire-and-forget beyond the returned id:
/// no destination confirmation ever flows back, and there is no retraction
/// primitive.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Hand one payload to the transport.
    async fn send(
        &self,
        destination: ChainId,
        receiver: Address,
        payload: Vec<u8>,
        gas_budget: u64,
    ) -> Result<MessageId, NameServiceError>;
}

/// Name directory - outbound port.
///
/// Last-write-wins mapping of name to owner. Each network owns exactly one
/// directory, mutated only by its register (source) or receiver
/// (destination).
pub trait NameDirectory: Send + Sync {
    /// Unconditionally overwrite the record for `name`. No error conditions.
    fn set(&self, name: &str, owner: Address);

    /// Owner for `name`, or [`crate::domain::ZERO_ADDRESS`] if never set.
    fn get(&self, name: &str) -> Address;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// One recorded `send` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentMessage {
    /// Destination chain.
    pub destination: ChainId,
    /// Receiver address passed to the transport.
    pub receiver: Address,
    /// Serialized payload.
    pub payload: Vec<u8>,
    /// Gas budget passed along.
    pub gas_budget: u64,
}

/// Mock transport for unit tests: records sends, optionally rejects
/// configured destinations.
#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<SentMessage>>,
    failing: Mutex<HashSet<ChainId>>,
}

impl MockTransport {
    /// Create a transport that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject future sends toward `destination` (insufficient fee).
    pub fn fail_destination(&self, destination: ChainId) {
        self.failing.lock().insert(destination);
    }

    /// Number of accepted sends.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Snapshot of all accepted sends, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl MessageTransport for MockTransport {
    async fn send(
        &self,
        destination: ChainId,
        receiver: Address,
        payload: Vec<u8>,
        gas_budget: u64,
    ) -> Result<MessageId, NameServiceError> {
        if self.failing.lock().contains(&destination) {
            return Err(NameServiceError::TransportSend {
                destination,
                reason: "insufficient fee".to_string(),
            });
        }

        let mut sent = self.sent.lock();
        sent.push(SentMessage {
            destination,
            receiver,
            payload,
            gas_budget,
        });
        Ok([sent.len() as u8; 32])
    }
}
