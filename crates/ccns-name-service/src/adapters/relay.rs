//! Local Relay Adapter
//!
//! In-process `MessageTransport` that routes payloads to receivers
//! registered per (chain, address). Delivery is queued and driven
//! explicitly, so tests can exercise the transport's real guarantees:
//! at-least-once (duplicate the queue) and no ordering (reverse the queue).
//!
//! In production this seam is a real cross-chain messaging network; the
//! relay stands in for it the way an in-memory contract stands in for a
//! deployed one.

use crate::domain::{Address, ApplyOutcome, ChainId, MessageId, NameServiceError};
use crate::ports::inbound::InboundMessageHandler;
use crate::ports::outbound::MessageTransport;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// A message accepted by the relay and awaiting delivery.
#[derive(Clone)]
struct PendingDelivery {
    message_id: MessageId,
    destination: ChainId,
    receiver: Address,
    payload: Vec<u8>,
}

/// What happened when the relay delivered one message.
///
/// Visible to the test harness only; the sending side never sees receiver
/// outcomes (fire-and-forget messaging has no acknowledgment channel).
#[derive(Debug)]
pub struct DeliveryReport {
    /// Transport id of the delivered message.
    pub message_id: MessageId,
    /// Destination it was delivered to.
    pub destination: ChainId,
    /// The receiver's verdict.
    pub outcome: Result<ApplyOutcome, NameServiceError>,
}

/// In-process transport connecting one sending endpoint to registered
/// receivers.
///
/// The relay authenticates deliveries itself: every `on_message` call
/// carries the (source chain, sender) pair fixed at construction, matching
/// the transport guarantee that a third party cannot spoof the origin.
pub struct LocalRelay {
    source_chain: ChainId,
    sender: Address,
    receivers: RwLock<HashMap<(ChainId, Address), Arc<dyn InboundMessageHandler>>>,
    queue: Mutex<VecDeque<PendingDelivery>>,
    failing: Mutex<HashSet<ChainId>>,
    counter: AtomicU64,
}

impl LocalRelay {
    /// Create a relay for one sending endpoint.
    pub fn new(source_chain: ChainId, sender: Address) -> Self {
        Self {
            source_chain,
            sender,
            receivers: RwLock::new(HashMap::new()),
            queue: Mutex::new(VecDeque::new()),
            failing: Mutex::new(HashSet::new()),
            counter: AtomicU64::new(0),
        }
    }

    /// Register the receiver serving `address` on `chain`.
    pub fn register_receiver(
        &self,
        chain: ChainId,
        address: Address,
        handler: Arc<dyn InboundMessageHandler>,
    ) {
        self.receivers.write().insert((chain, address), handler);
    }

    /// Reject future sends toward `destination` (insufficient fee).
    pub fn fail_destination(&self, destination: ChainId) {
        self.failing.lock().insert(destination);
    }

    /// Accept sends toward `destination` again.
    pub fn restore_destination(&self, destination: ChainId) {
        self.failing.lock().remove(&destination);
    }

    /// Messages accepted but not yet delivered.
    pub fn pending_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Duplicate every pending message (at-least-once delivery).
    pub fn duplicate_pending(&self) {
        let mut queue = self.queue.lock();
        let copies: Vec<PendingDelivery> = queue.iter().cloned().collect();
        queue.extend(copies);
    }

    /// Reverse the pending queue (the transport promises no ordering).
    pub fn reverse_pending(&self) {
        let mut queue = self.queue.lock();
        let reversed: VecDeque<PendingDelivery> = queue.drain(..).rev().collect();
        *queue = reversed;
    }

    /// Deliver the oldest pending message, if any.
    pub async fn deliver_next(&self) -> Option<DeliveryReport> {
        let pending = self.queue.lock().pop_front()?;

        let handler = self
            .receivers
            .read()
            .get(&(pending.destination, pending.receiver))
            .cloned();

        let outcome = match handler {
            Some(handler) => {
                handler
                    .on_message(self.source_chain, self.sender, &pending.payload)
                    .await
            }
            // Receiver disappeared after send acceptance; drop the message.
            None => Err(NameServiceError::TransportSend {
                destination: pending.destination,
                reason: "receiver not registered".to_string(),
            }),
        };

        if let Err(err) = &outcome {
            // Inbound rejections are silent toward the sender.
            warn!("[ccns] delivery to {} rejected: {}", pending.destination, err);
        }

        Some(DeliveryReport {
            message_id: pending.message_id,
            destination: pending.destination,
            outcome,
        })
    }

    /// Deliver everything currently pending, in queue order.
    pub async fn deliver_all(&self) -> Vec<DeliveryReport> {
        let mut reports = Vec::new();
        while let Some(report) = self.deliver_next().await {
            reports.push(report);
        }
        reports
    }

    fn next_message_id(
        &self,
        destination: ChainId,
        receiver: &Address,
        payload: &[u8],
    ) -> MessageId {
        let nonce = self.counter.fetch_add(1, Ordering::SeqCst);

        let mut hasher = Sha256::new();
        hasher.update(nonce.to_le_bytes());
        hasher.update(self.source_chain.selector().to_le_bytes());
        hasher.update(destination.selector().to_le_bytes());
        hasher.update(receiver);
        hasher.update(payload);

        let mut id = [0u8; 32];
        id.copy_from_slice(&hasher.finalize());
        id
    }
}

#[async_trait]
impl MessageTransport for LocalRelay {
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

        if !self.receivers.read().contains_key(&(destination, receiver)) {
            return Err(NameServiceError::TransportSend {
                destination,
                reason: "unknown destination".to_string(),
            });
        }

        let message_id = self.next_message_id(destination, &receiver, &payload);
        debug!(
            "[ccns] relay accepted {:02x}{:02x}.. for {} (gas {})",
            message_id[0], message_id[1], destination, gas_budget
        );

        self.queue.lock().push_back(PendingDelivery {
            message_id,
            destination,
            receiver,
            payload,
        });
        Ok(message_id)
    }
}
