//! # Domain Entities
//!
//! Core entities for the cross-chain name service.

use super::errors::NameServiceError;
use super::value_objects::{Address, ChainId, MessageId};
use serde::{Deserialize, Serialize};

/// One entry of a name directory: name to owner, last write wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Human-readable name (e.g. `alice.ccns`).
    pub name: String,
    /// Owning account.
    pub owner: Address,
}

impl NameRecord {
    /// Create a new record.
    pub fn new(name: impl Into<String>, owner: Address) -> Self {
        Self {
            name: name.into(),
            owner,
        }
    }
}

/// Operation carried by a cross-chain message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Register (or re-register) a name to an owner.
    Register,
}

/// The wire message propagated from the source network to destinations.
///
/// Transient: exists only as a serialized payload in flight. The `sequence`
/// stamp lets receivers discard registrations that were superseded on the
/// source network before delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationMessage {
    /// Operation tag.
    pub op: Operation,
    /// Name being registered.
    pub name: String,
    /// Owner on the source network.
    pub owner: Address,
    /// Monotonic registration sequence assigned by the source register.
    pub sequence: u64,
}

impl RegistrationMessage {
    /// Build a registration message.
    pub fn register(name: impl Into<String>, owner: Address, sequence: u64) -> Self {
        Self {
            op: Operation::Register,
            name: name.into(),
            owner,
            sequence,
        }
    }
}

/// Per-destination forwarding configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Destination chain.
    pub destination: ChainId,
    /// Receiver service address on that chain.
    pub receiver: Address,
    /// Gas budget handed to the transport for the destination execution.
    pub gas_budget: u64,
}

/// Insertion-ordered route table, keyed by destination chain.
///
/// Re-enabling a destination replaces the route in place: the entry keeps
/// its original slot, so fan-out order is stable across overwrites.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChainRouteTable {
    routes: Vec<Route>,
}

impl ChainRouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or fully replace the route for its destination.
    pub fn upsert(&mut self, route: Route) {
        match self
            .routes
            .iter_mut()
            .find(|r| r.destination == route.destination)
        {
            Some(slot) => *slot = route,
            None => self.routes.push(route),
        }
    }

    /// Route for a destination, if enabled.
    pub fn get(&self, destination: ChainId) -> Option<&Route> {
        self.routes.iter().find(|r| r.destination == destination)
    }

    /// Whether a destination has a route.
    pub fn is_enabled(&self, destination: ChainId) -> bool {
        self.get(destination).is_some()
    }

    /// Routes in the order they were first enabled.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of enabled destinations.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if no destination is enabled.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Result of one destination send during registration fan-out.
#[derive(Debug)]
pub struct SendOutcome {
    /// Destination the message was sent toward.
    pub destination: ChainId,
    /// Transport message id on acceptance, the send error otherwise.
    pub result: Result<MessageId, NameServiceError>,
}

impl SendOutcome {
    /// True if the transport accepted the message.
    pub fn accepted(&self) -> bool {
        self.result.is_ok()
    }
}

/// What a registration call did: the committed local write plus one outcome
/// per enabled destination.
///
/// The local write is never rolled back; failed sends stay visible here so
/// partial fan-out failure is observable by the caller.
#[derive(Debug)]
pub struct RegistrationReceipt {
    /// Registered name.
    pub name: String,
    /// Owner committed on the source network.
    pub owner: Address,
    /// Sequence stamped into the outbound messages.
    pub sequence: u64,
    /// Per-destination send outcomes, in fan-out order.
    pub sends: Vec<SendOutcome>,
}

impl RegistrationReceipt {
    /// True if every destination send was accepted by the transport.
    pub fn all_sent(&self) -> bool {
        self.sends.iter().all(SendOutcome::accepted)
    }

    /// Destinations whose send the transport rejected.
    pub fn failed_destinations(&self) -> Vec<ChainId> {
        self.sends
            .iter()
            .filter(|s| !s.accepted())
            .map(|s| s.destination)
            .collect()
    }
}
