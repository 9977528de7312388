//! # Inbound Ports
//!
//! API traits defining what the name service offers on each network.

use crate::domain::{Address, ApplyOutcome, ChainId, NameServiceError, RegistrationReceipt};
use async_trait::async_trait;

/// Source-network registry API - inbound port.
#[async_trait]
pub trait NameRegistry: Send + Sync {
    /// Register `name` to the caller and fan out to every enabled
    /// destination, in the order the destinations were enabled.
    ///
    /// The local write commits before any send and is never rolled back;
    /// per-destination send results are reported in the receipt.
    async fn register(
        &self,
        caller: Address,
        name: &str,
    ) -> Result<RegistrationReceipt, NameServiceError>;

    /// Register `name` and propagate to a single destination chain.
    ///
    /// Fails with [`NameServiceError::DestinationNotEnabled`] before any
    /// side effect if `destination` has no route.
    async fn register_on(
        &self,
        caller: Address,
        name: &str,
        destination: ChainId,
    ) -> Result<RegistrationReceipt, NameServiceError>;

    /// Enable a destination chain, or fully replace its existing route.
    /// Restricted to the administrator identity.
    fn enable_chain(
        &self,
        caller: Address,
        destination: ChainId,
        receiver: Address,
        gas_budget: u64,
    ) -> Result<(), NameServiceError>;

    /// Whether a destination chain currently has a route.
    fn is_chain_enabled(&self, destination: ChainId) -> bool;

    /// Resolve a name against the local directory.
    fn lookup(&self, name: &str) -> Address;
}

/// Destination-network message entry point - inbound port.
///
/// Invoked by the transport on delivery; this component never polls. The
/// transport authenticates the `(source_chain, sender)` pair but guarantees
/// nothing about delivery count or order.
#[async_trait]
pub trait InboundMessageHandler: Send + Sync {
    /// Validate and apply one delivered payload.
    async fn on_message(
        &self,
        source_chain: ChainId,
        sender: Address,
        payload: &[u8],
    ) -> Result<ApplyOutcome, NameServiceError>;
}
