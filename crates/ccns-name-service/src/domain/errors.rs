//! # Domain Errors
//!
//! Error taxonomy for the cross-chain name service. Every error is local to
//! the operation that detects it; nothing propagates across networks.

use super::value_objects::{Address, ChainId};
use thiserror::Error;

/// Name service error types.
#[derive(Debug, Error)]
pub enum NameServiceError {
    /// Administrative call by a non-admin identity. No state change.
    #[error("unauthorized caller: 0x{}", hex::encode(.caller))]
    Unauthorized {
        /// Identity that attempted the call.
        caller: Address,
    },

    /// Single-destination registration toward a chain with no route.
    #[error("destination chain not enabled: {0}")]
    DestinationNotEnabled(ChainId),

    /// Inbound message from an origin other than the trusted binding.
    /// The message is discarded without touching the directory.
    #[error("untrusted message origin: {source_chain}, sender 0x{}", hex::encode(.sender))]
    UntrustedSender {
        /// Chain the message claimed to originate from.
        source_chain: ChainId,
        /// Sender address on that chain.
        sender: Address,
    },

    /// Payload that no matching encoder produced. Discarded.
    #[error("malformed message payload: {0}")]
    MalformedPayload(String),

    /// Destination send rejected by the transport (insufficient fee, unknown
    /// destination, receiver rejected). The local registration stays
    /// committed.
    #[error("transport send to {destination} failed: {reason}")]
    TransportSend {
        /// Destination that could not be reached.
        destination: ChainId,
        /// Transport-reported reason.
        reason: String,
    },
}
