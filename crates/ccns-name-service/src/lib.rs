//! # CrossName Name Service
//!
//! Cross-chain name resolution: a name registered once on an authoritative
//! source network becomes resolvable on destination networks, propagated
//! over an asynchronous message transport.
//!
//! ## Purpose
//!
//! - Authoritative registration and lookup on the source network
//! - Per-destination routing (receiver identity + gas budget)
//! - Idempotent, reorder-tolerant application on destination networks
//! - Strict wire codec for the registration payload
//!
//! ## Consistency Model
//!
//! | Network | Guarantee |
//! |---------|-----------|
//! | Source | Registration visible immediately after `register` |
//! | Destination | Eventually consistent; converges to the newest sequence |
//!
//! The transport delivers at-least-once with no ordering; receivers discard
//! duplicates by value and stale registrations by sequence.
//!
//! ## Module Structure
//!
//! ```text
//! ccns-name-service/
//! ├── domain/          # NameRecord, Route, RegistrationMessage, errors
//! ├── algorithms/      # Wire codec
//! ├── ports/           # NameRegistry, InboundMessageHandler, MessageTransport
//! ├── adapters/        # In-memory directory, in-process local relay
//! └── service/         # RegisterService, ReceiverService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{DeliveryReport, InMemoryNameDirectory, LocalRelay};
pub use algorithms::{decode_message, encode_message, MAX_PAYLOAD_BYTES};
pub use domain::{
    display_address, invariant_admin_only, invariant_sequence_fresh, invariant_trusted_origin,
    Address, ApplyOutcome, ChainId, ChainRouteTable, MessageId, NameRecord, NameServiceError,
    Operation, RegistrationMessage, RegistrationReceipt, Route, SendOutcome, TrustedSender,
    ZERO_ADDRESS,
};
pub use ports::{
    InboundMessageHandler, MessageTransport, MockTransport, NameDirectory, NameRegistry,
    SentMessage,
};
pub use service::{ReceiverConfig, ReceiverService, RegisterConfig, RegisterService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
