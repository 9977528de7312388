//! # Algorithms Module
//!
//! Pure protocol logic for the cross-chain name service.

pub mod codec;

pub use codec::{decode_message, encode_message, MAX_PAYLOAD_BYTES};
