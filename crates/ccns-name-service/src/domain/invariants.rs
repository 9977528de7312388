//! # Domain Invariants
//!
//! Business rules for registration propagation, as pure functions.

use super::errors::NameServiceError;
use super::value_objects::{Address, ChainId, TrustedSender};

/// Invariant: administrative operations are restricted to the single
/// administrator identity fixed at construction.
pub fn invariant_admin_only(admin: Address, caller: Address) -> Result<(), NameServiceError> {
    if caller != admin {
        return Err(NameServiceError::Unauthorized { caller });
    }
    Ok(())
}

/// Invariant: an inbound message is accepted only from the exact
/// (source chain, sender) pair bound at receiver construction.
pub fn invariant_trusted_origin(
    trusted: &TrustedSender,
    source_chain: ChainId,
    sender: Address,
) -> Result<(), NameServiceError> {
    if !trusted.matches(source_chain, sender) {
        return Err(NameServiceError::UntrustedSender {
            source_chain,
            sender,
        });
    }
    Ok(())
}

/// Invariant: a registration may be applied only if no newer registration
/// for the same name was applied already.
///
/// Equal sequences are fresh: a duplicate delivery re-applies identical
/// values, which keeps application idempotent under at-least-once transport.
pub fn invariant_sequence_fresh(last_applied: Option<u64>, incoming: u64) -> bool {
    match last_applied {
        Some(last) => incoming >= last,
        None => true,
    }
}
