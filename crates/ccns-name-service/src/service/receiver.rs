//! Receiver Service (destination network)
//!
//! Applies registrations delivered by the transport to the local directory.
//! Per message: trust check against the single bound origin, decode,
//! sequence gate, apply. Rejected messages are discarded without state
//! change; nothing is reported back to the source network.

use crate::algorithms::decode_message;
use crate::domain::{
    display_address, invariant_sequence_fresh, invariant_trusted_origin, Address, ApplyOutcome,
    ChainId, NameServiceError, Operation, TrustedSender,
};
use crate::ports::inbound::InboundMessageHandler;
use crate::ports::outbound::NameDirectory;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Construction-time configuration for a receiver.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Chain this receiver runs on (log/diagnostic identity).
    pub local_chain: ChainId,
    /// The only origin whose messages are applied. Immutable for the
    /// lifetime of the receiver.
    pub trusted: TrustedSender,
}

/// Destination-network receiver: the eventually-consistent write path.
pub struct ReceiverService {
    config: ReceiverConfig,
    directory: Arc<dyn NameDirectory>,
    /// Newest sequence applied per name; guards against reordered delivery
    /// regressing a name to an earlier owner.
    applied: RwLock<HashMap<String, u64>>,
}

impl ReceiverService {
    /// Create a receiver bound to its directory and trusted origin.
    pub fn new(config: ReceiverConfig, directory: Arc<dyn NameDirectory>) -> Self {
        Self {
            config,
            directory,
            applied: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a name against the local directory.
    pub fn lookup(&self, name: &str) -> Address {
        self.directory.get(name)
    }
}

#[async_trait]
impl InboundMessageHandler for ReceiverService {
    async fn on_message(
        &self,
        source_chain: ChainId,
        sender: Address,
        payload: &[u8],
    ) -> Result<ApplyOutcome, NameServiceError> {
        invariant_trusted_origin(&self.config.trusted, source_chain, sender)?;

        let message = decode_message(payload)?;

        match message.op {
            Operation::Register => {
                let mut applied = self.applied.write();
                let last = applied.get(message.name.as_str()).copied();

                if !invariant_sequence_fresh(last, message.sequence) {
                    debug!(
                        "[ccns] {} ignoring stale registration of {} (seq {} < {})",
                        self.config.local_chain,
                        message.name,
                        message.sequence,
                        last.unwrap_or_default()
                    );
                    return Ok(ApplyOutcome::StaleSequence);
                }

                self.directory.set(&message.name, message.owner);
                applied.insert(message.name.clone(), message.sequence);
                info!(
                    "[ccns] {} applied {} -> {} (seq {})",
                    self.config.local_chain,
                    message.name,
                    display_address(&message.owner),
                    message.sequence
                );
                Ok(ApplyOutcome::Applied)
            }
        }
    }
}
