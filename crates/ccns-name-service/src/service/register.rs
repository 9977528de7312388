//! Register Service (source network)
//!
//! Accepts registrations, commits them to the local directory, then fans
//! out one message per enabled destination. Commit-then-best-effort-notify:
//! the local write is authoritative and never rolled back; each destination
//! send succeeds or fails on its own and the receipt reports both.

use crate::algorithms::encode_message;
use crate::domain::{
    display_address, invariant_admin_only, Address, ChainId, ChainRouteTable, NameServiceError,
    RegistrationMessage, RegistrationReceipt, Route, SendOutcome,
};
use crate::ports::inbound::NameRegistry;
use crate::ports::outbound::{MessageTransport, NameDirectory};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Construction-time configuration for the register service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// The single identity allowed to administer routes.
    pub admin: Address,
    /// Chain this register runs on (log/diagnostic identity).
    pub local_chain: ChainId,
}

/// Source-network registry: the authoritative write path.
pub struct RegisterService {
    config: RegisterConfig,
    routes: RwLock<ChainRouteTable>,
    directory: Arc<dyn NameDirectory>,
    transport: Arc<dyn MessageTransport>,
    sequence: AtomicU64,
}

impl RegisterService {
    /// Create a register bound to its local directory and transport.
    pub fn new(
        config: RegisterConfig,
        directory: Arc<dyn NameDirectory>,
        transport: Arc<dyn MessageTransport>,
    ) -> Self {
        Self {
            config,
            routes: RwLock::new(ChainRouteTable::new()),
            directory,
            transport,
            sequence: AtomicU64::new(0),
        }
    }

    /// Number of enabled destination chains.
    pub fn route_count(&self) -> usize {
        self.routes.read().len()
    }

    /// Commit the registration locally and stamp its sequence.
    fn commit_local(&self, caller: Address, name: &str) -> u64 {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.directory.set(name, caller);
        info!(
            "[ccns] {} registered {} to {} (seq {})",
            self.config.local_chain,
            name,
            display_address(&caller),
            sequence
        );
        sequence
    }

    /// Send one registration message along a route, never propagating the
    /// failure past the outcome record.
    async fn send_along(
        &self,
        route: &Route,
        payload: Vec<u8>,
    ) -> SendOutcome {
        let result = self
            .transport
            .send(route.destination, route.receiver, payload, route.gas_budget)
            .await;

        if let Err(err) = &result {
            warn!(
                "[ccns] fan-out to {} failed: {}",
                route.destination, err
            );
        }

        SendOutcome {
            destination: route.destination,
            result,
        }
    }
}

#[async_trait]
impl NameRegistry for RegisterService {
    async fn register(
        &self,
        caller: Address,
        name: &str,
    ) -> Result<RegistrationReceipt, NameServiceError> {
        let sequence = self.commit_local(caller, name);

        // Snapshot outside the lock; sends must not hold it across awaits.
        let routes: Vec<Route> = self.routes.read().iter().cloned().collect();

        let message = RegistrationMessage::register(name, caller, sequence);
        let payload = encode_message(&message)?;

        let mut sends = Vec::with_capacity(routes.len());
        for route in &routes {
            sends.push(self.send_along(route, payload.clone()).await);
        }

        Ok(RegistrationReceipt {
            name: name.to_string(),
            owner: caller,
            sequence,
            sends,
        })
    }

    async fn register_on(
        &self,
        caller: Address,
        name: &str,
        destination: ChainId,
    ) -> Result<RegistrationReceipt, NameServiceError> {
        // Route check first: an unknown destination fails before any write.
        let route = self
            .routes
            .read()
            .get(destination)
            .cloned()
            .ok_or(NameServiceError::DestinationNotEnabled(destination))?;

        let sequence = self.commit_local(caller, name);

        let message = RegistrationMessage::register(name, caller, sequence);
        let payload = encode_message(&message)?;
        let outcome = self.send_along(&route, payload).await;

        Ok(RegistrationReceipt {
            name: name.to_string(),
            owner: caller,
            sequence,
            sends: vec![outcome],
        })
    }

    fn enable_chain(
        &self,
        caller: Address,
        destination: ChainId,
        receiver: Address,
        gas_budget: u64,
    ) -> Result<(), NameServiceError> {
        invariant_admin_only(self.config.admin, caller)?;

        self.routes.write().upsert(Route {
            destination,
            receiver,
            gas_budget,
        });
        info!(
            "[ccns] enabled {} -> receiver {} (gas {})",
            destination,
            display_address(&receiver),
            gas_budget
        );
        Ok(())
    }

    fn is_chain_enabled(&self, destination: ChainId) -> bool {
        self.routes.read().is_enabled(destination)
    }

    fn lookup(&self, name: &str) -> Address {
        self.directory.get(name)
    }
}
