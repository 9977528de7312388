//! # Cross-Chain Registration Flows
//!
//! Tests the complete registration choreography:
//!
//! ```text
//! [client] ──register──→ [RegisterService (source)]
//!                              │
//!                ┌─ local NameDirectory write (authoritative)
//!                └─ encode + send per enabled route
//!                              │
//!                        [LocalRelay]
//!                   at-least-once, unordered
//!                              │
//!                  [ReceiverService (destination)]
//!                 trust check → decode → sequence gate
//!                              │
//!                 destination NameDirectory write
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: source and destination lookups agree after delivery
//! 2. **Degenerate Routing**: no chains enabled, replaced routes
//! 3. **Transport Faults**: duplicates, reordering, rejected sends
//! 4. **Hostile Input**: untrusted origins

// =============================================================================
// TEST FIXTURES (only compiled during tests)
// =============================================================================

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use ccns_name_service::{
    Address, ApplyOutcome, ChainId, InMemoryNameDirectory, LocalRelay, NameRegistry,
    ReceiverConfig, ReceiverService, RegisterConfig, RegisterService, TrustedSender,
    ZERO_ADDRESS,
};

/// Opt-in log capture: `RUST_LOG=debug cargo test -p ccns-tests`.
#[cfg(test)]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Admin identity on the source network.
#[cfg(test)]
const ADMIN: Address = [0xAD; 20];

/// Register service address on the source network, as seen by the transport.
#[cfg(test)]
const REGISTER_ADDR: Address = [0x51; 20];

#[cfg(test)]
const ALICE: Address = [0xA1; 20];

#[cfg(test)]
const BOB: Address = [0xB0; 20];

#[cfg(test)]
const SOURCE_CHAIN: ChainId = ChainId(1);

#[cfg(test)]
const DEST_CHAIN: ChainId = ChainId(2);

#[cfg(test)]
const DEST_CHAIN_2: ChainId = ChainId(3);

/// One destination network: receiver service plus its directory.
#[cfg(test)]
struct DestinationNetwork {
    address: Address,
    receiver: Arc<ReceiverService>,
}

#[cfg(test)]
fn destination_network(
    relay: &LocalRelay,
    chain: ChainId,
    address: Address,
) -> DestinationNetwork {
    let directory = Arc::new(InMemoryNameDirectory::new());
    let receiver = Arc::new(ReceiverService::new(
        ReceiverConfig {
            local_chain: chain,
            trusted: TrustedSender::new(SOURCE_CHAIN, REGISTER_ADDR),
        },
        directory,
    ));
    relay.register_receiver(chain, address, receiver.clone());
    DestinationNetwork { address, receiver }
}

/// Source network: register service wired to the relay.
#[cfg(test)]
fn source_network(relay: Arc<LocalRelay>) -> RegisterService {
    RegisterService::new(
        RegisterConfig {
            admin: ADMIN,
            local_chain: SOURCE_CHAIN,
        },
        Arc::new(InMemoryNameDirectory::new()),
        relay,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registration_resolves_on_both_chains() {
        init_logging();
        let relay = Arc::new(LocalRelay::new(SOURCE_CHAIN, REGISTER_ADDR));
        let register = source_network(relay.clone());
        let dest = destination_network(&relay, DEST_CHAIN, [0xD1; 20]);

        register
            .enable_chain(ADMIN, DEST_CHAIN, dest.address, 500_000)
            .unwrap();

        let receipt = register.register(ALICE, "alice.ccns").await.unwrap();
        assert!(receipt.all_sent());

        // Source is authoritative: visible before any delivery.
        assert_eq!(register.lookup("alice.ccns"), ALICE);
        assert_eq!(dest.receiver.lookup("alice.ccns"), ZERO_ADDRESS);

        let reports = relay.deliver_all().await;
        assert_eq!(reports.len(), 1);
        assert!(matches!(reports[0].outcome, Ok(ApplyOutcome::Applied)));

        // Destination converged to the source value at registration time.
        assert_eq!(dest.receiver.lookup("alice.ccns"), ALICE);
    }

    #[tokio::test]
    async fn test_no_chains_enabled_registers_locally_only() {
        let relay = Arc::new(LocalRelay::new(SOURCE_CHAIN, REGISTER_ADDR));
        let register = source_network(relay.clone());

        let receipt = register.register(BOB, "bob.ccns").await.unwrap();

        assert_eq!(register.lookup("bob.ccns"), BOB);
        assert!(receipt.sends.is_empty());
        assert_eq!(relay.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_delivery_converges_once() {
        let relay = Arc::new(LocalRelay::new(SOURCE_CHAIN, REGISTER_ADDR));
        let register = source_network(relay.clone());
        let dest = destination_network(&relay, DEST_CHAIN, [0xD1; 20]);
        register
            .enable_chain(ADMIN, DEST_CHAIN, dest.address, 500_000)
            .unwrap();

        register.register(ALICE, "alice.ccns").await.unwrap();

        // At-least-once: the transport may deliver the same message twice.
        relay.duplicate_pending();
        let reports = relay.deliver_all().await;

        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert!(matches!(report.outcome, Ok(ApplyOutcome::Applied)));
        }
        assert_eq!(dest.receiver.lookup("alice.ccns"), ALICE);
    }

    #[tokio::test]
    async fn test_reordered_delivery_keeps_latest_owner() {
        let relay = Arc::new(LocalRelay::new(SOURCE_CHAIN, REGISTER_ADDR));
        let register = source_network(relay.clone());
        let dest = destination_network(&relay, DEST_CHAIN, [0xD1; 20]);
        register
            .enable_chain(ADMIN, DEST_CHAIN, dest.address, 500_000)
            .unwrap();

        register.register(ALICE, "alice.ccns").await.unwrap();
        register.register(BOB, "alice.ccns").await.unwrap();
        assert_eq!(register.lookup("alice.ccns"), BOB);

        // No ordering guarantee: the newer registration lands first.
        relay.reverse_pending();
        let reports = relay.deliver_all().await;

        assert!(matches!(reports[0].outcome, Ok(ApplyOutcome::Applied)));
        assert!(matches!(
            reports[1].outcome,
            Ok(ApplyOutcome::StaleSequence)
        ));
        assert_eq!(dest.receiver.lookup("alice.ccns"), BOB);
    }

    #[tokio::test]
    async fn test_untrusted_origin_never_mutates_directory() {
        let relay = Arc::new(LocalRelay::new(SOURCE_CHAIN, REGISTER_ADDR));
        let register = source_network(relay.clone());
        let dest = destination_network(&relay, DEST_CHAIN, [0xD1; 20]);
        register
            .enable_chain(ADMIN, DEST_CHAIN, dest.address, 500_000)
            .unwrap();

        // A relay speaking for a different sender, carrying a well-formed
        // payload the receiver would otherwise accept.
        let hostile = Arc::new(LocalRelay::new(SOURCE_CHAIN, [0x66; 20]));
        hostile.register_receiver(DEST_CHAIN, dest.address, dest.receiver.clone());

        let payload = ccns_name_service::encode_message(
            &ccns_name_service::RegistrationMessage::register("alice.ccns", BOB, 9),
        )
        .unwrap();
        use ccns_name_service::MessageTransport;
        hostile
            .send(DEST_CHAIN, dest.address, payload, 500_000)
            .await
            .unwrap();

        let reports = hostile.deliver_all().await;
        assert!(reports[0].outcome.is_err());
        assert_eq!(dest.receiver.lookup("alice.ccns"), ZERO_ADDRESS);

        // The legitimate path still works afterwards.
        register.register(ALICE, "alice.ccns").await.unwrap();
        relay.deliver_all().await;
        assert_eq!(dest.receiver.lookup("alice.ccns"), ALICE);
    }

    #[tokio::test]
    async fn test_route_replacement_redirects_to_new_receiver() {
        let relay = Arc::new(LocalRelay::new(SOURCE_CHAIN, REGISTER_ADDR));
        let register = source_network(relay.clone());
        let old = destination_network(&relay, DEST_CHAIN, [0xD1; 20]);
        let new = destination_network(&relay, DEST_CHAIN, [0xD2; 20]);

        register
            .enable_chain(ADMIN, DEST_CHAIN, old.address, 500_000)
            .unwrap();
        register
            .enable_chain(ADMIN, DEST_CHAIN, new.address, 900_000)
            .unwrap();

        register.register(ALICE, "alice.ccns").await.unwrap();
        relay.deliver_all().await;

        assert_eq!(new.receiver.lookup("alice.ccns"), ALICE);
        assert_eq!(old.receiver.lookup("alice.ccns"), ZERO_ADDRESS);
    }

    #[tokio::test]
    async fn test_partial_fanout_failure_is_observable() {
        let relay = Arc::new(LocalRelay::new(SOURCE_CHAIN, REGISTER_ADDR));
        let register = source_network(relay.clone());
        let healthy = destination_network(&relay, DEST_CHAIN, [0xD1; 20]);
        let broken = destination_network(&relay, DEST_CHAIN_2, [0xD2; 20]);

        register
            .enable_chain(ADMIN, DEST_CHAIN, healthy.address, 500_000)
            .unwrap();
        register
            .enable_chain(ADMIN, DEST_CHAIN_2, broken.address, 500_000)
            .unwrap();
        relay.fail_destination(DEST_CHAIN_2);

        let receipt = register.register(ALICE, "alice.ccns").await.unwrap();

        // Local commit survives the partial failure; the receipt names it.
        assert_eq!(register.lookup("alice.ccns"), ALICE);
        assert!(!receipt.all_sent());
        assert_eq!(receipt.failed_destinations(), vec![DEST_CHAIN_2]);

        relay.deliver_all().await;
        assert_eq!(healthy.receiver.lookup("alice.ccns"), ALICE);
        assert_eq!(broken.receiver.lookup("alice.ccns"), ZERO_ADDRESS);
    }

    #[tokio::test]
    async fn test_two_destinations_converge_with_source() {
        let relay = Arc::new(LocalRelay::new(SOURCE_CHAIN, REGISTER_ADDR));
        let register = source_network(relay.clone());
        let first = destination_network(&relay, DEST_CHAIN, [0xD1; 20]);
        let second = destination_network(&relay, DEST_CHAIN_2, [0xD2; 20]);

        register
            .enable_chain(ADMIN, DEST_CHAIN, first.address, 500_000)
            .unwrap();
        register
            .enable_chain(ADMIN, DEST_CHAIN_2, second.address, 400_000)
            .unwrap();

        register.register(ALICE, "alice.ccns").await.unwrap();
        register.register(BOB, "bob.ccns").await.unwrap();
        relay.deliver_all().await;

        for name_owner in [("alice.ccns", ALICE), ("bob.ccns", BOB)] {
            assert_eq!(register.lookup(name_owner.0), name_owner.1);
            assert_eq!(first.receiver.lookup(name_owner.0), name_owner.1);
            assert_eq!(second.receiver.lookup(name_owner.0), name_owner.1);
        }
    }
}
