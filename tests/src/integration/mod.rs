//! Cross-network integration flows.

pub mod cross_chain_flows;
