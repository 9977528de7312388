//! # CrossName Test Suite
//!
//! Unified test crate for cross-network choreography.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Source-to-destination registration flows
//!     └── cross_chain_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ccns-tests
//!
//! # By category
//! cargo test -p ccns-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
