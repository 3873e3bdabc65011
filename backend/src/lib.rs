//! Campus complaint management: domain, adapters and configuration.
//!
//! The domain module owns the complaint workflow and the ports it needs.
//! Outbound adapters persist state in a key-value store; the inbound CLI
//! drives the services from the `cms` binary.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
