//! Inbound adapters that translate user input into domain service calls
//! while keeping parsing and presentation at the edge.
//!
//! The command-line surface lives under [`cli`].

pub mod cli;
