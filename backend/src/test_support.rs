//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests
//! or when the `test-support` feature is enabled.

mod clock;
mod fixtures;

pub use clock::MutableClock;
pub use fixtures::{
    ComplaintBuilder, demo_directory, demo_session, demo_user, seed_complaints, utc,
};
