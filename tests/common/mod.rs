//! Shared utilities for changetrail integration tests
//!
//! Every test runs against a throwaway workspace with its own cache and config
//! homes, so persisted baselines never leak between tests.

pub mod assertions;
pub mod fixtures;
pub mod workspace;
