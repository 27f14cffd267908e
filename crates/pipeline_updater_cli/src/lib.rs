//! Pipeline updater CLI library exports for integration testing.
//!
//! This module exposes configuration loading, token lookup and the rollout entry point.

pub mod config;
pub mod credentials;
pub mod errors;
pub mod updater;
