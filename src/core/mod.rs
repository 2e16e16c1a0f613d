//! Core library components.
//!
//! Business logic for vault provisioning, secrets and blob upload. Remote
//! services sit behind traits with an `az` and an in-memory implementation.

pub mod az;
pub mod config;
pub mod constants;
pub mod convert;
pub mod domain;
#[cfg(any(test, feature = "test-memory"))]
pub mod memory;
pub mod naming;
pub mod secrets;
pub mod storage;
pub mod validation;
pub mod vault;
