#![forbid(unsafe_code)]
//! webquota-core: shared types for the web storage quota allocator.
//!
//! This crate holds only the vocabulary: byte-size constants, the serializable
//! `QuotaConfig`, decision types, and the collaborator traits that the
//! allocator is constructed from. Nothing here touches the filesystem; the
//! real providers live in `webquota-io` and the policy in `webquota-alloc`.

pub mod config;
pub mod decision;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod units;

pub use config::{QuotaConfig, QuotaPolicy};
pub use decision::{QuotaDecision, QuotaOutcome};
pub use error::{Error, Result};
pub use provider::{CacheInfo, DiskInfo, NoopNotifier, OutOfSpaceNotifier, QuotaUpdater};
