//! Compact certificate revocation database with binary delta updates
//!
//! A [`CrlSet`] summarizes revocation data from many issuers into a single
//! versioned blob: per-issuer lists of revoked serial numbers keyed by the
//! SHA-256 hash of the issuer's SubjectPublicKeyInfo, plus a global list of
//! blocked SPKI hashes.
//!
//! # Features
//! - Parsing and serializing the length-prefixed binary set format
//! - Delta updates applied against a sequence-numbered base set
//! - Lock-free concurrent revocation queries over immutable sets
//! - An update manager that publishes replacement sets by reference swap

pub mod error;
pub mod set;
pub mod storage;
pub mod telemetry;

pub use error::{CrlSetError, CrlSetResult};
pub use set::{CheckResult, CrlEntry, CrlSet};
pub use storage::{CrlSetManager, apply_delta, is_delta_update, parse, serialize};
