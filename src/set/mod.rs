//! In-memory revocation set and its point queries.
//!
//! A [`CrlSet`] is immutable once constructed. Updates never mutate a live
//! set; the storage layer builds a replacement and the holder swaps the
//! shared reference, so concurrent readers need no locking.

mod types;

pub use types::{CheckResult, CrlEntry, CrlSet};

pub(crate) use types::trim_serial;
