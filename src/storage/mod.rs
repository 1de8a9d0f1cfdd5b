//! Wire format for CRL sets
//!
//! This module owns the serialized representation and everything that
//! constructs a [`crate::set::CrlSet`] from bytes:
//! - Parsing a full set from its length-prefixed header plus binary body
//! - Classifying a blob as a full set or a delta update
//! - Applying a delta update against a base set
//! - Serializing a set back out for the next process start
//! - An update manager that publishes new sets by reference swap

mod delta;
mod header;
mod manager;
mod parser;
mod reader;
mod serializer;

pub use delta::apply_delta;
pub use manager::CrlSetManager;
pub use parser::{is_delta_update, parse};
pub use serializer::serialize;
