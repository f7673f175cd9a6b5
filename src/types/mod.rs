//! Type definitions for numex

mod error;

pub use error::*;

/// A schema-less record: an ordered string-to-JSON-value mapping.
///
/// The upstream fixes no schema, so records keep whatever fields they
/// arrive with; field order is preserved end to end so pass-through
/// columns land in the snapshot in upstream order.
pub type Record = serde_json::Map<String, serde_json::Value>;
