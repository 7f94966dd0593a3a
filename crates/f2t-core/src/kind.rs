//! CBOR major-type classification.
//!
//! The mutation engine guarantees that a substituted value never shares the
//! major type of the value it replaces. For that purpose unsigned and
//! negative integers are one family (an authenticator that type-checks its
//! input treats both as "integer"), and booleans, null and floats all fall
//! under the simple-value major type.

use ciborium::value::Value;

/// Coarse CBOR major-type family of a tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorKind {
    Integer,
    ByteString,
    TextString,
    Array,
    Map,
    Tag,
    Simple,
}

/// Classify a value into its major-type family.
#[must_use]
pub fn major_kind(value: &Value) -> MajorKind {
    match value {
        Value::Integer(_) => MajorKind::Integer,
        Value::Bytes(_) => MajorKind::ByteString,
        Value::Text(_) => MajorKind::TextString,
        Value::Array(_) => MajorKind::Array,
        Value::Map(_) => MajorKind::Map,
        Value::Tag(..) => MajorKind::Tag,
        // Bool, Null, Float and any future simple values.
        _ => MajorKind::Simple,
    }
}
