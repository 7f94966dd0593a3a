//! Reference payloads: a well-formed command parameter map plus the
//! per-key metadata the mutation families work from.

use ciborium::value::Value;

/// One command parameter: its integer map key, a readable name for fault
/// descriptions, a correctly-typed example value, and whether the protocol
/// requires it.
#[derive(Debug, Clone)]
pub struct ParamEntry {
    pub key: i64,
    pub name: String,
    pub value: Value,
    pub required: bool,
}

/// A well-formed command parameter map, in wire key order.
///
/// Entry order is preserved, so every mutation family derives an identical
/// case sequence from the same reference.
#[derive(Debug, Clone, Default)]
pub struct ReferencePayload {
    entries: Vec<ParamEntry>,
}

impl ReferencePayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required parameter.
    #[must_use]
    pub fn required(mut self, key: i64, name: impl Into<String>, value: Value) -> Self {
        self.entries.push(ParamEntry {
            key,
            name: name.into(),
            value,
            required: true,
        });
        self
    }

    /// Append an optional parameter.
    #[must_use]
    pub fn optional(mut self, key: i64, name: impl Into<String>, value: Value) -> Self {
        self.entries.push(ParamEntry {
            key,
            name: name.into(),
            value,
            required: false,
        });
        self
    }

    /// Replace the example value for a key in place, keeping its metadata.
    /// Returns false when the key is absent.
    pub fn replace_value(&mut self, key: i64, value: Value) -> bool {
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => {
                entry.value = value;
                true
            }
            None => false,
        }
    }

    pub(crate) fn entries(&self) -> &[ParamEntry] {
        &self.entries
    }

    pub(crate) fn entry(&self, key: i64) -> Option<&ParamEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// The well-formed payload map.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Map(
            self.entries
                .iter()
                .map(|entry| (Value::Integer(entry.key.into()), entry.value.clone()))
                .collect(),
        )
    }

    /// The payload with one key's value replaced (or appended when absent).
    #[must_use]
    pub fn with_value(&self, key: i64, value: Value) -> Value {
        let mut pairs: Vec<(Value, Value)> = self
            .entries
            .iter()
            .map(|entry| {
                let entry_value = if entry.key == key {
                    value.clone()
                } else {
                    entry.value.clone()
                };
                (Value::Integer(entry.key.into()), entry_value)
            })
            .collect();
        if self.entry(key).is_none() {
            pairs.push((Value::Integer(key.into()), value));
        }
        Value::Map(pairs)
    }

    /// The payload with one key absent.
    #[must_use]
    pub fn without(&self, key: i64) -> Value {
        Value::Map(
            self.entries
                .iter()
                .filter(|entry| entry.key != key)
                .map(|entry| (Value::Integer(entry.key.into()), entry.value.clone()))
                .collect(),
        )
    }
}
