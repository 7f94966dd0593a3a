//! The five mutation families.
//!
//! Every generator is a pure function of its reference structure: same
//! input, same ordered case sequence, no I/O. Families that take explicit
//! shape hints fail fast on misuse instead of yielding an empty sequence.

use ciborium::value::Value;
use f2t_core::{major_kind, MajorKind};
use thiserror::Error;

use crate::reference::ReferencePayload;

/// Protocol-declared maximum nesting depth for command payloads.
pub const MAX_CBOR_NESTING_DEPTH: usize = 4;

/// One deliberately malformed payload plus the fault description used
/// verbatim as its test label.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationCase {
    pub payload: Value,
    pub description: String,
}

/// Malformed reference structure or shape hint handed to a generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("parameter key {0} is not present in the reference payload")]
    UnknownKey(i64),

    #[error("parameter key {0} does not hold an array")]
    NotAnArray(i64),

    #[error("array at parameter key {0} is empty")]
    EmptyArray(i64),

    #[error("inner map reference is empty")]
    EmptyInnerMap,
}

/// Fixed substitution catalog: one example value per CBOR shape, in a fixed
/// order so case sequences are reproducible.
fn wrong_type_catalog() -> Vec<(&'static str, Value)> {
    vec![
        ("unsigned integer", Value::Integer(0x42.into())),
        ("negative integer", Value::Integer((-99).into())),
        ("byte string", Value::Bytes(vec![0x42, 0x42, 0x42])),
        ("text string", Value::Text("wrong type".to_owned())),
        ("array", Value::Array(vec![Value::Integer(0x42.into())])),
        (
            "map",
            Value::Map(vec![(
                Value::Integer(0x42.into()),
                Value::Integer(0x42.into()),
            )]),
        ),
        ("boolean", Value::Bool(true)),
        ("null", Value::Null),
    ]
}

/// Catalog members whose major type differs from `original`.
fn substitutes_for(original: &Value) -> Vec<(&'static str, Value)> {
    let kind = major_kind(original);
    wrong_type_catalog()
        .into_iter()
        .filter(|(_, substitute)| major_kind(substitute) != kind)
        .collect()
}

/// First catalog member whose major type differs from `original`.
fn first_substitute(original: &Value) -> (&'static str, Value) {
    substitutes_for(original)
        .into_iter()
        .next()
        .unwrap_or(("null", Value::Null))
}

/// Inner map keys are text for WebAuthn structures and integers for
/// ClientPin-style sub-maps; render both readably.
fn key_display(key: &Value) -> String {
    match key {
        Value::Text(text) => text.clone(),
        Value::Integer(integer) => i128::from(*integer).to_string(),
        other => format!("{other:?}"),
    }
}

fn array_with(items: &[Value], index: usize, value: Value) -> Value {
    let mut items = items.to_vec();
    items[index] = value;
    Value::Array(items)
}

fn map_with(pairs: &[(Value, Value)], index: usize, value: Value) -> Value {
    let mut pairs = pairs.to_vec();
    pairs[index].1 = value;
    Value::Map(pairs)
}

/// Family 1: wrong payload and parameter types.
///
/// Replaces the whole payload with every non-map catalog shape, then every
/// top-level value, then the first element of every array-valued parameter
/// (arrays are assumed homogeneous), and, when that first element is a map,
/// its entries. The walk is bounded to exactly these levels.
#[must_use]
pub fn bad_parameter_types(reference: &ReferencePayload) -> Vec<MutationCase> {
    let mut cases = Vec::new();

    for (type_name, substitute) in wrong_type_catalog() {
        if major_kind(&substitute) == MajorKind::Map {
            continue;
        }
        cases.push(MutationCase {
            payload: substitute,
            description: format!("bad parameter type: payload as {type_name}"),
        });
    }

    for entry in reference.entries() {
        for (type_name, substitute) in substitutes_for(&entry.value) {
            cases.push(MutationCase {
                payload: reference.with_value(entry.key, substitute),
                description: format!(
                    "bad parameter type: {} (key {}) as {type_name}",
                    entry.name, entry.key
                ),
            });
        }

        let Value::Array(items) = &entry.value else {
            continue;
        };
        let Some(first) = items.first() else {
            continue;
        };
        for (type_name, substitute) in substitutes_for(first) {
            cases.push(MutationCase {
                payload: reference.with_value(entry.key, array_with(items, 0, substitute)),
                description: format!(
                    "bad parameter type: {} (key {})[0] as {type_name}",
                    entry.name, entry.key
                ),
            });
        }

        let Value::Map(inner) = first else {
            continue;
        };
        for (index, (inner_key, inner_value)) in inner.iter().enumerate() {
            for (type_name, substitute) in substitutes_for(inner_value) {
                let mutated_first = map_with(inner, index, substitute);
                cases.push(MutationCase {
                    payload: reference.with_value(entry.key, array_with(items, 0, mutated_first)),
                    description: format!(
                        "bad parameter type: {} (key {})[0].{} as {type_name}",
                        entry.name,
                        entry.key,
                        key_display(inner_key)
                    ),
                });
            }
        }
    }

    cases
}

/// Family 2: one case per required parameter, with exactly that key absent.
#[must_use]
pub fn missing_parameters(reference: &ReferencePayload) -> Vec<MutationCase> {
    reference
        .entries()
        .iter()
        .filter(|entry| entry.required)
        .map(|entry| MutationCase {
            payload: reference.without(entry.key),
            description: format!(
                "missing required parameter: {} (key {})",
                entry.name, entry.key
            ),
        })
        .collect()
}

/// Family 3: wrong-typed entries inside a map-valued parameter.
///
/// `inner_map` is the caller's reference for the map stored under
/// `outer_key`. With `wrap_in_array` the mutated map is used as the sole
/// element of an array instead, covering map-inside-list payload shapes.
///
/// # Errors
/// Fails fast on an unknown outer key or an empty inner map.
pub fn bad_inner_map_entries(
    reference: &ReferencePayload,
    outer_key: i64,
    inner_map: &[(Value, Value)],
    wrap_in_array: bool,
) -> Result<Vec<MutationCase>, MutationError> {
    let entry = reference
        .entry(outer_key)
        .ok_or(MutationError::UnknownKey(outer_key))?;
    if inner_map.is_empty() {
        return Err(MutationError::EmptyInnerMap);
    }

    let element = if wrap_in_array { "[0]" } else { "" };
    let cases = inner_map
        .iter()
        .enumerate()
        .map(|(index, (inner_key, inner_value))| {
            let (type_name, substitute) = first_substitute(inner_value);
            let mutated = map_with(inner_map, index, substitute);
            let outer_value = if wrap_in_array {
                Value::Array(vec![mutated])
            } else {
                mutated
            };
            MutationCase {
                payload: reference.with_value(outer_key, outer_value),
                description: format!(
                    "bad inner map entry: {} (key {outer_key}){element}.{} as {type_name}",
                    entry.name,
                    key_display(inner_key)
                ),
            }
        })
        .collect();
    Ok(cases)
}

/// Family 4: wrong-typed elements inside an array-valued parameter, one
/// case per element position.
///
/// # Errors
/// Fails fast when the key is unknown, not an array, or empty.
pub fn bad_inner_array_elements(
    reference: &ReferencePayload,
    outer_key: i64,
) -> Result<Vec<MutationCase>, MutationError> {
    let entry = reference
        .entry(outer_key)
        .ok_or(MutationError::UnknownKey(outer_key))?;
    let Value::Array(items) = &entry.value else {
        return Err(MutationError::NotAnArray(outer_key));
    };
    if items.is_empty() {
        return Err(MutationError::EmptyArray(outer_key));
    }

    let cases = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let (type_name, substitute) = first_substitute(item);
            MutationCase {
                payload: reference.with_value(outer_key, array_with(items, index, substitute)),
                description: format!(
                    "bad inner array element: {} (key {outer_key})[{index}] as {type_name}",
                    entry.name
                ),
            }
        })
        .collect();
    Ok(cases)
}

fn nested_arrays(depth: usize) -> Value {
    let mut value = Value::Text("usb".to_owned());
    for _ in 0..depth {
        value = Value::Array(vec![value]);
    }
    value
}

fn nested_maps(depth: usize) -> Value {
    let mut value = Value::Text("usb".to_owned());
    for _ in 0..depth {
        value = Value::Map(vec![(Value::Integer(0.into()), value)]);
    }
    value
}

fn descriptor_with_transports(credential_id: &[u8], transports_item: Value) -> Value {
    Value::Map(vec![
        (
            Value::Text("type".to_owned()),
            Value::Text("public-key".to_owned()),
        ),
        (
            Value::Text("id".to_owned()),
            Value::Bytes(credential_id.to_vec()),
        ),
        (
            Value::Text("transports".to_owned()),
            Value::Array(vec![transports_item]),
        ),
    ])
}

/// Family 5: a credential-descriptor list whose nested `transports` entry
/// exceeds the declared maximum nesting depth.
///
/// Devices must ignore unknown transport strings, so only container shapes
/// can push the depth past the limit; one case nests arrays, one nests
/// maps. No particular status is required of the device, it only must not
/// crash or hang.
///
/// # Errors
/// Fails fast when `outer_key` is not in the reference payload.
pub fn depth_exhaustion(
    reference: &ReferencePayload,
    outer_key: i64,
    credential_id: &[u8],
) -> Result<Vec<MutationCase>, MutationError> {
    let entry = reference
        .entry(outer_key)
        .ok_or(MutationError::UnknownKey(outer_key))?;
    let depth = MAX_CBOR_NESTING_DEPTH + 1;

    let cases = [
        ("nested arrays", nested_arrays(depth)),
        ("nested maps", nested_maps(depth)),
    ]
    .into_iter()
    .map(|(shape, transports_item)| {
        let descriptor = descriptor_with_transports(credential_id, transports_item);
        MutationCase {
            payload: reference.with_value(outer_key, Value::Array(vec![descriptor])),
            description: format!(
                "nesting depth exceeded: {} (key {outer_key})[0].transports via {shape}",
                entry.name
            ),
        }
    })
    .collect();
    Ok(cases)
}
