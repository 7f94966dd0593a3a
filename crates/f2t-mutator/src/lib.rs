//! Deterministic single-fault mutation engine for CTAP2 command payloads.
//!
//! Given a well-formed reference payload, each family yields a finite,
//! ordered, restartable sequence of [`MutationCase`]s with one deliberate
//! fault per case. Generation is pure: no device interaction, identical
//! sequences on every invocation.
//!
//! Families:
//! 1. [`bad_parameter_types`]: wrong CBOR major types, top level plus a
//!    bounded two-level walk into arrays and their map elements
//! 2. [`missing_parameters`]: each required key absent once
//! 3. [`bad_inner_map_entries`]: wrong-typed entries in a nested map
//!    (optionally wrapped as a one-element array)
//! 4. [`bad_inner_array_elements`]: wrong-typed elements of a nested array
//! 5. [`depth_exhaustion`]: descriptor lists nested past the protocol's
//!    declared maximum depth

#![forbid(unsafe_code)]

mod engine;
mod reference;

pub use engine::{
    bad_inner_array_elements, bad_inner_map_entries, bad_parameter_types, depth_exhaustion,
    missing_parameters, MutationCase, MutationError, MAX_CBOR_NESTING_DEPTH,
};
pub use reference::{ParamEntry, ReferencePayload};
