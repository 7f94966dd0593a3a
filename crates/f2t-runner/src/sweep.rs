//! Per-command mutation sweeps.
//!
//! One case at a time: generate, encode, send, evaluate through the
//! tracker. Conformance violations never stop a sweep; only transport
//! faults and generator misuse abort, leaving already-recorded checks in
//! place for the final report.

use ciborium::value::Value;
use f2t_core::{Command, CommandState, DeviceInterface, Status, TransportError};
use f2t_mutator::{
    bad_inner_array_elements, bad_inner_map_entries, bad_parameter_types, depth_exhaustion,
    missing_parameters, MutationCase, MutationError, ReferencePayload,
};
use f2t_tracker::DeviceTracker;
use thiserror::Error;

/// Run-aborting sweep failure.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("failed to encode mutated payload: {0}")]
    Encode(String),
}

/// A nested map target for the bad-inner-map-entry family.
#[derive(Debug, Clone)]
pub struct InnerMapTarget {
    /// Outer parameter key holding the map.
    pub outer_key: i64,
    /// Reference inner map (correctly typed).
    pub entries: Vec<(Value, Value)>,
    /// Use the mutated map as the sole element of an array instead.
    pub wrap_in_array: bool,
}

/// Everything the runner needs to sweep one command.
#[derive(Debug, Clone)]
pub struct CommandUnderTest {
    pub command: Command,
    pub reference: ReferencePayload,
    /// Targets for the bad-inner-map-entry family.
    pub inner_maps: Vec<InnerMapTarget>,
    /// Parameter keys holding arrays, for the bad-inner-array-element family.
    pub array_keys: Vec<i64>,
    /// Parameter keys holding credential-descriptor lists, for the
    /// depth-exhaustion family. The bytes are an example credential id.
    pub descriptor_lists: Vec<(i64, Vec<u8>)>,
    /// Parameter key of pinUvAuthParam when the command needs authorization.
    pub auth_key: Option<i64>,
}

impl CommandUnderTest {
    /// A command with no nested-shape targets.
    #[must_use]
    pub fn new(command: Command, reference: ReferencePayload) -> Self {
        Self {
            command,
            reference,
            inner_maps: Vec::new(),
            array_keys: Vec::new(),
            descriptor_lists: Vec::new(),
            auth_key: None,
        }
    }
}

/// Every case [`run_command`] would send for this command, in the same
/// order, without touching a device. Used for offline corpus generation.
///
/// # Errors
/// Fails fast on a shape hint that does not match the reference payload.
pub fn generate_cases(cut: &CommandUnderTest) -> Result<Vec<MutationCase>, MutationError> {
    let mut cases = bad_parameter_types(&cut.reference);
    cases.extend(missing_parameters(&cut.reference));
    for target in &cut.inner_maps {
        cases.extend(bad_inner_map_entries(
            &cut.reference,
            target.outer_key,
            &target.entries,
            target.wrap_in_array,
        )?);
    }
    for &key in &cut.array_keys {
        cases.extend(bad_inner_array_elements(&cut.reference, key)?);
    }
    for (key, credential_id) in &cut.descriptor_lists {
        cases.extend(depth_exhaustion(&cut.reference, *key, credential_id)?);
    }
    Ok(cases)
}

fn encode(payload: &Value) -> Result<Vec<u8>, SweepError> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(payload, &mut bytes)
        .map_err(|err| SweepError::Encode(err.to_string()))?;
    Ok(bytes)
}

/// Send every case and compare the returned status against `expected`,
/// recording one check per case under the case's fault description.
fn sweep_cases(
    device: &mut dyn DeviceInterface,
    tracker: &mut DeviceTracker,
    command: Command,
    expected: Status,
    cases: &[MutationCase],
) -> Result<(), SweepError> {
    for case in cases {
        let bytes = encode(&case.payload)?;
        let outcome = device.send(command, &bytes)?;
        tracker.check_and_report_status(expected, outcome.status(), &case.description);
    }
    Ok(())
}

/// Family 1 sweep: wrong payload and parameter types.
///
/// # Errors
/// Aborts on transport failure.
pub fn run_bad_parameter_types(
    device: &mut dyn DeviceInterface,
    tracker: &mut DeviceTracker,
    cut: &CommandUnderTest,
) -> Result<(), SweepError> {
    let cases = bad_parameter_types(&cut.reference);
    tracing::info!(command = %cut.command, cases = cases.len(), "bad parameter type sweep");
    sweep_cases(
        device,
        tracker,
        cut.command,
        Status::ErrCborUnexpectedType,
        &cases,
    )
}

/// Family 2 sweep: each required parameter absent once.
///
/// # Errors
/// Aborts on transport failure.
pub fn run_missing_parameters(
    device: &mut dyn DeviceInterface,
    tracker: &mut DeviceTracker,
    cut: &CommandUnderTest,
) -> Result<(), SweepError> {
    let cases = missing_parameters(&cut.reference);
    tracing::info!(command = %cut.command, cases = cases.len(), "missing parameter sweep");
    sweep_cases(
        device,
        tracker,
        cut.command,
        Status::ErrMissingParameter,
        &cases,
    )
}

/// Family 3/4 sweeps over the command's declared nested targets.
///
/// # Errors
/// Aborts on transport failure or a shape hint that does not match the
/// reference payload.
pub fn run_nested_parameter_types(
    device: &mut dyn DeviceInterface,
    tracker: &mut DeviceTracker,
    cut: &CommandUnderTest,
) -> Result<(), SweepError> {
    for target in &cut.inner_maps {
        let cases = bad_inner_map_entries(
            &cut.reference,
            target.outer_key,
            &target.entries,
            target.wrap_in_array,
        )?;
        tracing::info!(
            command = %cut.command,
            key = target.outer_key,
            cases = cases.len(),
            "bad inner map entry sweep"
        );
        sweep_cases(
            device,
            tracker,
            cut.command,
            Status::ErrCborUnexpectedType,
            &cases,
        )?;
    }
    for &key in &cut.array_keys {
        let cases = bad_inner_array_elements(&cut.reference, key)?;
        tracing::info!(
            command = %cut.command,
            key,
            cases = cases.len(),
            "bad inner array element sweep"
        );
        sweep_cases(
            device,
            tracker,
            cut.command,
            Status::ErrCborUnexpectedType,
            &cases,
        )?;
    }
    Ok(())
}

/// Family 5 sweep: over-deep descriptor lists.
///
/// No particular status is required: the check passes once the device
/// answers at all. An outright acceptance is still worth a note in the
/// findings.
///
/// # Errors
/// Aborts on transport failure or an unknown descriptor-list key.
pub fn run_depth_exhaustion(
    device: &mut dyn DeviceInterface,
    tracker: &mut DeviceTracker,
    cut: &CommandUnderTest,
) -> Result<(), SweepError> {
    for (key, credential_id) in &cut.descriptor_lists {
        let cases = depth_exhaustion(&cut.reference, *key, credential_id)?;
        tracing::info!(
            command = %cut.command,
            key,
            cases = cases.len(),
            "depth exhaustion sweep"
        );
        for case in &cases {
            let bytes = encode(&case.payload)?;
            let outcome = device.send(cut.command, &bytes)?;
            if outcome.is_success() {
                tracker.add_observation(format!(
                    "{} accepted a payload past the maximum nesting depth ({})",
                    cut.command, case.description
                ));
            }
            tracker.check_and_report(true, &case.description);
        }
    }
    Ok(())
}

/// All applicable families for one command, in a fixed order.
///
/// When the command needs authorization and a [`CommandState`] is supplied,
/// a fresh auth token is patched into the reference payload first, so
/// rejections exercise the mutated parameter rather than a stale token.
///
/// # Errors
/// Aborts the remaining cases for this command on transport failure or
/// generator misuse; checks recorded so far stay in the tracker.
pub fn run_command(
    device: &mut dyn DeviceInterface,
    state: Option<&mut dyn CommandState>,
    tracker: &mut DeviceTracker,
    cut: &CommandUnderTest,
) -> Result<(), SweepError> {
    let mut cut = cut.clone();
    if let (Some(auth_key), Some(state)) = (cut.auth_key, state) {
        let token = state.auth_token(device)?;
        cut.reference.replace_value(auth_key, Value::Bytes(token));
    }

    run_bad_parameter_types(device, tracker, &cut)?;
    run_missing_parameters(device, tracker, &cut)?;
    run_nested_parameter_types(device, tracker, &cut)?;
    run_depth_exhaustion(device, tracker, &cut)?;
    Ok(())
}
