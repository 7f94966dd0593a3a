//! Runner behavior against a scripted device.

use ciborium::value::Value;
use f2t_core::{Command, Outcome, Status, TransportError};
use f2t_mutator::ReferencePayload;
use f2t_runner::{discover, run_command, CommandUnderTest, DiscoveryError, InnerMapTarget};
use f2t_testkit::{init_test_tracing, ScriptedDevice, SharedBuffer, StaticCommandState};
use f2t_tracker::{DeviceTracker, PlainSink};

fn plain_tracker() -> (DeviceTracker, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let tracker = DeviceTracker::with_sink(Box::new(PlainSink::new(buffer.clone())));
    (tracker, buffer)
}

fn get_info_response() -> Value {
    Value::Map(vec![
        (
            Value::Integer(1.into()),
            Value::Array(vec![Value::Text("FIDO_2_0".to_owned())]),
        ),
        (
            Value::Integer(2.into()),
            Value::Array(vec![Value::Text("hmac-secret".to_owned())]),
        ),
        (Value::Integer(3.into()), Value::Bytes(vec![0xA6; 16])),
        (
            Value::Integer(4.into()),
            Value::Map(vec![
                (Value::Text("rk".to_owned()), Value::Bool(true)),
                (Value::Text("clientPin".to_owned()), Value::Bool(false)),
            ]),
        ),
    ])
}

fn make_credential_cut() -> CommandUnderTest {
    let reference = ReferencePayload::new()
        .required(1, "clientDataHash", Value::Bytes(vec![0xC1; 32]))
        .required(
            2,
            "rp",
            Value::Map(vec![(
                Value::Text("id".to_owned()),
                Value::Text("example.com".to_owned()),
            )]),
        )
        .optional(
            5,
            "excludeList",
            Value::Array(vec![Value::Map(vec![(
                Value::Text("id".to_owned()),
                Value::Bytes(vec![0x1D; 16]),
            )])]),
        );
    let mut cut = CommandUnderTest::new(Command::MakeCredential, reference);
    cut.inner_maps = vec![InnerMapTarget {
        outer_key: 2,
        entries: vec![(Value::Text("id".to_owned()), Value::Text("x".to_owned()))],
        wrap_in_array: false,
    }];
    cut.array_keys = vec![5];
    cut.descriptor_lists = vec![(5, vec![0x1D; 16])];
    cut
}

#[test]
fn discovery_populates_the_tracker() {
    init_test_tracing();
    let mut device = ScriptedDevice::new(Status::ErrOther);
    device.push_outcome(Outcome::Value(get_info_response()));
    let (mut tracker, _buffer) = plain_tracker();

    discover(&mut device, &mut tracker).expect("discovery succeeds");
    assert!(tracker.has_version("FIDO_2_0"));
    assert!(tracker.has_extension("hmac-secret"));
    assert!(tracker.has_option("rk"));
    // clientPin is runtime mutable, presence wins over the false flag.
    assert!(tracker.has_option("clientPin"));
    assert_eq!(device.sent[0], (Command::GetInfo, Vec::new()));
}

#[test]
fn discovery_rejects_malformed_responses() {
    let mut device = ScriptedDevice::new(Status::ErrOther);
    device.push_outcome(Outcome::Value(Value::Text("nope".to_owned())));
    let (mut tracker, _buffer) = plain_tracker();
    assert_eq!(
        discover(&mut device, &mut tracker),
        Err(DiscoveryError::NotAMap)
    );

    let mut device = ScriptedDevice::new(Status::ErrOther);
    device.push_status(Status::ErrInvalidCommand);
    let (mut tracker, _buffer) = plain_tracker();
    assert_eq!(
        discover(&mut device, &mut tracker),
        Err(DiscoveryError::Rejected(Status::ErrInvalidCommand))
    );
}

#[test]
fn rejecting_device_passes_every_check() {
    init_test_tracing();
    let mut device = ScriptedDevice::new(Status::ErrCborUnexpectedType);
    let (mut tracker, _buffer) = plain_tracker();
    let cut = make_credential_cut();

    run_command(&mut device, None, &mut tracker, &cut).expect("sweep completes");

    let report = tracker.results_json("c0", "2020-01-01");
    // The missing-parameter family expects CTAP2_ERR_MISSING_PARAMETER and
    // sees CTAP2_ERR_CBOR_UNEXPECTED_TYPE: still a pass (both failures),
    // surfaced as informational warnings rather than failed tests.
    assert_eq!(report.passed_test_count, report.total_test_count);
    assert!(report.failed_tests.is_empty());
    assert!(report.total_test_count > 0);
    assert_eq!(device.exchanges(), report.total_test_count);
}

#[test]
fn accepting_device_fails_the_negative_checks() {
    let mut device = ScriptedDevice::new(Status::Ok);
    let (mut tracker, _buffer) = plain_tracker();
    let cut = make_credential_cut();

    run_command(&mut device, None, &mut tracker, &cut).expect("sweep completes");

    let report = tracker.results_json("c0", "2020-01-01");
    // Depth-exhaustion checks pass as long as the device answers; all
    // type/missing checks fail because success was returned.
    assert_eq!(report.passed_test_count, 2);
    assert_eq!(
        report.failed_tests.len(),
        report.total_test_count - report.passed_test_count
    );
    // And the acceptance of over-deep input is called out.
    assert_eq!(report.observations.len(), 2);
    assert!(report.observations[0].contains("maximum nesting depth"));
}

#[test]
fn transport_error_aborts_but_keeps_recorded_checks() {
    let mut device = ScriptedDevice::new(Status::ErrCborUnexpectedType);
    device
        .push_status(Status::ErrCborUnexpectedType)
        .push_status(Status::ErrCborUnexpectedType)
        .push_transport_error(TransportError::Timeout);
    let (mut tracker, _buffer) = plain_tracker();
    let cut = make_credential_cut();

    let result = run_command(&mut device, None, &mut tracker, &cut);
    assert!(matches!(
        result,
        Err(f2t_runner::SweepError::Transport(TransportError::Timeout))
    ));
    let report = tracker.results_json("c0", "2020-01-01");
    assert_eq!(report.total_test_count, 2);
    assert_eq!(report.passed_test_count, 2);
}

#[test]
fn generate_cases_matches_the_run_order() {
    let cut = make_credential_cut();
    let cases = f2t_runner::generate_cases(&cut).expect("valid cut");
    let mut device = ScriptedDevice::new(Status::ErrCborUnexpectedType);
    let (mut tracker, _buffer) = plain_tracker();
    run_command(&mut device, None, &mut tracker, &cut).expect("sweep completes");
    assert_eq!(cases.len(), device.exchanges());
    // Same generators, same order: regenerating yields the same sequence.
    assert_eq!(cases, f2t_runner::generate_cases(&cut).expect("valid cut"));
}

#[test]
fn auth_token_is_refreshed_into_the_reference() {
    let token = vec![0x5A; 8];
    let mut state = StaticCommandState::new(token.clone());
    let mut device = ScriptedDevice::new(Status::ErrCborUnexpectedType);
    let (mut tracker, _buffer) = plain_tracker();

    let reference = ReferencePayload::new()
        .required(1, "clientDataHash", Value::Bytes(vec![0xC1; 32]))
        .required(8, "pinUvAuthParam", Value::Bytes(vec![0x00; 8]));
    let mut cut = CommandUnderTest::new(Command::MakeCredential, reference);
    cut.auth_key = Some(8);

    run_command(&mut device, Some(&mut state), &mut tracker, &cut).expect("sweep completes");

    // Cases that keep key 8 intact must carry the fresh token bytes
    // (a CBOR byte string of length 8: 0x48 then the token).
    let mut encoded_token = vec![0x48];
    encoded_token.extend_from_slice(&token);
    let carrying = device
        .sent
        .iter()
        .filter(|(_, payload)| {
            payload
                .windows(encoded_token.len())
                .any(|window| window == encoded_token)
        })
        .count();
    assert!(carrying > 0, "no sent payload carried the fresh auth token");
}
