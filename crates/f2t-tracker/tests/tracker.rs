//! End-to-end tracker behavior, including byte-exact report rendering.

use ciborium::value::Value;
use f2t_core::{Outcome, Status};
use f2t_testkit::SharedBuffer;
use f2t_tracker::{AnsiSink, DeviceTracker, PlainSink};

fn plain_tracker() -> (DeviceTracker, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let tracker = DeviceTracker::with_sink(Box::new(PlainSink::new(buffer.clone())));
    (tracker, buffer)
}

fn ansi_tracker() -> (DeviceTracker, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let tracker = DeviceTracker::with_sink(Box::new(AnsiSink::new(buffer.clone())));
    (tracker, buffer)
}

fn opts(pairs: &[(&str, bool)]) -> Vec<(String, bool)> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), *value))
        .collect()
}

#[test]
fn initialize_records_capabilities() {
    let (mut tracker, _buffer) = plain_tracker();
    tracker.initialize(
        vec!["VERSION".to_owned()],
        vec!["EXTENSION".to_owned()],
        &opts(&[
            ("up", false),
            ("rk", true),
            ("clientPin", false),
            ("bioEnroll", true),
        ]),
    );
    assert!(tracker.has_version("VERSION"));
    assert!(!tracker.has_version("WRONG_VERSION"));
    assert!(tracker.has_extension("EXTENSION"));
    assert!(!tracker.has_extension("WRONG_EXTENSION"));
    assert!(!tracker.has_option("up"));
    assert!(tracker.has_option("rk"));
    // Mutable at runtime, so presence wins over the advertised boolean.
    assert!(tracker.has_option("clientPin"));
    assert!(tracker.has_option("bioEnroll"));
}

#[test]
#[should_panic(expected = "already initialized")]
fn reinitialize_fails_loudly() {
    let (mut tracker, _buffer) = plain_tracker();
    tracker.initialize(vec![], vec![], &[]);
    tracker.initialize(vec![], vec![], &[]);
}

#[test]
fn lookups_before_initialize_are_absent() {
    let (tracker, _buffer) = plain_tracker();
    assert!(!tracker.has_version("FIDO_2_0"));
    assert!(!tracker.has_option("rk"));
}

#[test]
fn empty_run_renders_exact_fixture() {
    let (mut tracker, buffer) = plain_tracker();
    tracker.report_findings();
    assert_eq!(
        buffer.contents(),
        "All counters were constant zero.\n\n\n\nPassed 0 out of 0 tests.\n"
    );
}

#[test]
fn observations_render_in_insertion_order() {
    let (mut tracker, buffer) = plain_tracker();
    tracker.add_observation("OBSERVATION1");
    tracker.add_observation("OBSERVATION2");
    tracker.report_findings();
    assert_eq!(
        buffer.contents(),
        "All counters were constant zero.\n\n\
         OBSERVATION1\n\
         OBSERVATION2\n\
         \n\nPassed 0 out of 0 tests.\n"
    );
}

#[test]
fn problems_render_before_observations() {
    let (mut tracker, buffer) = plain_tracker();
    tracker.add_observation("OBSERVATION");
    tracker.add_problem("PROBLEM1");
    tracker.add_problem("PROBLEM2");
    tracker.report_findings();
    assert_eq!(
        buffer.contents(),
        "All counters were constant zero.\n\n\
         PROBLEM1\n\
         PROBLEM2\n\
         OBSERVATION\n\
         \n\nPassed 0 out of 0 tests.\n"
    );
}

#[test]
fn check_status_single_argument() {
    let (mut tracker, buffer) = plain_tracker();
    assert!(tracker.check_status(Status::Ok));
    assert!(!tracker.check_status(Status::ErrOther));
    assert_eq!(
        buffer.contents(),
        "The failing error code is `CTAP1_ERR_OTHER`.\n"
    );
}

#[test]
fn check_status_two_arguments() {
    let (mut tracker, buffer) = plain_tracker();
    assert!(tracker.check_status_expecting(Status::Ok, Status::Ok));
    assert!(tracker.check_status_expecting(Status::ErrOther, Status::ErrOther));
    assert!(tracker.check_status_expecting(Status::ErrOther, Status::ErrInvalidCommand));
    // Any two failure codes match; ErrOther is not special on this side.
    assert!(tracker.check_status_expecting(Status::ErrInvalidCommand, Status::ErrOther));
    assert!(!tracker.check_status_expecting(Status::ErrOther, Status::Ok));
    assert!(!tracker.check_status_expecting(Status::Ok, Status::ErrOther));
    let output = buffer.contents();
    assert!(output.contains(
        "Expected error code `CTAP1_ERR_OTHER`, got `CTAP1_ERR_INVALID_COMMAND`.\n"
    ));
    assert!(output.contains("Expected error code `CTAP1_ERR_OTHER`, got `CTAP2_OK`.\n"));
}

#[test]
fn check_status_outcome_variants() {
    let (mut tracker, buffer) = plain_tracker();
    assert!(tracker.check_status_outcome(&Outcome::Value(Value::Null)));
    assert!(tracker.check_status_outcome(&Outcome::Status(Status::Ok)));
    assert!(!tracker.check_status_outcome(&Outcome::Status(Status::ErrOther)));
    assert_eq!(
        buffer.contents(),
        "The failing error code is `CTAP1_ERR_OTHER`.\n"
    );
}

// Mirrors the seven-check scenario: two booleans, two outcome variants, a
// matching pair, a mismatched-failure pair (warning only) and a
// wrong-direction pair. Rendering is byte-exact, colors included.
#[test]
fn check_and_report_renders_exact_ansi_fixture() {
    let (mut tracker, buffer) = ansi_tracker();
    tracker.check_and_report(false, "FALSE_TEST");
    tracker.check_and_report(true, "TRUE_TEST");
    tracker.check_and_report_outcome(&Outcome::Value(Value::Null), "VALUE_VARIANT_TEST");
    tracker.check_and_report_outcome(&Outcome::Status(Status::ErrOther), "STATUS_VARIANT_TEST");
    tracker.check_and_report_status(Status::ErrOther, Status::ErrOther, "SAME_STATUS_TEST");
    tracker.check_and_report_status(
        Status::ErrOther,
        Status::ErrInvalidCommand,
        "DIFFERENT_FAIL_STATUS_TEST",
    );
    tracker.check_and_report_status(Status::Ok, Status::ErrOther, "WRONG_STATUS_TEST");

    // Rebind the capture to just the final report.
    let before = buffer.contents().len();
    tracker.report_findings();
    let output = buffer.contents()[before..].to_owned();
    assert_eq!(
        output,
        "All counters were constant zero.\n\n\n\
         \x1B[0;33mExpected error code CTAP1_ERR_OTHER, got CTAP1_ERR_INVALID_COMMAND\x1B[0m\n\n\
         \x1B[0;31mFALSE_TEST\x1B[0m\n\
         \x1B[0;31mSTATUS_VARIANT_TEST - expected CTAP2_OK, got CTAP1_ERR_OTHER\x1B[0m\n\
         \x1B[0;31mWRONG_STATUS_TEST - expected CTAP2_OK, got CTAP1_ERR_OTHER\x1B[0m\n\
         Passed 4 out of 7 tests.\n"
    );
}

#[test]
fn results_json_matches_text_accounting() {
    let (mut tracker, _buffer) = plain_tracker();
    tracker.add_observation("OBSERVATION");
    tracker.add_problem("PROBLEM");
    tracker.check_and_report(false, "FALSE_TEST");
    tracker.check_and_report(true, "TRUE_TEST");

    let report = tracker.results_json("c0", "2020-01-01");
    assert_eq!(report.passed_test_count, 1);
    assert_eq!(report.total_test_count, 2);
    assert_eq!(report.failed_tests, vec!["FALSE_TEST".to_owned()]);
    assert_eq!(report.problems, vec!["PROBLEM".to_owned()]);
    assert_eq!(report.observations, vec!["OBSERVATION".to_owned()]);
    assert_eq!(report.counter, "All counters were constant zero.");
    assert_eq!(report.date, "2020-01-01");
    assert_eq!(report.commit, "c0");
}

#[test]
fn failed_tests_keep_bare_labels_and_order() {
    let (mut tracker, _buffer) = plain_tracker();
    tracker.check_and_report_status(Status::Ok, Status::ErrOther, "FIRST");
    tracker.check_and_report(true, "PASSING");
    tracker.check_and_report_outcome(&Outcome::Status(Status::ErrPinInvalid), "SECOND");
    let report = tracker.results_json("c0", "2020-01-01");
    // Bare labels, not the enriched diagnostics.
    assert_eq!(
        report.failed_tests,
        vec!["FIRST".to_owned(), "SECOND".to_owned()]
    );
    assert_eq!(report.passed_test_count, 1);
    assert_eq!(report.total_test_count, 3);
}

#[test]
fn counter_summaries() {
    let (mut tracker, _buffer) = plain_tracker();
    tracker.observe_counter("signCount", 0);
    tracker.observe_counter("signCount", 0);
    assert_eq!(
        tracker.results_json("c", "d").counter,
        "All counters were constant zero."
    );

    tracker.observe_counter("signCount", 1);
    tracker.observe_counter("signCount", 5);
    // 0, 0 is not strictly increasing even though later samples are.
    assert_eq!(
        tracker.results_json("c", "d").counter,
        "Some counters were repeated or decreasing."
    );

    let (mut tracker, _buffer) = plain_tracker();
    tracker.observe_counter("signCount", 1);
    tracker.observe_counter("signCount", 3);
    assert_eq!(
        tracker.results_json("c", "d").counter,
        "All counters were strictly increasing."
    );
}
