//! The result tracker: one instance per device, per conformance run.
//!
//! Everything the tracker holds is monotonic accumulation: logs, warnings
//! and check records are append-only and never reordered, followed by a
//! single terminal render through [`report_findings`](DeviceTracker::report_findings).

use std::collections::BTreeMap;

use f2t_core::{Outcome, Status};

use crate::capabilities::CapabilitySet;
use crate::report::{AnsiSink, ReportDocument, ReportSink};

/// One pass/fail check outcome, recorded in call order.
#[derive(Debug, Clone)]
struct CheckRecord {
    label: String,
    passed: bool,
    /// Enriched diagnostic for status-derived failures.
    message: Option<String>,
}

/// Accumulates capability discovery, check outcomes and free-form findings
/// for a single device, and renders the consolidated report once at the end.
pub struct DeviceTracker {
    capabilities: Option<CapabilitySet>,
    problems: Vec<String>,
    observations: Vec<String>,
    /// Buffered informational mismatch warnings, flushed only at report time.
    warnings: Vec<String>,
    records: Vec<CheckRecord>,
    counters: BTreeMap<String, Vec<u64>>,
    sink: Box<dyn ReportSink>,
}

impl Default for DeviceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceTracker {
    /// Tracker rendering ANSI-colored output to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Box::new(AnsiSink::default()))
    }

    /// Tracker rendering through a caller-supplied sink.
    #[must_use]
    pub fn with_sink(sink: Box<dyn ReportSink>) -> Self {
        Self {
            capabilities: None,
            problems: Vec::new(),
            observations: Vec::new(),
            warnings: Vec::new(),
            records: Vec::new(),
            counters: BTreeMap::new(),
            sink,
        }
    }

    /// Record the advertised capabilities from the discovery response.
    ///
    /// # Panics
    /// Panics when called twice: re-initialization would silently discard
    /// the capabilities every later check was measured against.
    pub fn initialize(
        &mut self,
        versions: Vec<String>,
        extensions: Vec<String>,
        options: &[(String, bool)],
    ) {
        assert!(
            self.capabilities.is_none(),
            "capability set is already initialized"
        );
        tracing::debug!(
            versions = versions.len(),
            extensions = extensions.len(),
            options = options.len(),
            "capability set initialized"
        );
        self.capabilities = Some(CapabilitySet::new(versions, extensions, options));
    }

    #[must_use]
    pub fn has_version(&self, name: &str) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.has_version(name))
    }

    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.has_extension(name))
    }

    #[must_use]
    pub fn has_option(&self, name: &str) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.has_option(name))
    }

    /// Append a free-form observation. Never affects pass/fail counters.
    pub fn add_observation(&mut self, observation: impl Into<String>) {
        self.observations.push(observation.into());
    }

    /// Append a free-form problem. Never affects pass/fail counters.
    pub fn add_problem(&mut self, problem: impl Into<String>) {
        self.problems.push(problem.into());
    }

    /// Record one sample of a named runtime counter.
    pub fn observe_counter(&mut self, name: impl Into<String>, value: u64) {
        self.counters.entry(name.into()).or_default().push(value);
    }

    /// True iff the status is the success code. Prints the failing code
    /// immediately otherwise.
    pub fn check_status(&mut self, returned: Status) -> bool {
        if !returned.is_success() {
            self.sink
                .line(&format!("The failing error code is `{returned}`."));
        }
        returned.is_success()
    }

    /// Compare an expected against a returned status.
    ///
    /// Two equal codes match; so do any two failure codes, which makes
    /// `ErrOther` the "any failure" wildcard. A failure code never matches
    /// success in either direction. Any inequality prints a diagnostic
    /// naming both symbolic codes.
    pub fn check_status_expecting(&mut self, expected: Status, returned: Status) -> bool {
        if expected != returned {
            self.sink.line(&format!(
                "Expected error code `{expected}`, got `{returned}`."
            ));
        }
        expected == returned || (!expected.is_success() && !returned.is_success())
    }

    /// A payload outcome is implicit success; a status outcome follows the
    /// one-argument rule.
    pub fn check_status_outcome(&mut self, outcome: &Outcome) -> bool {
        match outcome {
            Outcome::Value(_) => true,
            Outcome::Status(status) => self.check_status(*status),
        }
    }

    /// Record a bare pass/fail check.
    pub fn check_and_report(&mut self, passed: bool, label: impl Into<String>) {
        self.records.push(CheckRecord {
            label: label.into(),
            passed,
            message: None,
        });
    }

    /// Record a check derived from a device outcome; failures carry the
    /// actual status in the report.
    pub fn check_and_report_outcome(&mut self, outcome: &Outcome, label: impl Into<String>) {
        let passed = self.check_status_outcome(outcome);
        let label = label.into();
        let message = (!passed).then(|| {
            format!(
                "{label} - expected {}, got {}",
                Status::Ok,
                outcome.status()
            )
        });
        self.records.push(CheckRecord {
            label,
            passed,
            message,
        });
    }

    /// Record a check comparing an expected against a returned status.
    ///
    /// When two different failure codes meet, the check still passes but an
    /// informational mismatch warning is buffered for the final report.
    pub fn check_and_report_status(
        &mut self,
        expected: Status,
        returned: Status,
        label: impl Into<String>,
    ) {
        if expected != returned && !expected.is_success() && !returned.is_success() {
            self.warnings
                .push(format!("Expected error code {expected}, got {returned}"));
        }
        let passed = self.check_status_expecting(expected, returned);
        let label = label.into();
        let message = (!passed).then(|| format!("{label} - expected {expected}, got {returned}"));
        self.records.push(CheckRecord {
            label,
            passed,
            message,
        });
    }

    fn passed_count(&self) -> usize {
        self.records.iter().filter(|record| record.passed).count()
    }

    /// Summary line describing the behavior of all observed counters.
    fn counter_summary(&self) -> String {
        let any_nonzero = self
            .counters
            .values()
            .any(|series| series.iter().any(|&value| value != 0));
        if !any_nonzero {
            return "All counters were constant zero.".to_owned();
        }
        let all_increasing = self
            .counters
            .values()
            .all(|series| series.windows(2).all(|pair| pair[0] < pair[1]));
        if all_increasing {
            "All counters were strictly increasing.".to_owned()
        } else {
            "Some counters were repeated or decreasing.".to_owned()
        }
    }

    /// Render the consolidated findings, once, at the end of the run.
    ///
    /// Order: counter summary, problems and observations, buffered mismatch
    /// warnings, failing checks, pass count. Blank-line spacing is part of
    /// the output contract and covered by tests.
    pub fn report_findings(&mut self) {
        let summary = self.counter_summary();
        self.sink.line(&summary);
        self.sink.line("");
        for problem in &self.problems {
            self.sink.line(problem);
        }
        for observation in &self.observations {
            self.sink.line(observation);
        }
        self.sink.line("");
        for warning in &self.warnings {
            self.sink.warn_line(warning);
        }
        self.sink.line("");
        for record in self.records.iter().filter(|record| !record.passed) {
            self.sink
                .fail_line(record.message.as_deref().unwrap_or(&record.label));
        }
        self.sink.line(&format!(
            "Passed {} out of {} tests.",
            self.passed_count(),
            self.records.len()
        ));
    }

    /// Build the structured report with the same accounting as the text
    /// rendering.
    #[must_use]
    pub fn results_json(&self, commit: &str, date: &str) -> ReportDocument {
        ReportDocument {
            passed_test_count: self.passed_count(),
            total_test_count: self.records.len(),
            failed_tests: self
                .records
                .iter()
                .filter(|record| !record.passed)
                .map(|record| record.label.clone())
                .collect(),
            problems: self.problems.clone(),
            observations: self.observations.clone(),
            counter: self.counter_summary(),
            date: date.to_owned(),
            commit: commit.to_owned(),
        }
    }
}

impl std::fmt::Debug for DeviceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceTracker")
            .field("initialized", &self.capabilities.is_some())
            .field("problems", &self.problems.len())
            .field("observations", &self.observations.len())
            .field("warnings", &self.warnings.len())
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}
