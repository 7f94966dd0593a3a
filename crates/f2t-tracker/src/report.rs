//! Report rendering sinks and the structured report document.
//!
//! Coloring is a rendering concern only: the tracker talks to a
//! [`ReportSink`], and tests capture plain text through [`PlainSink`]
//! without parsing escape sequences.

use std::io::Write;

use serde::{Deserialize, Serialize};

/// Where human-readable report lines go.
///
/// `warn_line` marks informational mismatch warnings, `fail_line` marks
/// failing test labels; everything else uses default styling.
pub trait ReportSink {
    fn line(&mut self, text: &str);
    fn warn_line(&mut self, text: &str);
    fn fail_line(&mut self, text: &str);
}

const YELLOW: &str = "\x1B[0;33m";
const RED: &str = "\x1B[0;31m";
const RESET: &str = "\x1B[0m";

/// ANSI-colored sink for terminals.
#[derive(Debug)]
pub struct AnsiSink<W: Write> {
    out: W,
}

impl<W: Write> AnsiSink<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl Default for AnsiSink<std::io::Stdout> {
    fn default() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ReportSink for AnsiSink<W> {
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn warn_line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{YELLOW}{text}{RESET}");
    }

    fn fail_line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{RED}{text}{RESET}");
    }
}

/// Unstyled sink, for piped output and deterministic tests.
#[derive(Debug)]
pub struct PlainSink<W: Write> {
    out: W,
}

impl<W: Write> PlainSink<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ReportSink for PlainSink<W> {
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn warn_line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn fail_line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

/// Machine-readable run summary.
///
/// Field names and types are a stability contract for downstream tooling;
/// they must match the text report's accounting exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub passed_test_count: usize,
    pub total_test_count: usize,
    /// Bare labels of failing checks, in call order.
    pub failed_tests: Vec<String>,
    pub problems: Vec<String>,
    pub observations: Vec<String>,
    /// Counter-activity summary, same string the text report prints.
    pub counter: String,
    pub date: String,
    pub commit: String,
}
