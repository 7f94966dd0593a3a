//! Conformance runner: the thin orchestration layer between the mutation
//! engine, the device transport and the result tracker.
//!
//! Execution is strictly synchronous and single-outstanding-transaction:
//! one case is generated, encoded, sent and evaluated before the next
//! begins, matching the serialized nature of the hardware transport.

#![forbid(unsafe_code)]

mod discovery;
mod sweep;

pub use discovery::{discover, DiscoveryError};
pub use sweep::{
    generate_cases, run_bad_parameter_types, run_command, run_depth_exhaustion,
    run_missing_parameters, run_nested_parameter_types, CommandUnderTest, InnerMapTarget,
    SweepError,
};
