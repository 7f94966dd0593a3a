//! Test doubles for the conformance suite.
//!
//! - [`ScriptedDevice`]: a `DeviceInterface` answering from a queued script,
//!   recording every exchange
//! - [`StaticCommandState`]: a `CommandState` handing out a fixed token
//! - [`SharedBuffer`]: a cloneable writer so tests capture report sinks as
//!   plain text
//! - [`init_test_tracing`]: `Once`-guarded tracing setup for test output

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod buffer;
mod device;
mod tracing_config;

pub use buffer::SharedBuffer;
pub use device::{ScriptedDevice, StaticCommandState};
pub use tracing_config::init_test_tracing;
