//! Shared CTAP2 protocol vocabulary for the conformance test suite.
//!
//! This crate holds the types every other crate speaks:
//! - [`Status`]: the exhaustive one-byte CTAP response code enumeration
//! - [`Command`]: CTAP2 command identifiers
//! - [`Outcome`]: the result of one device exchange (payload or status)
//! - [`MajorKind`]: CBOR major-type classification for mutation checks
//! - [`DeviceInterface`] / [`CommandState`]: collaborator traits owned by
//!   the transport and PIN-protocol layers

#![forbid(unsafe_code)]

mod command;
mod device;
mod kind;
mod outcome;
mod status;

pub use command::Command;
pub use device::{CommandState, DeviceInterface, TransportError};
pub use kind::{major_kind, MajorKind};
pub use outcome::Outcome;
pub use status::{Status, UnknownStatus};
