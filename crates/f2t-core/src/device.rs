//! Collaborator traits owned by the transport and PIN-protocol layers.
//!
//! The conformance core never frames bytes itself. A [`DeviceInterface`]
//! implementation owns USB/BLE/NFC framing, chunking and timeouts entirely,
//! and must resolve every exchange to either an [`Outcome`] or a
//! [`TransportError`]. Transport errors are fatal for the current run and
//! are never retried here: a wedged authenticator may need manual
//! intervention before another sweep makes sense.

use thiserror::Error;

use crate::{Command, Outcome};

/// I/O-level fault while talking to the device. Aborts the current run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("device exchange timed out")]
    Timeout,

    #[error("device disconnected: {0}")]
    Disconnected(String),

    #[error("transport framing error: {0}")]
    Framing(String),
}

/// One serialized transaction against a physical authenticator.
pub trait DeviceInterface {
    /// Send a command with an already CBOR-encoded parameter payload and
    /// block until the device answers.
    ///
    /// # Errors
    /// Returns [`TransportError`] on an I/O-level fault; protocol-level
    /// rejections are an [`Outcome`], not an error.
    fn send(&mut self, command: Command, payload: &[u8]) -> Result<Outcome, TransportError>;
}

/// PIN/auth-token protocol lifecycle, owned outside the core.
///
/// The conformance core only ever asks for a fresh token; key agreement,
/// PIN hashing and token state stay behind this trait.
pub trait CommandState {
    /// Obtain a PIN/UV auth token usable for the next authorized command.
    ///
    /// # Errors
    /// Returns [`TransportError`] when the token exchange itself fails at
    /// the transport level.
    fn auth_token(&mut self, device: &mut dyn DeviceInterface)
        -> Result<Vec<u8>, TransportError>;
}
