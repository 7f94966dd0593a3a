//! Scripted device and auth-state doubles.

use std::collections::VecDeque;

use f2t_core::{Command, CommandState, DeviceInterface, Outcome, Status, TransportError};

/// A `DeviceInterface` that answers from a pre-loaded script.
///
/// Responses are consumed in push order; once the script is exhausted every
/// exchange answers with a configurable default status. All sent frames are
/// recorded for assertions.
#[derive(Debug)]
pub struct ScriptedDevice {
    responses: VecDeque<Result<Outcome, TransportError>>,
    default_status: Status,
    /// Every `(command, payload)` pair sent, in order.
    pub sent: Vec<(Command, Vec<u8>)>,
}

impl ScriptedDevice {
    /// Device answering `default_status` whenever the script runs dry.
    #[must_use]
    pub fn new(default_status: Status) -> Self {
        Self {
            responses: VecDeque::new(),
            default_status,
            sent: Vec::new(),
        }
    }

    /// Queue the next outcome.
    pub fn push_outcome(&mut self, outcome: Outcome) -> &mut Self {
        self.responses.push_back(Ok(outcome));
        self
    }

    /// Queue the next status answer.
    pub fn push_status(&mut self, status: Status) -> &mut Self {
        self.push_outcome(Outcome::Status(status))
    }

    /// Queue a transport fault.
    pub fn push_transport_error(&mut self, error: TransportError) -> &mut Self {
        self.responses.push_back(Err(error));
        self
    }

    /// Number of exchanges seen so far.
    #[must_use]
    pub fn exchanges(&self) -> usize {
        self.sent.len()
    }
}

impl DeviceInterface for ScriptedDevice {
    fn send(&mut self, command: Command, payload: &[u8]) -> Result<Outcome, TransportError> {
        self.sent.push((command, payload.to_vec()));
        self.responses
            .pop_front()
            .unwrap_or(Ok(Outcome::Status(self.default_status)))
    }
}

/// A `CommandState` that hands out the same token every time.
#[derive(Debug, Clone)]
pub struct StaticCommandState {
    token: Vec<u8>,
}

impl StaticCommandState {
    #[must_use]
    pub fn new(token: Vec<u8>) -> Self {
        Self { token }
    }
}

impl CommandState for StaticCommandState {
    fn auth_token(
        &mut self,
        _device: &mut dyn DeviceInterface,
    ) -> Result<Vec<u8>, TransportError> {
        Ok(self.token.clone())
    }
}
