//! Result of a single device exchange.

use ciborium::value::Value;

use crate::Status;

/// What the authenticator answered: a decoded CBOR payload on success, or a
/// bare status byte otherwise.
///
/// A `Value` always means success; authenticators that succeed without a
/// response body answer `Status(Status::Ok)` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Success payload.
    Value(Value),
    /// Bare status byte (which may itself be `Ok`).
    Status(Status),
}

impl Outcome {
    /// Status code of the exchange; a payload counts as `Ok`.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Value(_) => Status::Ok,
            Self::Status(status) => *status,
        }
    }

    /// True when the exchange succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status().is_success()
    }

    /// Borrow the success payload, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Status(_) => None,
        }
    }
}

impl From<Status> for Outcome {
    fn from(status: Status) -> Self {
        Self::Status(status)
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
