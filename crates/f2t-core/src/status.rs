//! CTAP response status codes.
//!
//! The enumeration mirrors the one-byte codes on the wire exactly. Each code
//! carries a fixed symbolic name (the `CTAP2_OK` / `CTAP1_ERR_*` /
//! `CTAP2_ERR_*` identifiers from the CTAP specification) used verbatim in
//! every diagnostic, so report output stays stable across releases.

use thiserror::Error;

/// One-byte CTAP response code.
///
/// `Ok` is the only success value; everything else is a specific error
/// category. `ErrOther` (0x7F) additionally serves as the "any failure"
/// wildcard in two-argument status comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    ErrInvalidCommand = 0x01,
    ErrInvalidParameter = 0x02,
    ErrInvalidLength = 0x03,
    ErrInvalidSeq = 0x04,
    ErrTimeout = 0x05,
    ErrChannelBusy = 0x06,
    ErrLockRequired = 0x0A,
    ErrInvalidChannel = 0x0B,
    ErrCborUnexpectedType = 0x11,
    ErrInvalidCbor = 0x12,
    ErrMissingParameter = 0x14,
    ErrLimitExceeded = 0x15,
    ErrUnsupportedExtension = 0x16,
    ErrCredentialExcluded = 0x19,
    ErrProcessing = 0x21,
    ErrInvalidCredential = 0x22,
    ErrUserActionPending = 0x23,
    ErrOperationPending = 0x24,
    ErrNoOperations = 0x25,
    ErrUnsupportedAlgorithm = 0x26,
    ErrOperationDenied = 0x27,
    ErrKeyStoreFull = 0x28,
    ErrNotBusy = 0x29,
    ErrNoOperationPending = 0x2A,
    ErrUnsupportedOption = 0x2B,
    ErrInvalidOption = 0x2C,
    ErrKeepaliveCancel = 0x2D,
    ErrNoCredentials = 0x2E,
    ErrUserActionTimeout = 0x2F,
    ErrNotAllowed = 0x30,
    ErrPinInvalid = 0x31,
    ErrPinBlocked = 0x32,
    ErrPinAuthInvalid = 0x33,
    ErrPinAuthBlocked = 0x34,
    ErrPinNotSet = 0x35,
    ErrPinRequired = 0x36,
    ErrPinPolicyViolation = 0x37,
    ErrPinTokenExpired = 0x38,
    ErrRequestTooLarge = 0x39,
    ErrActionTimeout = 0x3A,
    ErrUpRequired = 0x3B,
    ErrUvBlocked = 0x3C,
    ErrOther = 0x7F,
    ErrSpecLast = 0xDF,
    ErrExtensionFirst = 0xE0,
    ErrExtensionLast = 0xEF,
    ErrVendorFirst = 0xF0,
    ErrVendorLast = 0xFF,
}

impl Status {
    /// True only for the single success code.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Stable symbolic name, used verbatim in diagnostics and reports.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Ok => "CTAP2_OK",
            Self::ErrInvalidCommand => "CTAP1_ERR_INVALID_COMMAND",
            Self::ErrInvalidParameter => "CTAP1_ERR_INVALID_PARAMETER",
            Self::ErrInvalidLength => "CTAP1_ERR_INVALID_LENGTH",
            Self::ErrInvalidSeq => "CTAP1_ERR_INVALID_SEQ",
            Self::ErrTimeout => "CTAP1_ERR_TIMEOUT",
            Self::ErrChannelBusy => "CTAP1_ERR_CHANNEL_BUSY",
            Self::ErrLockRequired => "CTAP1_ERR_LOCK_REQUIRED",
            Self::ErrInvalidChannel => "CTAP1_ERR_INVALID_CHANNEL",
            Self::ErrCborUnexpectedType => "CTAP2_ERR_CBOR_UNEXPECTED_TYPE",
            Self::ErrInvalidCbor => "CTAP2_ERR_INVALID_CBOR",
            Self::ErrMissingParameter => "CTAP2_ERR_MISSING_PARAMETER",
            Self::ErrLimitExceeded => "CTAP2_ERR_LIMIT_EXCEEDED",
            Self::ErrUnsupportedExtension => "CTAP2_ERR_UNSUPPORTED_EXTENSION",
            Self::ErrCredentialExcluded => "CTAP2_ERR_CREDENTIAL_EXCLUDED",
            Self::ErrProcessing => "CTAP2_ERR_PROCESSING",
            Self::ErrInvalidCredential => "CTAP2_ERR_INVALID_CREDENTIAL",
            Self::ErrUserActionPending => "CTAP2_ERR_USER_ACTION_PENDING",
            Self::ErrOperationPending => "CTAP2_ERR_OPERATION_PENDING",
            Self::ErrNoOperations => "CTAP2_ERR_NO_OPERATIONS",
            Self::ErrUnsupportedAlgorithm => "CTAP2_ERR_UNSUPPORTED_ALGORITHM",
            Self::ErrOperationDenied => "CTAP2_ERR_OPERATION_DENIED",
            Self::ErrKeyStoreFull => "CTAP2_ERR_KEY_STORE_FULL",
            Self::ErrNotBusy => "CTAP2_ERR_NOT_BUSY",
            Self::ErrNoOperationPending => "CTAP2_ERR_NO_OPERATION_PENDING",
            Self::ErrUnsupportedOption => "CTAP2_ERR_UNSUPPORTED_OPTION",
            Self::ErrInvalidOption => "CTAP2_ERR_INVALID_OPTION",
            Self::ErrKeepaliveCancel => "CTAP2_ERR_KEEPALIVE_CANCEL",
            Self::ErrNoCredentials => "CTAP2_ERR_NO_CREDENTIALS",
            Self::ErrUserActionTimeout => "CTAP2_ERR_USER_ACTION_TIMEOUT",
            Self::ErrNotAllowed => "CTAP2_ERR_NOT_ALLOWED",
            Self::ErrPinInvalid => "CTAP2_ERR_PIN_INVALID",
            Self::ErrPinBlocked => "CTAP2_ERR_PIN_BLOCKED",
            Self::ErrPinAuthInvalid => "CTAP2_ERR_PIN_AUTH_INVALID",
            Self::ErrPinAuthBlocked => "CTAP2_ERR_PIN_AUTH_BLOCKED",
            Self::ErrPinNotSet => "CTAP2_ERR_PIN_NOT_SET",
            Self::ErrPinRequired => "CTAP2_ERR_PIN_REQUIRED",
            Self::ErrPinPolicyViolation => "CTAP2_ERR_PIN_POLICY_VIOLATION",
            Self::ErrPinTokenExpired => "CTAP2_ERR_PIN_TOKEN_EXPIRED",
            Self::ErrRequestTooLarge => "CTAP2_ERR_REQUEST_TOO_LARGE",
            Self::ErrActionTimeout => "CTAP2_ERR_ACTION_TIMEOUT",
            Self::ErrUpRequired => "CTAP2_ERR_UP_REQUIRED",
            Self::ErrUvBlocked => "CTAP2_ERR_UV_BLOCKED",
            Self::ErrOther => "CTAP1_ERR_OTHER",
            Self::ErrSpecLast => "CTAP2_ERR_SPEC_LAST",
            Self::ErrExtensionFirst => "CTAP2_ERR_EXTENSION_FIRST",
            Self::ErrExtensionLast => "CTAP2_ERR_EXTENSION_LAST",
            Self::ErrVendorFirst => "CTAP2_ERR_VENDOR_FIRST",
            Self::ErrVendorLast => "CTAP2_ERR_VENDOR_LAST",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status as Self
    }
}

/// Response byte that is not a defined CTAP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown CTAP status byte 0x{0:02X}")]
pub struct UnknownStatus(pub u8);

impl TryFrom<u8> for Status {
    type Error = UnknownStatus;

    fn try_from(byte: u8) -> Result<Self, UnknownStatus> {
        let status = match byte {
            0x00 => Self::Ok,
            0x01 => Self::ErrInvalidCommand,
            0x02 => Self::ErrInvalidParameter,
            0x03 => Self::ErrInvalidLength,
            0x04 => Self::ErrInvalidSeq,
            0x05 => Self::ErrTimeout,
            0x06 => Self::ErrChannelBusy,
            0x0A => Self::ErrLockRequired,
            0x0B => Self::ErrInvalidChannel,
            0x11 => Self::ErrCborUnexpectedType,
            0x12 => Self::ErrInvalidCbor,
            0x14 => Self::ErrMissingParameter,
            0x15 => Self::ErrLimitExceeded,
            0x16 => Self::ErrUnsupportedExtension,
            0x19 => Self::ErrCredentialExcluded,
            0x21 => Self::ErrProcessing,
            0x22 => Self::ErrInvalidCredential,
            0x23 => Self::ErrUserActionPending,
            0x24 => Self::ErrOperationPending,
            0x25 => Self::ErrNoOperations,
            0x26 => Self::ErrUnsupportedAlgorithm,
            0x27 => Self::ErrOperationDenied,
            0x28 => Self::ErrKeyStoreFull,
            0x29 => Self::ErrNotBusy,
            0x2A => Self::ErrNoOperationPending,
            0x2B => Self::ErrUnsupportedOption,
            0x2C => Self::ErrInvalidOption,
            0x2D => Self::ErrKeepaliveCancel,
            0x2E => Self::ErrNoCredentials,
            0x2F => Self::ErrUserActionTimeout,
            0x30 => Self::ErrNotAllowed,
            0x31 => Self::ErrPinInvalid,
            0x32 => Self::ErrPinBlocked,
            0x33 => Self::ErrPinAuthInvalid,
            0x34 => Self::ErrPinAuthBlocked,
            0x35 => Self::ErrPinNotSet,
            0x36 => Self::ErrPinRequired,
            0x37 => Self::ErrPinPolicyViolation,
            0x38 => Self::ErrPinTokenExpired,
            0x39 => Self::ErrRequestTooLarge,
            0x3A => Self::ErrActionTimeout,
            0x3B => Self::ErrUpRequired,
            0x3C => Self::ErrUvBlocked,
            0x7F => Self::ErrOther,
            0xDF => Self::ErrSpecLast,
            0xE0 => Self::ErrExtensionFirst,
            0xEF => Self::ErrExtensionLast,
            0xF0 => Self::ErrVendorFirst,
            0xFF => Self::ErrVendorLast,
            other => return Err(UnknownStatus(other)),
        };
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_match_wire_names() {
        assert_eq!(Status::Ok.symbol(), "CTAP2_OK");
        assert_eq!(Status::ErrOther.symbol(), "CTAP1_ERR_OTHER");
        assert_eq!(
            Status::ErrInvalidCommand.symbol(),
            "CTAP1_ERR_INVALID_COMMAND"
        );
        assert_eq!(
            Status::ErrCborUnexpectedType.symbol(),
            "CTAP2_ERR_CBOR_UNEXPECTED_TYPE"
        );
    }

    #[test]
    fn byte_round_trip() {
        for byte in 0..=u8::MAX {
            if let Ok(status) = Status::try_from(byte) {
                assert_eq!(u8::from(status), byte);
            }
        }
        assert_eq!(Status::try_from(0x07), Err(UnknownStatus(0x07)));
    }

    #[test]
    fn only_ok_is_success() {
        assert!(Status::Ok.is_success());
        assert!(!Status::ErrOther.is_success());
        assert!(!Status::ErrPinInvalid.is_success());
    }
}
