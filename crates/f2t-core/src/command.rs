//! CTAP2 command identifiers.

/// One-byte CTAP2 command code, sent ahead of the CBOR-encoded parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    MakeCredential = 0x01,
    GetAssertion = 0x02,
    GetInfo = 0x04,
    ClientPin = 0x06,
    Reset = 0x07,
    GetNextAssertion = 0x08,
    CredentialManagement = 0x0A,
    Selection = 0x0B,
    LargeBlobs = 0x0C,
    AuthenticatorConfig = 0x0D,
}

impl Command {
    /// Wire name as the CTAP specification spells it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MakeCredential => "authenticatorMakeCredential",
            Self::GetAssertion => "authenticatorGetAssertion",
            Self::GetInfo => "authenticatorGetInfo",
            Self::ClientPin => "authenticatorClientPIN",
            Self::Reset => "authenticatorReset",
            Self::GetNextAssertion => "authenticatorGetNextAssertion",
            Self::CredentialManagement => "authenticatorCredentialManagement",
            Self::Selection => "authenticatorSelection",
            Self::LargeBlobs => "authenticatorLargeBlobs",
            Self::AuthenticatorConfig => "authenticatorConfig",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command as Self
    }
}
