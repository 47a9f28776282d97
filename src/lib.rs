pub mod base32;
pub mod hotp;
pub mod secret;
pub mod totp;
pub mod uri;

use std::{fmt::Display, str::FromStr};

pub use hotp::Hotp;
pub use totp::Totp;
pub use uri::ProvisioningUri;

#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("secret must be at least 16 characters and a multiple of 8, found {0}")]
    InvalidSecretLength(usize),
    #[error("secret contains a character outside the base32 alphabet: {0:?}")]
    InvalidSecretAlphabet(char),
    #[error("secret decode error")]
    SecretDecode(data_encoding::DecodeError),
    #[error("digits must be 6, 7 or 8, found {0}")]
    InvalidDigits(u32),
    #[error("invalid hashing algorithm, found {0}. Expected one of: SHA1, SHA256 or SHA512")]
    InvalidAlgorithm(String),
    #[error("period must be greater than zero")]
    InvalidPeriod,
    #[error("generated secret length must be at least 16 and a multiple of 8, found {0}")]
    InvalidGenerationLength(usize),
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("account and issuer must not contain ':'")]
    InvalidLabelCharacter,
    #[error("invalid digest")]
    InvalidDigest(Vec<u8>),
    #[error("the HMAC implementation rejected the key")]
    KeyLength(#[from] hmac::digest::InvalidLength),
    #[error("could not build the URI")]
    UriParse(#[from] url::ParseError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OtpHashAlgorithm {
    #[default]
    SHA1,
    SHA256,
    SHA512,
}

impl Display for OtpHashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SHA1 => write!(f, "SHA1"),
            Self::SHA256 => write!(f, "SHA256"),
            Self::SHA512 => write!(f, "SHA512"),
        }
    }
}

impl FromStr for OtpHashAlgorithm {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();

        match normalized.as_str() {
            "SHA1" => Ok(Self::SHA1),
            "SHA256" => Ok(Self::SHA256),
            "SHA512" => Ok(Self::SHA512),
            _ => Err(OtpError::InvalidAlgorithm(s.to_string())),
        }
    }
}

/// A generated one-time password.
///
/// Display renders the code zero-padded to the configured amount of digits,
/// which is the form a user types and a verifier compares.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OtpCode {
    pub(crate) code: u32,
    pub(crate) digits: u32,
}

impl OtpCode {
    pub fn integer(&self) -> u32 {
        self.code
    }
}

impl Display for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:0padding$}",
            self.code,
            padding = (self.digits as usize)
        )
    }
}
