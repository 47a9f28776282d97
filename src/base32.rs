//! RFC 4648 base32 handling for shared secrets.

use crate::OtpError;

/// The 32-symbol alphabet, 5 bits per character.
pub(crate) const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Minimum accepted secret length, in base32 characters.
pub(crate) const MIN_SECRET_LENGTH: usize = 16;

/// Checks that a secret is well-formed before any computation touches it.
///
/// The length must be at least 16 characters and a multiple of 8, so that
/// decoding yields a whole number of key bytes with no dangling bits, and
/// every character must belong to the alphabet (case-insensitive).
pub fn validate(secret: &str) -> Result<(), OtpError> {
    if secret.len() < MIN_SECRET_LENGTH || secret.len() % 8 != 0 {
        return Err(OtpError::InvalidSecretLength(secret.len()));
    }

    match secret
        .chars()
        .find(|&c| !matches!(c.to_ascii_uppercase(), 'A'..='Z' | '2'..='7'))
    {
        Some(c) => Err(OtpError::InvalidSecretAlphabet(c)),
        None => Ok(()),
    }
}

/// Decodes a base32 secret (given as an RFC 4648 ASCII string, either case)
/// into the raw key bytes.
pub fn decode(secret: &str) -> Result<Vec<u8>, OtpError> {
    validate(secret)?;

    data_encoding::BASE32_NOPAD
        .decode(secret.to_ascii_uppercase().as_bytes())
        .map_err(OtpError::SecretDecode)
}
