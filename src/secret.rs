//! Random shared-secret generation.

use rand::Rng;

use crate::{base32, OtpError};

/// Default secret length in base32 characters, giving a 15-byte key.
pub const DEFAULT_SECRET_LENGTH: usize = 24;

/// Generates a random base32 secret of exactly `length` characters.
///
/// The length must satisfy the same constraint as secrets accepted for code
/// generation: at least 16 characters and a multiple of 8. Each symbol is
/// drawn independently from a cryptographically secure source, and the
/// result is uppercase by convention.
pub fn generate(length: usize) -> Result<String, OtpError> {
    if length < base32::MIN_SECRET_LENGTH || length % 8 != 0 {
        return Err(OtpError::InvalidGenerationLength(length));
    }

    let mut rng = rand::thread_rng();

    Ok((0..length)
        .map(|_| base32::ALPHABET[rng.gen_range(0..base32::ALPHABET.len())] as char)
        .collect())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{base32, OtpError};

    #[rstest]
    #[case(16)]
    #[case(24)]
    #[case(32)]
    #[case(64)]
    fn generated_secret_has_requested_length(#[case] length: usize) {
        let secret = super::generate(length).unwrap();
        assert_eq!(length, secret.len());
    }

    #[test]
    fn generated_secret_is_a_valid_secret() {
        let secret = super::generate(super::DEFAULT_SECRET_LENGTH).unwrap();
        base32::validate(&secret).unwrap();
        assert!(secret
            .bytes()
            .all(|b| base32::ALPHABET.contains(&b)));
    }

    #[rstest]
    #[case(0)]
    #[case(8)]
    #[case(15)]
    #[case(17)]
    #[case(30)]
    fn invalid_length_is_rejected(#[case] length: usize) {
        assert!(matches!(
            super::generate(length),
            Err(OtpError::InvalidGenerationLength(l)) if l == length
        ));
    }
}
