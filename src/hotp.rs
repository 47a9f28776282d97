use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::{base32, OtpCode, OtpError, OtpHashAlgorithm};

/// Counter-based one-time password generator, per the
/// [HMAC-based One-time Password Algorithm](http://en.wikipedia.org/wiki/HMAC-based_One-time_Password_Algorithm)
/// (HOTP, RFC 4226).
#[derive(Debug, Clone, PartialEq)]
pub struct Hotp {
    pub(crate) secret: String,
    pub(crate) algorithm: OtpHashAlgorithm,
    pub(crate) digits: u32,
}

impl Hotp {
    /// Creates the config for HOTP generation given an RFC 4648 base32
    /// encoded secret.
    ///
    /// Obs.: This method defaults to the SHA1 hash and a 6-digit code
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            algorithm: OtpHashAlgorithm::SHA1,
            digits: 6,
        }
    }

    ///  Sets hashing algorithm
    pub fn with_algorithm(&mut self, algorithm: OtpHashAlgorithm) -> &mut Self {
        self.algorithm = algorithm;

        self
    }

    ///  Sets the number of digits to generate
    pub fn with_digits(&mut self, digits: u32) -> &mut Self {
        self.digits = digits;

        self
    }

    /// Generates the code for the provided counter value, truncated to the
    /// configured number of digits
    pub fn generate(&self, counter: u64) -> Result<OtpCode, OtpError> {
        compute(&self.secret, self.algorithm, self.digits, counter)
    }
}

/// The shared HOTP core: validates the inputs, then runs decode, HMAC and
/// dynamic truncation. TOTP feeds its time counter through here as well.
pub(crate) fn compute(
    secret: &str,
    algorithm: OtpHashAlgorithm,
    digits: u32,
    counter: u64,
) -> Result<OtpCode, OtpError> {
    base32::validate(secret)?;

    if !(6..=8).contains(&digits) {
        return Err(OtpError::InvalidDigits(digits));
    }

    let key = base32::decode(secret)?;
    let digest = calc_digest(&key, algorithm, counter)?;
    let code = encode_digest_truncated(&digest, digits)?;

    Ok(OtpCode { code, digits })
}

/// Calculates the HMAC digest of the 8-byte big-endian counter under the
/// decoded key.
fn calc_digest(key: &[u8], algorithm: OtpHashAlgorithm, counter: u64) -> Result<Vec<u8>, OtpError> {
    let message = counter.to_be_bytes();

    let digest = match algorithm {
        OtpHashAlgorithm::SHA1 => {
            let mut mac = <Hmac<Sha1>>::new_from_slice(key)?;
            mac.update(&message);
            mac.finalize().into_bytes().to_vec()
        }
        OtpHashAlgorithm::SHA256 => {
            let mut mac = <Hmac<Sha256>>::new_from_slice(key)?;
            mac.update(&message);
            mac.finalize().into_bytes().to_vec()
        }
        OtpHashAlgorithm::SHA512 => {
            let mut mac = <Hmac<Sha512>>::new_from_slice(key)?;
            mac.update(&message);
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(digest)
}

/// Encodes the HMAC digest into a truncated integer (RFC 4226 §5.3).
fn encode_digest_truncated(digest: &[u8], digits: u32) -> Result<u32, OtpError> {
    // The last nibble of the digest picks the 4-byte window for any algorithm
    let offset = match digest.last() {
        Some(x) => *x & 0xf,
        None => return Err(OtpError::InvalidDigest(Vec::from(digest))),
    } as usize;

    let window: [u8; 4] = match digest.get(offset..offset + 4) {
        Some(w) => w.try_into().map_err(|_| OtpError::InvalidDigest(Vec::from(digest)))?,
        None => return Err(OtpError::InvalidDigest(Vec::from(digest))),
    };

    // Mask out the top bit, then keep the low `digits` decimal digits
    let value = u32::from_be_bytes(window);
    let truncation_factor = u32::pow(10, digits);

    Ok((value & 0x7fff_ffff) % truncation_factor)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{hotp::Hotp, OtpError};

    #[rstest]
    #[case(0, "755224")]
    #[case(1, "287082")]
    #[case(2, "359152")]
    #[case(3, "969429")]
    #[case(4, "338314")]
    #[case(5, "254676")]
    #[case(6, "287922")]
    #[case(7, "162583")]
    #[case(8, "399871")]
    #[case(9, "520489")]
    fn rfc4226_vectors(#[case] counter: u64, #[case] expected: &str) {
        let hotp = Hotp::new("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ".to_string());

        assert_eq!(expected, hotp.generate(counter).unwrap().to_string());
    }

    #[rstest]
    #[case(5)]
    #[case(9)]
    #[case(0)]
    fn invalid_digits_are_rejected(#[case] digits: u32) {
        let mut hotp = Hotp::new("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ".to_string());
        hotp.with_digits(digits);

        assert!(matches!(
            hotp.generate(0),
            Err(OtpError::InvalidDigits(d)) if d == digits
        ));
    }

    #[test]
    fn short_secret_is_rejected_before_digits() {
        let mut hotp = Hotp::new("ABCDEFGHIJ".to_string());
        hotp.with_digits(5);

        assert!(matches!(
            hotp.generate(0),
            Err(OtpError::InvalidSecretLength(10))
        ));
    }
}
