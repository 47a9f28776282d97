use crate::{hotp, uri::ProvisioningUri, OtpCode, OtpError, OtpHashAlgorithm};

/// Time-based one-time password generator, per the
/// [Time-based One-time Password Algorithm](http://en.wikipedia.org/wiki/Time-based_One-time_Password_Algorithm)
/// (TOTP, RFC 6238).
///
/// A `Totp` is a plain bundle of parameters. Every generation call is a pure
/// function of those parameters plus the provided Unix timestamp, so a single
/// value can be shared freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Totp {
    pub(crate) secret: String,
    pub(crate) algorithm: OtpHashAlgorithm,
    pub(crate) period: u64,
    pub(crate) digits: u32,
}

impl Totp {
    /// Creates the config for TOTP generation given an RFC 4648 base32
    /// encoded secret.
    ///
    /// Obs.: This method defaults to the SHA1 hash, a 6-digit code and a
    /// period of 30 seconds
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            algorithm: OtpHashAlgorithm::SHA1,
            period: 30,
            digits: 6,
        }
    }

    ///  Sets hashing algorithm
    pub fn with_algorithm(&mut self, algorithm: OtpHashAlgorithm) -> &mut Self {
        self.algorithm = algorithm;

        self
    }

    ///  Sets the period in seconds
    pub fn with_period(&mut self, period: u64) -> &mut Self {
        self.period = period;

        self
    }

    ///  Sets the number of digits to generate
    pub fn with_digits(&mut self, digits: u32) -> &mut Self {
        self.digits = digits;

        self
    }

    /// Generates the code for the time step containing the provided seconds
    /// since the UNIX epoch
    pub fn generate(&self, seconds_since_epoch: u64) -> Result<OtpCode, OtpError> {
        self.generate_with_offset(seconds_since_epoch, 0)
    }

    /// Generates the code `offset` whole time steps away from the one
    /// containing the provided timestamp.
    ///
    /// Negative offsets look into the past; the counter saturates at zero
    /// instead of wrapping before the epoch.
    pub fn generate_with_offset(
        &self,
        seconds_since_epoch: u64,
        offset: i64,
    ) -> Result<OtpCode, OtpError> {
        if self.period == 0 {
            return Err(OtpError::InvalidPeriod);
        }

        let steps = (seconds_since_epoch / self.period) as i64;
        let counter = steps.saturating_add(offset).max(0) as u64;

        hotp::compute(&self.secret, self.algorithm, self.digits, counter)
    }

    /// Validates a candidate code against the current time step and the
    /// given number of steps backward and forward, returning the step offset
    /// it matched at or `None` if the code is invalid.
    ///
    /// Obs.: the RFC recommends a window of 1 step in the future and 1 in
    /// the past, but this function accepts any window you would like
    pub fn validate_window(
        &self,
        candidate: &str,
        seconds_since_epoch: u64,
        backward_steps: u32,
        forward_steps: u32,
    ) -> Result<Option<i64>, OtpError> {
        for offset in -i64::from(backward_steps)..=i64::from(forward_steps) {
            let generated = self.generate_with_offset(seconds_since_epoch, offset)?;

            if generated.to_string() == candidate {
                return Ok(Some(offset));
            }
        }

        Ok(None)
    }

    /// Seconds left until the code for the provided timestamp rotates.
    pub fn remaining_seconds(&self, seconds_since_epoch: u64) -> u64 {
        if self.period == 0 {
            return 0;
        }

        self.period - seconds_since_epoch % self.period
    }

    /// Builds the provisioning URI carrying this generator's full parameter
    /// set, ready to be rendered as a QR code for authenticator apps.
    pub fn to_uri(&self, account: &str, issuer: Option<&str>) -> Result<String, OtpError> {
        let mut uri = ProvisioningUri::new(account.to_owned(), self.secret.clone());
        uri.with_algorithm(self.algorithm)
            .with_digits(self.digits)
            .with_period(self.period);

        if let Some(issuer) = issuer {
            uri.with_issuer(issuer.to_owned());
        }

        uri.build()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{totp::Totp, OtpError, OtpHashAlgorithm};

    // Decodes to the ASCII bytes of "12345678901234567890"
    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[rstest]
    #[case("sha1", 59, "94287082")]
    #[case("sha1", 1111111109, "07081804")]
    #[case("sha1", 1111111111, "14050471")]
    #[case("sha1", 1234567890, "89005924")]
    #[case("sha1", 2000000000, "69279037")]
    #[case("sha1", 20000000000, "65353130")]
    #[case("sha256", 59, "32247374")]
    #[case("sha256", 1111111109, "34756375")]
    #[case("sha256", 1111111111, "74584430")]
    #[case("sha256", 1234567890, "42829826")]
    #[case("sha256", 2000000000, "78428693")]
    #[case("sha512", 59, "69342147")]
    #[case("sha512", 1111111109, "63049338")]
    #[case("sha512", 1111111111, "54380122")]
    #[case("sha512", 1234567890, "76671578")]
    #[case("sha512", 2000000000, "56464532")]
    #[case("sha1", 20000000000, "353130")]
    #[case("sha256", 20000000000, "142410")]
    #[case("sha512", 20000000000, "481994")]
    fn totp_vectors(
        #[case] hash: OtpHashAlgorithm,
        #[case] timestamp: u64,
        #[case] expected: &str,
    ) {
        let mut totp = Totp::new(RFC_SECRET.to_string());
        totp.with_algorithm(hash).with_digits(expected.len() as u32);

        assert_eq!(expected, totp.generate(timestamp).unwrap().to_string());
    }

    #[test]
    fn generation_is_deterministic_within_a_step() {
        let totp = Totp::new(RFC_SECRET.to_string());

        assert_eq!(
            totp.generate(1111111109).unwrap(),
            totp.generate(1111111109).unwrap()
        );
        // 1111111100..1111111109 share the same 30-second step
        assert_eq!(
            totp.generate(1111111100).unwrap(),
            totp.generate(1111111109).unwrap()
        );
    }

    #[rstest]
    #[case(-1, "755224")]
    #[case(0, "287082")]
    #[case(1, "359152")]
    fn offset_moves_the_counter_by_whole_steps(#[case] offset: i64, #[case] expected: &str) {
        // At t=59 the counter is 1, so the offsets hit counters 0, 1 and 2,
        // matching the RFC 4226 table
        let totp = Totp::new(RFC_SECRET.to_string());

        assert_eq!(
            expected,
            totp.generate_with_offset(59, offset).unwrap().to_string()
        );
    }

    #[test]
    fn offset_saturates_at_the_epoch() {
        let totp = Totp::new(RFC_SECRET.to_string());

        assert_eq!(
            totp.generate(0).unwrap(),
            totp.generate_with_offset(29, -5).unwrap()
        );
    }

    #[rstest]
    #[case("755224", Some(-1))]
    #[case("287082", Some(0))]
    #[case("359152", Some(1))]
    #[case("969429", None)]
    #[case("123456", None)]
    fn validate_window_finds_adjacent_codes(
        #[case] candidate: &str,
        #[case] expected: Option<i64>,
    ) {
        let totp = Totp::new(RFC_SECRET.to_string());

        assert_eq!(expected, totp.validate_window(candidate, 59, 1, 1).unwrap());
    }

    #[test]
    fn remaining_seconds_counts_down_to_rotation() {
        let totp = Totp::new(RFC_SECRET.to_string());

        assert_eq!(1, totp.remaining_seconds(59));
        assert_eq!(30, totp.remaining_seconds(60));
        assert_eq!(15, totp.remaining_seconds(75));
    }

    #[test]
    fn invalid_digits_are_rejected() {
        let mut totp = Totp::new(RFC_SECRET.to_string());
        totp.with_digits(5);

        assert!(matches!(totp.generate(59), Err(OtpError::InvalidDigits(5))));
    }

    #[test]
    fn short_secret_is_rejected() {
        let totp = Totp::new("ABCDEFGHIJ".to_string());

        assert!(matches!(
            totp.generate(59),
            Err(OtpError::InvalidSecretLength(10))
        ));
    }

    #[test]
    fn secret_outside_the_alphabet_is_rejected() {
        let totp = Totp::new("1BCDEFGHIJKLMNOP".to_string());

        assert!(matches!(
            totp.generate(59),
            Err(OtpError::InvalidSecretAlphabet('1'))
        ));
    }

    #[test]
    fn zero_period_is_rejected() {
        let mut totp = Totp::new(RFC_SECRET.to_string());
        totp.with_period(0);

        assert!(matches!(totp.generate(59), Err(OtpError::InvalidPeriod)));
    }
}
