//! `otpauth://` provisioning URI construction (the Key URI Format consumed
//! by authenticator apps).

use crate::{OtpError, OtpHashAlgorithm};

/// Builder for an `otpauth://totp/...` URI.
///
/// Only the parameters the caller supplies end up in the query string; an
/// omitted parameter means the authenticator app's default applies. The
/// builder never decodes the secret, it only carries the base32 text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProvisioningUri {
    account: String,
    secret: String,
    algorithm: Option<OtpHashAlgorithm>,
    digits: Option<u32>,
    period: Option<u64>,
    issuer: Option<String>,
}

impl ProvisioningUri {
    /// Creates a builder with the two mandatory fields.
    pub fn new(account: String, secret: String) -> Self {
        Self {
            account,
            secret,
            ..Self::default()
        }
    }

    ///  Sets the hashing algorithm parameter
    pub fn with_algorithm(&mut self, algorithm: OtpHashAlgorithm) -> &mut Self {
        self.algorithm = Some(algorithm);

        self
    }

    ///  Sets the digits parameter
    pub fn with_digits(&mut self, digits: u32) -> &mut Self {
        self.digits = Some(digits);

        self
    }

    ///  Sets the period parameter, in seconds
    pub fn with_period(&mut self, period: u64) -> &mut Self {
        self.period = Some(period);

        self
    }

    ///  Sets the issuer, shown by authenticator apps next to the account
    pub fn with_issuer(&mut self, issuer: String) -> &mut Self {
        self.issuer = Some(issuer);

        self
    }

    /// Serializes the URI.
    ///
    /// The label is `issuer:account` when an issuer is set, else the account
    /// alone, both percent-encoded. Query parameters appear in a fixed order
    /// for reproducibility: `secret`, then `algorithm`, `digits`, `period`
    /// and `issuer`, each of the last four only when supplied.
    pub fn build(&self) -> Result<String, OtpError> {
        if self.account.is_empty() {
            return Err(OtpError::MissingRequiredField("account"));
        }

        if self.secret.is_empty() {
            return Err(OtpError::MissingRequiredField("secret"));
        }

        // The colon separates issuer from account in the label, so neither
        // side may contain one
        if self.account.contains(':')
            || self.issuer.as_deref().is_some_and(|i| i.contains(':'))
        {
            return Err(OtpError::InvalidLabelCharacter);
        }

        let mut uri = url::Url::parse("otpauth://totp/")?;

        let issuer = self.issuer.as_deref().filter(|i| !i.is_empty());

        match issuer {
            Some(issuer) => uri.set_path(&format!("{issuer}:{}", self.account)),
            None => uri.set_path(&self.account),
        }

        {
            let mut query_params = uri.query_pairs_mut();

            query_params.append_pair("secret", &self.secret);

            if let Some(algorithm) = self.algorithm {
                query_params.append_pair("algorithm", &algorithm.to_string());
            }

            if let Some(digits) = self.digits {
                query_params.append_pair("digits", &digits.to_string());
            }

            if let Some(period) = self.period {
                query_params.append_pair("period", &period.to_string());
            }

            if let Some(issuer) = issuer {
                query_params.append_pair("issuer", issuer);
            }
        }

        Ok(uri.to_string())
    }
}
