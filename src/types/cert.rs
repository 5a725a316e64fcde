use crate::error::{AppResult, ErrorReason};
use num_bigint::BigUint;
use pem::{EncodeConfig, LineEnding, Pem};
use sha2::{Digest, Sha256};
use std::{
    fmt::{Display, Formatter},
    ops::Deref,
};
use x509_certificate::X509Certificate;

use super::canonical_subject;

pub const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// A decoded root certificate together with the identity used to match it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateRecord {
    der: Vec<u8>,
    certificate: X509Certificate,
    subject: String,
    fingerprint: String,
}

impl CertificateRecord {
    /// Decodes `der` and derives its canonical subject and SHA-256 fingerprint.
    ///
    /// The fingerprint is taken over the bytes as given, not a re-encoding.
    pub fn from_der(der: Vec<u8>) -> AppResult<Self> {
        let certificate = X509Certificate::from_der(&der)?;
        let subject = {
            let (_, parsed) = x509_parser::parse_x509_certificate(&der)
                .map_err(|e| ErrorReason::Subject(e.to_string()))?;
            canonical_subject(parsed.subject())?
        };
        let fingerprint = hex::encode(Sha256::digest(&der));

        Ok(Self {
            der,
            certificate,
            subject,
            fingerprint,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Lower-case hex SHA-256 of the DER encoding.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn serial_number(&self) -> BigUint {
        let number = &self.certificate.as_ref().tbs_certificate.serial_number;
        BigUint::from_bytes_be(number.as_slice())
    }

    pub fn to_pem(&self) -> String {
        let pem = Pem::new(CERTIFICATE_TAG, self.der.clone());
        pem::encode_config(
            &pem,
            EncodeConfig::new().set_line_ending(LineEnding::LF),
        )
    }
}

impl Deref for CertificateRecord {
    type Target = X509Certificate;

    fn deref(&self) -> &Self::Target {
        &self.certificate
    }
}

impl Display for CertificateRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", &self.subject, &self.fingerprint)
    }
}
