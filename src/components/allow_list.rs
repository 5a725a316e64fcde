use crate::types::CertificateRecord;
use lazy_static::lazy_static;
use std::collections::HashSet;

/// Subjects of the root CAs the mobile runtime is willing to trust.
///
/// A certificate must be both currently trusted by the vendor and listed
/// here to be bundled.
pub const TRUSTED_CA_SUBJECTS: &[&str] = &[
    "CN=AddTrust Class 1 CA Root,OU=AddTrust TTP Network,O=AddTrust AB,C=SE",
    "CN=AddTrust External CA Root,OU=AddTrust External TTP Network,O=AddTrust AB,C=SE",
    "CN=COMODO Certification Authority,O=COMODO CA Limited,L=Salford,ST=Greater Manchester,C=GB",
    "CN=COMODO ECC Certification Authority,O=COMODO CA Limited,L=Salford,ST=Greater Manchester,C=GB",
    "CN=COMODO RSA Certification Authority,O=COMODO CA Limited,L=Salford,ST=Greater Manchester,C=GB",
    "CN=DigiCert Global Root CA,OU=www.digicert.com,O=DigiCert Inc,C=US",
    "CN=DigiCert Global Root G2,OU=www.digicert.com,O=DigiCert Inc,C=US",
    "CN=DigiCert Global Root G3,OU=www.digicert.com,O=DigiCert Inc,C=US",
    "CN=DigiCert High Assurance EV Root CA,OU=www.digicert.com,O=DigiCert Inc,C=US",
    "CN=DigiCert Trusted Root G4,OU=www.digicert.com,O=DigiCert Inc,C=US",
    "CN=DST Root CA X3,O=Digital Signature Trust Co.",
    "CN=DST Root CA X4,O=Digital Signature Trust Co.",
    "CN=ISRG Root X1,O=Internet Security Research Group,C=US",
    "CN=GlobalSign Root CA,OU=Root CA,O=GlobalSign nv-sa,C=BE",
    "CN=GlobalSign,OU=GlobalSign ECC Root CA - R4,O=GlobalSign",
    "CN=GlobalSign,OU=GlobalSign ECC Root CA - R5,O=GlobalSign",
    "CN=GlobalSign,OU=GlobalSign Root CA - R2,O=GlobalSign",
    "CN=GlobalSign,OU=GlobalSign Root CA - R3,O=GlobalSign",
    r"OU=Go Daddy Class 2 Certification Authority,O=The Go Daddy Group\, Inc.,C=US",
    r"CN=Go Daddy Root Certificate Authority - G2,O=GoDaddy.com\, Inc.,L=Scottsdale,ST=Arizona,C=US",
];

lazy_static! {
    pub static ref TRUSTED_CAS: AllowList = TRUSTED_CA_SUBJECTS.iter().copied().collect();
}

/// A fixed set of canonical subject strings, compared by exact equality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowList {
    subjects: HashSet<String>,
}

impl AllowList {
    pub fn contains(&self, subject: &str) -> bool {
        self.subjects.contains(subject)
    }

    /// Keeps the allowed certificates, preserving their relative order.
    pub fn filter<'a, I>(&self, certificates: I) -> Vec<&'a CertificateRecord>
    where
        I: IntoIterator<Item = &'a CertificateRecord>,
    {
        certificates
            .into_iter()
            .filter(|cert| self.contains(cert.subject()))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            subjects: iter.into_iter().map(Into::into).collect(),
        }
    }
}
