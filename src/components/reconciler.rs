use crate::{
    components::FingerprintIndex,
    types::{CertificateRecord, TrustListEntry},
};

/// Outcome of matching the published trust list against the local store.
///
/// Every entry ends up in exactly one of the two lists, and `certificates`
/// keeps the order of the trust list.
#[derive(Clone, Debug, Default)]
pub struct Reconciliation<'a> {
    pub certificates: Vec<&'a CertificateRecord>,
    pub unmatched: Vec<&'a TrustListEntry>,
}

pub fn reconcile<'a>(
    entries: &'a [TrustListEntry],
    index: &'a FingerprintIndex,
) -> Reconciliation<'a> {
    let mut result = Reconciliation::default();

    for entry in entries {
        match index.get(&entry.fingerprint) {
            Some(cert) => {
                debug!("{}: {}", entry.name, cert.subject());
                result.certificates.push(cert);
            }
            None => {
                warn!("cannot find certificate: {}", entry);
                result.unmatched.push(entry);
            }
        }
    }

    result
}
