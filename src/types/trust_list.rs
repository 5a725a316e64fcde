use std::fmt::{Display, Formatter};

/// One row of the vendor's published trust list.
///
/// `name` is only ever used in diagnostics; matching goes through `fingerprint`,
/// which is already normalized to lower-case hex.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrustListEntry {
    pub name: String,
    pub fingerprint: String,
}

impl TrustListEntry {
    pub fn new(name: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fingerprint: fingerprint.into(),
        }
    }
}

impl Display for TrustListEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (fingerprint: {})", self.name, self.fingerprint)
    }
}
