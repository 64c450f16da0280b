//! Domain name value type
//!
//! A parsed, normalized domain name split into its label and TLD suffix.

use serde::Serialize;

/// A parsed domain name such as `crypto.ai`.
///
/// `label` is the lowercase segment before the first `.`; `tld` is everything
/// from that separator on, separator included (`.ai`, `.co.uk`).
/// Only the Lexical Analyzer constructs these, so the invariants hold for
/// every value in circulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DomainName {
    label: String,
    tld: String,
}

impl DomainName {
    pub(crate) fn from_parts(label: String, tld: String) -> Self {
        Self { label, tld }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }
}

impl std::fmt::Display for DomainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.label, self.tld)
    }
}

impl std::str::FromStr for DomainName {
    type Err = crate::error::ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::app::lexical::parse_domain(s)
    }
}
