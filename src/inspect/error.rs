use std::fmt;

use thiserror::Error;
use trust_dns_resolver::error::ResolveError;

/// DNS record family a [`LookupError`] relates to.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Mx,
    Txt,
    Cname,
    Ip,
    Ns,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Mx => "MX",
            RecordKind::Txt => "TXT",
            RecordKind::Cname => "CNAME",
            RecordKind::Ip => "A/AAAA",
            RecordKind::Ns => "NS",
        })
    }
}

/// A lookup that produced no usable answer (timeout, SERVFAIL, network
/// failure, malformed response...).
///
/// Callers in this crate never propagate it: it is logged and the record set
/// is treated as empty.
#[derive(Debug, Error)]
#[error("{kind} lookup unavailable for {name}: {source}")]
pub struct LookupError {
    pub name: String,
    pub kind: RecordKind,
    #[source]
    pub source: ResolveError,
}

impl LookupError {
    pub fn new(name: impl Into<String>, kind: RecordKind, source: ResolveError) -> Self {
        Self {
            name: name.into(),
            kind,
            source,
        }
    }
}

/// Errors raised before any query is sent.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
}

impl InspectError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }
}
