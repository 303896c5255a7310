#![forbid(unsafe_code)]
//! mailauth_lib — inspection DNS des enregistrements d'authentification e-mail
//! (MX, SPF, DMARC, DKIM, A/AAAA, NS, TXT).

pub mod auth;
pub use auth::{ParsedField, parse_dkim, parse_dmarc, parse_spf};

pub mod inspect;
pub use inspect::{
    DKIM_SELECTORS, DnsLookup, DomainQueryResult, InspectError, LookupError, MAX_DMARC_HOPS,
    MxRecord, RecordKind, build_resolver, inspect_domain, inspect_with, normalize_domain,
    resolve_dmarc,
};

pub mod report;
pub use report::{DkimSection, Report, confirm, render_extra_txt, render_human};
