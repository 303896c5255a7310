//! DNS inspection of a single domain.
//!
//! [`inspect_domain`] normalizes the input and uses the system resolver;
//! [`inspect_with`] runs the same lookups against any [`DnsLookup`]
//! implementation and never fails.

mod dmarc;
mod error;
mod resolver;
mod types;

pub use dmarc::{MAX_DMARC_HOPS, resolve_dmarc};
pub use error::{InspectError, LookupError, RecordKind};
pub use resolver::{DnsLookup, build_resolver, normalize_domain};
pub use types::{DomainQueryResult, MxRecord};

pub(crate) use dmarc::DMARC_VERSION;

use std::net::IpAddr;

use tracing::{debug, warn};

use resolver::fqdn;

/// The only DKIM selectors probed; selectors outside this list are never
/// discovered.
pub const DKIM_SELECTORS: [&str; 4] = ["default", "google", "mail", "dkim"];

pub(crate) const SPF_VERSION: &str = "v=spf1";

pub fn inspect_domain(domain: &str) -> Result<DomainQueryResult, InspectError> {
    let ascii = normalize_domain(domain)?;
    let resolver = build_resolver(None)?;
    Ok(inspect_with(&resolver, &ascii))
}

pub fn inspect_with<R>(resolver: &R, ascii_domain: &str) -> DomainQueryResult
where
    R: DnsLookup + ?Sized,
{
    let mut result = DomainQueryResult::new(ascii_domain);

    result.mx = ignore_failure(resolver.lookup_mx(ascii_domain));
    result.mx.sort_by_key(|record| record.preference);

    result.txt = ignore_failure(resolver.lookup_txt(ascii_domain));
    result.spf = result
        .txt
        .iter()
        .find(|record| record.starts_with(SPF_VERSION))
        .cloned();

    result.dmarc = resolve_dmarc(resolver, ascii_domain);

    for selector in DKIM_SELECTORS {
        let name = fqdn(&format!("{selector}._domainkey"), ascii_domain);
        match resolver.lookup_txt(&name) {
            Ok(records) => match records.into_iter().next() {
                Some(record) => {
                    result.dkim.insert(selector.to_string(), record);
                }
                None => debug!(%name, "no DKIM record for selector"),
            },
            Err(err) => warn!(%err, "DKIM lookup skipped"),
        }
    }

    for ip in ignore_failure(resolver.lookup_ips(ascii_domain)) {
        match ip {
            IpAddr::V4(v4) => result.a.push(v4.to_string()),
            IpAddr::V6(v6) => result.aaaa.push(v6.to_string()),
        }
    }

    result.ns = ignore_failure(resolver.lookup_ns(ascii_domain));

    result
}

fn ignore_failure<T>(outcome: Result<Vec<T>, LookupError>) -> Vec<T> {
    outcome.unwrap_or_else(|err| {
        warn!(%err, "lookup ignored");
        Vec::new()
    })
}

#[cfg(test)]
mod tests;
