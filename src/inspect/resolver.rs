use std::net::IpAddr;

use trust_dns_resolver::{
    Resolver,
    config::{LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    lookup::TxtLookup,
    proto::rr::{RData, RecordType},
    system_conf::read_system_conf,
};

use super::{InspectError, LookupError, MxRecord, RecordKind};

/// The DNS queries the inspector relies on.
///
/// An empty answer is `Ok` with nothing in it; every other failure is a
/// [`LookupError`].
pub trait DnsLookup {
    fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, LookupError>;
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError>;
    /// Alias target of `name`, if it is a CNAME.
    fn lookup_cname(&self, name: &str) -> Result<Option<String>, LookupError>;
    fn lookup_ips(&self, name: &str) -> Result<Vec<IpAddr>, LookupError>;
    fn lookup_ns(&self, name: &str) -> Result<Vec<String>, LookupError>;
}

/// Build a blocking resolver from the system configuration, or pointed at a
/// single name server (plain UDP/TCP on port 53) when one is given.
pub fn build_resolver(nameserver: Option<IpAddr>) -> Result<Resolver, InspectError> {
    let (config, opts) = match nameserver {
        None => read_system_conf().map_err(InspectError::resolver_init)?,
        Some(ip) => {
            let group = NameServerConfigGroup::from_ips_clear(&[ip], 53, true);
            let config = ResolverConfig::from_parts(None, Vec::new(), group);
            (config, ResolverOpts::default())
        }
    };
    Resolver::new(config, lookup_opts(opts)).map_err(InspectError::resolver_init)
}

// A and AAAA are both wanted: the default strategy stops after IPv4.
fn lookup_opts(mut opts: ResolverOpts) -> ResolverOpts {
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    opts
}

/// Trim the user input, drop a trailing root dot and convert to ASCII.
pub fn normalize_domain(domain: &str) -> Result<String, InspectError> {
    let trimmed = domain.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(InspectError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(InspectError::idna)
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

pub(crate) fn fqdn(label: &str, domain: &str) -> String {
    let trimmed = label.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", trimmed.to_ascii_lowercase(), domain)
    }
}

impl DnsLookup for Resolver {
    fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, LookupError> {
        let lookup = match Resolver::mx_lookup(self, name) {
            Ok(lookup) => lookup,
            Err(err) => return empty_or_fail(name, RecordKind::Mx, err),
        };
        Ok(lookup
            .iter()
            .map(|mx| {
                MxRecord::new(mx.preference(), normalize_name(&mx.exchange().to_utf8()))
            })
            .collect())
    }

    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        match Resolver::txt_lookup(self, name) {
            Ok(lookup) => Ok(collect_txt_records(&lookup)),
            Err(err) => empty_or_fail(name, RecordKind::Txt, err),
        }
    }

    fn lookup_cname(&self, name: &str) -> Result<Option<String>, LookupError> {
        let lookup = match Resolver::lookup(self, name, RecordType::CNAME) {
            Ok(lookup) => lookup,
            Err(err) => {
                return if should_treat_as_empty(&err) {
                    Ok(None)
                } else {
                    Err(LookupError::new(name, RecordKind::Cname, err))
                };
            }
        };
        let target = lookup.iter().find_map(|rdata| match rdata {
            RData::CNAME(cname) => Some(normalize_name(&cname.to_utf8())),
            _ => None,
        });
        Ok(target)
    }

    fn lookup_ips(&self, name: &str) -> Result<Vec<IpAddr>, LookupError> {
        match Resolver::lookup_ip(self, name) {
            Ok(lookup) => Ok(lookup.iter().collect()),
            Err(err) => empty_or_fail(name, RecordKind::Ip, err),
        }
    }

    fn lookup_ns(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let lookup = match Resolver::ns_lookup(self, name) {
            Ok(lookup) => lookup,
            Err(err) => return empty_or_fail(name, RecordKind::Ns, err),
        };
        Ok(lookup
            .iter()
            .map(|ns| normalize_name(&ns.to_utf8()))
            .collect())
    }
}

// TXT strings longer than 255 bytes arrive split; they are joined back
// without separator. Non UTF-8 bytes are replaced rather than rejected.
fn collect_txt_records(lookup: &TxtLookup) -> Vec<String> {
    let mut records = Vec::new();
    for txt in lookup.iter() {
        let mut record = String::new();
        for piece in txt.txt_data().iter() {
            record.push_str(&String::from_utf8_lossy(piece));
        }
        records.push(record);
    }
    records
}

fn empty_or_fail<T>(
    name: &str,
    kind: RecordKind,
    err: ResolveError,
) -> Result<Vec<T>, LookupError> {
    if should_treat_as_empty(&err) {
        Ok(Vec::new())
    } else {
        Err(LookupError::new(name, kind, err))
    }
}

fn should_treat_as_empty(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}
