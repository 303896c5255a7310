use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;

use trust_dns_resolver::error::ResolveError;

use super::{
    DKIM_SELECTORS, DnsLookup, LookupError, MAX_DMARC_HOPS, MxRecord, RecordKind, inspect_with,
    resolve_dmarc,
};

#[derive(Default)]
struct StubResolver {
    mx: HashMap<String, Vec<MxRecord>>,
    txt: HashMap<String, Vec<String>>,
    cname: HashMap<String, String>,
    ips: HashMap<String, Vec<IpAddr>>,
    ns: HashMap<String, Vec<String>>,
    failing: HashSet<(String, &'static str)>,
    queried: RefCell<Vec<(&'static str, String)>>,
}

impl StubResolver {
    fn new() -> Self {
        Self::default()
    }

    fn insert_txt<I, S>(&mut self, name: &str, records: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = records.into_iter().map(Into::into).collect();
        self.txt.insert(normalize(name), values);
    }

    fn insert_cname(&mut self, name: &str, target: &str) {
        self.cname.insert(normalize(name), target.to_string());
    }

    fn fail(&mut self, name: &str, kind: &'static str) {
        self.failing.insert((normalize(name), kind));
    }

    fn record(&self, kind: &'static str, name: &str) -> Result<String, LookupError> {
        let key = normalize(name);
        self.queried.borrow_mut().push((kind, key.clone()));
        if self.failing.contains(&(key.clone(), kind)) {
            let record_kind = match kind {
                "MX" => RecordKind::Mx,
                "TXT" => RecordKind::Txt,
                "CNAME" => RecordKind::Cname,
                "IP" => RecordKind::Ip,
                _ => RecordKind::Ns,
            };
            return Err(LookupError::new(
                name,
                record_kind,
                ResolveError::from("request timed out"),
            ));
        }
        Ok(key)
    }

    fn queried(&self, kind: &'static str) -> Vec<String> {
        self.queried
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, name)| name.clone())
            .collect()
    }
}

impl DnsLookup for StubResolver {
    fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, LookupError> {
        let key = self.record("MX", name)?;
        Ok(self.mx.get(&key).cloned().unwrap_or_default())
    }

    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let key = self.record("TXT", name)?;
        Ok(self.txt.get(&key).cloned().unwrap_or_default())
    }

    fn lookup_cname(&self, name: &str) -> Result<Option<String>, LookupError> {
        let key = self.record("CNAME", name)?;
        Ok(self.cname.get(&key).cloned())
    }

    fn lookup_ips(&self, name: &str) -> Result<Vec<IpAddr>, LookupError> {
        let key = self.record("IP", name)?;
        Ok(self.ips.get(&key).cloned().unwrap_or_default())
    }

    fn lookup_ns(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let key = self.record("NS", name)?;
        Ok(self.ns.get(&key).cloned().unwrap_or_default())
    }
}

fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

#[test]
fn dmarc_found_at_apex() {
    let mut stub = StubResolver::new();
    stub.insert_txt(
        "_dmarc.example.com",
        vec!["some-verification=abc", "v=DMARC1; p=reject", "v=DMARC1; p=none"],
    );

    let record = resolve_dmarc(&stub, "example.com");
    assert_eq!(record.as_deref(), Some("v=DMARC1; p=reject"));
    assert!(stub.queried("CNAME").is_empty());
}

#[test]
fn dmarc_follows_one_alias() {
    let mut stub = StubResolver::new();
    stub.insert_cname("_dmarc.example.com", "_dmarc.example.net.");
    stub.insert_txt("_dmarc.example.net", vec!["v=DMARC1; p=quarantine"]);

    let record = resolve_dmarc(&stub, "example.com");
    assert_eq!(record.as_deref(), Some("v=DMARC1; p=quarantine"));
    assert_eq!(
        stub.queried("TXT"),
        vec!["_dmarc.example.com", "_dmarc.example.net"]
    );
}

#[test]
fn dmarc_version_prefix_is_case_sensitive() {
    let mut stub = StubResolver::new();
    stub.insert_txt("_dmarc.example.com", vec!["v=dmarc1; p=reject"]);

    assert_eq!(resolve_dmarc(&stub, "example.com"), None);
}

#[test]
fn dmarc_self_alias_stops() {
    let mut stub = StubResolver::new();
    stub.insert_cname("_dmarc.example.com", "_DMARC.example.com.");

    assert_eq!(resolve_dmarc(&stub, "example.com"), None);
    assert_eq!(stub.queried("TXT").len(), 1);
}

#[test]
fn dmarc_alias_cycle_is_bounded() {
    let mut stub = StubResolver::new();
    stub.insert_cname("_dmarc.example.com", "a.example.net");
    stub.insert_cname("a.example.net", "b.example.net");
    stub.insert_cname("b.example.net", "_dmarc.example.com");

    assert_eq!(resolve_dmarc(&stub, "example.com"), None);
    assert_eq!(stub.queried("TXT").len(), MAX_DMARC_HOPS);
}

fn alias_chain(stub: &mut StubResolver, links: usize) -> String {
    let mut current = "_dmarc.example.com".to_string();
    for hop in 1..=links {
        let next = format!("hop{hop}.example.net");
        stub.insert_cname(&current, &next);
        current = next;
    }
    current
}

#[test]
fn dmarc_record_at_last_allowed_hop_is_found() {
    let mut stub = StubResolver::new();
    let last = alias_chain(&mut stub, MAX_DMARC_HOPS - 1);
    stub.insert_txt(&last, vec!["v=DMARC1; p=reject"]);

    assert_eq!(
        resolve_dmarc(&stub, "example.com").as_deref(),
        Some("v=DMARC1; p=reject")
    );
}

#[test]
fn dmarc_record_past_hop_limit_is_not_found() {
    let mut stub = StubResolver::new();
    let last = alias_chain(&mut stub, MAX_DMARC_HOPS);
    stub.insert_txt(&last, vec!["v=DMARC1; p=reject"]);

    assert_eq!(resolve_dmarc(&stub, "example.com"), None);
    assert!(!stub.queried("TXT").contains(&last));
}

#[test]
fn dmarc_lookup_failure_is_not_retried() {
    let mut stub = StubResolver::new();
    stub.fail("_dmarc.example.com", "TXT");
    stub.insert_cname("_dmarc.example.com", "_dmarc.example.net");
    stub.insert_txt("_dmarc.example.net", vec!["v=DMARC1; p=reject"]);

    assert_eq!(resolve_dmarc(&stub, "example.com"), None);
    assert_eq!(stub.queried("TXT"), vec!["_dmarc.example.com"]);
    assert!(stub.queried("CNAME").is_empty());
}

#[test]
fn dmarc_cname_failure_means_not_found() {
    let mut stub = StubResolver::new();
    stub.fail("_dmarc.example.com", "CNAME");

    assert_eq!(resolve_dmarc(&stub, "example.com"), None);
}

#[test]
fn inspect_empty_domain_yields_empty_result() {
    let stub = StubResolver::new();
    let result = inspect_with(&stub, "empty.example");

    assert_eq!(result.domain, "empty.example");
    assert!(!result.has_mx());
    assert!(!result.has_spf());
    assert!(!result.has_dmarc());
    assert!(result.dkim.is_empty());
    assert!(result.a.is_empty() && result.aaaa.is_empty());
    assert!(result.ns.is_empty());
    assert!(result.txt.is_empty());
}

#[test]
fn inspect_survives_every_lookup_failing() {
    let mut stub = StubResolver::new();
    for kind in ["MX", "TXT", "CNAME", "IP", "NS"] {
        stub.fail("broken.example", kind);
        stub.fail("_dmarc.broken.example", kind);
    }
    for selector in DKIM_SELECTORS {
        stub.fail(&format!("{selector}._domainkey.broken.example"), "TXT");
    }

    let result = inspect_with(&stub, "broken.example");
    assert_eq!(result, super::DomainQueryResult::new("broken.example"));
}

#[test]
fn inspect_combines_findings() {
    let mut stub = StubResolver::new();
    stub.mx.insert(
        "example.com".to_string(),
        vec![
            MxRecord::new(20, "mx2.example.com"),
            MxRecord::new(10, "mx1.example.com"),
            MxRecord::new(20, "mx3.example.com"),
            MxRecord::new(10, "mx1.example.com"),
        ],
    );
    stub.insert_txt(
        "example.com",
        vec![
            "google-site-verification=xyz",
            "v=spf1 include:_spf.google.com ~all",
            "v=spf1 -all",
        ],
    );
    stub.insert_txt("_dmarc.example.com", vec!["v=DMARC1; p=none"]);
    stub.insert_txt(
        "google._domainkey.example.com",
        vec!["v=DKIM1; k=rsa; p=MIIBIjANBgkqhkiG9w0BAQEFAAOC", "v=DKIM1; p=other"],
    );
    stub.ips.insert(
        "example.com".to_string(),
        vec![
            "2001:db8::1".parse().unwrap(),
            "192.0.2.10".parse().unwrap(),
            "192.0.2.11".parse().unwrap(),
        ],
    );
    stub.ns.insert(
        "example.com".to_string(),
        vec!["ns1.example.net".to_string(), "ns2.example.net".to_string()],
    );

    let result = inspect_with(&stub, "example.com");

    let mx: Vec<(u16, &str)> = result
        .mx
        .iter()
        .map(|r| (r.preference, r.exchange.as_str()))
        .collect();
    assert_eq!(
        mx,
        vec![
            (10, "mx1.example.com"),
            (10, "mx1.example.com"),
            (20, "mx2.example.com"),
            (20, "mx3.example.com"),
        ]
    );
    assert_eq!(
        result.spf.as_deref(),
        Some("v=spf1 include:_spf.google.com ~all")
    );
    assert_eq!(result.dmarc.as_deref(), Some("v=DMARC1; p=none"));
    assert_eq!(result.dkim.len(), 1);
    assert_eq!(
        result.dkim.get("google").map(String::as_str),
        Some("v=DKIM1; k=rsa; p=MIIBIjANBgkqhkiG9w0BAQEFAAOC")
    );
    assert_eq!(result.a, vec!["192.0.2.10", "192.0.2.11"]);
    assert_eq!(result.aaaa, vec!["2001:db8::1"]);
    assert_eq!(result.ns, vec!["ns1.example.net", "ns2.example.net"]);
    assert_eq!(result.txt.len(), 3);
}

#[test]
fn dkim_probes_only_fixed_selectors() {
    let mut stub = StubResolver::new();
    stub.insert_txt("s1._domainkey.example.com", vec!["v=DKIM1; p=ABC"]);
    stub.insert_txt("mail._domainkey.example.com", vec!["v=DKIM1; p=DEF"]);
    stub.fail("default._domainkey.example.com", "TXT");

    let result = inspect_with(&stub, "example.com");

    assert_eq!(result.dkim.keys().collect::<Vec<_>>(), vec!["mail"]);
    let probed: Vec<String> = stub
        .queried("TXT")
        .into_iter()
        .filter(|name| name.contains("._domainkey."))
        .collect();
    assert_eq!(
        probed,
        vec![
            "default._domainkey.example.com",
            "google._domainkey.example.com",
            "mail._domainkey.example.com",
            "dkim._domainkey.example.com",
        ]
    );
}
