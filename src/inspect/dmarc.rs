use tracing::{debug, warn};

use super::resolver::{DnsLookup, fqdn, normalize_name};

/// Upper bound on the names queried while chasing `_dmarc` aliases.
pub const MAX_DMARC_HOPS: usize = 10;

pub(crate) const DMARC_VERSION: &str = "v=DMARC1";

/// Find the DMARC record published for `domain`.
///
/// Queries TXT at `_dmarc.<domain>` and, when no `v=DMARC1` record is
/// there, follows the name's CNAME to the next candidate. Stops at the first
/// matching record, on any lookup failure, on a missing or self-referencing
/// alias, or after [`MAX_DMARC_HOPS`] names. Returns `None` in every case
/// but the first.
pub fn resolve_dmarc<R>(resolver: &R, domain: &str) -> Option<String>
where
    R: DnsLookup + ?Sized,
{
    let mut name = fqdn("_dmarc", domain);

    for hop in 0..MAX_DMARC_HOPS {
        let records = match resolver.lookup_txt(&name) {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "DMARC TXT lookup failed");
                return None;
            }
        };

        if let Some(record) = records
            .into_iter()
            .find(|record| record.starts_with(DMARC_VERSION))
        {
            return Some(record);
        }

        let target = match resolver.lookup_cname(&name) {
            Ok(Some(target)) => normalize_name(&target),
            Ok(None) => {
                debug!(%name, "no DMARC record and no alias");
                return None;
            }
            Err(err) => {
                warn!(%err, "DMARC CNAME lookup failed");
                return None;
            }
        };

        if target.eq_ignore_ascii_case(&name) {
            debug!(%name, "DMARC alias points to itself");
            return None;
        }

        debug!(hop, from = %name, to = %target, "following DMARC alias");
        name = target;
    }

    debug!(%domain, "DMARC alias chain exceeded {MAX_DMARC_HOPS} names");
    None
}
