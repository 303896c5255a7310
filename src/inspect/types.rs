use std::collections::BTreeMap;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Everything gathered for one domain. Lookups that failed simply leave their
/// part empty.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainQueryResult {
    pub domain: String,
    /// Ascending preference; records sharing a preference keep resolver order.
    pub mx: Vec<MxRecord>,
    pub spf: Option<String>,
    pub dmarc: Option<String>,
    /// First TXT record found for each probed selector.
    pub dkim: BTreeMap<String, String>,
    pub a: Vec<String>,
    pub aaaa: Vec<String>,
    pub ns: Vec<String>,
    pub txt: Vec<String>,
}

impl DomainQueryResult {
    pub(crate) fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    pub fn has_mx(&self) -> bool {
        !self.mx.is_empty()
    }

    pub fn has_spf(&self) -> bool {
        self.spf.is_some()
    }

    pub fn has_dmarc(&self) -> bool {
        self.dmarc.is_some()
    }
}
