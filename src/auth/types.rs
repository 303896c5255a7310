use std::fmt;

/// One labeled piece of information extracted from an SPF, DMARC or DKIM
/// TXT record.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedField {
    pub label: &'static str,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
}

impl ParsedField {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: Some(value.into()),
        }
    }

    pub fn flag(label: &'static str) -> Self {
        Self { label, value: None }
    }
}

impl fmt::Display for ParsedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {value}", self.label),
            None => f.write_str(self.label),
        }
    }
}
