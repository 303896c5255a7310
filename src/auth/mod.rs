//! Parsers turning raw SPF, DMARC and DKIM TXT payloads into labeled fields.
//!
//! These are descriptive only: nothing here evaluates a policy against a
//! sender or checks key material.

mod dkim;
mod dmarc;
mod spf;
mod types;

pub use dkim::parse_dkim;
pub use dmarc::parse_dmarc;
pub use spf::parse_spf;
pub use types::ParsedField;
