use phf::phf_map;

use super::ParsedField;

#[derive(Clone, Copy)]
enum DmarcTag {
    Plain(&'static str),
    Alignment {
        label: &'static str,
        relaxed: &'static str,
        strict: &'static str,
    },
}

static DMARC_TAGS: phf::Map<&'static str, DmarcTag> = phf_map! {
    "p" => DmarcTag::Plain("Policy"),
    "sp" => DmarcTag::Plain("Subdomain Policy"),
    "pct" => DmarcTag::Plain("Percent"),
    "rua" => DmarcTag::Plain("Aggregate reports"),
    "ruf" => DmarcTag::Plain("Forensic reports"),
    "fo" => DmarcTag::Plain("Failure reporting options"),
    "adkim" => DmarcTag::Alignment {
        label: "DKIM Alignment",
        relaxed: "Relaxed",
        strict: "Strict",
    },
    "aspf" => DmarcTag::Alignment {
        label: "SPF Alignment",
        relaxed: "relaxed",
        strict: "strict",
    },
};

/// Splits a DMARC record on `;` and describes the tags it recognises.
///
/// The `v=` tag and unknown tags produce no field.
pub fn parse_dmarc(record: &str) -> Vec<ParsedField> {
    record
        .split(';')
        .map(str::trim)
        .filter_map(field_from_segment)
        .collect()
}

fn field_from_segment(segment: &str) -> Option<ParsedField> {
    // the tag name is taken verbatim: "p =reject" is not a policy tag
    let (name, value) = segment.split_once('=')?;
    let field = match *DMARC_TAGS.get(name)? {
        DmarcTag::Plain(label) => ParsedField::new(label, value),
        DmarcTag::Alignment {
            label,
            relaxed,
            strict,
        } => {
            let mode = match value {
                "r" => relaxed,
                "s" => strict,
                other => other,
            };
            ParsedField::new(label, mode)
        }
    };
    Some(field)
}
