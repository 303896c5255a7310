use super::ParsedField;

/// Number of public-key characters kept when describing a DKIM record.
const PUBLIC_KEY_PREVIEW_CHARS: usize = 20;

/// Splits a DKIM key record on `;` and describes its version, key type,
/// algorithm and a shortened public key.
pub fn parse_dkim(record: &str) -> Vec<ParsedField> {
    let mut fields = Vec::new();
    for part in record.split(';') {
        let trimmed = part.trim();
        let Some((name, value)) = trimmed.split_once('=') else {
            continue;
        };
        match name {
            "v" => fields.push(ParsedField::new("Version", value)),
            "k" => fields.push(ParsedField::new("Key type", value)),
            "a" => fields.push(ParsedField::new("Algorithm", value)),
            "p" => fields.push(ParsedField::new("Public key", preview_key(value))),
            _ => {}
        }
    }
    fields
}

// keys shorter than the preview length are shown whole
fn preview_key(key: &str) -> String {
    if key.chars().count() < PUBLIC_KEY_PREVIEW_CHARS {
        return key.to_string();
    }
    let preview: String = key.chars().take(PUBLIC_KEY_PREVIEW_CHARS).collect();
    format!("{preview}...")
}
