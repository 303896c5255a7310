use super::ParsedField;

/// Lists the SPF mechanisms this tool knows how to describe.
///
/// Tokens are matched one by one; anything that is not an `ip4:`, `ip6:` or
/// `include:` mechanism, nor a `~all`/`-all` terminator, is skipped. That
/// includes the `v=spf1` version token.
pub fn parse_spf(record: &str) -> Vec<ParsedField> {
    record.split_whitespace().filter_map(field_from_token).collect()
}

fn field_from_token(token: &str) -> Option<ParsedField> {
    if let Some(range) = token.strip_prefix("ip4:") {
        return Some(ParsedField::new("Allowed IPv4", range));
    }
    if let Some(range) = token.strip_prefix("ip6:") {
        return Some(ParsedField::new("Allowed IPv6", range));
    }
    if let Some(domain) = token.strip_prefix("include:") {
        return Some(ParsedField::new("Include domain", domain));
    }
    match token {
        "~all" => Some(ParsedField::flag("Soft fail for all other")),
        "-all" => Some(ParsedField::flag("Hard fail for all other")),
        _ => None,
    }
}
