//! Human-readable rendering of a [`DomainQueryResult`].

use std::io::{self, BufRead, Write};

use crate::auth::{ParsedField, parse_dkim, parse_dmarc, parse_spf};
use crate::inspect::{DKIM_SELECTORS, DMARC_VERSION, DomainQueryResult, SPF_VERSION};

const RULE: &str = "----------------------";

/// A result together with the fields parsed out of its SPF, DMARC and DKIM
/// records. Built right before printing and thrown away afterwards.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub result: &'a DomainQueryResult,
    pub spf_fields: Vec<ParsedField>,
    pub dmarc_fields: Vec<ParsedField>,
    pub dkim: Vec<DkimSection<'a>>,
    /// Apex TXT records that are neither SPF nor DMARC.
    pub other_txt: Vec<&'a str>,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct DkimSection<'a> {
    pub selector: &'static str,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub record: Option<&'a str>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub fields: Vec<ParsedField>,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a DomainQueryResult) -> Self {
        let spf_fields = result.spf.as_deref().map(parse_spf).unwrap_or_default();
        let dmarc_fields = result.dmarc.as_deref().map(parse_dmarc).unwrap_or_default();

        let dkim = DKIM_SELECTORS
            .iter()
            .map(|&selector| {
                let record = result.dkim.get(selector).map(String::as_str);
                DkimSection {
                    selector,
                    record,
                    fields: record.map(parse_dkim).unwrap_or_default(),
                }
            })
            .collect();

        let other_txt = result
            .txt
            .iter()
            .map(String::as_str)
            .filter(|record| {
                !record.starts_with(SPF_VERSION) && !record.starts_with(DMARC_VERSION)
            })
            .collect();

        Self {
            result,
            spf_fields,
            dmarc_fields,
            dkim,
            other_txt,
        }
    }
}

pub fn render_human<W: Write>(report: &Report<'_>, out: &mut W) -> io::Result<()> {
    let result = report.result;
    writeln!(out, "{RULE} Results for {} {RULE}", result.domain)?;

    writeln!(out, "MX: {}", yes_no(result.has_mx()))?;
    for mx in &result.mx {
        writeln!(out, "  {} {}", mx.preference, mx.exchange)?;
    }

    writeln!(out, "SPF: {}", yes_no(result.has_spf()))?;
    if let Some(record) = &result.spf {
        write_record(out, "  ", record, &report.spf_fields)?;
    }

    writeln!(out, "DMARC: {}", yes_no(result.has_dmarc()))?;
    if let Some(record) = &result.dmarc {
        write_record(out, "  ", record, &report.dmarc_fields)?;
    }

    writeln!(out, "DKIM:")?;
    for section in &report.dkim {
        match section.record {
            Some(record) => {
                writeln!(out, "  {}: {record}", section.selector)?;
                for field in &section.fields {
                    writeln!(out, "    {field}")?;
                }
            }
            None => writeln!(out, "  {}: not found", section.selector)?,
        }
    }

    writeln!(out, "A: {}", join_or_none(&result.a))?;
    writeln!(out, "AAAA: {}", join_or_none(&result.aaaa))?;
    writeln!(out, "NS: {}", join_or_none(&result.ns))?;
    writeln!(out, "Other TXT records: {}", report.other_txt.len())?;
    writeln!(out, "{RULE} END {RULE}")
}

pub fn render_extra_txt<W: Write>(report: &Report<'_>, out: &mut W) -> io::Result<()> {
    for record in &report.other_txt {
        writeln!(out, "  {record}")?;
    }
    Ok(())
}

/// Ask a yes/no question on `output` and read the answer from one line of
/// `input`. End of input counts as "no".
pub fn confirm<R, W>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn write_record<W: Write>(
    out: &mut W,
    indent: &str,
    record: &str,
    fields: &[ParsedField],
) -> io::Result<()> {
    writeln!(out, "{indent}Record: {record}")?;
    for field in fields {
        writeln!(out, "{indent}{field}")?;
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}
