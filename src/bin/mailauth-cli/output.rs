use std::io::{BufRead, Write};

use anyhow::{Context, Result};
#[cfg(not(feature = "with-serde"))]
use anyhow::bail;
use mailauth_lib::{DomainQueryResult, Report, confirm, render_extra_txt, render_human};

use crate::args::{Cli, Format, ShowTxt};

pub fn write_report<R, W>(
    result: &DomainQueryResult,
    cli: &Cli,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let report = Report::new(result);
    match cli.format {
        Format::Human => write_human(&report, cli.show_txt, input, out),
        Format::Json => write_json(&report, out),
    }
}

fn write_human<R, W>(
    report: &Report<'_>,
    show_txt: ShowTxt,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    render_human(report, out).context("write report")?;

    let count = report.other_txt.len();
    if count == 0 {
        writeln!(out)?;
        return Ok(());
    }

    let reveal = match show_txt {
        ShowTxt::Always => true,
        ShowTxt::Never => false,
        ShowTxt::Ask => {
            let prompt = format!("Show {count} other TXT record(s)?");
            confirm(&prompt, input, out).context("read TXT reveal answer")?
        }
    };
    if reveal {
        render_extra_txt(report, out).context("write TXT records")?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_json<W: Write>(report: &Report<'_>, out: &mut W) -> Result<()> {
    let s = serde_json::to_string_pretty(report)?;
    writeln!(out, "{s}")?;
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json<W: Write>(_: &Report<'_>, _: &mut W) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}
