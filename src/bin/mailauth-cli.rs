#[path = "mailauth-cli/args.rs"]
mod args;
#[path = "mailauth-cli/output.rs"]
mod output;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use mailauth_lib::{DnsLookup, build_resolver, inspect_with, normalize_domain};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "mailauth_lib=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let resolver = build_resolver(cli.nameserver).context("build DNS resolver")?;
    info!(nameserver = ?cli.nameserver, "resolver ready");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.domains.is_empty() {
        for domain in &cli.domains {
            check_line(&resolver, domain, &cli, &mut input, &mut out)?;
        }
        return Ok(());
    }

    writeln!(out, "Enter a domain:")?;
    out.flush()?;
    loop {
        let mut line = String::new();
        let read = input.read_line(&mut line).context("read stdin")?;
        if read == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        check_line(&resolver, &line, &cli, &mut input, &mut out)?;
        out.flush()?;
    }
    Ok(())
}

fn check_line<L, R, W>(
    resolver: &L,
    line: &str,
    cli: &Cli,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    L: DnsLookup,
    R: BufRead,
    W: Write,
{
    let domain = match normalize_domain(line) {
        Ok(domain) => domain,
        Err(err) => {
            warn!(input = line.trim(), %err, "skipping invalid domain");
            eprintln!("[INVALID] {} :: {err}", line.trim());
            return Ok(());
        }
    };

    let result = inspect_with(resolver, &domain);
    output::write_report(&result, cli, input, out)
}
