use std::net::IpAddr;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "mailauth-cli", version)]
pub struct Cli {
    /// domaines à inspecter; sans argument, lit stdin (un domaine par ligne)
    pub domains: Vec<String>,

    /// format de sortie
    #[arg(long, value_enum, default_value_t = Format::Human)]
    pub format: Format,

    /// affichage des autres enregistrements TXT
    #[arg(long = "show-txt", value_enum, default_value_t = ShowTxt::Ask)]
    pub show_txt: ShowTxt,

    /// serveur DNS à interroger (par défaut: configuration système)
    #[arg(long)]
    pub nameserver: Option<IpAddr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    /// nécessite la feature `with-serde`
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShowTxt {
    Ask,
    Always,
    Never,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_read_stdin_and_ask() {
        let cli = Cli::try_parse_from(["mailauth-cli"]).unwrap();
        assert!(cli.domains.is_empty());
        assert_eq!(cli.format, Format::Human);
        assert_eq!(cli.show_txt, ShowTxt::Ask);
        assert!(cli.nameserver.is_none());
    }

    #[test]
    fn parses_flags_and_domains() {
        let cli = Cli::try_parse_from([
            "mailauth-cli",
            "--show-txt",
            "never",
            "--nameserver",
            "9.9.9.9",
            "example.com",
            "example.org",
        ])
        .unwrap();
        assert_eq!(cli.show_txt, ShowTxt::Never);
        assert_eq!(cli.nameserver, Some("9.9.9.9".parse().unwrap()));
        assert_eq!(cli.domains, vec!["example.com", "example.org"]);
    }

    #[test]
    fn rejects_bad_nameserver() {
        assert!(Cli::try_parse_from(["mailauth-cli", "--nameserver", "dns.example"]).is_err());
    }
}
