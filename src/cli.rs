//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pdf-gateway",
    version,
    about = "HTML-to-PDF conversion gateway backed by a Gotenberg-compatible service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP gateway
    Serve(ServeArgs),
    /// Convert one document and write the PDF to disk
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listening port (overrides the config file and PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Bind address (overrides the config file)
    #[arg(long)]
    pub bind: Option<String>,

    /// Explicit config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Raw HTML file to convert (raw mode)
    #[arg(long, conflicts_with_all = ["header", "body", "footer"])]
    pub input: Option<PathBuf>,

    /// Document header text (templated mode)
    #[arg(long)]
    pub header: Option<String>,

    /// Document body text (templated mode)
    #[arg(long)]
    pub body: Option<String>,

    /// Document footer text (templated mode)
    #[arg(long)]
    pub footer: Option<String>,

    /// Output PDF path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Explicit config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["pdf-gateway", "serve", "--port", "8088"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(8088)),
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_parse_convert_templated() {
        let cli = Cli::try_parse_from([
            "pdf-gateway",
            "convert",
            "--header",
            "Invoice",
            "--body",
            "Total: $10",
            "--output",
            "out.pdf",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.header.as_deref(), Some("Invoice"));
                assert_eq!(args.output, PathBuf::from("out.pdf"));
                assert!(args.input.is_none());
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_convert_input_conflicts_with_fields() {
        let result = Cli::try_parse_from([
            "pdf-gateway",
            "convert",
            "--input",
            "page.html",
            "--header",
            "H",
            "--output",
            "out.pdf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_requires_output() {
        let result = Cli::try_parse_from(["pdf-gateway", "convert", "--header", "H"]);
        assert!(result.is_err());
    }
}
