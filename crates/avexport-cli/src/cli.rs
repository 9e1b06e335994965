// File: crates/avexport-cli/src/cli.rs
// Summary: Command-line arguments.

use std::path::PathBuf;

use avexport_core::ExportFormat;
use clap::Parser;

/// Export media-analysis results as listings, table documents, charts and a report.
#[derive(Debug, Parser)]
#[command(name = "avexport", version, about, long_about = None)]
pub struct Cli {
    /// Analysis result (JSON); repeat to export several sources in turn
    #[arg(short, long = "input", value_name = "FILE", required_unless_present = "list_artifacts")]
    pub input: Vec<PathBuf>,

    /// Directory receiving the exported files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Output format: txt, csv, csvfr, xlsx, sqlite, xml, json, html, graphic
    #[arg(short, long = "format", value_name = "FMT")]
    pub format: Vec<ExportFormat>,

    /// Export one artifact only, as `<artifact>.<kind>:<dest>`; `-` writes to stdout
    #[arg(long, value_name = "NAME:DEST")]
    pub single_export: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print every exportable artifact name with its engine, then exit
    #[arg(long)]
    pub list_artifacts: bool,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_inputs_and_formats() {
        let args = ["avexport", "-i", "a.json", "-i", "b.json", "-f", "csvfr", "-f", "HTML", "-vv"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.input.len(), 2);
        assert_eq!(cli.format, ["csvfr".parse().unwrap(), ExportFormat::Html]);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn input_is_required_unless_listing() {
        assert!(Cli::try_parse_from(["avexport"]).is_err());
        assert!(Cli::try_parse_from(["avexport", "--list-artifacts"]).is_ok());
        assert!(Cli::try_parse_from(["avexport", "-i", "a.json", "-f", "pdf"]).is_err());
    }
}
