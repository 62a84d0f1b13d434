//! CLI argument definitions for the spreadsheet importer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sheet-import",
    version,
    about = "Reconcile spreadsheet headers and validate rows before import",
    long_about = "Match spreadsheet headers (Arabic or English, any spelling) against an \
                  import profile, then validate and transform the rows.\n\n\
                  Nothing is written anywhere; the command reports what an import would do."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the fields of an import profile.
    Fields(ProfileArgs),

    /// Print a blank import template (header row and example row) as CSV.
    Template(ProfileArgs),

    /// Match the headers of a CSV file against a profile.
    Match(MatchArgs),

    /// Match, validate and gate the rows of a CSV file.
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Built-in profile to use.
    #[arg(long = "profile", value_enum, default_value = "property")]
    pub profile: ProfileArg,

    /// Load the profile from a TOML file instead of a built-in one.
    #[arg(long = "profile-file", value_name = "PATH", conflicts_with = "profile")]
    pub profile_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct MatchArgs {
    /// CSV file whose first row holds the headers.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub source: ProfileArgs,

    /// Minimum similarity for a header to be matched automatically.
    #[arg(long = "min-confidence", value_name = "SCORE", default_value_t = 0.7)]
    pub min_confidence: f64,

    /// Print machine-readable JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub matching: MatchArgs,

    /// Override a mapping: `HEADER=FIELD`. An empty FIELD unmaps the header.
    #[arg(long = "map", value_name = "HEADER=FIELD", value_parser = parse_override)]
    pub overrides: Vec<MappingOverride>,

    /// Import valid rows even when other rows have errors.
    #[arg(long = "allow-partial")]
    pub allow_partial: bool,

    /// Report all-empty rows as errors instead of skipping them.
    #[arg(long = "keep-blank-rows")]
    pub keep_blank_rows: bool,

    /// File row number of the first data row.
    #[arg(long = "first-data-row", value_name = "N", default_value_t = 2)]
    pub first_data_row: usize,
}

/// A `--map` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOverride {
    pub header: String,
    /// `None` clears the header's mapping.
    pub field: Option<String>,
}

fn parse_override(raw: &str) -> Result<MappingOverride, String> {
    let (header, field) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected HEADER=FIELD, got '{raw}'"))?;
    let header = header.trim();
    if header.is_empty() {
        return Err(format!("missing header in '{raw}'"));
    }
    let field = field.trim();
    Ok(MappingOverride {
        header: header.to_string(),
        field: (!field.is_empty()).then(|| field.to_string()),
    })
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    Property,
    Customer,
}

impl ProfileArg {
    pub fn name(self) -> &'static str {
        match self {
            ProfileArg::Property => "property",
            ProfileArg::Customer => "customer",
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_overrides() {
        assert_eq!(
            parse_override("السعر بالريال = price"),
            Ok(MappingOverride {
                header: "السعر بالريال".to_string(),
                field: Some("price".to_string()),
            })
        );
        assert_eq!(
            parse_override("Notes="),
            Ok(MappingOverride {
                header: "Notes".to_string(),
                field: None,
            })
        );
        assert!(parse_override("price").is_err());
        assert!(parse_override("=price").is_err());
    }

    #[test]
    fn validate_accepts_repeated_maps() {
        let cli = Cli::try_parse_from([
            "sheet-import",
            "validate",
            "rows.csv",
            "--map",
            "Prop Type=property_type",
            "--map",
            "Listing=listing_type",
            "--allow-partial",
        ])
        .expect("parse");
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.overrides.len(), 2);
        assert!(args.allow_partial);
        assert!(!args.keep_blank_rows);
        assert_eq!(args.first_data_row, 2);
        assert_eq!(args.matching.min_confidence, 0.7);
    }
}
