//! CLI argument definitions for the flextab tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use flextab_report::{ColumnAlignment, ReportFormat};

#[derive(Parser)]
#[command(
    name = "flextab",
    version,
    about = "Render sparse result tables to CSV, wiki markup, LaTeX and spreadsheets",
    long_about = "Render sparse result tables to CSV, wiki markup, LaTeX and spreadsheets.\n\n\
                  Input tables are CSV files with a leading ID column. Columns whose value \n\
                  is the same in every row can be split out as a facts block."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Report configuration file (TOML with [table] and [latex] sections).
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

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
    /// Render a CSV table to another format.
    Render(RenderArgs),

    /// Show which columns are invariant across all rows.
    Inspect(InspectArgs),

    /// Enumerate a parameter sweep into a table and render it.
    Sweep(SweepArgs),
}

#[derive(Args)]
pub struct RenderArgs {
    /// CSV table with a leading ID column.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub latex: LatexArgs,
}

#[derive(Args)]
pub struct InspectArgs {
    /// CSV table with a leading ID column.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Args)]
pub struct SweepArgs {
    /// Dimension as NAME=V1,V2,... (repeatable; the last varies fastest).
    #[arg(long = "dim", value_name = "NAME=VALUES", required = true)]
    pub dimensions: Vec<String>,

    /// Separator between key=value pairs in row labels.
    #[arg(long = "label-separator", value_name = "SEP", default_value = ",")]
    pub label_separator: String,

    /// Only use these dimensions (in this order) for row labels.
    #[arg(long = "label-key", value_name = "NAME")]
    pub label_keys: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub latex: LatexArgs,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Table rendering overrides; unset flags keep the configuration file value.
#[derive(Args, Default)]
pub struct TableArgs {
    /// Render every column in the table body.
    #[arg(long = "no-compact")]
    pub no_compact: bool,

    /// Keep rows in input order instead of sorting by ID.
    #[arg(long = "no-sort")]
    pub no_sort: bool,

    /// printf-style cell format, e.g. "%.3f".
    #[arg(long = "format-string", value_name = "TEMPLATE")]
    pub format_string: Option<String>,

    /// Text rendered for cells without a value.
    #[arg(long = "default-value", value_name = "TEXT")]
    pub default_value: Option<String>,
}

/// LaTeX overrides; unset flags keep the configuration file value.
#[derive(Args, Default)]
pub struct LatexArgs {
    /// Swap rows and columns in LaTeX output.
    #[arg(long = "transpose")]
    pub transpose: bool,

    /// Decimal places for numbers in LaTeX output (-1 disables rounding).
    #[arg(long = "decimal-places", value_name = "N", allow_negative_numbers = true)]
    pub decimal_places: Option<i32>,

    /// Decimal places for percentages in LaTeX output (-1 disables rounding).
    #[arg(
        long = "percentage-decimal-places",
        value_name = "N",
        allow_negative_numbers = true
    )]
    pub percentage_decimal_places: Option<i32>,

    /// Alignment of value columns in LaTeX output.
    #[arg(long = "align", value_enum)]
    pub alignment: Option<AlignmentArg>,

    /// Row ID substitution FROM=TO applied in LaTeX output (repeatable).
    #[arg(long = "replace", value_name = "FROM=TO")]
    pub replacements: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Wiki,
    Latex,
    Spreadsheet,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ReportFormat::Csv,
            FormatArg::Wiki => ReportFormat::Wiki,
            FormatArg::Latex => ReportFormat::Latex,
            FormatArg::Spreadsheet => ReportFormat::Spreadsheet,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AlignmentArg {
    Left,
    Center,
    Right,
}

impl From<AlignmentArg> for ColumnAlignment {
    fn from(value: AlignmentArg) -> Self {
        match value {
            AlignmentArg::Left => ColumnAlignment::Left,
            AlignmentArg::Center => ColumnAlignment::Center,
            AlignmentArg::Right => ColumnAlignment::Right,
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
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_with_overrides() {
        let cli = Cli::try_parse_from([
            "flextab",
            "render",
            "results.csv",
            "--format",
            "latex",
            "--decimal-places",
            "-1",
            "--replace",
            "org.example.=",
            "--no-compact",
        ])
        .unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert!(matches!(args.output.format, FormatArg::Latex));
        assert_eq!(args.latex.decimal_places, Some(-1));
        assert_eq!(args.latex.replacements, ["org.example.="]);
        assert!(args.table.no_compact);
    }

    #[test]
    fn test_sweep_requires_a_dimension() {
        assert!(Cli::try_parse_from(["flextab", "sweep"]).is_err());
        assert!(Cli::try_parse_from(["flextab", "sweep", "--dim", "lr=0.1,0.01"]).is_ok());
    }
}
