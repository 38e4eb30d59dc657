//! CLI argument definitions for the price estimator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

pub const DEFAULT_SESSION_FILE: &str = "pricing-session.json";

#[derive(Parser)]
#[command(
    name = "price-estimator",
    version,
    about = "Reference price estimation for procurement price research",
    long_about = "Estimate reference prices from procurement price research.\n\n\
                  Groups quotations into line items, computes the automatic estimate,\n\
                  lets manual overrides be recorded under the last-awarded-price rule,\n\
                  and writes the final table, calculation memory and payload."
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

    /// Pricing options file (TOML); defaults are used when omitted.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a session from a quote-row CSV or a preview JSON file.
    Init(InitArgs),

    /// Show every row, or the quotes of one item.
    Show(ShowArgs),

    /// Set or clear the last quoted price of an item.
    Price(PriceArgs),

    /// Fill missing last quoted prices from a lookup result file.
    Hydrate(HydrateArgs),

    /// Record a manual override for an item.
    Adjust(AdjustArgs),

    /// Remove the manual override of an item.
    Clear(ClearArgs),

    /// Write the final table, calculation memory, payload and manifest.
    Generate(GenerateArgs),

    /// Parse localized amounts such as "R$ 1.234,56".
    ParseAmount(ParseAmountArgs),

    /// List the canned justification options.
    Justifications,
}

#[derive(Args)]
pub struct SessionArg {
    /// Session file holding items, overrides and last quoted prices.
    #[arg(long = "session", short = 's', value_name = "PATH", default_value = DEFAULT_SESSION_FILE)]
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Quote rows (.csv) or extraction preview (.json).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub session: SessionArg,

    /// List number, used in output file names.
    #[arg(long = "numero", value_name = "NUMBER")]
    pub numero: Option<String>,

    /// List name.
    #[arg(long = "nome", value_name = "NAME")]
    pub nome: Option<String>,

    /// Administrative process number.
    #[arg(long = "sei", value_name = "PROCESS")]
    pub sei: Option<String>,

    /// Person responsible for the research.
    #[arg(long = "responsavel", value_name = "NAME")]
    pub responsavel: Option<String>,

    /// Replace an existing session file.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    #[command(flatten)]
    pub session: SessionArg,

    /// Show the quotes of this item instead of the row table.
    #[arg(long = "item", value_name = "ITEM")]
    pub item: Option<String>,
}

#[derive(Parser)]
pub struct PriceArgs {
    #[command(flatten)]
    pub session: SessionArg,

    #[arg(value_name = "ITEM")]
    pub item: String,

    /// Amount such as "R$ 1.234,56"; an empty string clears the price.
    #[arg(value_name = "AMOUNT", allow_hyphen_values = true)]
    pub amount: String,
}

#[derive(Parser)]
pub struct HydrateArgs {
    #[command(flatten)]
    pub session: SessionArg,

    /// Lookup result JSON (`by_catmat` document or array of records).
    #[arg(value_name = "LOOKUP")]
    pub lookup: PathBuf,
}

#[derive(Parser)]
pub struct AdjustArgs {
    #[command(flatten)]
    pub session: SessionArg,

    #[arg(value_name = "ITEM")]
    pub item: String,

    /// Quote indices to include, replacing the preselection.
    #[arg(long = "include", value_name = "INDICES", value_delimiter = ',')]
    pub include: Vec<u32>,

    /// Quote indices to flip after the selection is made.
    #[arg(long = "toggle", value_name = "INDICES", value_delimiter = ',')]
    pub toggle: Vec<u32>,

    /// Aggregation method (defaults to the suggested one).
    #[arg(long = "method", value_enum)]
    pub method: Option<MethodArg>,

    /// Canned justification code (see `justifications`).
    #[arg(long = "justification", value_name = "CODE", conflicts_with = "other")]
    pub justification: Option<String>,

    /// Free-text justification.
    #[arg(long = "other", value_name = "TEXT")]
    pub other: Option<String>,

    /// Show the resulting statistics without saving.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ClearArgs {
    #[command(flatten)]
    pub session: SessionArg,

    #[arg(value_name = "ITEM")]
    pub item: String,
}

#[derive(Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub session: SessionArg,

    /// Output directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Original input file, hashed into the manifest.
    #[arg(long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ParseAmountArgs {
    #[arg(value_name = "TEXT", required = true, allow_hyphen_values = true)]
    pub values: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Mean,
    Median,
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
