//! CLI argument definitions for the SKU configurator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sku",
    version,
    about = "SKU configurator - assemble part numbers and export SKU matrices",
    long_about = "Assemble stock-keeping-unit codes from a category configuration.\n\n\
                  Each category defines ordered fields, optional extras and a separator;\n\
                  the matrix command enumerates every SKU a category can produce."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: $SKU_CONFIG, then ./sku_config.json).
    #[arg(long = "config", value_name = "PATH", global = true)]
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

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the configured categories.
    Categories,

    /// Show the fields, options and extras of one category in SKU order.
    Show(ShowArgs),

    /// Assemble the SKU for one selection.
    Assemble(AssembleArgs),

    /// Report configuration problems (missing or duplicate codes, empty fields).
    Check(CheckArgs),

    /// Write the SKU matrix as CSV.
    Matrix(MatrixArgs),

    /// Write the factory default configuration.
    Init(InitArgs),

    /// Replace the configuration with a backup document.
    Import(ImportArgs),

    /// Add or remove categories.
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Add, move or remove fields of a category.
    #[command(subcommand)]
    Field(FieldCommand),

    /// Add, edit or remove the dropdown options of a field.
    #[command(subcommand, name = "option")]
    Options(OptionCommand),

    /// Add, edit or remove the extras of a category.
    #[command(subcommand)]
    Extra(ExtraCommand),
}

#[derive(Args)]
pub struct ShowArgs {
    #[arg(value_name = "CATEGORY")]
    pub category: String,
}

#[derive(Args)]
pub struct AssembleArgs {
    /// Category to assemble from.
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Field selection; dropdowns take an option code, free-text fields any text.
    ///
    /// Fields left out use their first option (or empty text).
    #[arg(long = "select", value_name = "FIELD=VALUE")]
    pub select: Vec<String>,

    /// Extra code to append (repeatable).
    #[arg(long = "extra", value_name = "CODE")]
    pub extras: Vec<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Treat options and extras without a code as errors.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Args)]
pub struct MatrixArgs {
    /// Export a single category (default: every category).
    #[arg(long = "category", value_name = "NAME")]
    pub category: Option<String>,

    /// Output CSV file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Refuse exports above this many rows.
    #[arg(long = "max-rows", value_name = "N", default_value_t = sku_report::DEFAULT_MAX_ROWS)]
    pub max_rows: u64,

    /// Disable the row ceiling.
    #[arg(long = "no-limit", conflicts_with = "max_rows")]
    pub no_limit: bool,

    /// Add one column per field with the chosen code.
    #[arg(long = "field-columns")]
    pub field_columns: bool,

    /// Add a column with the concatenated extras code.
    #[arg(long = "extras-column")]
    pub extras_column: bool,
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Configuration document to restore; older layouts are upgraded.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// Add an empty category with default settings.
    Add {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Remove a category and everything in it.
    Remove {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Change the separator or extras mode of a category.
    Settings(CategorySettingsArgs),
}

#[derive(Args)]
pub struct CategorySettingsArgs {
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Separator between field codes; pass "" for none.
    #[arg(long = "separator", value_name = "TEXT")]
    pub separator: Option<String>,

    #[arg(long = "extras-mode", value_enum)]
    pub extras_mode: Option<ExtrasModeArg>,
}

#[derive(Subcommand)]
pub enum FieldCommand {
    /// Add a field to a category.
    Add(FieldAddArgs),
    /// Remove a field from a category.
    Remove {
        #[arg(value_name = "CATEGORY")]
        category: String,
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Move a field to a new position within the SKU.
    Set {
        #[arg(value_name = "CATEGORY")]
        category: String,
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(long = "order", value_name = "N")]
        order: i64,
    },
}

#[derive(Args)]
pub struct FieldAddArgs {
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    #[arg(value_name = "NAME")]
    pub name: String,

    /// Position of the field within the SKU.
    #[arg(long = "order", value_name = "N")]
    pub order: Option<i64>,

    /// Accept typed text instead of a dropdown choice.
    #[arg(long = "free-text")]
    pub free_text: bool,
}

#[derive(Subcommand)]
pub enum OptionCommand {
    /// Append an option to a dropdown field.
    Add(OptionAddArgs),
    /// Remove an option from a dropdown field.
    Remove(OptionRefArgs),
    /// Rename or re-order an option.
    Set(OptionSetArgs),
}

#[derive(Args)]
pub struct OptionRefArgs {
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    #[arg(value_name = "FIELD")]
    pub field: String,

    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Args)]
pub struct OptionSetArgs {
    #[command(flatten)]
    pub option: OptionRefArgs,

    #[command(flatten)]
    pub change: ItemChange,
}

/// New name and/or order for an option or extra; at least one is required.
#[derive(Args)]
#[group(required = true, multiple = true)]
pub struct ItemChange {
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    #[arg(long = "order", value_name = "N")]
    pub order: Option<i64>,
}

#[derive(Args)]
pub struct OptionAddArgs {
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Code written into the SKU.
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Human-readable name used in descriptions.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(long = "order", value_name = "N")]
    pub order: Option<i64>,
}

#[derive(Subcommand)]
pub enum ExtraCommand {
    /// Append an extra to a category.
    Add(ExtraAddArgs),
    /// Remove an extra from a category.
    Remove {
        #[arg(value_name = "CATEGORY")]
        category: String,
        #[arg(value_name = "CODE")]
        code: String,
    },
    /// Rename or re-order an extra.
    Set(ExtraSetArgs),
}

#[derive(Args)]
pub struct ExtraSetArgs {
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    #[arg(value_name = "CODE")]
    pub code: String,

    #[command(flatten)]
    pub change: ItemChange,
}

#[derive(Args)]
pub struct ExtraAddArgs {
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    #[arg(value_name = "CODE")]
    pub code: String,

    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(long = "order", value_name = "N")]
    pub order: Option<i64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExtrasModeArg {
    /// At most one extra per SKU.
    Single,
    /// Any combination of extras.
    Multiple,
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
