use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::infra::config::Config;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub config: Config, // layered pmask.toml + PMASK_* env
}

#[derive(Parser)]
#[command(name = "pmask")]
#[command(about = "Keep or exclude fields of JSON documents with bracket/dot path masks")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress informational log output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level or filter directive (overridden by RUST_LOG)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Explicit config file (defaults to ./pmask.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a JSON document with ad-hoc --keep/--exclude/--fields paths
    Apply(ApplyArgs),

    /// Create, list, show and apply saved filters
    Filter(FilterArgs),

    /// JSON utilities (compress, markdown)
    Json(JsonArgs),

    /// Write pmask.toml and create the filter directory
    Init(InitArgs),

    /// Print or install shell completions for pmask
    Completions(CompletionsArgs),
}

/// Path selection flags shared by `apply` and `filter create`.
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// Keep paths (dot or bracket notation). Can be repeated or comma-separated.
    #[arg(long, value_name = "PATHS")]
    pub keep: Vec<String>,

    /// Exclude paths (dot or bracket notation). Can be repeated or comma-separated.
    #[arg(long, value_name = "PATHS")]
    pub exclude: Vec<String>,

    /// Shorthand fields (dot notation) to keep, e.g. authors[].author_id
    #[arg(long, value_name = "PATHS")]
    pub fields: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Input JSON file (reads stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output JSON file (writes stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit minified JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser)]
pub struct FilterArgs {
    #[command(subcommand)]
    pub command: FilterSubcommand,
}

#[derive(Subcommand)]
pub enum FilterSubcommand {
    /// Create a new filter (saved when --name is given)
    Create(FilterCreateArgs),

    /// Apply a saved filter
    Apply(FilterApplyArgs),

    /// List available filters
    List(FilterListArgs),

    /// Print a saved filter document
    Show(FilterShowArgs),
}

#[derive(Parser, Debug)]
pub struct FilterCreateArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Name to save the filter under
    #[arg(long)]
    pub name: Option<String>,

    /// Optional description for the filter
    #[arg(long)]
    pub description: Option<String>,

    /// Directory holding saved filters (defaults to config filter_dir)
    #[arg(long)]
    pub filter_dir: Option<PathBuf>,

    /// Overwrite an existing filter with the same name
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct FilterApplyArgs {
    /// Name of the filter to apply
    #[arg(long)]
    pub filter_name: String,

    /// Directory holding saved filters (defaults to config filter_dir)
    #[arg(long)]
    pub filter_dir: Option<PathBuf>,

    /// Input JSON file (reads stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output JSON file (writes stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit minified JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug)]
pub struct FilterListArgs {
    /// Directory holding saved filters (defaults to config filter_dir)
    #[arg(long)]
    pub filter_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}

#[derive(Parser, Debug)]
pub struct FilterShowArgs {
    /// Name of the filter to print
    #[arg(long)]
    pub filter_name: String,

    /// Directory holding saved filters (defaults to config filter_dir)
    #[arg(long)]
    pub filter_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
    Table,
}

#[derive(Parser)]
pub struct JsonArgs {
    #[command(subcommand)]
    pub command: JsonSubcommand,
}

#[derive(Subcommand)]
pub enum JsonSubcommand {
    /// Convert JSON to Markdown
    Md(JsonMdArgs),

    /// Compress JSON by removing unnecessary whitespace
    Compress(JsonCompressArgs),
}

#[derive(Parser, Debug)]
pub struct JsonMdArgs {
    /// Input JSON file (reads stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output Markdown file (defaults to <stem>.md with -i, else stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Document title (defaults to the input file stem)
    #[arg(long)]
    pub title: Option<String>,

    /// Maximum depth for nested structures (defaults to config, 6)
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct JsonCompressArgs {
    /// Input JSON file (reads stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output JSON file (defaults to compressed_<stem>.json with -i, else stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// `pmask init`: config file plus an empty filter directory.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project directory to set up
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Filter directory to record in the config (relative to PATH)
    #[arg(long, value_name = "DIR")]
    pub filter_dir: Option<String>,

    /// Overwrite an existing pmask.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,

    /// Write the script into this directory instead of stdout
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}
