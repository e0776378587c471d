//! CLI Argument Structures
//!
//! Argument definitions and command structures for the docoracle binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Test oracles from free-text API documentation
#[derive(Parser)]
#[command(name = "docoracle")]
#[command(version = VERSION)]
#[command(about = "docoracle - Synthesize equivalence oracles from documentation comments")]
#[command(long_about = "
Read a type catalog, find comments that declare one member equivalent to
another, and turn them into checkable oracle expressions.

Common Usage:

  # Analyze every commented member of a catalog
  docoracle analyze catalog.yml

  # Machine-readable report
  docoracle analyze catalog.yml --format json --out report.json

  # Vet oracles with an external compiler check
  docoracle analyze catalog.yml --validator-cmd ./check-oracle.sh

  # Try a comment against one member
  docoracle translate catalog.yml --member java.util.ArrayList#isEmptyList \\
      --comment 'Returns the same as isEmpty(), if the list has no elements'
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every commented member of a type catalog
    Analyze(AnalyzeArgs),

    /// Translate one member's comment
    Translate(TranslateArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a docoracle configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Type catalog (YAML, or JSON with a .json extension)
    pub catalog: PathBuf,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// External validator command; receives a JSON request on stdin, exit 0 accepts
    #[arg(long, num_args = 1.., allow_hyphen_values = true, value_name = "CMD")]
    pub validator_cmd: Option<Vec<String>>,

    /// Analyze members one at a time
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Args)]
pub struct TranslateArgs {
    /// Type catalog (YAML, or JSON with a .json extension)
    pub catalog: PathBuf,

    /// Member selector: Type#name or Type#name(T1, T2)
    #[arg(short, long)]
    pub member: String,

    /// Comment text; defaults to the member's comment in the catalog
    #[arg(long)]
    pub comment: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".docoracle.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file to validate
    #[arg(short, long, required = true)]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON format output
    Json,
    /// YAML format output
    Yaml,
    /// Human-readable table
    Table,
}
