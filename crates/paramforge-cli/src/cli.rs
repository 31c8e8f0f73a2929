use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The Paramforge Developers",
    version,
    about = "Paramforge CLI - Look up forcefield parameters for molecular simulation by atom type or atom class, with wildcard and order-reversal matching.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up the parameters matching one key in one interaction category.
    Query(QueryArgs),
    /// Summarize a loaded forcefield (forces, entry counts, scaling factors).
    Info(InfoArgs),
    /// Export one interaction category's parameter table as CSV.
    Export(ExportArgs),
}

/// Selects the forcefield a command operates on.
#[derive(Args, Debug, Clone)]
pub struct ForcefieldArgs {
    /// Name of a bundled forcefield (e.g. 'oplsaa', 'gaff').
    #[arg(short = 'f', long, value_name = "NAME", conflicts_with = "file")]
    pub forcefield: Option<String>,

    /// Path to a forcefield definition file. May be repeated; later files
    /// extend earlier ones.
    #[arg(long, value_name = "PATH")]
    pub file: Vec<PathBuf>,
}

/// Arguments for the `query` subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub forcefield: ForcefieldArgs,

    /// Interaction category (atoms, harmonic_bonds, harmonic_angles,
    /// periodic_propers, periodic_impropers, rb_propers).
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Atom identifiers keying the lookup, in bonded order.
    /// Use '' for a wildcard position.
    #[arg(value_name = "ATOM", num_args(1..), required = true)]
    pub key: Vec<String>,

    /// Treat key elements as atom classes instead of atom types.
    #[arg(short = 'c', long)]
    pub classes: bool,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub forcefield: ForcefieldArgs,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub forcefield: ForcefieldArgs,

    /// Interaction category to export.
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Path for the CSV output. Defaults to standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
