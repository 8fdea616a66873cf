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
    version,
    about = "Solva CLI - A command-line interface for Solva, a toolkit for identifying and characterizing solvation shells in periodic molecular simulation snapshots.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find all molecules within a fixed radius of the solute in one frame.
    Shell(ShellArgs),
    /// Find the n molecules closest to the solute in one frame.
    Closest(ClosestArgs),
    /// Analyze the first solvation shell across a whole trajectory.
    Run(RunArgs),
}

/// Selects the central species. Exactly one selector must be given.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct SoluteSelector {
    /// Select the solute molecule by its id.
    #[arg(short, long, value_name = "ID")]
    pub molecule: Option<u32>,

    /// Select the solute by a single particle index (0-based).
    #[arg(short, long, value_name = "INDEX")]
    pub particle: Option<usize>,
}

/// Arguments for the `shell` subcommand.
#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Path to the input frames file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Shell radius, in the length unit of the input coordinates.
    #[arg(short, long, required = true, value_name = "FLOAT")]
    pub radius: f64,

    #[command(flatten)]
    pub solute: SoluteSelector,

    /// Index of the frame to analyze (0-based).
    #[arg(short, long, default_value_t = 0, value_name = "INT")]
    pub frame: usize,

    /// Write the shell listing as CSV to this path instead of printing a table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `closest` subcommand.
#[derive(Args, Debug)]
pub struct ClosestArgs {
    /// Path to the input frames file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Number of molecules to find.
    #[arg(short = 'n', long = "count", required = true, value_name = "INT")]
    pub count: usize,

    #[command(flatten)]
    pub solute: SoluteSelector,

    /// Index of the frame to analyze (0-based).
    #[arg(short, long, default_value_t = 0, value_name = "INT")]
    pub frame: usize,

    /// Starting radius of the adaptive search.
    #[arg(long, value_name = "FLOAT")]
    pub initial_radius: Option<f64>,

    /// Radius growth per expansion step of the adaptive search.
    #[arg(long, value_name = "FLOAT")]
    pub radius_increment: Option<f64>,

    /// Maximum number of expansion steps before the search gives up.
    #[arg(long, value_name = "INT")]
    pub max_expansions: Option<usize>,

    /// Write the shell listing as CSV to this path instead of printing a table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the input frames file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the analysis configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path for the CSV output; records go to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- Config Overrides ---
    /// Override the radial shell radius from the config file.
    #[arg(short, long, value_name = "FLOAT")]
    pub radius: Option<f64>,

    /// Use a closest-n criterion, overriding the config file.
    #[arg(short = 'n', long = "closest", value_name = "INT", conflicts_with = "radius")]
    pub closest: Option<usize>,

    /// Override the counter-species name for ion-pairing classification.
    #[arg(long, value_name = "NAME")]
    pub counter_species: Option<String>,

    /// Override the contact cutoff for ion-pairing classification.
    #[arg(long, value_name = "FLOAT")]
    pub contact_cutoff: Option<f64>,
}
