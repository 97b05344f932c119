use crate::utils::parser;
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
    author = "Tony Kan, Ted Yu",
    version,
    about = "chargemap - Color the atoms of a structure by the partial charges of its GROMACS topology.",
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
    /// Walk a topology and its includes and emit a color command for every atom charge.
    Color(ColorArgs),
    /// Print the color assigned to one or more charges.
    Charge(ChargeArgs),
    /// Print the calibration stops of the charge color ramp.
    Ramp,
}

/// Arguments for the `color` subcommand.
#[derive(Args, Debug, Default)]
pub struct ColorArgs {
    // --- Core Arguments ---
    /// Path to the top-level topology file (e.g., topol.top).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub topology: PathBuf,

    /// Force-field directory searched when a file is not next to the including file.
    /// Defaults to $GMXLIB, then $GMXDATA/top.
    #[arg(short, long, value_name = "DIR")]
    pub forcefield_dir: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Output ---
    /// Structure file to load at the top of the generated script (e.g., conf.pdb).
    #[arg(short, long, value_name = "PATH")]
    pub structure: Option<PathBuf>,

    /// Write the PyMOL command script here. Without --script or --report it goes to stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Write a CSV report of every colored residue/atom pair.
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Representation shown after loading the structure.
    #[arg(long, value_name = "NAME")]
    pub representation: Option<String>,

    // --- Parsing Overrides ---
    /// Treat #ifdef/#endif as a single on/off toggle instead of nested blocks.
    #[arg(long, conflicts_with = "evaluate_conditionals")]
    pub flat_conditionals: bool,

    /// Evaluate #ifdef/#ifndef/#else against the defined symbols instead of skipping every
    /// #ifdef block.
    #[arg(long)]
    pub evaluate_conditionals: bool,

    /// Treat a preprocessor symbol as defined. Can be used multiple times (-D POSRES).
    /// Implies --evaluate-conditionals.
    #[arg(short = 'D', long = "define", value_name = "SYMBOL", value_parser = parser::parse_define)]
    pub defines: Vec<String>,

    /// Maximum number of nested #include levels to follow.
    #[arg(long, value_name = "INT")]
    pub max_include_depth: Option<usize>,

    /// Keep four-character hydrogen names (H12A) as written instead of rotating them (12AH).
    #[arg(long)]
    pub no_hydrogen_fix: bool,
}

/// Arguments for the `charge` subcommand.
#[derive(Args, Debug)]
pub struct ChargeArgs {
    /// Partial charges, in units of the elementary charge.
    #[arg(required = true, allow_negative_numbers = true, value_name = "CHARGE")]
    pub charges: Vec<f64>,
}
