use clap::builder::RangedU64ValueParser;
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
    author = "Jannik, Ron Dockhorn",
    version,
    about = "bfmstat - analysis and setup tools for bond fluctuation model (BFM) configurations of polymers in co-solvent.",
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

    /// Optional TOML file with default parameters; command-line flags take precedence
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count co-solvent molecules in the nearest-neighbour shell of the polymer.
    Contacts(ContactsArgs),
    /// Estimate the isotropic scattering function of the polymer.
    Scattering(ScatteringArgs),
    /// Create a starting configuration of one polymer chain in two co-solvents.
    CreateSolvent(CreateSolventArgs),
    /// Give every particle of a configuration the same attribute tag.
    Relabel(RelabelArgs),
}

/// Arguments for the `contacts` subcommand.
#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// BFM trajectory to analyse.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory for the result file (default: current directory).
    #[arg(short, long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// First simulation age (MCS) included in the statistics.
    #[arg(long, value_name = "MCS")]
    pub start_time: Option<u64>,

    /// Stop once a snapshot older than this age has been read.
    #[arg(short, long, value_name = "MCS", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_mcs: Option<u64>,

    /// Only analyse snapshots whose age is a multiple of this (0 analyses all).
    #[arg(short, long, value_name = "MCS")]
    pub save_mcs: Option<u64>,

    /// Expected number of co-solvent molecules; a mismatch with the file is reported.
    #[arg(short, long, value_name = "INT")]
    pub number_cosolvent: Option<usize>,

    /// Nearest-neighbour interaction energy, recorded in the result header.
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub epsilon: Option<f64>,
}

/// Arguments for the `scattering` subcommand.
#[derive(Args, Debug)]
pub struct ScatteringArgs {
    /// BFM trajectory to analyse.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory for the result file (default: current directory).
    ///
    /// The file is named `<input name without extension>_ScatteringFct.dat`. Pass the
    /// input's own directory to write it next to the trajectory.
    #[arg(short, long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only snapshots with an age beyond this are sampled.
    #[arg(short, long, value_name = "MCS")]
    pub evaluation_time: Option<u64>,

    /// Results are written only if more snapshots than this were executed.
    #[arg(long, value_name = "INT")]
    pub relax_time: Option<u64>,

    /// Number of q bins.
    #[arg(long, value_name = "INT", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub num_q: Option<usize>,

    /// Random directions per sampled snapshot.
    #[arg(long, value_name = "INT", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub directions: Option<usize>,

    /// Smallest q multiplier of the geometric q table.
    #[arg(long, value_name = "FLOAT")]
    pub q_min: Option<f64>,

    /// Seed for the random directions; drawn at random when omitted.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

/// Arguments for the `create-solvent` subcommand.
#[derive(Args, Debug)]
pub struct CreateSolventArgs {
    /// BFM file to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Number of co-solvent molecules of the first kind (tag 3).
    #[arg(short = 'c', long = "cosolvent-1", required = true, value_name = "INT")]
    pub cosolvent_1: usize,

    /// Number of co-solvent molecules of the second kind (tag 4).
    #[arg(short = 's', long = "cosolvent-2", required = true, value_name = "INT")]
    pub cosolvent_2: usize,

    /// Number of monomers per polymer chain.
    #[arg(short = 'l', long, required = true, value_name = "INT", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub chain_length: usize,

    /// Number of polymer chains (default: 1).
    #[arg(long, value_name = "INT", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub chains: Option<usize>,

    /// Edge length of the cubic periodic box (default: 64).
    #[arg(long = "box", value_name = "INT", value_parser = clap::value_parser!(i32).range(1..))]
    pub box_length: Option<i32>,

    /// Seed for chain and co-solvent placement; drawn at random when omitted.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

/// Arguments for the `relabel` subcommand.
#[derive(Args, Debug)]
pub struct RelabelArgs {
    /// BFM file whose last snapshot is relabeled.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// BFM file to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Attribute tag given to every particle.
    #[arg(short, long, required = true, value_name = "INT", allow_negative_numbers = true)]
    pub tag: i32,
}
