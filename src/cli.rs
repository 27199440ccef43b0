use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors and tables
    Terminal,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "hoardrisk")]
#[command(about = "Household hoarding risk assessment recorder", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .hoardrisk.toml)
    #[arg(long, global = true, env = "HOARDRISK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Plain output: no colors, no emoji
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .hoardrisk.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Record one household assessment
    Assess(AssessArgs),

    /// Classify a total or a set of category scores without saving
    #[command(group(ArgGroup::new("input").required(true).args(["total", "scores"])))]
    Classify {
        /// Composite total score
        #[arg(long)]
        total: Option<u32>,

        /// Whether any single category reached the maximum
        #[arg(long, requires = "total")]
        critical: bool,

        /// Five category scores, comma separated (estrutural, sanitario,
        /// animais, obstrucao, psicossocial)
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        scores: Option<Vec<u8>>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Compare the worksheet header row with the expected columns
    VerifyHeaders,

    /// Show recorded assessments
    List {
        /// Show only the last N rows
        #[arg(long)]
        tail: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}

#[derive(Args, Debug, Default)]
pub struct AssessArgs {
    /// Prompt for every field on stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Resident name
    #[arg(long)]
    pub name: Option<String>,

    /// Resident address
    #[arg(long)]
    pub address: Option<String>,

    /// Structural risk (0-4)
    #[arg(long, visible_alias = "estrutural", default_value_t = 0, value_parser = score_parser())]
    pub structural: u8,

    /// Sanitary conditions (0-4)
    #[arg(long, visible_alias = "sanitario", default_value_t = 0, value_parser = score_parser())]
    pub sanitary: u8,

    /// Animals and vectors (0-4)
    #[arg(long, visible_alias = "animais", default_value_t = 0, value_parser = score_parser())]
    pub animals: u8,

    /// Obstruction and functionality (0-4)
    #[arg(long, visible_alias = "obstrucao", default_value_t = 0, value_parser = score_parser())]
    pub obstruction: u8,

    /// Psychosocial aspects (0-4)
    #[arg(long, visible_alias = "psicossocial", default_value_t = 0, value_parser = score_parser())]
    pub psychosocial: u8,

    #[command(flatten)]
    pub details: DetailArgs,
}

/// Vector/animal detail block, written only by the detailed layout.
#[derive(Args, Debug, Default)]
pub struct DetailArgs {
    /// Number of animals in the household
    #[arg(long, default_value_t = 0)]
    pub animal_count: u32,

    /// Species present
    #[arg(long, default_value = "")]
    pub species: String,

    /// Cockroaches observed
    #[arg(long)]
    pub cockroaches: bool,

    /// Rats observed
    #[arg(long)]
    pub rats: bool,

    /// Scorpions observed
    #[arg(long)]
    pub scorpions: bool,

    /// Flies observed
    #[arg(long)]
    pub flies: bool,

    /// Other vectors observed
    #[arg(long, default_value = "")]
    pub other_vectors: String,

    /// Condition of the animals
    #[arg(long, default_value = "")]
    pub animal_condition: String,

    /// Rooms that can no longer be used
    #[arg(long, default_value_t = 0)]
    pub unusable_rooms: u32,

    /// Resident lives alone
    #[arg(long)]
    pub lives_alone: bool,

    /// Resident has health follow-up
    #[arg(long)]
    pub health_follow_up: bool,

    /// Free-text observations
    #[arg(long, default_value = "")]
    pub observations: String,
}

fn score_parser() -> clap::builder::RangedI64ValueParser<u8> {
    clap::value_parser!(u8).range(0..=4)
}
