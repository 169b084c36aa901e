//! CLI command definitions and parsing
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::grid::GridPreset;
use crate::hierarchy::GroupingMode;

#[derive(Parser, Debug)]
#[command(
    name = "news-mosaic",
    version,
    author = "neur0map",
    about = "Deterministic mosaic grids and sunburst layouts for clustered news results",
    long_about = "news-mosaic computes the seeded tile mosaic shown while a topic loads and the \
                  sentiment/cluster sunburst of its results. All output is JSON on stdout, so the \
                  geometry can be fed straight into a renderer."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/news-mosaic/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Profile to apply on top of the config file (e.g., "landing", "clusters")
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a mosaic grid layout
    Grid {
        /// Number of columns (defaults to config or preset)
        #[arg(long)]
        cols: Option<u32>,

        /// Number of rows (defaults to config or preset)
        #[arg(long)]
        rows: Option<u32>,

        /// Explicit PRNG seed
        #[arg(long, conflicts_with = "query")]
        seed: Option<u32>,

        /// Derive the seed from a search query
        #[arg(short, long)]
        query: Option<String>,

        /// Built-in look to use instead of the configured style
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,
    },

    /// Compute sunburst geometry for clustered results
    Sunburst {
        /// JSON file holding an array of clusters
        #[arg(short, long)]
        input: PathBuf,

        /// Search query the clusters answer
        #[arg(short, long)]
        query: String,

        /// Viewport width in px
        #[arg(long)]
        width: Option<f64>,

        /// Viewport height in px
        #[arg(long)]
        height: Option<f64>,

        /// Grouping of the inner rings
        #[arg(short, long)]
        grouping: Option<GroupingMode>,

        /// Key of the selected sector
        #[arg(long)]
        selected: Option<String>,
    },

    /// Shuffle items deterministically by key
    Shuffle {
        /// Shuffle key (e.g., "query::cluster")
        #[arg(short, long)]
        key: String,

        /// Items to shuffle
        items: Vec<String>,
    },

    /// Classify a valence/intensity pair
    Classify {
        /// Valence in [-1, 1]
        #[arg(long, allow_hyphen_values = true)]
        valence: f64,

        /// Intensity in [0, 1]
        #[arg(long, default_value = "0")]
        intensity: f64,
    },

    /// Per-bucket sentiment counts for clustered results
    Stats {
        /// JSON file holding an array of clusters
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Grid presets accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetArg {
    Landing,
    Loading,
    Start,
}

impl From<PresetArg> for GridPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Landing => GridPreset::Landing,
            PresetArg::Loading => GridPreset::Loading,
            PresetArg::Start => GridPreset::StartScreen,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
