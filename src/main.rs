use news_mosaic::cli::{Cli, Commands, ConfigAction, PresetArg};
use news_mosaic::config::Config;
use news_mosaic::error::{MosaicError, Result};
use news_mosaic::grid::{GridLayout, GridPreset, MosaicGrid};
use news_mosaic::hierarchy::{GroupingMode, HierarchyBuilder};
use news_mosaic::model::load_clusters;
use news_mosaic::radial::{options_for, RadialOptions, RadialPartition, SelectionContext};
use news_mosaic::random::{seed_from_query, stable_shuffle};
use news_mosaic::sentiment::{classify_values, SentimentStats};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    // Handle commands
    match cli.command {
        Commands::Grid {
            cols,
            rows,
            seed,
            query,
            preset,
        } => {
            let config = load_config(cli.config, cli.profile)?;
            cmd_grid(&config, cols, rows, seed, query, preset)?;
        }
        Commands::Sunburst {
            input,
            query,
            width,
            height,
            grouping,
            selected,
        } => {
            let config = load_config(cli.config, cli.profile)?;
            cmd_sunburst(&config, &input, &query, width, height, grouping, selected)?;
        }
        Commands::Shuffle { key, items } => {
            cmd_shuffle(&key, items);
        }
        Commands::Classify { valence, intensity } => {
            let config = load_config(cli.config, cli.profile)?;
            cmd_classify(&config, valence, intensity)?;
        }
        Commands::Stats { input } => {
            let config = load_config(cli.config, cli.profile)?;
            cmd_stats(&config, &input)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, cli.profile, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose {
        "news_mosaic=debug"
    } else {
        "news_mosaic=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries JSON only
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Grid output with the derived exit stagger alongside each tile
#[derive(Serialize)]
struct GridOutput<'a> {
    #[serde(flatten)]
    layout: &'a GridLayout,
    exit_delays: Vec<f64>,
}

fn cmd_grid(
    config: &Config,
    cols: Option<u32>,
    rows: Option<u32>,
    seed: Option<u32>,
    query: Option<String>,
    preset: Option<PresetArg>,
) -> Result<()> {
    let (grid, default_cols, default_rows) = match preset.map(GridPreset::from) {
        Some(preset) => {
            let (c, r) = preset.dimensions();
            (MosaicGrid::from_preset(preset), c, r)
        }
        None => (config.mosaic_grid(), config.grid.cols, config.grid.rows),
    };

    let seed = match (seed, query.as_deref()) {
        (Some(seed), _) => seed,
        (None, Some(query)) => seed_from_query(query),
        (None, None) => config.grid.seed,
    };

    let layout = grid.layout(
        cols.unwrap_or(default_cols),
        rows.unwrap_or(default_rows),
        seed,
    )?;
    tracing::info!(
        "Tiled {}x{} grid with {} tiles (seed {})",
        layout.cols,
        layout.rows,
        layout.tiles.len(),
        seed
    );

    print_json(
        &GridOutput {
            exit_delays: layout.exit_delays(),
            layout: &layout,
        },
        "grid layout",
    )
}

fn cmd_sunburst(
    config: &Config,
    input: &Path,
    query: &str,
    width: Option<f64>,
    height: Option<f64>,
    grouping: Option<GroupingMode>,
    selected: Option<String>,
) -> Result<()> {
    let clusters = load_clusters(input)?;
    let mode = grouping.unwrap_or(config.sunburst.grouping);

    let mut options = config.sunburst.options();
    // Cluster-first rings get their slightly smaller disc unless one is configured
    if options.center_ratio == RadialOptions::default().center_ratio {
        options.center_ratio = options_for(mode).center_ratio;
    }

    let root = HierarchyBuilder::new(mode)
        .with_thresholds(config.sentiment)
        .build(query, &clusters);
    let engine = RadialPartition::new(options, config.palette.clone());
    let selection = SelectionContext {
        selected,
        hovered: None,
    };
    let layout = engine.layout_with_selection(
        &root,
        width.unwrap_or(config.sunburst.width),
        height.unwrap_or(config.sunburst.height),
        &selection,
    )?;

    tracing::info!(
        "Laid out {} sectors ({} articles) for '{}' in {} mode",
        layout.sectors.len(),
        layout.center.total,
        query,
        mode
    );

    print_json(&layout, "radial layout")
}

fn cmd_shuffle(key: &str, items: Vec<String>) {
    for item in stable_shuffle(items, key) {
        println!("{}", item);
    }
}

fn cmd_classify(config: &Config, valence: f64, intensity: f64) -> Result<()> {
    let classification = classify_values(valence, intensity, &config.sentiment);
    print_json(&classification, "classification")
}

fn cmd_stats(config: &Config, input: &Path) -> Result<()> {
    let clusters = load_clusters(input)?;
    let stats = SentimentStats::from_clusters_with(&clusters, &config.sentiment);
    print_json(&stats, "sentiment stats")
}

fn cmd_config(
    config_path: Option<PathBuf>,
    profile: Option<String>,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path, profile)?;
            print_json(&config, "config")?;
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
            println!("  Profiles: {}", config.profiles.len());
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            // Create parent directory
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| MosaicError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            // Save default config
            let config = Config::default();
            config.save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>, profile: Option<String>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        tracing::debug!(
            "Config file not found, using defaults. Run 'news-mosaic config init' to create one."
        );
        return Config::from_defaults(profile.as_deref());
    }

    if let Some(profile) = profile {
        Config::load_with_profile(&path, &profile)
    } else {
        Config::load(&path)
    }
}

fn print_json<T: Serialize>(value: &T, what: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| MosaicError::Json {
        source: e,
        context: format!("Failed to serialize {}", what),
    })?;
    println!("{}", json);
    Ok(())
}
