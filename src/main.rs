mod repl;

use anyhow::Result;
use bikeshare_analytics::{ReportGenerator, Summary, TripAnalytics};
use bikeshare_core::{AppConfig, Dataset, FilterSelection};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bikeshare",
    about = "Explore US bike-share trip data for Chicago, New York City and Washington",
    version,
    author
)]
struct Cli {
    /// Path to config file (default: ~/.config/bikeshare/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the city CSV files
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive filter and statistics loop (default)
    Explore,

    /// Print statistics for one selection without prompting
    Stats {
        /// chicago, "new york city" or washington
        #[arg(long)]
        city: String,
        /// january..june or all
        #[arg(long, default_value = "all")]
        month: String,
        /// monday..sunday or all
        #[arg(long, default_value = "all")]
        day: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Initialize default configuration file
    Init,
    /// Print config file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with report output.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "bikeshare=info,warn".into()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data.data_dir = dir.clone();
    }
    tracing::debug!("Data directory: {}", config.data.data_dir.display());

    match cli.command {
        Some(Commands::Stats {
            city,
            month,
            day,
            json,
        }) => {
            let selection = FilterSelection::parse(&city, &month, &day)?;
            print_stats(&config, &selection, json)?;
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, &config, cli.config.as_deref())?;
        }
        Some(Commands::Explore) | None => {
            repl::run(&config)?;
        }
    }

    Ok(())
}

fn print_stats(config: &AppConfig, selection: &FilterSelection, json: bool) -> Result<()> {
    let dataset = Dataset::load(config, selection)?;
    let analytics = TripAnalytics::new(&dataset);

    if json {
        let summary = Summary::collect(&analytics, selection);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let reports = ReportGenerator::new(config.display.show_timings);
        print!("{}", reports.full_report(&analytics));
    }
    Ok(())
}

fn handle_config_command(
    action: Option<ConfigAction>,
    config: &AppConfig,
    explicit_path: Option<&Path>,
) -> Result<()> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::default_path);

    match action {
        Some(ConfigAction::Show) | None => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
        }
        Some(ConfigAction::Init) => {
            if path.exists() {
                println!("Config already exists at: {}", path.display());
            } else {
                config.save_to(&path)?;
                println!("Created default config at: {}", path.display());
            }
        }
        Some(ConfigAction::Path) => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
