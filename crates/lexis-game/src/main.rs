//! Lexis Command-Line Front End
//!
//! Loads the game data and answers one query, printing JSON to stdout.
//!
//! ## Usage
//!
//! ```bash
//! lexis --data-dir ./data secret
//! lexis guess ocean --day 12
//! lexis top --count 20
//! lexis hint --best 340 --used 170,171
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use lexis_game::{validate_day_index, FileRepository, GameConfig, GameService};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Lexis - daily semantic word game
#[derive(Parser, Debug)]
#[command(name = "lexis")]
#[command(version)]
#[command(about = "Daily secret word scheduling and similarity ranking", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Data directory (overrides the configuration)
    #[arg(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Generate sample configuration file
    #[arg(long)]
    generate_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Today's day index and secret word
    Secret,

    /// Secret word for a past day
    Target {
        /// Day index
        #[arg(long)]
        day: i64,
    },

    /// Score a guess
    Guess {
        /// Guessed word
        word: String,
        /// Day index, defaults to today
        #[arg(long)]
        day: Option<i64>,
    },

    /// Word at a rank
    Rank {
        /// 1-based rank
        rank: i64,
        /// Day index, defaults to today
        #[arg(long)]
        day: Option<i64>,
    },

    /// Closest words to the secret
    Top {
        /// Day index, defaults to today
        #[arg(long)]
        day: Option<i64>,
        /// Number of words, defaults to the configured count
        #[arg(long)]
        count: Option<usize>,
    },

    /// Reveal a hint word
    Hint {
        /// Best rank reached so far
        #[arg(long)]
        best: i64,
        /// Ranks already revealed
        #[arg(long, value_delimiter = ',')]
        used: Vec<i64>,
        /// Day index, defaults to today
        #[arg(long)]
        day: Option<i64>,
    },

    /// Pool rotation parameters
    Params,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TargetOutput {
    day_index: i64,
    word: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankOutput {
    day_index: i64,
    rank: i64,
    word: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParamsOutput {
    pool_size: usize,
    history_size: usize,
    params: Option<lexis_core::LcgParams>,
    quality: Option<lexis_core::LcgQuality>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Handle generate-config option
    if let Some(path) = args.generate_config {
        let config = GameConfig::default();
        config.save_to_file(&path)?;
        println!("Generated sample configuration at: {}", path.display());
        return Ok(());
    }

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    // Load configuration
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    config.validate()?;

    // Initialize logging
    let level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    if let Some(path) = &args.config {
        info!("Loaded configuration from: {}", path.display());
    }

    let service = GameService::new(FileRepository::from_config(&config), config);
    if let Err(e) = service.initialize().await {
        error!("Failed to load game data: {}", e);
        return Err(e.into());
    }

    run(&service, command)
}

fn run(
    service: &GameService<FileRepository>,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    let today = service.current_day_index();

    match command {
        Command::Secret => print_json(&service.daily_secret()?),
        Command::Target { day } => {
            validate_day_index(Some(day), today)?;
            let word = service.target_word(day)?;
            print_json(&TargetOutput { day_index: day, word })
        }
        Command::Guess { word, day } => {
            validate_day_index(day, today)?;
            print_json(&service.make_guess(&word, day)?)
        }
        Command::Rank { rank, day } => {
            validate_day_index(day, today)?;
            let word = service.word_by_rank(rank, day)?;
            print_json(&RankOutput {
                day_index: day.unwrap_or(today),
                rank,
                word,
            })
        }
        Command::Top { day, count } => {
            validate_day_index(day, today)?;
            let count = count.unwrap_or(service.config().top_words_count);
            print_json(&service.top_words(day.unwrap_or(today), count)?)
        }
        Command::Hint { best, used, day } => {
            validate_day_index(day, today)?;
            print_json(&service.hint(best, &used, day)?)
        }
        Command::Params => {
            let params = service.lcg_params()?;
            print_json(&ParamsOutput {
                pool_size: service.pool_size()?,
                history_size: service.history_size()?,
                params,
                quality: params.as_ref().map(lexis_core::evaluate_quality),
            })
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
