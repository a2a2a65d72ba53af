use clap::Parser;
use tracing_subscriber::EnvFilter;
use yankees_sentiment::cli::commands::{Cli, Commands};
use yankees_sentiment::config::Settings;
use yankees_sentiment::domain::error::DomainError;
use yankees_sentiment::SentimentTracker;

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let tracker = SentimentTracker::new(settings);

    // Batch job failures are reported, not turned into an exit status.
    if let Err(e) = run_command(&tracker, cli.command).await {
        report(&e);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,yankees_sentiment=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn report(e: &DomainError) {
    if e.is_http() {
        println!("API error: {e}");
    } else {
        println!("Error: {e}");
    }
}

async fn run_command(tracker: &SentimentTracker, cmd: Commands) -> Result<(), DomainError> {
    match cmd {
        Commands::News { days_back } => {
            let stats = tracker.collect_news(days_back).await?;
            println!("Fetched {} articles.", stats.fetched);
            println!("  New: {}", stats.new);
            println!("  Duplicates skipped: {}", stats.duplicates);
        }
        Commands::Odds => {
            let stored = tracker.collect_odds().await?;
            println!("Stored {stored} odds snapshots.");
        }
        Commands::Sentiment => {
            let stats = tracker.analyze_unprocessed_articles()?;
            if stats.processed == 0 && stats.skipped == 0 {
                println!("No unprocessed articles found.");
            } else {
                println!("Analyzed {} articles.", stats.processed);
                if stats.skipped > 0 {
                    println!("  Skipped: {}", stats.skipped);
                }
            }
        }
        Commands::Init => {
            tracker.init_store()?;
            println!("Database ready at {}", tracker.settings().database_path);
        }
        Commands::Stats => {
            let stats = tracker.stats()?;
            print_json(&stats)?;
        }
        Commands::Articles { limit } => {
            let articles = tracker.recent_articles(limit)?;
            print_json(&articles)?;
        }
        Commands::OddsHistory { limit } => {
            let odds = tracker.recent_odds(limit)?;
            print_json(&odds)?;
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), DomainError> {
    let out = serde_json::to_string_pretty(value).map_err(|e| DomainError::Parse(e.to_string()))?;
    println!("{out}");
    Ok(())
}
