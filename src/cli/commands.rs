use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "yankees-sentiment",
    about = "Yankees news sentiment and championship odds tracker"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect recent Yankees news articles
    News {
        /// Days of history to search (defaults to NEWS_LOOKBACK_DAYS)
        #[arg(long)]
        days_back: Option<u32>,
    },
    /// Snapshot current World Series odds for the Yankees
    Odds,
    /// Score every article that has no sentiment yet
    Sentiment,
    /// Create the database schema
    Init,
    /// Show database statistics
    Stats,
    /// List recent articles with their sentiment
    Articles {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// List recent odds snapshots
    OddsHistory {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}
