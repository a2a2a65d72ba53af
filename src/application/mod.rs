pub mod analyze_sentiment;
pub mod collect_news;
pub mod collect_odds;
pub mod stats;
