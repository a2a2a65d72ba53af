pub mod article;
pub mod odds_snapshot;
pub mod sentiment_score;
