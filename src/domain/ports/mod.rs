pub mod news_source;
pub mod odds_source;
pub mod sentiment_classifier;
pub mod store;
