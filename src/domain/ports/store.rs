use crate::domain::entities::article::{Article, NewArticle};
use crate::domain::entities::odds_snapshot::{NewOddsSnapshot, OddsSnapshot};
use crate::domain::entities::sentiment_score::{NewSentimentScore, SentimentScore};
use crate::domain::error::DomainError;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    pub total_articles: usize,
    pub scored_articles: usize,
    pub unscored_articles: usize,
    pub total_odds_snapshots: usize,
    pub average_compound: Option<f64>,
    pub latest_odds: Option<OddsSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredArticle {
    pub article: Article,
    pub sentiment: Option<SentimentScore>,
}

/// Persistent store for articles, sentiment scores and odds snapshots.
pub trait Store: Send + Sync {
    /// Create tables and indexes if they do not exist. Safe to call repeatedly.
    fn init_schema(&self) -> Result<(), DomainError>;

    /// Begin a transactional session. The session holds the store exclusively
    /// until it is committed, rolled back or dropped (which rolls back).
    fn session(&self) -> Result<Box<dyn StoreSession + '_>, DomainError>;

    fn stats(&self) -> Result<StoreStats, DomainError>;
    fn recent_articles(&self, limit: usize) -> Result<Vec<ScoredArticle>, DomainError>;
    fn recent_odds(&self, limit: usize) -> Result<Vec<OddsSnapshot>, DomainError>;
    fn sentiment_for_article(&self, article_id: i64) -> Result<Option<SentimentScore>, DomainError>;
}

/// A unit of work over the store.
pub trait StoreSession {
    fn find_article_by_url(&mut self, url: &str) -> Result<Option<Article>, DomainError>;
    fn insert_article(&mut self, article: &NewArticle) -> Result<i64, DomainError>;
    fn insert_odds_snapshot(&mut self, snapshot: &NewOddsSnapshot) -> Result<i64, DomainError>;
    /// Articles with no sentiment score yet, oldest id first.
    fn articles_without_sentiment(&mut self) -> Result<Vec<Article>, DomainError>;
    fn insert_sentiment_score(&mut self, score: &NewSentimentScore) -> Result<i64, DomainError>;
    fn commit(self: Box<Self>) -> Result<(), DomainError>;
    fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}
