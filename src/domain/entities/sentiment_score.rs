use crate::domain::values::sentiment::SentimentScores;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentScore {
    pub id: i64,
    pub article_id: i64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
    pub model_used: String,
    pub analyzed_at: DateTime<Utc>,
}

impl SentimentScore {
    pub fn scores(&self) -> SentimentScores {
        SentimentScores {
            positive: self.positive,
            negative: self.negative,
            neutral: self.neutral,
            compound: self.compound,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewSentimentScore {
    pub article_id: i64,
    pub scores: SentimentScores,
    pub model_used: String,
    pub analyzed_at: DateTime<Utc>,
}

impl NewSentimentScore {
    pub fn new(article_id: i64, scores: SentimentScores, model_used: &str) -> Self {
        Self {
            article_id,
            scores,
            model_used: model_used.to_string(),
            analyzed_at: Utc::now(),
        }
    }
}
