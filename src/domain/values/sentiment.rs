use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-class sentiment probabilities plus the compound summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
}

impl SentimentScores {
    /// Scores for text with nothing to classify.
    pub fn neutral() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
        }
    }

    /// Build from probabilities in model class order: negative, neutral, positive.
    pub fn from_probabilities(probs: [f64; 3]) -> Self {
        let [negative, neutral, positive] = probs;
        Self {
            positive,
            negative,
            neutral,
            compound: positive - negative,
        }
    }

    pub fn label(&self) -> SentimentLabel {
        if self.positive >= self.negative && self.positive >= self.neutral {
            SentimentLabel::Positive
        } else if self.negative >= self.neutral {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Negative => write!(f, "negative"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Positive => write!(f, "positive"),
        }
    }
}

/// Numerically stable softmax over raw logits.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
