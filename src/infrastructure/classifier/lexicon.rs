use crate::domain::error::DomainError;
use crate::domain::ports::sentiment_classifier::SentimentClassifier;
use crate::domain::values::sentiment::softmax;
use std::collections::HashMap;

pub const LEXICON_MODEL_ID: &str = "lexicon-baseball-v1";

/// Rule-based classifier over a small sports/business lexicon.
///
/// Word weights are summed (a preceding negation flips the sign) into a
/// positive and a negative mass. Those become logits alongside a fixed
/// neutral logit, so text with no lexicon hits leans neutral.
pub struct LexiconClassifier {
    words: HashMap<&'static str, f64>,
    negations: Vec<&'static str>,
    neutral_logit: f64,
    max_tokens: usize,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    pub fn new() -> Self {
        let positive = [
            ("win", 0.6),
            ("wins", 0.6),
            ("won", 0.6),
            ("victory", 0.7),
            ("clinch", 0.8),
            ("clinches", 0.8),
            ("dominant", 0.7),
            ("dominate", 0.7),
            ("homer", 0.4),
            ("homers", 0.4),
            ("walk-off", 0.8),
            ("champion", 0.8),
            ("championship", 0.6),
            ("strong", 0.5),
            ("great", 0.6),
            ("best", 0.6),
            ("healthy", 0.5),
            ("return", 0.3),
            ("returns", 0.3),
            ("sign", 0.3),
            ("signs", 0.3),
            ("signing", 0.3),
            ("extension", 0.4),
            ("record", 0.4),
            ("mvp", 0.8),
            ("ace", 0.5),
            ("surge", 0.6),
            ("streak", 0.4),
            ("comeback", 0.6),
            ("improve", 0.5),
            ("improved", 0.5),
            ("optimistic", 0.6),
            ("favorite", 0.5),
            ("favorites", 0.5),
        ];
        let negative = [
            ("loss", -0.6),
            ("lose", -0.6),
            ("loses", -0.6),
            ("lost", -0.6),
            ("defeat", -0.7),
            ("injury", -0.7),
            ("injured", -0.7),
            ("il", -0.5),
            ("surgery", -0.8),
            ("slump", -0.7),
            ("struggle", -0.6),
            ("struggles", -0.6),
            ("struggling", -0.6),
            ("blown", -0.6),
            ("collapse", -0.8),
            ("eliminated", -0.9),
            ("swept", -0.8),
            ("error", -0.4),
            ("errors", -0.4),
            ("worst", -0.7),
            ("bad", -0.5),
            ("weak", -0.5),
            ("concern", -0.5),
            ("concerns", -0.5),
            ("suspended", -0.7),
            ("trade", -0.1),
            ("fired", -0.8),
            ("disappointing", -0.7),
            ("frustrated", -0.6),
            ("criticism", -0.6),
            ("decline", -0.6),
            ("underdog", -0.3),
        ];

        let words = positive.into_iter().chain(negative).collect();
        let negations = vec![
            "not", "no", "never", "without", "isn't", "wasn't", "aren't", "won't", "don't",
            "doesn't", "didn't", "can't", "cannot", "hardly",
        ];

        Self {
            words,
            negations,
            neutral_logit: 0.5,
            max_tokens: 512,
        }
    }

    fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split_whitespace().map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
                .to_lowercase()
        })
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<[f64; 3], DomainError> {
        let mut positive = 0.0;
        let mut negative = 0.0;
        let mut negate = false;

        for token in Self::tokenize(text).take(self.max_tokens) {
            if self.negations.iter().any(|n| *n == token) {
                negate = true;
                continue;
            }
            if let Some(weight) = self.words.get(token.as_str()) {
                let w = if negate { -weight } else { *weight };
                if w > 0.0 {
                    positive += w;
                } else {
                    negative += -w;
                }
            }
            negate = false;
        }

        let probs = softmax(&[negative, self.neutral_logit, positive]);
        Ok([probs[0], probs[1], probs[2]])
    }

    fn model_id(&self) -> &str {
        LEXICON_MODEL_ID
    }
}
