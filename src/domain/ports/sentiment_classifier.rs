use crate::domain::error::DomainError;

/// A loaded, read-only text classifier.
pub trait SentimentClassifier: Send + Sync {
    /// Class probabilities in `[negative, neutral, positive]` order.
    /// Input longer than the model accepts is truncated.
    fn classify(&self, text: &str) -> Result<[f64; 3], DomainError>;

    /// Identifier recorded alongside every score.
    fn model_id(&self) -> &str;
}
