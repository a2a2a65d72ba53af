use crate::domain::entities::article::Article;
use crate::domain::entities::sentiment_score::NewSentimentScore;
use crate::domain::error::DomainError;
use crate::domain::ports::sentiment_classifier::SentimentClassifier;
use crate::domain::ports::store::{Store, StoreSession};
use crate::domain::values::sentiment::SentimentScores;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentAnalysisStats {
    pub processed: usize,
    pub skipped: usize,
}

pub struct AnalyzeSentimentUseCase {
    store: Arc<dyn Store>,
    classifier: Arc<dyn SentimentClassifier>,
}

impl AnalyzeSentimentUseCase {
    pub fn new(store: Arc<dyn Store>, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { store, classifier }
    }

    pub fn model_id(&self) -> &str {
        self.classifier.model_id()
    }

    /// Blank text is neutral by definition and never reaches the model.
    pub fn analyze_text(&self, text: &str) -> Result<SentimentScores, DomainError> {
        if text.trim().is_empty() {
            return Ok(SentimentScores::neutral());
        }
        let probs = self.classifier.classify(text)?;
        Ok(SentimentScores::from_probabilities(probs))
    }

    pub fn analyze_article(&self, article: &Article) -> Result<SentimentScores, DomainError> {
        self.analyze_text(&article.analysis_text())
    }

    /// Score every article that has no sentiment yet. A failure to score one
    /// article is logged and counted as skipped; storage failures abort the
    /// batch and roll it back.
    pub fn execute(&self) -> Result<SentimentAnalysisStats, DomainError> {
        self.store.init_schema()?;

        let mut session = self.store.session()?;
        match self.score_pending(session.as_mut()) {
            Ok(stats) => {
                session.commit()?;
                tracing::info!(
                    processed = stats.processed,
                    skipped = stats.skipped,
                    model = self.classifier.model_id(),
                    "sentiment analysis committed"
                );
                Ok(stats)
            }
            Err(e) => {
                if let Err(rb) = session.rollback() {
                    tracing::warn!(error = %rb, "rollback failed");
                }
                Err(e)
            }
        }
    }

    fn score_pending(
        &self,
        session: &mut (dyn StoreSession + '_),
    ) -> Result<SentimentAnalysisStats, DomainError> {
        let pending = session.articles_without_sentiment()?;
        tracing::debug!(count = pending.len(), "articles awaiting sentiment");

        let outcomes: Vec<(&Article, Result<SentimentScores, DomainError>)> = pending
            .iter()
            .map(|article| (article, self.analyze_article(article)))
            .collect();

        let mut stats = SentimentAnalysisStats::default();
        for (article, outcome) in outcomes {
            match outcome {
                Ok(scores) => {
                    let score = NewSentimentScore::new(article.id, scores, self.classifier.model_id());
                    session.insert_sentiment_score(&score)?;
                    stats.processed += 1;
                }
                Err(e) => {
                    tracing::warn!(article_id = article.id, title = %article.title, error = %e, "skipping article");
                    stats.skipped += 1;
                }
            }
        }
        Ok(stats)
    }
}
