pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::analyze_sentiment::{AnalyzeSentimentUseCase, SentimentAnalysisStats};
use crate::application::collect_news::{CollectNewsUseCase, NewsCollectionStats};
use crate::application::collect_odds::{CollectOddsUseCase, OddsFilter};
use crate::application::stats::StatsUseCase;
use crate::config::{SentimentBackend, Settings};
use crate::domain::entities::odds_snapshot::OddsSnapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::news_source::NewsSource;
use crate::domain::ports::odds_source::OddsSource;
use crate::domain::ports::sentiment_classifier::SentimentClassifier;
use crate::domain::ports::store::{ScoredArticle, Store, StoreStats};
use crate::domain::values::sentiment::SentimentScores;
use crate::infrastructure::classifier::lexicon::LexiconClassifier;
use crate::infrastructure::classifier::onnx::OnnxSentimentClassifier;
use crate::infrastructure::feeds::newsapi::NewsApiClient;
use crate::infrastructure::feeds::odds_api::OddsApiClient;
use crate::infrastructure::sqlite::store::SqliteStore;
use std::sync::{Arc, OnceLock};

pub struct SentimentTracker {
    settings: Settings,
    store: Arc<dyn Store>,
    news_uc: Option<CollectNewsUseCase>,
    odds_uc: Option<CollectOddsUseCase>,
    stats_uc: StatsUseCase,
    classifier: OnceLock<Arc<dyn SentimentClassifier>>,
}

impl SentimentTracker {
    /// Build a tracker on the configured SQLite database and live APIs.
    /// A missing API key only disables the collector that needs it. The
    /// database is not opened until an operation needs it.
    pub fn new(settings: Settings) -> Self {
        let store: Arc<dyn Store> = Arc::new(SqliteStore::deferred(&settings.database_path));

        let news: Option<Arc<dyn NewsSource>> =
            NewsApiClient::new(settings.news_api_key.clone(), settings.news_base_url.clone())
                .ok()
                .map(|c| Arc::new(c) as Arc<dyn NewsSource>);
        let odds: Option<Arc<dyn OddsSource>> = OddsApiClient::new(
            settings.odds_api_key.clone(),
            Some(settings.odds_sport.clone()),
            settings.odds_base_url.clone(),
        )
        .ok()
        .map(|c| Arc::new(c) as Arc<dyn OddsSource>);

        Self::with_providers(settings, store, news, odds, None)
    }

    pub fn with_providers(
        settings: Settings,
        store: Arc<dyn Store>,
        news: Option<Arc<dyn NewsSource>>,
        odds: Option<Arc<dyn OddsSource>>,
        classifier: Option<Arc<dyn SentimentClassifier>>,
    ) -> Self {
        let filter = OddsFilter {
            market_key: settings.odds_market.clone(),
            team_keyword: settings.team_keyword.clone(),
            market_label: settings.odds_market_label.clone(),
        };
        let lookback_days = settings.news_lookback_days;

        let cell = OnceLock::new();
        if let Some(c) = classifier {
            let _ = cell.set(c);
        }

        Self {
            news_uc: news.map(|n| CollectNewsUseCase::new(store.clone(), n, lookback_days)),
            odds_uc: odds.map(|o| CollectOddsUseCase::new(store.clone(), o, filter)),
            stats_uc: StatsUseCase::new(store.clone()),
            store,
            settings,
            classifier: cell,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn init_store(&self) -> Result<(), DomainError> {
        self.store.init_schema()
    }

    pub async fn collect_news(&self, days_back: Option<u32>) -> Result<NewsCollectionStats, DomainError> {
        let uc = self
            .news_uc
            .as_ref()
            .ok_or_else(|| DomainError::Config("NEWS_API_KEY not configured".into()))?;
        uc.execute(days_back).await
    }

    pub async fn collect_odds(&self) -> Result<usize, DomainError> {
        let uc = self
            .odds_uc
            .as_ref()
            .ok_or_else(|| DomainError::Config("ODDS_API_KEY not configured".into()))?;
        uc.execute().await
    }

    /// The classifier, loaded on first use and kept for the tracker's lifetime.
    pub fn classifier(&self) -> Result<Arc<dyn SentimentClassifier>, DomainError> {
        if let Some(c) = self.classifier.get() {
            return Ok(c.clone());
        }
        let loaded = self.load_classifier()?;
        Ok(self.classifier.get_or_init(|| loaded).clone())
    }

    fn load_classifier(&self) -> Result<Arc<dyn SentimentClassifier>, DomainError> {
        match self.settings.sentiment_backend {
            SentimentBackend::Lexicon => Ok(Arc::new(LexiconClassifier::new())),
            SentimentBackend::Onnx => Ok(Arc::new(OnnxSentimentClassifier::load(
                &self.settings.model_dir(),
                &self.settings.sentiment_model,
                self.settings.sentiment_max_tokens,
            )?)),
        }
    }

    fn sentiment_uc(&self) -> Result<AnalyzeSentimentUseCase, DomainError> {
        Ok(AnalyzeSentimentUseCase::new(self.store.clone(), self.classifier()?))
    }

    pub fn analyze_text(&self, text: &str) -> Result<SentimentScores, DomainError> {
        self.sentiment_uc()?.analyze_text(text)
    }

    pub fn analyze_unprocessed_articles(&self) -> Result<SentimentAnalysisStats, DomainError> {
        self.sentiment_uc()?.execute()
    }

    pub fn stats(&self) -> Result<StoreStats, DomainError> {
        self.stats_uc.stats()
    }

    pub fn recent_articles(&self, limit: usize) -> Result<Vec<ScoredArticle>, DomainError> {
        self.stats_uc.recent_articles(limit)
    }

    pub fn recent_odds(&self, limit: usize) -> Result<Vec<OddsSnapshot>, DomainError> {
        self.stats_uc.recent_odds(limit)
    }
}
