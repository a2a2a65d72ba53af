mod common;

use httpmock::MockServer;
use std::sync::Arc;
use yankees_sentiment::config::{SentimentBackend, Settings};
use yankees_sentiment::domain::error::DomainError;
use yankees_sentiment::domain::ports::news_source::NewsSource;
use yankees_sentiment::domain::ports::sentiment_classifier::SentimentClassifier;
use yankees_sentiment::domain::ports::store::Store;
use yankees_sentiment::domain::values::sentiment::SentimentScores;
use yankees_sentiment::infrastructure::classifier::lexicon::LEXICON_MODEL_ID;
use yankees_sentiment::infrastructure::feeds::newsapi::NewsApiClient;
use yankees_sentiment::infrastructure::sqlite::store::SqliteStore;
use yankees_sentiment::SentimentTracker;

/// Fails on any text mentioning the bullpen; neutral-ish otherwise.
struct FlakyClassifier;

impl SentimentClassifier for FlakyClassifier {
    fn classify(&self, text: &str) -> Result<[f64; 3], DomainError> {
        if text.contains("bullpen") {
            return Err(DomainError::Model("inference failed".into()));
        }
        Ok([0.1, 0.3, 0.6])
    }

    fn model_id(&self) -> &str {
        "flaky"
    }
}

#[tokio::test]
async fn test_scores_every_collected_article_once() {
    let server = MockServer::start();
    common::mock_news(&server, &common::three_articles());
    let tracker = common::setup(&server);
    tracker.collect_news(None).await.unwrap();

    let first = tracker.analyze_unprocessed_articles().unwrap();
    assert_eq!(first.processed, 2);
    assert_eq!(first.skipped, 0);

    let second = tracker.analyze_unprocessed_articles().unwrap();
    assert_eq!(second.processed, 0);

    let articles = tracker.recent_articles(10).unwrap();
    for scored in &articles {
        let s = scored.sentiment.as_ref().expect("article should be scored");
        assert_eq!(s.model_used, LEXICON_MODEL_ID);
        assert!((s.positive + s.negative + s.neutral - 1.0).abs() < 1e-6);
        assert!((s.compound - (s.positive - s.negative)).abs() < 1e-9);
    }

    let stats = tracker.stats().unwrap();
    assert_eq!(stats.scored_articles, 2);
    assert_eq!(stats.unscored_articles, 0);
    assert!(stats.average_compound.is_some());
}

#[tokio::test]
async fn test_lexicon_orders_good_and_bad_news() {
    let server = MockServer::start();
    common::mock_news(&server, &common::three_articles());
    let tracker = common::setup(&server);
    tracker.collect_news(None).await.unwrap();
    tracker.analyze_unprocessed_articles().unwrap();

    let articles = tracker.recent_articles(10).unwrap();
    let compound_for = |needle: &str| {
        articles
            .iter()
            .find(|a| a.article.title.contains(needle))
            .and_then(|a| a.sentiment.as_ref())
            .map(|s| s.compound)
            .unwrap()
    };
    assert!(compound_for("pennant") > 0.0);
    assert!(compound_for("bullpen") < 0.0);
}

#[tokio::test]
async fn test_failing_article_is_skipped_and_retried_later() {
    let server = MockServer::start();
    common::mock_news(&server, &common::three_articles());
    let settings = Settings {
        sentiment_backend: SentimentBackend::Lexicon,
        ..common::settings(&server)
    };
    let store: Arc<dyn Store> = Arc::new(SqliteStore::open(":memory:").unwrap());
    let news: Arc<dyn NewsSource> =
        Arc::new(NewsApiClient::new(common::API_KEY.into(), Some(server.base_url())).unwrap());
    let tracker = SentimentTracker::with_providers(
        settings,
        store,
        Some(news),
        None,
        Some(Arc::new(FlakyClassifier)),
    );
    tracker.collect_news(None).await.unwrap();

    let stats = tracker.analyze_unprocessed_articles().unwrap();
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.skipped, 1);

    let store_stats = tracker.stats().unwrap();
    assert_eq!(store_stats.scored_articles, 1);
    assert_eq!(store_stats.unscored_articles, 1);

    // The skipped article is still pending on the next run.
    let again = tracker.analyze_unprocessed_articles().unwrap();
    assert_eq!(again.processed, 0);
    assert_eq!(again.skipped, 1);
}

#[test]
fn test_blank_text_is_exactly_neutral() {
    let server = MockServer::start();
    let tracker = common::setup(&server);
    for text in ["", "   ", "\n"] {
        let s = tracker.analyze_text(text).unwrap();
        assert_eq!(s, SentimentScores::neutral());
        assert_eq!((s.positive, s.negative, s.neutral, s.compound), (0.0, 0.0, 1.0, 0.0));
    }
}

#[test]
fn test_missing_onnx_model_is_model_error() {
    let server = MockServer::start();
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        sentiment_backend: SentimentBackend::Onnx,
        sentiment_model_dir: Some(dir.path().join("absent").to_string_lossy().into_owned()),
        ..common::settings(&server)
    };
    let tracker = SentimentTracker::new(settings);

    assert!(matches!(
        tracker.analyze_unprocessed_articles().unwrap_err(),
        DomainError::Model(_)
    ));
}
