mod common;

use httpmock::{Method::GET, MockServer};
use yankees_sentiment::config::Settings;
use yankees_sentiment::domain::error::DomainError;
use yankees_sentiment::SentimentTracker;

#[tokio::test]
async fn test_collect_yankees_outright_odds() {
    let server = MockServer::start();
    let mock = common::mock_odds(&server, &common::odds_events(-150));
    let tracker = common::setup(&server);

    let stored = tracker.collect_odds().await.unwrap();
    mock.assert();
    assert_eq!(stored, 2);

    let odds = tracker.recent_odds(10).unwrap();
    assert_eq!(odds.len(), 2);
    for snap in &odds {
        assert_eq!(snap.american_odds, -150);
        assert!((snap.decimal_odds - 1.6667).abs() < 1e-3);
        assert!((snap.implied_probability - 0.6).abs() < 1e-9);
        assert_eq!(snap.market, "World Series Winner");
    }
    let mut books: Vec<&str> = odds.iter().map(|o| o.bookmaker.as_str()).collect();
    books.sort();
    assert_eq!(books, vec!["DraftKings", "FanDuel"]);
}

#[tokio::test]
async fn test_no_yankees_outcome_stores_nothing() {
    let server = MockServer::start();
    let body = serde_json::json!([{
        "id": "evt1",
        "bookmakers": [{
            "key": "betmgm",
            "title": "BetMGM",
            "markets": [{"key": "outrights", "outcomes": [
                {"name": "Boston Red Sox", "price": 900}
            ]}]
        }]
    }]);
    common::mock_odds(&server, &body);
    let tracker = common::setup(&server);

    assert_eq!(tracker.collect_odds().await.unwrap(), 0);
    assert_eq!(tracker.stats().unwrap().total_odds_snapshots, 0);
}

#[tokio::test]
async fn test_zero_price_aborts_batch() {
    let server = MockServer::start();
    common::mock_odds(&server, &common::odds_events(0));
    let tracker = common::setup(&server);

    let err = tracker.collect_odds().await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert_eq!(tracker.stats().unwrap().total_odds_snapshots, 0);
}

#[tokio::test]
async fn test_server_error_commits_nothing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/sports/baseball_mlb_world_series_winner/odds");
        then.status(500).body("quota exceeded");
    });
    let tracker = common::setup(&server);

    let err = tracker.collect_odds().await.unwrap_err();
    match err {
        DomainError::Http { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("quota exceeded"));
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert_eq!(tracker.stats().unwrap().total_odds_snapshots, 0);
}

#[tokio::test]
async fn test_missing_key_fails_before_request() {
    let server = MockServer::start();
    let mock = common::mock_odds(&server, &common::odds_events(-150));
    let settings = Settings {
        odds_api_key: "  ".into(),
        ..common::settings(&server)
    };
    let tracker = SentimentTracker::new(settings);

    assert!(matches!(
        tracker.collect_odds().await.unwrap_err(),
        DomainError::Config(_)
    ));
    mock.assert_hits(0);
}

#[tokio::test]
async fn test_unpriced_rival_does_not_hide_team_price() {
    let server = MockServer::start();
    let body = serde_json::json!([{
        "id": "evt1",
        "bookmakers": [{
            "key": "draftkings",
            "title": "DraftKings",
            "markets": [{"key": "outrights", "outcomes": [
                {"name": "New York Yankees", "price": -150},
                {"name": "Los Angeles Dodgers", "price": null},
                {"name": "Houston Astros"}
            ]}]
        }]
    }]);
    common::mock_odds(&server, &body);
    let tracker = common::setup(&server);

    assert_eq!(tracker.collect_odds().await.unwrap(), 1);
    let odds = tracker.recent_odds(10).unwrap();
    assert_eq!(odds[0].american_odds, -150);
}

#[tokio::test]
async fn test_unpriced_team_outcome_aborts_batch() {
    let server = MockServer::start();
    let body = serde_json::json!([{
        "bookmakers": [
            {"title": "FanDuel", "markets": [{"key": "outrights", "outcomes": [
                {"name": "New York Yankees", "price": 400}
            ]}]},
            {"title": "BetMGM", "markets": [{"key": "outrights", "outcomes": [
                {"name": "New York Yankees", "price": null}
            ]}]}
        ]
    }]);
    common::mock_odds(&server, &body);
    let tracker = common::setup(&server);

    let err = tracker.collect_odds().await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert_eq!(tracker.stats().unwrap().total_odds_snapshots, 0);
}
