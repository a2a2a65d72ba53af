//! Shared test helpers.
#![allow(dead_code)]

use httpmock::MockServer;
use serde_json::{json, Value};
use yankees_sentiment::config::{SentimentBackend, Settings};
use yankees_sentiment::SentimentTracker;

pub const API_KEY: &str = "test-key";

/// Settings pointing both APIs at `server` with an in-memory database.
pub fn settings(server: &MockServer) -> Settings {
    Settings {
        news_api_key: API_KEY.into(),
        odds_api_key: API_KEY.into(),
        database_path: ":memory:".into(),
        news_base_url: Some(server.base_url()),
        odds_base_url: Some(server.base_url()),
        sentiment_backend: SentimentBackend::Lexicon,
        ..Default::default()
    }
}

pub fn setup(server: &MockServer) -> SentimentTracker {
    SentimentTracker::new(settings(server))
}

pub fn news_article(title: &str, description: Option<&str>, url: Option<&str>) -> Value {
    json!({
        "source": {"id": null, "name": "ESPN"},
        "author": "Staff",
        "title": title,
        "description": description,
        "url": url,
        "publishedAt": "2026-10-01T12:00:00Z",
        "content": null
    })
}

/// Three articles: two with distinct URLs and one without a URL.
pub fn three_articles() -> Value {
    json!({
        "status": "ok",
        "totalResults": 3,
        "articles": [
            news_article(
                "Yankees win the pennant",
                Some("Judge homers twice in a dominant victory"),
                Some("https://example.com/pennant"),
            ),
            news_article(
                "Yankees bullpen collapses",
                Some("A brutal loss after another blown save"),
                Some("https://example.com/bullpen"),
            ),
            news_article("Untracked wire story", Some("No link attached"), None),
        ]
    })
}

pub fn mock_news<'a>(server: &'a MockServer, body: &Value) -> httpmock::Mock<'a> {
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/everything")
            .query_param("apiKey", API_KEY)
            .query_param("language", "en")
            .query_param("sortBy", "publishedAt");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn odds_events(price: i64) -> Value {
    json!([{
        "id": "evt1",
        "sport_key": "baseball_mlb_world_series_winner",
        "sport_title": "MLB World Series Winner",
        "bookmakers": [
            {
                "key": "draftkings",
                "title": "DraftKings",
                "markets": [{"key": "outrights", "outcomes": [
                    {"name": "New York Yankees", "price": price},
                    {"name": "Los Angeles Dodgers", "price": 300}
                ]}]
            },
            {
                "key": "fanduel",
                "title": "FanDuel",
                "markets": [{"key": "outrights", "outcomes": [
                    {"name": "New York Yankees", "price": price}
                ]}]
            }
        ]
    }])
}

pub fn mock_odds<'a>(server: &'a MockServer, body: &Value) -> httpmock::Mock<'a> {
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/sports/baseball_mlb_world_series_winner/odds")
            .query_param("apiKey", API_KEY)
            .query_param("oddsFormat", "american");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}
