//! Runtime settings.
//!
//! Layered from built-in defaults, an optional `config/default.toml`, then
//! environment variables named after the fields (`NEWS_API_KEY`,
//! `DATABASE_PATH`, `NEWS_LOOKBACK_DAYS`, ...).

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBackend {
    Onnx,
    Lexicon,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub news_api_key: String,
    #[serde(default)]
    pub odds_api_key: String,
    pub database_path: String,
    pub news_lookback_days: u32,
    pub news_base_url: Option<String>,
    pub odds_base_url: Option<String>,
    pub odds_sport: String,
    pub odds_market: String,
    pub odds_market_label: String,
    pub team_keyword: String,
    pub sentiment_model: String,
    pub sentiment_backend: SentimentBackend,
    /// Directory holding `model.onnx` and `tokenizer.json`. Defaults to
    /// `models/<last segment of sentiment_model>`.
    pub sentiment_model_dir: Option<String>,
    pub sentiment_max_tokens: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            news_api_key: String::new(),
            odds_api_key: String::new(),
            database_path: "data/yankees_sentiment.db".into(),
            news_lookback_days: 7,
            news_base_url: None,
            odds_base_url: None,
            odds_sport: "baseball_mlb_world_series_winner".into(),
            odds_market: "outrights".into(),
            odds_market_label: "World Series Winner".into(),
            team_keyword: "yankees".into(),
            sentiment_model: DEFAULT_SENTIMENT_MODEL.into(),
            sentiment_backend: SentimentBackend::Onnx,
            sentiment_model_dir: None,
            sentiment_max_tokens: 512,
        }
    }
}

impl Settings {
    /// Load configuration from `config/` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory and the environment.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let builder = Config::builder()
            .set_default("news_api_key", "")?
            .set_default("odds_api_key", "")?
            .set_default("database_path", defaults.database_path)?
            .set_default("news_lookback_days", i64::from(defaults.news_lookback_days))?
            .set_default("odds_sport", defaults.odds_sport)?
            .set_default("odds_market", defaults.odds_market)?
            .set_default("odds_market_label", defaults.odds_market_label)?
            .set_default("team_keyword", defaults.team_keyword)?
            .set_default("sentiment_model", defaults.sentiment_model)?
            .set_default("sentiment_backend", "onnx")?
            .set_default("sentiment_max_tokens", defaults.sentiment_max_tokens as i64)?
            .add_source(File::from(config_dir.as_ref().join("default.toml")).required(false))
            .add_source(Environment::default());

        builder.build()?.try_deserialize()
    }

    /// Names of required secrets that are missing.
    pub fn validate(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.news_api_key.trim().is_empty() {
            missing.push("NEWS_API_KEY");
        }
        if self.odds_api_key.trim().is_empty() {
            missing.push("ODDS_API_KEY");
        }
        missing
    }

    pub fn model_dir(&self) -> PathBuf {
        match &self.sentiment_model_dir {
            Some(dir) => PathBuf::from(dir),
            None => {
                let name = self
                    .sentiment_model
                    .rsplit('/')
                    .next()
                    .unwrap_or(&self.sentiment_model);
                Path::new("models").join(name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_missing_keys() {
        let settings = Settings::default();
        assert_eq!(settings.validate(), vec!["NEWS_API_KEY", "ODDS_API_KEY"]);

        let settings = Settings {
            news_api_key: "n".into(),
            odds_api_key: "o".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_empty());
    }

    #[test]
    fn test_model_dir_from_model_id() {
        let settings = Settings::default();
        assert_eq!(
            settings.model_dir(),
            Path::new("models").join("twitter-roberta-base-sentiment-latest")
        );

        let settings = Settings {
            sentiment_model_dir: Some("/opt/model".into()),
            ..Default::default()
        };
        assert_eq!(settings.model_dir(), PathBuf::from("/opt/model"));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "team_keyword = \"mets\"\nsentiment_backend = \"lexicon\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(dir.path()).unwrap();
        assert_eq!(settings.team_keyword, "mets");
        assert_eq!(settings.sentiment_backend, SentimentBackend::Lexicon);
        assert_eq!(settings.odds_market, "outrights");
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "news_lookback_days = 14\nsentiment_backend = \"lexicon\"\n",
        )
        .unwrap();
        std::env::set_var("NEWS_API_KEY", "envkey");
        std::env::set_var("NEWS_LOOKBACK_DAYS", "3");

        let loaded = Settings::load_from(dir.path());
        std::env::remove_var("NEWS_API_KEY");
        std::env::remove_var("NEWS_LOOKBACK_DAYS");

        let settings = loaded.unwrap();
        assert_eq!(settings.news_api_key, "envkey");
        assert_eq!(settings.news_lookback_days, 3);
        assert_eq!(settings.sentiment_backend, SentimentBackend::Lexicon);
    }
}
