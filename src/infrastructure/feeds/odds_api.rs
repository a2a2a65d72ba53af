use super::{ensure_success, http_client, redact};
use crate::domain::error::DomainError;
use crate::domain::ports::odds_source::{OddsEvent, OddsSource};
use async_trait::async_trait;

pub const DEFAULT_BASE_URL: &str = "https://api.the-odds-api.com/v4";
pub const DEFAULT_SPORT: &str = "baseball_mlb_world_series_winner";

/// The Odds API client for futures (outrights) odds, US books, American format.
pub struct OddsApiClient {
    api_key: String,
    base_url: String,
    sport: String,
    client: reqwest::Client,
}

impl OddsApiClient {
    pub fn new(
        api_key: String,
        sport: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, DomainError> {
        if api_key.trim().is_empty() {
            return Err(DomainError::Config("ODDS_API_KEY not configured".into()));
        }
        Ok(Self {
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            sport: sport.unwrap_or_else(|| DEFAULT_SPORT.to_string()),
            client: http_client(),
        })
    }
}

#[async_trait]
impl OddsSource for OddsApiClient {
    fn name(&self) -> &str {
        "the-odds-api"
    }

    async fn championship_odds(&self) -> Result<Vec<OddsEvent>, DomainError> {
        let url = format!("{}/sports/{}/odds", self.base_url, self.sport);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("regions", "us"),
                ("oddsFormat", "american"),
            ])
            .send()
            .await
            .map_err(redact)?;

        ensure_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.without_url().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        assert!(matches!(
            OddsApiClient::new(String::new(), None, None),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let client = OddsApiClient::new("k".into(), None, None).unwrap();
        assert_eq!(client.sport, DEFAULT_SPORT);
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_payload_deserializes() {
        let json = r#"[{"id":"abc","sport_key":"baseball_mlb_world_series_winner",
            "sport_title":"MLB World Series Winner","commence_time":"2026-10-20T00:00:00Z",
            "bookmakers":[{"key":"draftkings","title":"DraftKings","last_update":"2026-10-18T10:00:00Z",
            "markets":[{"key":"outrights","outcomes":[
                {"name":"New York Yankees","price":450},
                {"name":"Los Angeles Dodgers","price":-120},
                {"name":"Boston Red Sox","price":null},
                {"name":"Chicago Cubs"}]}]}]}]"#;
        let events: Vec<OddsEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 1);
        let market = &events[0].bookmakers[0].markets[0];
        assert_eq!(market.key, "outrights");
        assert_eq!(market.outcomes[1].price, Some(-120));
        assert_eq!(market.outcomes[2].price, None);
        assert_eq!(market.outcomes[3].price, None);
    }
}
