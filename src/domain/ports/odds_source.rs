use crate::domain::error::DomainError;
use async_trait::async_trait;
use serde::Deserialize;

/// One event of a futures odds payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OddsEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sport_title: Option<String>,
    #[serde(default)]
    pub bookmakers: Vec<BookmakerOdds>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmakerOdds {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub markets: Vec<MarketOdds>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketOdds {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<OutcomePrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutcomePrice {
    #[serde(default)]
    pub name: String,
    /// American odds. Absent or null for some books; only matched
    /// outcomes are required to carry one.
    #[serde(default)]
    pub price: Option<i64>,
}

#[async_trait]
pub trait OddsSource: Send + Sync {
    fn name(&self) -> &str;

    /// Current championship futures odds across all bookmakers.
    async fn championship_odds(&self) -> Result<Vec<OddsEvent>, DomainError>;
}
