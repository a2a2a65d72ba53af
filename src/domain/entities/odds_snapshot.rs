use crate::domain::error::DomainError;
use crate::domain::values::american_odds::AmericanOdds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsSnapshot {
    pub id: i64,
    pub bookmaker: String,
    pub market: String,
    pub american_odds: i64,
    pub decimal_odds: f64,
    pub implied_probability: f64,
    pub snapshot_at: DateTime<Utc>,
    pub collected_at: DateTime<Utc>,
}

/// A snapshot ready to be inserted. Derived fields can only be produced
/// from the American price, so they never drift from it.
#[derive(Debug, Clone)]
pub struct NewOddsSnapshot {
    pub bookmaker: String,
    pub market: String,
    pub american_odds: i64,
    pub decimal_odds: f64,
    pub implied_probability: f64,
    pub snapshot_at: DateTime<Utc>,
    pub collected_at: DateTime<Utc>,
}

impl NewOddsSnapshot {
    pub fn from_american(
        bookmaker: String,
        market: String,
        american_odds: i64,
        snapshot_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let odds = AmericanOdds::new(american_odds)?;
        Ok(Self {
            bookmaker,
            market,
            american_odds: odds.value(),
            decimal_odds: odds.to_decimal(),
            implied_probability: odds.implied_probability(),
            snapshot_at,
            collected_at: Utc::now(),
        })
    }
}
