use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed American odds. Positive is the profit on a 100 stake, negative is
/// the stake needed to profit 100. Zero is not a valid price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmericanOdds(i64);

impl AmericanOdds {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::InvalidInput(
                "American odds cannot be zero".to_string(),
            ));
        }
        Ok(AmericanOdds(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Total payout multiple per unit staked.
    pub fn to_decimal(&self) -> f64 {
        let a = self.0 as f64;
        if self.0 > 0 {
            a / 100.0 + 1.0
        } else {
            100.0 / a.abs() + 1.0
        }
    }

    /// Implied win probability, ignoring bookmaker margin.
    pub fn implied_probability(&self) -> f64 {
        let a = self.0 as f64;
        if self.0 > 0 {
            100.0 / (a + 100.0)
        } else {
            a.abs() / (a.abs() + 100.0)
        }
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

pub fn american_to_decimal(american: i64) -> Result<f64, DomainError> {
    Ok(AmericanOdds::new(american)?.to_decimal())
}

pub fn american_to_probability(american: i64) -> Result<f64, DomainError> {
    Ok(AmericanOdds::new(american)?.implied_probability())
}
