use crate::domain::entities::odds_snapshot::NewOddsSnapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::odds_source::{OddsEvent, OddsSource};
use crate::domain::ports::store::{Store, StoreSession};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Which markets and outcomes of a futures payload to keep.
#[derive(Debug, Clone)]
pub struct OddsFilter {
    /// Market key to keep, e.g. `outrights`.
    pub market_key: String,
    /// Case-insensitive substring matched against outcome names.
    pub team_keyword: String,
    /// Label stored with every snapshot.
    pub market_label: String,
}

impl Default for OddsFilter {
    fn default() -> Self {
        Self {
            market_key: "outrights".into(),
            team_keyword: "yankees".into(),
            market_label: "World Series Winner".into(),
        }
    }
}

/// One matching outcome from one bookmaker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOdds {
    pub bookmaker: String,
    pub market: String,
    pub team: String,
    pub american_odds: Option<i64>,
    pub snapshot_at: DateTime<Utc>,
}

/// Walk events → bookmakers → markets → outcomes and keep the team's prices.
pub fn extract_team_odds(
    events: &[OddsEvent],
    filter: &OddsFilter,
    snapshot_at: DateTime<Utc>,
) -> Vec<TeamOdds> {
    let keyword = filter.team_keyword.to_lowercase();
    let mut found = Vec::new();

    for event in events {
        for bookmaker in &event.bookmakers {
            let name = bookmaker
                .title
                .clone()
                .or_else(|| bookmaker.key.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            for market in bookmaker.markets.iter().filter(|m| m.key == filter.market_key) {
                for outcome in &market.outcomes {
                    if outcome.name.to_lowercase().contains(&keyword) {
                        found.push(TeamOdds {
                            bookmaker: name.clone(),
                            market: filter.market_label.clone(),
                            team: outcome.name.clone(),
                            american_odds: outcome.price,
                            snapshot_at,
                        });
                    }
                }
            }
        }
    }

    found
}

pub struct CollectOddsUseCase {
    store: Arc<dyn Store>,
    source: Arc<dyn OddsSource>,
    filter: OddsFilter,
}

impl CollectOddsUseCase {
    pub fn new(store: Arc<dyn Store>, source: Arc<dyn OddsSource>, filter: OddsFilter) -> Self {
        Self { store, source, filter }
    }

    /// Fetch current odds and append one snapshot per matching outcome.
    /// Returns the number of snapshots stored.
    pub async fn execute(&self) -> Result<usize, DomainError> {
        self.store.init_schema()?;

        let events = self.source.championship_odds().await?;
        let odds = extract_team_odds(&events, &self.filter, Utc::now());
        tracing::debug!(
            source = self.source.name(),
            events = events.len(),
            matched = odds.len(),
            "odds fetched"
        );

        let mut session = self.store.session()?;
        match store_snapshots(session.as_mut(), &odds) {
            Ok(stored) => {
                session.commit()?;
                tracing::info!(stored, "odds collection committed");
                Ok(stored)
            }
            Err(e) => {
                if let Err(rb) = session.rollback() {
                    tracing::warn!(error = %rb, "rollback failed");
                }
                Err(e)
            }
        }
    }
}

fn store_snapshots(session: &mut (dyn StoreSession + '_), odds: &[TeamOdds]) -> Result<usize, DomainError> {
    for o in odds {
        let price = o.american_odds.ok_or_else(|| {
            DomainError::InvalidInput(format!("{} ({}): missing price", o.bookmaker, o.team))
        })?;
        let snapshot = NewOddsSnapshot::from_american(
            o.bookmaker.clone(),
            o.market.clone(),
            price,
            o.snapshot_at,
        )
        .map_err(|e| match e {
            DomainError::InvalidInput(msg) => {
                DomainError::InvalidInput(format!("{} ({}): {msg}", o.bookmaker, o.team))
            }
            other => other,
        })?;
        session.insert_odds_snapshot(&snapshot)?;
    }
    Ok(odds.len())
}
