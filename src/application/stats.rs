use crate::domain::entities::odds_snapshot::OddsSnapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::store::{ScoredArticle, Store, StoreStats};
use std::sync::Arc;

pub struct StatsUseCase {
    store: Arc<dyn Store>,
}

impl StatsUseCase {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn stats(&self) -> Result<StoreStats, DomainError> {
        self.store.init_schema()?;
        self.store.stats()
    }

    pub fn recent_articles(&self, limit: usize) -> Result<Vec<ScoredArticle>, DomainError> {
        self.store.init_schema()?;
        self.store.recent_articles(limit)
    }

    pub fn recent_odds(&self, limit: usize) -> Result<Vec<OddsSnapshot>, DomainError> {
        self.store.init_schema()?;
        self.store.recent_odds(limit)
    }
}
