use crate::domain::entities::article::NewArticle;
use crate::domain::error::DomainError;
use crate::domain::ports::news_source::{NewsSource, RawArticle};
use crate::domain::ports::store::{Store, StoreSession};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NewsCollectionStats {
    pub fetched: usize,
    pub new: usize,
    pub duplicates: usize,
}

pub struct CollectNewsUseCase {
    store: Arc<dyn Store>,
    source: Arc<dyn NewsSource>,
    lookback_days: u32,
    page_size: u32,
}

impl CollectNewsUseCase {
    pub fn new(store: Arc<dyn Store>, source: Arc<dyn NewsSource>, lookback_days: u32) -> Self {
        Self {
            store,
            source,
            lookback_days,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Fetch recent articles and persist the ones whose URL is not stored yet.
    /// All inserts commit together; any failure rolls the whole batch back.
    pub async fn execute(&self, days_back: Option<u32>) -> Result<NewsCollectionStats, DomainError> {
        self.store.init_schema()?;

        let days_back = days_back.filter(|d| *d > 0).unwrap_or(self.lookback_days);
        let records = self.source.search_articles(days_back, self.page_size).await?;
        tracing::debug!(source = self.source.name(), count = records.len(), "articles fetched");

        let mut session = self.store.session()?;
        match store_new_articles(session.as_mut(), &records) {
            Ok(stats) => {
                session.commit()?;
                tracing::info!(
                    fetched = stats.fetched,
                    new = stats.new,
                    duplicates = stats.duplicates,
                    "news collection committed"
                );
                Ok(stats)
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

fn store_new_articles(
    session: &mut (dyn StoreSession + '_),
    records: &[RawArticle],
) -> Result<NewsCollectionStats, DomainError> {
    let mut stats = NewsCollectionStats {
        fetched: records.len(),
        ..Default::default()
    };
    let now = Utc::now();

    for record in records {
        let Some(url) = record.url.as_deref().filter(|u| !u.is_empty()) else {
            tracing::debug!(title = ?record.title, "skipping article without url");
            continue;
        };

        if session.find_article_by_url(url)?.is_some() {
            stats.duplicates += 1;
            continue;
        }

        let article = NewArticle {
            source: record
                .source_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            author: record.author.clone(),
            title: record.title.clone().unwrap_or_default(),
            description: record.description.clone(),
            url: Some(url.to_string()),
            content: record.content.clone(),
            published_at: parse_published_at(record.published_at.as_deref(), now),
            collected_at: now,
        };
        session.insert_article(&article)?;
        stats.new += 1;
    }

    Ok(stats)
}

/// Parse an ISO-8601 publish time. RFC 3339 (including a `Z` suffix) is
/// preferred; a naive timestamp is taken as UTC; anything else yields `fallback`.
pub fn parse_published_at(value: Option<&str>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    let Some(s) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return fallback;
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc();
    }
    fallback
}
