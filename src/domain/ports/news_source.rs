use crate::domain::error::DomainError;
use async_trait::async_trait;

/// An article as returned by the search API, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawArticle {
    pub source_name: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &str;

    /// Search articles published within the last `days_back` days, newest first.
    async fn search_articles(
        &self,
        days_back: u32,
        page_size: u32,
    ) -> Result<Vec<RawArticle>, DomainError>;
}
