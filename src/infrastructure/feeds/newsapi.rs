use super::{ensure_success, http_client, redact};
use crate::domain::error::DomainError;
use crate::domain::ports::news_source::{NewsSource, RawArticle};
use async_trait::async_trait;
use chrono::{Duration, Utc};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Free-text query biased toward the team, its stars and front office.
pub const YANKEES_QUERY: &str = "\"New York Yankees\" OR \"Yankees\" AND (baseball OR MLB OR offseason OR trade OR signing) OR \"Aaron Judge\" OR \"Gerrit Cole\" OR \"Anthony Volpe\" OR \"Aaron Boone\" OR \"Hal Steinbrenner\"";

/// NewsAPI `everything` search client.
pub struct NewsApiClient {
    api_key: String,
    base_url: String,
    query: String,
    client: reqwest::Client,
}

impl NewsApiClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Result<Self, DomainError> {
        if api_key.trim().is_empty() {
            return Err(DomainError::Config("NEWS_API_KEY not configured".into()));
        }
        Ok(Self {
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            query: YANKEES_QUERY.to_string(),
            client: http_client(),
        })
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

#[derive(Debug, serde::Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiArticle {
    #[serde(default)]
    source: Option<ApiSource>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiSource {
    #[serde(default)]
    name: Option<String>,
}

impl From<ApiArticle> for RawArticle {
    fn from(a: ApiArticle) -> Self {
        RawArticle {
            source_name: a.source.and_then(|s| s.name),
            author: a.author,
            title: a.title,
            description: a.description,
            url: a.url,
            published_at: a.published_at,
            content: a.content,
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn search_articles(
        &self,
        days_back: u32,
        page_size: u32,
    ) -> Result<Vec<RawArticle>, DomainError> {
        let from_date = (Utc::now() - Duration::days(i64::from(days_back)))
            .format("%Y-%m-%d")
            .to_string();
        let url = format!("{}/everything", self.base_url);
        let page_size = page_size.to_string();

        tracing::debug!(%from_date, page_size = %page_size, "searching news");
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("q", self.query.as_str()),
                ("from", from_date.as_str()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(redact)?;

        let data: EverythingResponse = ensure_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.without_url().to_string()))?;

        Ok(data.articles.into_iter().map(RawArticle::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        assert!(matches!(
            NewsApiClient::new(String::new(), None),
            Err(DomainError::Config(_))
        ));
        assert!(matches!(
            NewsApiClient::new("   ".into(), None),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = NewsApiClient::new("k".into(), Some("http://localhost:1234/v2/".into())).unwrap();
        assert_eq!(client.base_url, "http://localhost:1234/v2");
        assert_eq!(client.name(), "newsapi");
    }

    #[test]
    fn test_wire_article_maps_nested_source() {
        let json = r#"{"articles":[{"source":{"id":null,"name":"ESPN"},"author":null,
            "title":"Judge wins MVP","description":"Again","url":"https://espn.com/1",
            "publishedAt":"2026-10-01T12:00:00Z","content":"..."}]}"#;
        let data: EverythingResponse = serde_json::from_str(json).unwrap();
        let raw: RawArticle = data.articles.into_iter().next().unwrap().into();
        assert_eq!(raw.source_name.as_deref(), Some("ESPN"));
        assert_eq!(raw.author, None);
        assert_eq!(raw.published_at.as_deref(), Some("2026-10-01T12:00:00Z"));
    }
}
