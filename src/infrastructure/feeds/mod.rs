pub mod newsapi;
pub mod odds_api;

use crate::domain::error::DomainError;
use std::time::Duration;

const USER_AGENT: &str = "yankees-sentiment/0.1";

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_default()
}

/// Pass 2xx responses through; turn anything else into `DomainError::Http`
/// carrying the status and whatever body the server sent.
pub(crate) async fn ensure_success(
    resp: reqwest::Response,
) -> Result<reqwest::Response, DomainError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(DomainError::Http {
        status: status.as_u16(),
        body,
    })
}

/// Transport error without the request URL, which carries the API key.
pub(crate) fn redact(err: reqwest::Error) -> DomainError {
    DomainError::Network(err.without_url().to_string())
}
