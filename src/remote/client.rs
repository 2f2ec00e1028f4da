use std::future::Future;

use reqwest::Url;

use super::types::RemotePayload;
use crate::shared::errors::NetworkError;

pub const DEFAULT_TODOS_URL: &str = "https://dummyjson.com/todos";

/// Anything that can produce the initial remote task list.
pub trait TodoSource: Send + Sync {
    fn fetch_todos(&self) -> impl Future<Output = Result<RemotePayload, NetworkError>> + Send;
}

/// Fetches the task list with a single unauthenticated GET.
pub struct HttpTodoSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpTodoSource {
    pub fn new(url: &str) -> Result<Self, NetworkError> {
        let parsed = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{}: {}", url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NetworkError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                url,
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder().build().unwrap_or_default();

        Ok(Self {
            url: parsed,
            client,
        })
    }
}

impl TodoSource for HttpTodoSource {
    async fn fetch_todos(&self) -> Result<RemotePayload, NetworkError> {
        tracing::debug!(target: "remote", url = %self.url, "Fetching remote tasks");

        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(NetworkError::InvalidResponse)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(target: "remote", status = status.as_u16(), "Remote fetch failed");
            return Err(NetworkError::HttpError(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(NetworkError::InvalidResponse)?;
        decode_payload(&body)
    }
}

/// Decode a `/todos` body. Keys may be snake_case or camelCase.
pub fn decode_payload(body: &[u8]) -> Result<RemotePayload, NetworkError> {
    if body.is_empty() {
        return Err(NetworkError::NoData);
    }

    serde_json::from_slice(body).map_err(NetworkError::DecodingError)
}
