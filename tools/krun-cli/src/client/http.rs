use super::{ClientError, HttpResponse, RestClient};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the resource API
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Client for the API rooted at `base_url`
    pub fn with_base_url(
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .user_agent(concat!("krun/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RestClient for HttpClient {
    async fn post(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url} ({} bytes)", body.len());
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}
