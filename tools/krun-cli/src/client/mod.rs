mod error;
mod http;

pub use error::*;
pub use http::*;

use async_trait::async_trait;

/// Raw response of a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The transport the dispatcher talks to. One call, one request.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn post(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, ClientError>;
}
