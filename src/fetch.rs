//! HTTP fetch seam for the dataset loader.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Request, Response};

/// Abstraction over the HTTP client so tests can stub the network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

/// Plain unauthenticated client; the dataset is a public file.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.0.execute(req).await
    }
}

/// Fetches a UTF-8 text body from `url`.
///
/// Non-2xx responses are errors; the dataset must arrive whole or not at all.
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String> {
    let req = Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    Ok(resp.error_for_status()?.text().await?)
}
