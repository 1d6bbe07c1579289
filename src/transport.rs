use crate::config::MirrorConfig;
use crate::error::{MirrorError, Result};
use crate::utils::with_cancel;
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// HTTP GET access used by the downloader
///
/// Implementations fail on network errors, non-success statuses and
/// cancellation.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetch a body as text
    async fn get_text(&self, url: &Url, cancel: &CancellationToken) -> Result<String>;

    /// Fetch a body as raw bytes
    async fn get_bytes(&self, url: &Url, cancel: &CancellationToken) -> Result<Vec<u8>>;
}

/// Transport backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &MirrorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        ::log::trace!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Err(MirrorError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_text(&self, url: &Url, cancel: &CancellationToken) -> Result<String> {
        with_cancel(cancel, async {
            Ok::<_, MirrorError>(self.get(url).await?.text().await?)
        })
        .await
    }

    async fn get_bytes(&self, url: &Url, cancel: &CancellationToken) -> Result<Vec<u8>> {
        with_cancel(cancel, async {
            Ok::<_, MirrorError>(self.get(url).await?.bytes().await?.to_vec())
        })
        .await
    }
}
