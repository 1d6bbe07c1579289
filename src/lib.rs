// Re-export modules
pub mod config;
pub mod downloader;
pub mod error;
pub mod parsers;
pub mod results;
pub mod storage;
pub mod transport;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::MirrorConfig;
pub use downloader::PageDownloader;
pub use error::{MirrorError, Result};
pub use parsers::{HtmlDocument, rewrite_and_collect};
pub use results::SavedPage;
pub use storage::{FileSystemAccessor, LocalFileSystem};
pub use transport::{HttpTransport, ReqwestTransport};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Builder for a mirroring run over the local disk and a reqwest client
pub struct Mirror {
    urls: Vec<String>,
    config: MirrorConfig,
}

impl Mirror {
    /// Create a new Mirror for the given URLs; the configured defaults are used when empty
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            config: MirrorConfig::default(),
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: MirrorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = MirrorConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self> {
        let config = MirrorConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Set the folder that receives one sub-folder per host
    pub fn with_root_folder(mut self, root_folder: impl Into<PathBuf>) -> Self {
        self.config.root_folder = root_folder.into();
        self
    }

    /// Limit how many pages are processed at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = Some(max_concurrency);
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.request_timeout_secs = timeout_seconds;
        self
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// URLs this run will mirror
    pub fn urls(&self) -> &[String] {
        if self.urls.is_empty() {
            &self.config.urls
        } else {
            &self.urls
        }
    }

    fn downloader(&self) -> Result<PageDownloader> {
        let transport = ReqwestTransport::new(&self.config)?;
        let downloader = PageDownloader::new(Arc::new(transport), Arc::new(LocalFileSystem));

        Ok(match self.config.max_concurrency {
            Some(limit) => downloader.with_max_concurrency(limit),
            None => downloader,
        })
    }

    /// Mirror every page and return all results once finished
    pub async fn download_all(self, cancel: CancellationToken) -> Result<Vec<SavedPage>> {
        let downloader = self.downloader()?;
        Ok(downloader
            .download_all(self.urls().to_vec(), &self.config.root_folder, cancel)
            .await)
    }

    /// Start mirroring and get a receiver that yields pages as they complete
    pub fn download_streaming(
        self,
        cancel: CancellationToken,
    ) -> Result<mpsc::Receiver<SavedPage>> {
        let downloader = self.downloader()?;
        Ok(downloader.download_streaming(
            self.urls().to_vec(),
            &self.config.root_folder,
            cancel,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_urls() {
        let mirror = Mirror::new(Vec::<String>::new());
        assert_eq!(mirror.urls().len(), 6);
        assert_eq!(mirror.config().root_folder, PathBuf::from("Downloads"));
    }

    #[test]
    fn test_builder_overrides() {
        let mirror = Mirror::new(["http://test.com"])
            .with_config_str(r#"{"root_folder": "from-json"}"#)
            .unwrap()
            .with_root_folder("mirror")
            .with_max_concurrency(3)
            .with_request_timeout(5);

        assert_eq!(mirror.urls(), ["http://test.com".to_string()]);
        assert_eq!(mirror.config().root_folder, PathBuf::from("mirror"));
        assert_eq!(mirror.config().max_concurrency, Some(3));
        assert_eq!(mirror.config().request_timeout_secs, 5);
    }
}
