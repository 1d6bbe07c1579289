mod page;


use crate::results::SavedPage;
use crate::storage::FileSystemAccessor;
use crate::transport::HttpTransport;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Mirrors pages and their resources into per-host folders.
///
/// Cloning is cheap; clones share the transport, the filesystem accessor and
/// the concurrency limit.
#[derive(Clone)]
pub struct PageDownloader {
    transport: Arc<dyn HttpTransport>,
    fs: Arc<dyn FileSystemAccessor>,
    limiter: Option<Arc<Semaphore>>,
}

impl PageDownloader {
    pub fn new(transport: Arc<dyn HttpTransport>, fs: Arc<dyn FileSystemAccessor>) -> Self {
        Self {
            transport,
            fs,
            limiter: None,
        }
    }

    /// Process at most `max_concurrency` pages at a time (at least one)
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.limiter = Some(Arc::new(Semaphore::new(max_concurrency.max(1))));
        self
    }

    /// Downloads every page and returns once all of them have finished.
    ///
    /// Results are in completion order. Page failures are reported in the
    /// returned records, never as an error of this call.
    pub async fn download_all<I, S>(
        &self,
        urls: I,
        root_folder: impl AsRef<Path>,
        cancel: CancellationToken,
    ) -> Vec<SavedPage>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ::log::info!("Starting bulk downloading of web pages");

        let (mut tasks, count) = self.spawn_all(urls, root_folder.as_ref(), &cancel);
        let mut pages = Vec::with_capacity(count);

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(page) => pages.push(page),
                Err(e) => ::log::error!("Page task ended abnormally: {}", e),
            }
        }

        ::log::info!("Completed bulk downloading of {} web pages", pages.len());
        pages
    }

    /// Downloads every page and yields each result as soon as it completes.
    ///
    /// The receiver closes after the last page. Dropping it aborts the pages
    /// still in flight. Must be called from within a Tokio runtime.
    pub fn download_streaming<I, S>(
        &self,
        urls: I,
        root_folder: impl AsRef<Path>,
        cancel: CancellationToken,
    ) -> mpsc::Receiver<SavedPage>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ::log::info!("Starting asynchronous downloading of web pages");

        let (mut tasks, count) = self.spawn_all(urls, root_folder.as_ref(), &cancel);
        let (result_tx, result_rx) = mpsc::channel(count.max(1));

        tokio::spawn(async move {
            while let Some(joined) = tasks.join_next().await {
                let page = match joined {
                    Ok(page) => page,
                    Err(e) => {
                        ::log::error!("Page task ended abnormally: {}", e);
                        continue;
                    }
                };

                match &page.error {
                    None => ::log::info!(
                        "Successfully downloaded and saved page from {} to {}",
                        page.original_url,
                        page.saved_html_path
                            .as_deref()
                            .unwrap_or(Path::new(""))
                            .display()
                    ),
                    Some(error) => ::log::error!(
                        "Failed to download page from {}. Error: {}",
                        page.original_url,
                        error
                    ),
                }

                if result_tx.send(page).await.is_err() {
                    ::log::debug!("Result receiver dropped, aborting remaining pages");
                    break;
                }
            }
        });

        result_rx
    }

    /// Launches one task per URL
    fn spawn_all<I, S>(
        &self,
        urls: I,
        root_folder: &Path,
        cancel: &CancellationToken,
    ) -> (JoinSet<SavedPage>, usize)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tasks = JoinSet::new();
        let mut count = 0;

        for url in urls {
            let url: String = url.into();
            let downloader = self.clone();
            let root_folder: PathBuf = root_folder.to_path_buf();
            let cancel = cancel.clone();
            count += 1;

            tasks.spawn(async move {
                let _permit = match &downloader.limiter {
                    Some(limiter) => limiter.clone().acquire_owned().await.ok(),
                    None => None,
                };

                let pipeline = downloader.download_one(&url, &root_folder, &cancel);
                match AssertUnwindSafe(pipeline).catch_unwind().await {
                    Ok(page) => page,
                    Err(panic) => SavedPage::failed(url.as_str(), panic_message(panic.as_ref())),
                }
            });
        }

        (tasks, count)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("page pipeline panicked: {}", detail)
}
