use super::PageDownloader;
use crate::error::{MirrorError, Result};
use crate::parsers::{HtmlDocument, rewrite_and_collect};
use crate::results::SavedPage;
use crate::utils::{INDEX_FILE_NAME, host_folder, parse_page_url, resource_file_name, with_cancel};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use url::Url;

impl PageDownloader {
    /// Mirrors a single page: the HTML plus every resource it references.
    ///
    /// Resource failures are logged and otherwise ignored; any other failure
    /// is returned in the record's `error`.
    pub async fn download_one(
        &self,
        url: &str,
        root_folder: &Path,
        cancel: &CancellationToken,
    ) -> SavedPage {
        match self.mirror_page(url, root_folder, cancel).await {
            Ok(path) => SavedPage::saved(url, path),
            Err(e) => SavedPage::failed(url, e),
        }
    }

    async fn mirror_page(
        &self,
        url: &str,
        root_folder: &Path,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        let page_url = parse_page_url(url)?;
        let host_dir = host_folder(root_folder, &page_url)?;

        let html = self.transport.get_text(&page_url, cancel).await?;
        let mut document = HtmlDocument::parse(html);
        let resources = rewrite_and_collect(&mut document, &page_url)?;
        ::log::debug!("{} references {} resources", url, resources.len());

        self.fs.create_folder(&host_dir)?;

        join_all(
            resources
                .iter()
                .map(|resource| self.save_resource(resource, &host_dir, cancel)),
        )
        .await;

        let html_path = host_dir.join(INDEX_FILE_NAME);
        with_cancel(cancel, async {
            let mut stream = self.fs.open_write_stream(&html_path).await?;
            document.write_to(&mut stream).await?;
            Ok::<_, MirrorError>(())
        })
        .await?;

        Ok(html_path)
    }

    /// Fetches and stores one resource; failures never reach the page
    async fn save_resource(
        &self,
        resource: &Url,
        host_folder: &Path,
        cancel: &CancellationToken,
    ) {
        match self.fetch_resource(resource, host_folder, cancel).await {
            Ok(path) => ::log::debug!("Saved {} to {}", resource, path.display()),
            Err(e) => ::log::warn!("Skipping resource {}: {}", resource, e),
        }
    }

    async fn fetch_resource(
        &self,
        resource: &Url,
        host_folder: &Path,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        let bytes = self.transport.get_bytes(resource, cancel).await?;

        let path = host_folder.join(resource_file_name(resource));
        if let Some(parent) = path.parent() {
            self.fs.create_folder(parent)?;
        }

        with_cancel(cancel, async {
            self.fs.save_file(&path, &bytes).await?;
            Ok::<_, MirrorError>(())
        })
        .await?;

        Ok(path)
    }
}
