use crate::error::{MirrorError, Result};
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Name used for resources whose URL has no path component
pub const FALLBACK_RESOURCE_NAME: &str = "resource";

/// File name of the rewritten page inside its host folder
pub const INDEX_FILE_NAME: &str = "index.html";

/// Parse a page URL supplied by the caller
pub fn parse_page_url(input: &str) -> Result<Url> {
    Url::parse(input).map_err(|source| MirrorError::InvalidUrl {
        input: input.to_string(),
        source,
    })
}

/// Whether `input` is an absolute http(s) URL
pub fn is_valid_page_url(input: &str) -> bool {
    Url::parse(input)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Whether a reference already carries its own scheme
pub fn is_absolute_url(reference: &str) -> bool {
    Url::parse(reference).is_ok()
}

/// Folder for everything belonging to `url`'s host: dots become underscores
pub fn host_folder(root: &Path, url: &Url) -> Result<PathBuf> {
    let host = url
        .host_str()
        .ok_or_else(|| MirrorError::MissingHost(url.to_string()))?;
    Ok(root.join(host.replace('.', "_")))
}

/// Local relative path for a resource, mirroring its URL path
///
/// Segments are percent-decoded one at a time. A segment that does not decode
/// to exactly one plain path component (`..`, `a%2Fb`) is dropped, so the
/// result always stays inside the host folder.
pub fn resource_file_name(url: &Url) -> String {
    let segments: Vec<String> = url
        .path_segments()
        .map(|segments| segments.filter_map(local_segment).collect())
        .unwrap_or_default();

    if segments.is_empty() {
        FALLBACK_RESOURCE_NAME.to_string()
    } else {
        segments.join("/")
    }
}

fn local_segment(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    if decoded.trim().is_empty() || decoded.contains(['/', '\\']) {
        return None;
    }

    let mut components = Path::new(&decoded).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(decoded),
        _ => None,
    }
}

/// Race `fut` against the cancellation token
pub async fn with_cancel<T, F>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(MirrorError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_folder_replaces_dots() {
        let url = Url::parse("http://www.test.com/page").unwrap();
        let folder = host_folder(Path::new("downloads"), &url).unwrap();
        assert_eq!(folder, Path::new("downloads").join("www_test_com"));
    }

    #[test]
    fn test_host_folder_requires_host() {
        let url = Url::parse("data:text/plain,hello").unwrap();
        assert!(matches!(
            host_folder(Path::new("downloads"), &url),
            Err(MirrorError::MissingHost(_))
        ));
    }

    #[test]
    fn test_resource_file_name() {
        let cases = [
            ("http://example.com/img/logo.png", "img/logo.png"),
            ("http://example.com/app.js?v=3", "app.js"),
            ("http://example.com//double.css", "double.css"),
            ("http://example.com/my%20file.png", "my file.png"),
            ("http://example.com/", FALLBACK_RESOURCE_NAME),
            ("http://example.com", FALLBACK_RESOURCE_NAME),
            ("http://example.com/a/..%2f..%2f..%2fescaped.txt", "a"),
            ("http://example.com/a/%2e%2e/b.png", "b.png"),
            ("http://example.com/a/..%5cwin.png", "a"),
            ("http://example.com/..%2f", FALLBACK_RESOURCE_NAME),
            ("http://example.com/img/./x.png", "img/x.png"),
        ];

        for (input, expected) in cases {
            let url = Url::parse(input).unwrap();
            assert_eq!(resource_file_name(&url), expected, "for {}", input);
        }
    }

    #[test]
    fn test_page_url_validation() {
        assert!(is_valid_page_url("https://owasp.org/"));
        assert!(is_valid_page_url("http://test.com"));
        assert!(!is_valid_page_url("ftp://files.example.com"));
        assert!(!is_valid_page_url("Downloads"));
        assert!(!is_valid_page_url("/tmp/mirror"));
    }

    #[test]
    fn test_parse_page_url_reports_input() {
        let err = parse_page_url("not a url").unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }

    #[tokio::test]
    async fn test_with_cancel() {
        let token = CancellationToken::new();
        let value = with_cancel(&token, async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);

        token.cancel();
        let result: Result<()> = with_cancel(&token, std::future::pending()).await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
