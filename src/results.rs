use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of mirroring one input URL
///
/// Exactly one of `saved_html_path` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPage {
    /// URL as supplied by the caller
    pub original_url: String,

    /// Location of the rewritten `index.html` (success only)
    pub saved_html_path: Option<PathBuf>,

    /// Failure message (failure only)
    pub error: Option<String>,
}

impl SavedPage {
    /// Record a page that was saved to `path`
    pub fn saved(original_url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            original_url: original_url.into(),
            saved_html_path: Some(path.into()),
            error: None,
        }
    }

    /// Record a page that could not be mirrored
    pub fn failed(original_url: impl Into<String>, error: impl ToString) -> Self {
        Self {
            original_url: original_url.into(),
            saved_html_path: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn saved_html_path(&self) -> Option<&Path> {
        self.saved_html_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_and_failed_are_exclusive() {
        let ok = SavedPage::saved("http://test.com", "downloads/test_com/index.html");
        assert!(ok.is_success());
        assert_eq!(
            ok.saved_html_path(),
            Some(Path::new("downloads/test_com/index.html"))
        );
        assert!(ok.error.is_none());

        let err = SavedPage::failed("http://fail.com", "connection refused");
        assert!(!err.is_success());
        assert!(err.saved_html_path.is_none());
        assert_eq!(err.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_serializes_with_null_fields() {
        let page = SavedPage::failed("http://fail.com", "boom");
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["original_url"], "http://fail.com");
        assert!(json["saved_html_path"].is_null());
        assert_eq!(json["error"], "boom");
    }
}
