use crate::error::{MirrorError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for a mirroring run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Folder under which one sub-folder per host is created
    #[serde(default = "default_root_folder")]
    pub root_folder: PathBuf,

    /// Pages to mirror when none are given explicitly
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,

    /// Maximum number of pages processed at once (unbounded when absent)
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Timeout applied to every HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            root_folder: default_root_folder(),
            urls: default_urls(),
            max_concurrency: None,
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl MirrorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.max_concurrency == Some(0) {
            return Err(MirrorError::Config(serde::de::Error::custom(
                "max_concurrency must be at least 1",
            )));
        }
        Ok(config)
    }
}

/// Default value for root_folder
fn default_root_folder() -> PathBuf {
    PathBuf::from("Downloads")
}

/// Pages mirrored when the caller names none
fn default_urls() -> Vec<String> {
    [
        "https://www.entaingroup.com/",
        "https://www.microsoft.com/en-us/",
        "https://www.github.com/",
        "https://www.wikipedia.org/",
        "https://owasp.org/",
        "https://www.opengroup.org/togaf",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Default value for request_timeout_secs
fn default_request_timeout_secs() -> u64 {
    30
}

/// Default value for user_agent
fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = MirrorConfig::from_json("{}").unwrap();
        assert_eq!(config, MirrorConfig::default());
        assert_eq!(config.root_folder, PathBuf::from("Downloads"));
        assert_eq!(config.urls.len(), 6);
        assert_eq!(config.max_concurrency, None);
    }

    #[test]
    fn test_overrides() {
        let config = MirrorConfig::from_json(
            r#"{"root_folder": "mirror", "urls": ["http://test.com"], "max_concurrency": 2, "request_timeout_secs": 5}"#,
        )
        .unwrap();

        assert_eq!(config.root_folder, PathBuf::from("mirror"));
        assert_eq!(config.urls, vec!["http://test.com".to_string()]);
        assert_eq!(config.max_concurrency, Some(2));
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let err = MirrorConfig::from_json(r#"{"max_concurrency": 0}"#).unwrap_err();
        assert!(matches!(err, MirrorError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mirror.json");
        std::fs::write(&path, r#"{"root_folder": "out"}"#).unwrap();

        let config = MirrorConfig::from_file(&path).unwrap();
        assert_eq!(config.root_folder, PathBuf::from("out"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MirrorConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, MirrorError::Io(_)));
    }
}
