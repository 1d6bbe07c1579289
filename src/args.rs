use clap::Parser;
use page_mirror::utils::is_valid_page_url;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-mirror")]
#[command(about = "Mirrors web pages and the resources they reference to local folders")]
#[command(version)]
pub struct Args {
    /// Optional destination folder followed by the URLs to mirror
    /// (`[FOLDER] [URL]...`); built-in URLs are used when none are given
    pub targets: Vec<String>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of pages processed at once (unbounded by default)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Where to mirror and what, as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    /// Destination folder, when the first argument is not a URL
    pub root_folder: Option<PathBuf>,
    /// URLs to mirror; empty means "use the configured defaults"
    pub urls: Vec<String>,
}

impl Args {
    /// Splits the positional arguments into a destination folder and URLs
    pub fn targets(&self) -> Targets {
        match self.targets.split_first() {
            None => Targets {
                root_folder: None,
                urls: Vec::new(),
            },
            Some((first, _)) if is_valid_page_url(first) => Targets {
                root_folder: None,
                urls: self.targets.clone(),
            },
            Some((first, rest)) => Targets {
                root_folder: Some(PathBuf::from(first)),
                urls: rest.to_vec(),
            },
        }
    }
}
