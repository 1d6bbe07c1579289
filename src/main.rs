use clap::Parser;
use page_mirror::{Mirror, SavedPage};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let targets = args.targets();

    let mut mirror = Mirror::new(targets.urls);
    if let Some(path) = &args.config {
        mirror = match mirror.with_config_file(path) {
            Ok(mirror) => mirror,
            Err(e) => {
                ::log::error!("Failed to load configuration from {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };
    }
    if let Some(root_folder) = targets.root_folder {
        mirror = mirror.with_root_folder(root_folder);
    }
    if let Some(concurrency) = args.concurrency {
        mirror = mirror.with_max_concurrency(concurrency);
    }
    if let Some(timeout) = args.timeout {
        mirror = mirror.with_request_timeout(timeout);
    }

    ::log::info!(
        "Mirroring {} pages into {}",
        mirror.urls().len(),
        mirror.config().root_folder.display()
    );

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ::log::warn!("Interrupted, cancelling downloads");
            interrupt.cancel();
        }
    });

    let mut rx = match mirror.download_streaming(cancel) {
        Ok(rx) => rx,
        Err(e) => {
            ::log::error!("Failed to start downloader: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start_time = std::time::Instant::now();
    let mut pages_processed = 0;
    while let Some(page) = rx.recv().await {
        pages_processed += 1;
        report(&page);
    }

    ::log::info!(
        "Processed {} pages in {:.2} seconds",
        pages_processed,
        start_time.elapsed().as_secs_f64()
    );
    println!("Downloading process is done");

    ExitCode::SUCCESS
}

/// Print one progress line per completed page
fn report(page: &SavedPage) {
    match (&page.saved_html_path, &page.error) {
        (Some(path), _) => println!("Downloaded {} to {}", page.original_url, path.display()),
        (None, error) => println!(
            "Failed to download {}: {}",
            page.original_url,
            error.as_deref().unwrap_or("unknown error")
        ),
    }
}
