//! `extdl fetch <page>` – download matching files from one page.

use anyhow::Result;
use extdl_core::config::ExtdlConfig;
use extdl_core::{DownloadReport, PageDownloader};

use crate::cli::DownloadArgs;

pub fn run_fetch(
    downloader: &mut PageDownloader,
    cfg: &ExtdlConfig,
    page_url: &str,
    args: &DownloadArgs,
) -> Result<()> {
    let extension = args.extension.as_deref().unwrap_or(&cfg.extension);
    let download_dir = args.download_dir.as_deref().unwrap_or(&cfg.download_dir);

    if !args.json {
        println!("Looking for '{}' files on {}", extension, page_url);
    }
    let report = downloader.download_files_from_page(page_url, extension, download_dir);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
        print_total(report.count());
    }
    tracing::info!(page_url, downloaded = report.count(), "fetch finished");
    Ok(())
}

/// Per-file lines for one page.
pub(super) fn print_report(report: &DownloadReport) {
    for file in &report.downloaded {
        println!("  downloaded {} ({} bytes)", file.path.display(), file.bytes);
    }
    for failed in &report.failed {
        println!("  failed     {}: {}", failed.url, failed.reason);
    }
    if let Some(abort) = &report.aborted {
        println!("  stopped: {}", abort);
    }
}

pub(super) fn print_total(count: usize) {
    if count > 0 {
        println!("Downloaded {} file(s).", count);
    } else {
        println!("No files downloaded.");
    }
}
