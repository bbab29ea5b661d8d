//! `extdl fetch-many <page>...` – run `fetch` over several pages.

use anyhow::Result;
use extdl_core::config::ExtdlConfig;
use extdl_core::downloader::total_downloaded;
use extdl_core::PageDownloader;

use super::fetch::{print_report, print_total};
use crate::cli::DownloadArgs;

pub fn run_fetch_many(
    downloader: &mut PageDownloader,
    cfg: &ExtdlConfig,
    page_urls: &[String],
    args: &DownloadArgs,
) -> Result<()> {
    let extension = args.extension.as_deref().unwrap_or(&cfg.extension);
    let download_dir = args.download_dir.as_deref().unwrap_or(&cfg.download_dir);

    let reports = downloader.download_from_pages(page_urls, extension, download_dir);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report.page_url);
            print_report(report);
        }
        if reports.len() < page_urls.len() {
            println!("Skipped {} page(s) after cancel.", page_urls.len() - reports.len());
        }
        print_total(total_downloaded(&reports));
    }
    Ok(())
}
