//! Page-level download loop.
//!
//! Fetches a page, extracts matching links, makes sure the download directory
//! exists and downloads each link in order. A failed file never stops the
//! batch; only the page fetch, an empty match set, the directory or a cancel
//! request end a run early.

mod report;

pub use report::{total_downloaded, DownloadReport, DownloadedFile, FailedDownload, RunAbort};

use std::path::Path;

use crate::http::HttpClient;
use crate::links::extract_file_links;
use crate::storage;
use crate::url_model::safe_filename;

/// Drives downloads for one client.
pub struct PageDownloader {
    client: HttpClient,
    base_url: Option<String>,
}

impl PageDownloader {
    /// Relative links resolve against the page they were found on.
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Resolve relative links against `base_url` instead of the page URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Base used for links found on `page_url`.
    pub fn link_base<'a>(&'a self, page_url: &'a str) -> &'a str {
        self.base_url.as_deref().unwrap_or(page_url)
    }

    fn is_cancelled(&self) -> bool {
        self.client
            .cancel_token()
            .map_or(false, |t| t.is_cancelled())
    }

    /// Fetch `page_url` and return the matching links without downloading.
    pub fn find_links(&mut self, page_url: &str, extension: &str) -> anyhow::Result<Vec<String>> {
        let response = self.client.fetch_page(page_url);
        if let Some(reason) = response.failure_reason() {
            anyhow::bail!("could not fetch {}: {}", page_url, reason);
        }
        Ok(extract_file_links(&response.text(), extension, self.link_base(page_url)))
    }

    /// Download every file on `page_url` whose link contains `extension`
    /// into `download_dir`. `report.count()` is the number of successes.
    pub fn download_files_from_page(
        &mut self,
        page_url: &str,
        extension: &str,
        download_dir: &Path,
    ) -> DownloadReport {
        let response = self.client.fetch_page(page_url);
        if let Some(reason) = response.failure_reason() {
            tracing::error!(page_url, %reason, "could not fetch page");
            let abort = if self.is_cancelled() {
                RunAbort::Cancelled
            } else {
                RunAbort::PageFetch(reason)
            };
            return DownloadReport::aborted(page_url, abort);
        }

        let links = extract_file_links(&response.text(), extension, self.link_base(page_url));
        if links.is_empty() {
            tracing::info!(page_url, extension, "no files with matching extension");
            return DownloadReport::aborted(page_url, RunAbort::NoMatches);
        }
        tracing::info!(page_url, count = links.len(), "found files to download");

        let mut report = DownloadReport::new(page_url);
        report.links_found = links.len();

        if !storage::ensure_directory(download_dir) {
            report.aborted = Some(RunAbort::Directory(format!(
                "could not create {}",
                download_dir.display()
            )));
            return report;
        }

        for url in links {
            if self.is_cancelled() {
                tracing::warn!(page_url, "cancelled; skipping remaining links");
                report.aborted = Some(RunAbort::Cancelled);
                break;
            }
            let path = download_dir.join(safe_filename(&url));
            match self.client.try_download_to_file(&url, &path) {
                Ok(bytes) => report.downloaded.push(DownloadedFile { url, path, bytes }),
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "download failed");
                    if e.is_cancelled() {
                        report.aborted = Some(RunAbort::Cancelled);
                    }
                    report.failed.push(FailedDownload {
                        url,
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Run [`PageDownloader::download_files_from_page`] for each page in turn,
    /// all into the same directory. Stops after a cancelled page.
    pub fn download_from_pages(
        &mut self,
        page_urls: &[String],
        extension: &str,
        download_dir: &Path,
    ) -> Vec<DownloadReport> {
        let mut reports = Vec::with_capacity(page_urls.len());
        for page_url in page_urls {
            let report = self.download_files_from_page(page_url, extension, download_dir);
            let cancelled = report.aborted == Some(RunAbort::Cancelled);
            reports.push(report);
            if cancelled {
                break;
            }
        }
        reports
    }
}
