//! Outcome of one page run.

use serde::Serialize;
use std::path::PathBuf;

/// Why a page run stopped before (or while) downloading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum RunAbort {
    /// Page could not be fetched or did not return 200.
    PageFetch(String),
    /// Page had no matching links.
    NoMatches,
    /// Download directory could not be created.
    Directory(String),
    /// Cancel token was set; remaining links were skipped.
    Cancelled,
}

impl std::fmt::Display for RunAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunAbort::PageFetch(reason) => write!(f, "page fetch failed: {}", reason),
            RunAbort::NoMatches => write!(f, "no matching links"),
            RunAbort::Directory(reason) => write!(f, "download directory unavailable: {}", reason),
            RunAbort::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadedFile {
    pub url: String,
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDownload {
    pub url: String,
    pub path: PathBuf,
    pub reason: String,
}

/// Everything that happened for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadReport {
    pub page_url: String,
    pub links_found: usize,
    pub downloaded: Vec<DownloadedFile>,
    pub failed: Vec<FailedDownload>,
    pub aborted: Option<RunAbort>,
}

impl DownloadReport {
    pub(crate) fn new(page_url: &str) -> Self {
        Self {
            page_url: page_url.to_string(),
            links_found: 0,
            downloaded: Vec::new(),
            failed: Vec::new(),
            aborted: None,
        }
    }

    pub(crate) fn aborted(page_url: &str, reason: RunAbort) -> Self {
        Self {
            aborted: Some(reason),
            ..Self::new(page_url)
        }
    }

    /// Number of files downloaded successfully.
    pub fn count(&self) -> usize {
        self.downloaded.len()
    }
}

/// Sum of successful downloads across pages.
pub fn total_downloaded(reports: &[DownloadReport]) -> usize {
    reports.iter().map(DownloadReport::count).sum()
}
