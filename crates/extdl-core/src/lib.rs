//! extdl core: fetch an HTML page, pick out links to files with a given
//! extension and download them one by one.

pub mod config;
pub mod logging;

pub mod control;
pub mod downloader;
pub mod http;
pub mod links;
pub mod storage;
pub mod url_model;

pub use control::CancelToken;
pub use downloader::{DownloadReport, PageDownloader, RunAbort};
pub use http::{ClientOptions, HttpClient, HttpResponse};
