//! Blocking HTTP GET client.
//!
//! Wraps a single curl easy handle. The handle is created with the client and
//! released when it is dropped; each request reconfigures it and runs to
//! completion before the next one starts. Page bodies are buffered in memory,
//! file downloads are streamed straight to disk.

mod error;
mod response;
mod sink;

pub use error::FetchError;
pub use response::HttpResponse;
pub use sink::Sink;

use anyhow::anyhow;
use std::path::Path;
use std::time::Duration;

use crate::control::CancelToken;
use crate::storage::{self, PartialFile};

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (extdl)";

/// Per-client request settings.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    /// Whole-transfer timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirections: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(15),
            max_redirections: 10,
        }
    }
}

/// Sequential HTTP client. Not meant to be shared between threads.
pub struct HttpClient {
    easy: curl::easy::Easy,
    cancel: Option<CancelToken>,
}

impl HttpClient {
    pub fn new(options: &ClientOptions) -> Result<Self, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.useragent(&options.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(options.max_redirections)?;
        easy.connect_timeout(options.connect_timeout)?;
        easy.timeout(options.timeout)?;
        // Needed for the progress callback that polls the cancel token.
        easy.progress(true)?;
        Ok(Self { easy, cancel: None })
    }

    /// Check `token` before and during every request.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }

    /// GET `url` and buffer the body.
    ///
    /// Never fails: transport errors come back as a response with status 0,
    /// an empty body and `error` set; a non-200 status sets `error` to
    /// `HTTP <code>` and keeps whatever body the server sent.
    pub fn fetch_page(&mut self, url: &str) -> HttpResponse {
        let mut sink = Sink::memory();
        match self.perform(url, &mut sink) {
            Ok(code) => {
                let error = (code != 200).then(|| FetchError::Http(code).to_string());
                tracing::debug!(url, status = code, bytes = sink.len(), "fetched page");
                HttpResponse {
                    body: sink.into_bytes(),
                    status_code: code,
                    error,
                }
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "page fetch failed");
                HttpResponse::failed(e.to_string())
            }
        }
    }

    /// Stream `url` into `path`. True only when the whole body was written
    /// and the final status was 200; otherwise `path` is left as it was and
    /// no partial data remains.
    pub fn download_to_file(&mut self, url: &str, path: &Path) -> bool {
        match self.try_download_to_file(url, path) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(url, path = %path.display(), error = %e, "download failed");
                false
            }
        }
    }

    /// Like [`HttpClient::download_to_file`], returning the bytes written or
    /// the reason for failure.
    pub fn try_download_to_file(&mut self, url: &str, path: &Path) -> Result<u64, FetchError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !storage::ensure_directory(parent) {
                return Err(FetchError::Storage(anyhow!(
                    "could not create directory {}",
                    parent.display()
                )));
            }
        }

        let file = PartialFile::create(path).map_err(FetchError::Storage)?;
        let mut sink = Sink::File(file);
        // Dropping the sink on any early return removes the `.part` file;
        // an existing file at `path` is only replaced on success.
        let code = self.perform(url, &mut sink)?;
        if code != 200 {
            return Err(FetchError::Http(code));
        }

        let written = match sink {
            Sink::File(file) => file.commit().map_err(FetchError::Storage)?,
            Sink::Memory(buf) => buf.len() as u64,
        };
        tracing::info!(url, path = %path.display(), bytes = written, "downloaded");
        Ok(written)
    }

    /// Run one GET into `sink` and return the final status code.
    fn perform(&mut self, url: &str, sink: &mut Sink) -> Result<u32, FetchError> {
        if let Some(token) = &self.cancel {
            token.check()?;
        }
        self.easy.url(url)?;

        let cancel = self.cancel.clone();
        let mut write_error: Option<std::io::Error> = None;
        let result = {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| match sink.write(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.progress_function(move |_, _, _, _| {
                cancel.as_ref().map_or(true, |t| !t.is_cancelled())
            })?;
            transfer.perform()
        };

        if let Err(e) = result {
            if let Some(io) = write_error {
                return Err(FetchError::Storage(
                    anyhow::Error::new(io).context(format!("write failed for {}", url)),
                ));
            }
            if e.is_aborted_by_callback() {
                return Err(FetchError::Cancelled);
            }
            return Err(FetchError::Transport(e));
        }

        Ok(self.easy.response_code()?)
    }
}
