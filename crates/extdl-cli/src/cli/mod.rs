//! CLI for extdl.

mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use extdl_core::config::{self, ExtdlConfig};
use extdl_core::{CancelToken, HttpClient, PageDownloader};
use std::path::PathBuf;

use commands::{run_fetch, run_fetch_many, run_links};

/// Top-level CLI for extdl.
#[derive(Debug, Parser)]
#[command(name = "extdl")]
#[command(about = "extdl: download the files a web page links to, picked by extension", long_about = None)]
pub struct Cli {
    /// User-Agent header to send (overrides config).
    #[arg(long, global = true, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds, at least 1 (overrides config).
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options shared by the downloading subcommands.
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Extension token to look for in href values, e.g. ".zip" (default from config).
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// Directory to save files into; created if missing (default from config).
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Resolve relative links against this URL instead of the page URL.
    #[arg(long, value_name = "URL", value_parser = parse_http_url)]
    pub base: Option<String>,

    /// Print the run report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every matching file linked from a page.
    Fetch {
        /// HTTP/HTTPS URL of the page to scan.
        #[arg(value_parser = parse_http_url)]
        page_url: String,

        #[command(flatten)]
        args: DownloadArgs,
    },

    /// Same as `fetch`, for several pages in turn, into one directory.
    FetchMany {
        /// HTTP/HTTPS URLs of the pages to scan.
        #[arg(required = true, value_parser = parse_http_url)]
        page_urls: Vec<String>,

        #[command(flatten)]
        args: DownloadArgs,
    },

    /// List matching links on a page without downloading them.
    Links {
        /// HTTP/HTTPS URL of the page to scan.
        #[arg(value_parser = parse_http_url)]
        page_url: String,

        /// Extension token to look for (default from config).
        #[arg(short = 'e', long = "ext", value_name = "EXT")]
        extension: Option<String>,

        /// Resolve relative links against this URL instead of the page URL.
        #[arg(long, value_name = "URL", value_parser = parse_http_url)]
        base: Option<String>,
    },
}

/// Accepts absolute `http`/`https` URLs only.
fn parse_http_url(s: &str) -> Result<String, String> {
    let parsed = url::Url::parse(s).map_err(|e| format!("invalid URL '{}': {}", s, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(s.to_string()),
        other => Err(format!("unsupported scheme '{}' (expected http or https)", other)),
    }
}

impl Cli {
    /// Config with command-line overrides applied.
    fn effective_config(&self, mut cfg: ExtdlConfig) -> ExtdlConfig {
        if let Some(ua) = &self.user_agent {
            cfg.user_agent = ua.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = secs;
        }
        cfg
    }
}

/// Client wired to a Ctrl-C handler, wrapped in a downloader.
fn build_downloader(cfg: &ExtdlConfig, base: Option<&str>) -> Result<PageDownloader> {
    let token = CancelToken::new();
    let handler_token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("\nInterrupted, stopping after the current request...");
        handler_token.cancel();
    }) {
        tracing::warn!("could not install Ctrl-C handler: {}", e);
    }

    let client = HttpClient::new(&cfg.client_options())
        .context("failed to initialize HTTP client")?
        .with_cancel(token);
    let downloader = PageDownloader::new(client);
    Ok(match base {
        Some(base) => downloader.with_base_url(base),
        None => downloader,
    })
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.effective_config(config::load_or_init()?);
        cfg.validate()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match &cli.command {
            CliCommand::Fetch { page_url, args } => {
                let mut downloader = build_downloader(&cfg, args.base.as_deref())?;
                run_fetch(&mut downloader, &cfg, page_url, args)?;
            }
            CliCommand::FetchMany { page_urls, args } => {
                let mut downloader = build_downloader(&cfg, args.base.as_deref())?;
                run_fetch_many(&mut downloader, &cfg, page_urls, args)?;
            }
            CliCommand::Links {
                page_url,
                extension,
                base,
            } => {
                let mut downloader = build_downloader(&cfg, base.as_deref())?;
                let extension = extension.as_deref().unwrap_or(&cfg.extension);
                run_links(&mut downloader, page_url, extension)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
