//! `extdl links <page>` – list matching links only.

use anyhow::Result;
use extdl_core::PageDownloader;

pub fn run_links(downloader: &mut PageDownloader, page_url: &str, extension: &str) -> Result<()> {
    let links = downloader.find_links(page_url, extension)?;
    if links.is_empty() {
        println!("No links containing '{}' on {}", extension, page_url);
    }
    for link in links {
        println!("{}", link);
    }
    Ok(())
}
