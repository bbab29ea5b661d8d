//! Destination file that only appears once the download completes.

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix of the sibling file a download is streamed into.
const PART_SUFFIX: &str = ".part";

/// `<dest>.part` next to `dest`.
pub fn part_path(dest: &Path) -> Result<PathBuf> {
    let name = match dest.file_name() {
        Some(name) => name,
        None => bail!("{} does not name a file", dest.display()),
    };
    let mut part = OsString::from(name);
    part.push(PART_SUFFIX);
    Ok(dest.with_file_name(part))
}

/// Open temporary file for a single download.
///
/// Data goes to `<dest>.part`; [`PartialFile::commit`] renames it over the
/// destination. Dropping it without a commit deletes only the `.part` file,
/// so whatever was at the destination before is left untouched.
#[derive(Debug)]
pub struct PartialFile {
    file: Option<File>,
    part: PathBuf,
    dest: PathBuf,
    written: u64,
    committed: bool,
}

impl PartialFile {
    /// Create (or truncate) the `.part` file for `dest`.
    pub fn create(dest: &Path) -> Result<Self> {
        if dest.is_dir() {
            bail!("{} is a directory", dest.display());
        }
        let part = part_path(dest)?;
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&part)
            .with_context(|| format!("failed to open {} for writing", part.display()))?;
        Ok(Self {
            file: Some(file),
            part,
            dest: dest.to_path_buf(),
            written: 0,
            committed: false,
        })
    }

    /// Append `data` at the current end of the file.
    pub fn write_chunk(&mut self, data: &[u8]) -> std::io::Result<()> {
        match self.file.as_mut() {
            Some(f) => {
                f.write_all(data)?;
                self.written += data.len() as u64;
                Ok(())
            }
            None => Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "file already closed",
            )),
        }
    }

    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush, then move the data to the destination, replacing any file
    /// already there. Returns the number of bytes written.
    pub fn commit(mut self) -> Result<u64> {
        if let Some(mut f) = self.file.take() {
            f.flush()
                .with_context(|| format!("failed to flush {}", self.part.display()))?;
        }
        std::fs::rename(&self.part, &self.dest).with_context(|| {
            format!(
                "failed to move {} to {}",
                self.part.display(),
                self.dest.display()
            )
        })?;
        self.committed = true;
        Ok(self.written)
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // Close before removing.
        drop(self.file.take());
        match std::fs::remove_file(&self.part) {
            Ok(()) => tracing::debug!(path = %self.part.display(), "removed partial file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.part.display(), error = %e, "could not remove partial file")
            }
        }
    }
}
