//! Disk side of a download: destination directories and the file being written.

mod partial;

pub use partial::{part_path, PartialFile};

use std::path::Path;

/// Creates `path` and any missing parents.
///
/// Returns true if the directory already existed or was created, false on
/// any filesystem error (the error is logged, not returned).
pub fn ensure_directory(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }
    match std::fs::create_dir_all(path) {
        Ok(()) => true,
        Err(e) => {
            // Lost a race with another creator; still fine.
            if path.is_dir() {
                return true;
            }
            tracing::error!(path = %path.display(), error = %e, "could not create directory");
            false
        }
    }
}
