//! Local filename safety for names taken from scraped links.

use super::path::{extract_filename, DEFAULT_FILENAME};

/// Filename to write `url` to inside the download directory.
///
/// Same as [`extract_filename`], except that NUL, `\` and control characters
/// become `_`, and `.` / `..` fall back to [`DEFAULT_FILENAME`], so the result
/// always names an entry directly inside the target directory.
pub fn safe_filename(url: &str) -> String {
    let name: String = extract_filename(url)
        .chars()
        .map(|c| if c == '\0' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();

    if name.is_empty() || name == "." || name == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        name
    }
}
