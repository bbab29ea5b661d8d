//! Filename extraction from a URL string.

/// Name used when a URL has no usable last segment.
pub const DEFAULT_FILENAME: &str = "downloaded_file";

/// Returns the substring after the last `/` of `url`.
///
/// Falls back to [`DEFAULT_FILENAME`] when `url` has no `/` or ends with one.
/// Query strings are kept as part of the name.
pub fn extract_filename(url: &str) -> String {
    match url.rfind('/') {
        Some(pos) if pos + 1 < url.len() => url[pos + 1..].to_string(),
        _ => DEFAULT_FILENAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_segment() {
        assert_eq!(
            extract_filename("https://site.com/dir/file.tar.gz"),
            "file.tar.gz"
        );
        assert_eq!(extract_filename("https://site.com/single"), "single");
    }

    #[test]
    fn trailing_slash_or_no_slash() {
        assert_eq!(extract_filename("https://site.com/dir/"), "downloaded_file");
        assert_eq!(extract_filename("file.zip"), "downloaded_file");
        assert_eq!(extract_filename(""), "downloaded_file");
    }

    #[test]
    fn query_is_kept() {
        assert_eq!(
            extract_filename("https://site.com/get?f=a.zip"),
            "get?f=a.zip"
        );
    }
}
