//! Pattern-based extraction of file links from raw HTML.
//!
//! There is no DOM parsing: any `href="..."` or `href='...'` whose value
//! contains the extension token counts, wherever it appears in the markup.

use regex::Regex;

use crate::url_model::resolve_url;

/// Quoted href values containing `extension` anywhere (not only as a suffix,
/// so `download.php?f=a.zip` matches `.zip`).
///
/// The extension is escaped, so the only way this fails is an extension
/// long enough to exceed the regex size limit.
fn href_pattern(extension: &str) -> Result<Regex, regex::Error> {
    let pattern = format!(
        r#"href\s*=\s*['"]([^'"]*{}[^'"]*)['"]"#,
        regex::escape(extension)
    );
    Regex::new(&pattern)
}

/// Returns every href value in `html` that contains `extension`, resolved
/// against `base_url`, in source order. Duplicates are kept; no matches
/// gives an empty vector.
pub fn extract_file_links(html: &str, extension: &str, base_url: &str) -> Vec<String> {
    let re = match href_pattern(extension) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!(extension_len = extension.len(), error = %e, "unusable extension; no links extracted");
            return Vec::new();
        }
    };
    let links: Vec<String> = re
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| resolve_url(base_url, m.as_str().trim()))
        .collect();
    tracing::debug!(extension, count = links.len(), "extracted file links");
    links
}
