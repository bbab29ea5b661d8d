//! Relative-to-absolute link resolution against a base URL.

/// Turns an href value into an absolute URL against `base`.
///
/// - `http://` / `https://` links are returned unchanged.
/// - Root-relative links (`/x`) keep only `scheme://host` of `base`.
/// - Anything else is appended to `base`, which is slash-terminated first.
///
/// No `../` normalization and no query or fragment handling: a link such as
/// `../a.zip` resolves to `base/../a.zip`.
pub fn resolve_url(base: &str, relative: &str) -> String {
    if relative.starts_with("http://") || relative.starts_with("https://") {
        return relative.to_string();
    }

    let mut resolved = base.to_string();
    if !resolved.is_empty() && !resolved.ends_with('/') {
        resolved.push('/');
    }

    if relative.starts_with('/') {
        if let Some(scheme_end) = resolved.find("://") {
            let host_start = scheme_end + 3;
            if let Some(path_start) = resolved[host_start..].find('/') {
                resolved.truncate(host_start + path_start);
            }
        }
    }

    resolved.push_str(relative);
    resolved
}
