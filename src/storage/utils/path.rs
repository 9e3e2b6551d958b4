// Path helper utilities shared across storage operations
use crate::error::{InvalidConfigSnafu, Result};
use snafu::ensure;

/// Build the final remote key for an upload.
///
/// A key ending in `/` names a directory, so the local file name is appended.
pub fn build_remote_path(base: &str, file_name: &str) -> String {
    if base.is_empty() || base.ends_with('/') {
        format!("{base}{file_name}")
    } else {
        base.to_string()
    }
}

/// Extract a normalized basename from a remote path.
pub fn basename(path: &str) -> String {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Return a new String that guarantees a trailing '/'.
pub fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Strip leading slashes so keys are relative to the backend root.
pub fn normalize_remote_path(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

/// Name of `full_path` relative to the directory part of `query`.
///
/// For `query = "demo/te"` the directory part is `demo/`, so `demo/test.txt`
/// becomes `test.txt`. Directory names lose their trailing slash.
pub fn relative_name(full_path: &str, query: &str) -> String {
    let full_path = full_path.trim_start_matches('/');
    let query = query.trim_start_matches('/');
    let base = match query.rfind('/') {
        Some(idx) => &query[..=idx],
        None => "",
    };
    let relative = full_path.strip_prefix(base).unwrap_or(full_path);
    let relative = relative.trim_end_matches('/');
    if relative.is_empty() {
        basename(full_path)
    } else {
        relative.to_string()
    }
}

/// Split a WebDAV base URL into the server endpoint and the root path.
///
/// `https://cloud.example.com/remote.php/dav/files/alice/` becomes
/// `("https://cloud.example.com", "/remote.php/dav/files/alice/")`.
pub fn split_dav_url(url: &str) -> Result<(String, String)> {
    let url = url.trim();
    let scheme_end = url.find("://");
    ensure!(
        scheme_end.is_some_and(|idx| idx > 0),
        InvalidConfigSnafu {
            message: format!("WebDAV URL must include a scheme: '{url}'"),
        }
    );
    let authority_start = scheme_end.map(|idx| idx + 3).unwrap_or_default();
    let (endpoint, root) = match url[authority_start..].find('/') {
        Some(idx) => url.split_at(authority_start + idx),
        None => (url, "/"),
    };
    ensure!(
        endpoint.len() > authority_start,
        InvalidConfigSnafu {
            message: format!("WebDAV URL has no host: '{url}'"),
        }
    );
    Ok((endpoint.to_string(), ensure_trailing_slash(root)))
}
