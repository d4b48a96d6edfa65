//! Public watch URLs.

/// Path under the public site where recipients open a screener.
const WATCH_PATH: &str = "/press/watch/";

/// `{base}/press/watch/{token}` with any trailing slashes trimmed from `base`.
pub fn watch_url(base_url: &str, token: &str) -> String {
    format!("{}{WATCH_PATH}{token}", base_url.trim_end_matches('/'))
}
