use crate::url::domain::host_key;
use crate::UrlError;
use std::borrow::Borrow;
use std::fmt;
use url::Url;

/// Scheme prefix every normalized key carries, whatever the input scheme was
const KEY_SCHEME: &str = "https://";

/// Canonical dedup key for a page
///
/// Built as `https://` + host + path. Two URLs that differ only by scheme,
/// query string, or fragment share a key. Trailing slashes are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NormalizedUrl {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<NormalizedUrl> for String {
    fn from(url: NormalizedUrl) -> Self {
        url.0
    }
}

/// Normalizes a URL string into its dedup key
///
/// # Normalization Rules
///
/// 1. Parse the URL; reject it if it is not an absolute URL
/// 2. Force the `https://` scheme
/// 3. Keep the host (lowercased by the parser) and any explicit port
/// 4. Keep the path exactly as parsed, trailing slash included
/// 5. Drop the query string and the fragment
///
/// URLs without a hierarchical path (`mailto:` and friends) contribute an
/// empty host and an empty path.
///
/// # Examples
///
/// ```
/// use link_census::url::normalize_url;
///
/// let key = normalize_url("http://Example.com/docs/?page=2#intro").unwrap();
/// assert_eq!(key.as_str(), "https://example.com/docs/");
/// ```
pub fn normalize_url(url_str: &str) -> Result<NormalizedUrl, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    Ok(normalize_parsed(&url))
}

/// Normalizes an already parsed URL; infallible
pub fn normalize_parsed(url: &Url) -> NormalizedUrl {
    let path = if url.cannot_be_a_base() {
        ""
    } else {
        url.path()
    };

    NormalizedUrl(format!("{}{}{}", KEY_SCHEME, host_key(url), path))
}
