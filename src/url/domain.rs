use url::Url;

/// Extracts the host key of a URL: the host plus an explicit port, if any
///
/// Two URLs belong to the same crawl scope only when their host keys match,
/// so `127.0.0.1:8080` and `127.0.0.1:9090` are different sites. Default
/// ports are dropped by the URL parser and never show up here.
///
/// URLs without a host (`mailto:`, `data:` and the like) yield an empty key.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use link_census::url::host_key;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(host_key(&url), "example.com");
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(host_key(&url), "localhost:8080");
/// ```
pub fn host_key(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

/// Returns true if `url` lives on the host identified by `base_host`
pub fn is_same_host(url: &Url, base_host: &str) -> bool {
    host_key(url) == base_host
}
