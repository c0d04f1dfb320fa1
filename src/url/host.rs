use url::Url;

/// Returns true when both URLs parse and share the same host
///
/// Hosts are compared after URL parsing, which lowercases domain names and
/// elides a scheme's default port. An explicit non-default port is part of
/// the host: `example.com:8080` and `example.com` differ.
///
/// # Examples
///
/// ```
/// use link_sleuth::url::same_host;
///
/// assert!(same_host("https://example.com/", "https://EXAMPLE.com/about"));
/// assert!(same_host("http://example.com:80/", "http://example.com/"));
/// assert!(!same_host("https://example.com/", "https://blog.example.com/"));
/// assert!(!same_host("https://example.com/", "not a url"));
/// ```
pub fn same_host(seed_url: &str, candidate_url: &str) -> bool {
    match (Url::parse(seed_url), Url::parse(candidate_url)) {
        (Ok(seed), Ok(candidate)) => same_host_url(&seed, &candidate),
        _ => false,
    }
}

/// Same as [`same_host`] for already-parsed URLs
pub(crate) fn same_host_url(seed: &Url, candidate: &Url) -> bool {
    match (seed.host_str(), candidate.host_str()) {
        (Some(a), Some(b)) => a == b && seed.port() == candidate.port(),
        _ => false,
    }
}
