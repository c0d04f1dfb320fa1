use url::Url;

/// Schemes that never lead to a crawlable page
const NON_NAVIGATIONAL_SCHEMES: &[&str] = &["mailto:", "tel:", "javascript:"];

/// Resolves an href against a base URL
///
/// Standard relative-URL resolution: scheme, authority and path are merged
/// from the base as needed. The result is always absolute.
///
/// # Returns
///
/// * `Some(Url)` - The absolute URL
/// * `None` - Either the base or the href failed to parse
///
/// # Examples
///
/// ```
/// use link_sleuth::url::resolve;
///
/// let url = resolve("../b/c", "https://example.com/a/page").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/b/c");
///
/// assert!(resolve("/x", "not a url").is_none());
/// ```
pub fn resolve(href: &str, base_url: &str) -> Option<Url> {
    let base = Url::parse(base_url).ok()?;
    base.join(href).ok()
}

/// Returns true when an href should not be followed at all
///
/// Empty hrefs, fragment-only hrefs, and `mailto:`, `tel:` or `javascript:`
/// links are skippable.
///
/// # Examples
///
/// ```
/// use link_sleuth::url::is_skippable;
///
/// assert!(is_skippable(""));
/// assert!(is_skippable("#top"));
/// assert!(is_skippable("mailto:someone@example.com"));
/// assert!(!is_skippable("/about"));
/// ```
pub fn is_skippable(href: &str) -> bool {
    href.is_empty()
        || href.starts_with('#')
        || NON_NAVIGATIONAL_SCHEMES
            .iter()
            .any(|scheme| href.starts_with(scheme))
}

/// Turns an anchor href into the URL the crawler would follow
///
/// Returns `None` for skippable hrefs, hrefs that fail to resolve, and
/// targets outside HTTP(S). The fragment is dropped so that `/page#a` and
/// `/page#b` name the same page.
pub fn navigable_target(href: &str, page_url: &Url) -> Option<Url> {
    if is_skippable(href) {
        return None;
    }

    let mut target = page_url.join(href).ok()?;
    if target.scheme() != "http" && target.scheme() != "https" {
        return None;
    }
    target.set_fragment(None);
    Some(target)
}
