//! Page keys: one coverage bucket per logical page.
//!
//! `https://shop.test/items/42?sort=asc` and `https://shop.test//items/99/`
//! both map to `https://shop.test/items/[num]`.
use url::Url;

pub const NUMERIC_SEGMENT: &str = "[num]";

/// Normalize a document location into a page key.
///
/// Query and fragment are dropped, purely numeric path segments become
/// `[num]`, and empty segments (duplicate or trailing `/`) disappear.
/// Applying it to its own output returns the output unchanged.
pub fn normalize_page_key(location: &str) -> String {
    match Url::parse(location) {
        Ok(url) if !url.cannot_be_a_base() => page_key(&url),
        _ => {
            let without_query = location
                .split(['?', '#'])
                .next()
                .unwrap_or_default();
            match without_query.split_once("://") {
                Some((scheme, rest)) => {
                    let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
                    join(&format!("{scheme}://{authority}"), path)
                }
                None => join("", without_query),
            }
        }
    }
}

/// Page key of a parsed location.
pub fn page_key(url: &Url) -> String {
    let mut origin = format!("{}://", url.scheme());
    if let Some(host) = url.host_str() {
        origin.push_str(host);
    }
    if let Some(port) = url.port() {
        origin.push_str(&format!(":{port}"));
    }
    join(&origin, url.path())
}

fn join(origin: &str, path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.bytes().all(|b| b.is_ascii_digit()) {
                NUMERIC_SEGMENT
            } else {
                s
            }
        })
        .collect();
    if segments.is_empty() {
        return if origin.is_empty() {
            "/".to_string()
        } else {
            origin.to_string()
        };
    }
    format!("{origin}/{}", segments.join("/"))
}
