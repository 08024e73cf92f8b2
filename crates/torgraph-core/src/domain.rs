//! Hidden-service domain extraction.
//!
//! A URL participates in the domain graph only if the literal substring
//! `.onion` occurs anywhere in it — an approximation of "is a hidden-service
//! address", not strict validation. Malformed URLs that cannot be parsed
//! into a host are skipped for that single link rather than aborting the
//! whole build.

use url::Url;

/// Substring that qualifies a URL as a hidden-service address.
pub const ONION_MARKER: &str = ".onion";

/// Return `true` if `url` qualifies for the hidden-service graph.
#[must_use]
pub fn is_onion(url: &str) -> bool {
    url.contains(ONION_MARKER)
}

/// Extract the host component of a qualifying URL.
///
/// Returns `None` for non-qualifying URLs, and for URLs that cannot be
/// parsed into an absolute URL with a host (scheme-less strings, fragments,
/// garbage). `None` means "skip this link", never an error.
#[must_use]
pub fn onion_host(url: &str) -> Option<String> {
    if !is_onion(url) {
        return None;
    }
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_owned)
}
