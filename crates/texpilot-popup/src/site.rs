//! Host page check.

use url::Url;

/// Whether `page_url` belongs to `domain` or one of its subdomains.
///
/// Only the parsed host is compared, so a domain appearing in the path or
/// query of another site does not match.
pub fn is_host_site(page_url: &str, domain: &str) -> bool {
    let Ok(url) = Url::parse(page_url) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}
