//! Detection of absolute, external URLs.

/// Schemes accepted as external link targets. Anything else (`javascript:`,
/// `data:`, `vbscript:`, ...) is never treated as an external URL.
pub const ALLOWED_PROTOCOLS: [&str; 13] = [
    "http", "https", "ftp", "news", "nntp", "tel", "telnet", "mailto", "irc", "ssh", "sftp",
    "webcal", "rtsp",
];

/// Returns true if `href` is an absolute URL pointing outside the site.
///
/// An href is external when it is protocol-relative (`//host/...`) or when
/// the raw text before its first colon contains no `/`, `?` or `#` and,
/// ASCII-lowercased, is one of [`ALLOWED_PROTOCOLS`]. The scheme is read
/// exactly as written: ` http://...` (leading space) is not external. No
/// further URL parsing happens, so a malformed authority does not matter.
pub fn is_external(href: &str) -> bool {
    if href.starts_with("//") {
        return true;
    }

    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };

    if scheme.contains(['/', '?', '#']) {
        return false;
    }

    ALLOWED_PROTOCOLS
        .iter()
        .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_http_urls_are_external() {
        assert!(is_external("http://google.com/"));
        assert!(is_external("https://example.com/path?q=1"));
        assert!(is_external("HTTPS://EXAMPLE.COM/"));
    }

    #[test]
    fn test_protocol_relative_is_external() {
        assert!(is_external("//cdn.example.com/app.js"));
    }

    #[test]
    fn test_other_allowed_protocols() {
        assert!(is_external("ftp://files.example.com/pub"));
        assert!(is_external("irc://irc.libera.chat/rust"));
    }

    #[test]
    fn test_relative_paths_are_not_external() {
        assert!(!is_external("/hello/world"));
        assert!(!is_external("/hello"));
        assert!(!is_external("page.html"));
        assert!(!is_external("/admin/content/linky/123456"));
        assert!(!is_external("/redirect?to=http://example.com"));
        assert!(!is_external(""));
    }

    #[test]
    fn test_dangerous_protocols_are_not_external() {
        assert!(!is_external("javascript:alert(1)"));
        assert!(!is_external("data:text/html,hello"));
    }

    #[test]
    fn test_scheme_is_read_as_written() {
        assert!(!is_external(" http://example.com/"));
        assert!(!is_external("\thttps://example.com/"));
        assert!(!is_external("ht tp://example.com/"));
        assert!(is_external("Http://example.com/"));
    }

    #[test]
    fn test_malformed_authority_is_still_external() {
        assert!(is_external("http://exa mple.com/"));
        assert!(is_external("http://[broken/"));
    }
}
