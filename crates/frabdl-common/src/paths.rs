//! URL and file-name helpers.
//!
//! The media server and the schedule system hand out plain URL strings.
//! These helpers derive the names frabdl uses on disk and in log output.

use url::Url;

use crate::error::{Error, Result};

/// Marker file the schedule system links when an attachment went missing.
pub const MISSING_ATTACHMENT_MARKER: &str = "attachments/original/missing.png";

/// Parse an absolute `http` or `https` URL.
///
/// # Examples
///
/// ```
/// use frabdl_common::paths::parse_http_url;
///
/// assert!(parse_http_url("https://cdn.media.ccc.de/congress/2015").is_ok());
/// assert!(parse_http_url("ftp://cdn.media.ccc.de/congress/2015").is_err());
/// assert!(parse_http_url("cdn.media.ccc.de/congress").is_err());
/// ```
pub fn parse_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::invalid_input(format!(
            "unsupported url scheme \"{}\" in \"{}\"",
            other, url
        ))),
    }
}

/// Extract the host of a URL, without credentials or port.
///
/// # Examples
///
/// ```
/// use frabdl_common::paths::domain_from_url;
///
/// assert_eq!(
///     domain_from_url("https://cdn.media.ccc.de/congress/2015").unwrap(),
///     "cdn.media.ccc.de"
/// );
/// assert_eq!(domain_from_url("http://user:pw@host.example:8080/x").unwrap(), "host.example");
/// assert!(domain_from_url("cdn.media.ccc.de/congress").is_err());
/// ```
pub fn domain_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_input(format!("url without host: \"{}\"", url)))
}

/// File name under which an attachment URL is stored.
///
/// Takes the last path component and drops a trailing `?query`.
///
/// # Examples
///
/// ```
/// use frabdl_common::paths::attachment_file_name;
///
/// assert_eq!(attachment_file_name("https://x.org/a/b/slides.pdf?14512"), "slides.pdf");
/// assert_eq!(attachment_file_name("https://x.org/a/paper.pdf"), "paper.pdf");
/// ```
#[must_use]
pub fn attachment_file_name(url: &str) -> &str {
    let base = url.rsplit('/').next().unwrap_or(url);
    match base.rfind('?') {
        Some(pos) => &base[..pos],
        None => base,
    }
}

/// Replace everything except ASCII letters, digits, `-` and `_` by `_`.
///
/// # Examples
///
/// ```
/// use frabdl_common::paths::sanitize_title;
///
/// assert_eq!(sanitize_title("Hello, World: 2.0"), "Hello__World__2_0");
/// ```
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolve `path` below the directory named by `base`.
///
/// `base` is treated as a directory whether or not it ends in `/`.
///
/// # Examples
///
/// ```
/// use frabdl_common::paths::join_url;
///
/// assert_eq!(
///     join_url("https://x.org/Fahrplan/", "/schedule.json").unwrap(),
///     "https://x.org/Fahrplan/schedule.json"
/// );
/// assert_eq!(
///     join_url("https://x.org/Fahrplan", "schedule.json").unwrap(),
///     "https://x.org/Fahrplan/schedule.json"
/// );
/// ```
pub fn join_url(base: &str, path: &str) -> Result<String> {
    let mut dir = Url::parse(base).map_err(|source| Error::InvalidUrl {
        url: base.to_string(),
        source,
    })?;
    if !dir.path().ends_with('/') {
        let with_slash = format!("{}/", dir.path());
        dir.set_path(&with_slash);
    }
    dir.join(path.trim_start_matches('/'))
        .map(String::from)
        .map_err(|source| Error::InvalidUrl {
            url: path.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_plain() {
        assert_eq!(
            domain_from_url("https://fahrplan.events.ccc.de/congress/2016/Fahrplan").unwrap(),
            "fahrplan.events.ccc.de"
        );
    }

    #[test]
    fn test_domain_without_path() {
        assert_eq!(domain_from_url("https://entropia.de").unwrap(), "entropia.de");
    }

    #[test]
    fn test_domain_with_credentials() {
        assert_eq!(
            domain_from_url("https://a:b@media.example.org/foo").unwrap(),
            "media.example.org"
        );
    }

    #[test]
    fn test_domain_drops_port() {
        assert_eq!(
            domain_from_url("https://cdn.example:8443/congress/2015").unwrap(),
            "cdn.example"
        );
    }

    #[test]
    fn test_domain_invalid() {
        assert!(matches!(
            domain_from_url("media.example.org"),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(domain_from_url("https://").is_err());
        assert!(domain_from_url("mailto:info@example.org").is_err());
    }

    #[test]
    fn test_parse_http_url_schemes() {
        assert!(parse_http_url("http://cdn.example/congress").is_ok());
        assert!(matches!(
            parse_http_url("file:///srv/media"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            parse_http_url("/srv/media"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_attachment_without_query() {
        assert_eq!(attachment_file_name("slides.pdf"), "slides.pdf");
    }

    #[test]
    fn test_attachment_strips_query() {
        assert_eq!(
            attachment_file_name(
                "https://fahrplan.events.ccc.de/system/attachments/2/original/talk.pdf?1450000000"
            ),
            "talk.pdf"
        );
    }

    #[test]
    fn test_sanitize_keeps_allowed() {
        assert_eq!(sanitize_title("a-b_C9"), "a-b_C9");
        assert_eq!(sanitize_title("Über Rust"), "_ber_Rust");
    }

    #[test]
    fn test_join_url_slashes() {
        assert_eq!(join_url("https://m.example/a/", "/b").unwrap(), "https://m.example/a/b");
        assert_eq!(join_url("https://m.example/a", "b").unwrap(), "https://m.example/a/b");
        assert_eq!(join_url("https://m.example", "h264-hd").unwrap(), "https://m.example/h264-hd");
    }

    #[test]
    fn test_join_url_rejects_relative_base() {
        assert!(join_url("congress/2016", "h264-hd").is_err());
    }
}
