//! Target URL validation and normalization.
//!
//! Runs before the engine: a scheme-less input gets `https://` prepended,
//! the host is lowercased, the fragment is dropped, and the result is
//! rejected unless the host is a plausible domain, `localhost`, or an IPv4
//! address.

use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("URL cannot be empty")]
    Empty,

    #[error("invalid scheme: {0}. Must be http or https")]
    UnsupportedScheme(String),

    #[error("invalid URL: missing domain")]
    MissingHost,

    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("invalid URL: {0}")]
    Parse(#[from] url::ParseError),
}

/// Validates `input` and returns its normalized form.
pub fn normalize_url(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::Empty);
    }

    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_owned()
    } else {
        format!("https://{input}")
    };

    let mut url = Url::parse(&with_scheme)?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(Error::UnsupportedScheme(other.to_owned())),
    }

    let host = url.host_str().ok_or(Error::MissingHost)?.to_owned();

    if host != "localhost" && !is_ipv4(&host) && !is_valid_domain(&host) {
        return Err(Error::InvalidDomain(host));
    }

    url.set_fragment(None);
    Ok(url.to_string())
}

fn is_ipv4(host: &str) -> bool {
    host.parse::<std::net::Ipv4Addr>().is_ok()
}

/// Domain shape check: dot-separated alphanumeric-or-hyphen labels that
/// neither start nor end with a hyphen, ending in an alphabetic TLD of at
/// least two characters.
fn is_valid_domain(host: &str) -> bool {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    labels[..labels.len() - 1].iter().all(|label| {
        !label.is_empty()
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn scheme_less_input_defaults_to_https() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com/");
    }

    #[test]
    fn explicit_http_is_preserved() {
        assert_eq!(
            normalize_url("http://example.com/path").unwrap(),
            "http://example.com/path"
        );
    }

    #[test]
    fn host_is_lowercased_and_fragment_dropped() {
        assert_eq!(
            normalize_url("https://Example.COM/page#section").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn query_and_port_survive() {
        assert_eq!(
            normalize_url("example.com:8080/search?q=rust").unwrap(),
            "https://example.com:8080/search?q=rust"
        );
    }

    #[test]
    fn localhost_and_ipv4_are_allowed() {
        assert!(normalize_url("localhost:3000").is_ok());
        assert!(normalize_url("127.0.0.1:8080/health").is_ok());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(normalize_url(""), Err(Error::Empty)));
        assert!(matches!(normalize_url("   "), Err(Error::Empty)));
    }

    #[test]
    fn non_http_schemes_are_rejected() {
        assert!(matches!(
            normalize_url("ftp://example.com"),
            Err(Error::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn bare_label_is_not_a_domain() {
        assert!(matches!(
            normalize_url("https://notadomain"),
            Err(Error::InvalidDomain(_))
        ));
    }

    #[test]
    fn hyphen_edges_are_rejected() {
        assert!(matches!(
            normalize_url("-bad-.example.com"),
            Err(Error::InvalidDomain(_))
        ));
        assert!(normalize_url("my-site.example.com").is_ok());
    }

    #[test]
    fn numeric_tld_is_rejected() {
        // The url crate already refuses all-numeric trailing labels as
        // malformed IPv4, so this surfaces as a parse error.
        assert!(normalize_url("example.123").is_err());
    }
}
