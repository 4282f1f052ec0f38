use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse failure classification at the engine boundary.
///
/// Every transport error maps to exactly one of these. A completed HTTP
/// exchange (any status code, including 4xx/5xx) is never a failure at this
/// layer; semantic interpretation of status codes belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FailureKind {
    Timeout,
    ConnectionError,
    OtherError,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("unsupported url scheme (expected http or https): {0}")]
    UnsupportedScheme(String),

    #[error("http request build failed: {0}")]
    RequestBuild(#[from] http::Error),

    #[error("invalid http header name: {0}")]
    HeaderName(#[from] http::header::InvalidHeaderName),

    #[error("invalid http header value: {0}")]
    HeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("http request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read response body: {0}")]
    BodyRead(#[from] hyper::Error),
}

impl Error {
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Timeout(_) => FailureKind::Timeout,
            Self::Request(err) if err.is_connect() => FailureKind::ConnectionError,
            _ => FailureKind::OtherError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kind_display_is_kebab_case() {
        assert_eq!(FailureKind::Timeout.to_string(), "timeout");
        assert_eq!(FailureKind::ConnectionError.to_string(), "connection-error");
        assert_eq!(FailureKind::OtherError.to_string(), "other-error");
    }

    #[test]
    fn timeout_classifies_as_timeout() {
        let err = Error::Timeout(Duration::from_secs(1));
        assert_eq!(err.failure_kind(), FailureKind::Timeout);
    }

    #[test]
    fn non_transport_errors_classify_as_other() {
        let err = Error::InvalidUrl("::".to_string());
        assert_eq!(err.failure_kind(), FailureKind::OtherError);
    }
}
