use crate::http::FailureKind;

/// Terminal result of one issued request.
///
/// A request either completes with a status code (any status code, 4xx/5xx
/// included; completion is transport-level, not semantic) or fails with a
/// classified reason. The enum makes partial states unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Completed {
        status: u16,
        /// Wall-clock time for the exchange, in milliseconds.
        elapsed_ms: f64,
    },
    Failed {
        kind: FailureKind,
        /// Short diagnostic, e.g. `request 7: timed out after 30s`.
        detail: String,
    },
}
