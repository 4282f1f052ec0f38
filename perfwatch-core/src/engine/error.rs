pub type Result<T> = std::result::Result<T, Error>;

/// Run-fatal engine errors.
///
/// Per-request transport failures are never fatal; they are folded into the
/// result as failed outcomes. Only configuration errors caught before the run
/// starts and task-level programming errors surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("`concurrency` must be a positive integer")]
    InvalidConcurrency,

    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("concurrency gate closed unexpectedly")]
    GateClosed,
}
