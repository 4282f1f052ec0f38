mod client;
mod error;
mod types;

pub use client::HttpClient;
pub use error::{Error, FailureKind, Result};
pub use types::{HttpRequest, HttpResponse};
