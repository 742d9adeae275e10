//! Error types

use thiserror::Error;

/// Errors surfaced by barrierctl operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to the management endpoint.
    #[error("http error on {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success response from the management API.
    #[error("api error on {endpoint}: status {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response body did not match the expected schema.
    #[error("decode error on {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// A segment name or exclusion pattern failed to compile as a regex.
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Bad or missing configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Run-log I/O failure.
    #[error("log error: {0}")]
    Log(#[from] std::io::Error),
}
