//! Failures of a single exchange with the assistant service.

/// Why an exchange produced no usable payload.
///
/// Policy refusals are not errors; they arrive as ordinary payloads.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// Connection, I/O, or timeout failure before a response arrived.
    #[error("failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body did not match the expected payload shape.
    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ExchangeError {
    /// Whether the request never produced a response.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
