use thiserror::Error;

/// Errors surfaced by `ApiClient` calls.
///
/// The three variants match the three ways a request can go wrong: the
/// server answered with a non-2xx status, the request never completed, or
/// a 2xx body was not the JSON the caller expected.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server responded with a non-2xx status. The message is the response
    /// body text, so backend error strings reach the UI verbatim.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request could not be completed at all (DNS, connection refused,
    /// timeout). No response was received.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response body was not valid JSON for the expected shape.
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a status error from a non-2xx response, falling back to a
    /// generic `HTTP <status>` message when the body is empty.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            body.to_string()
        };
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// HTTP status code, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
