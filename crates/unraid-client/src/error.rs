//! Error types for the Unraid API client.

use thiserror::Error;

use crate::resolve::ResolveError;

/// Errors returned by [`Client`](crate::Client) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to reach the server at all.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The request did not complete within its deadline.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success HTTP status.
    #[error("server returned HTTP {status}")]
    Http {
        /// HTTP status code from the response.
        status: u16,
    },

    /// The GraphQL response carried an `errors` entry.
    #[error("API error: {message}")]
    Api {
        /// Message of the first reported error.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// A name-or-id token matched no known entity.
    #[error(transparent)]
    NotFound(#[from] ResolveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Http { status: 502 };
        assert_eq!(err.to_string(), "server returned HTTP 502");

        let err = ClientError::Api {
            message: "array is already started".into(),
        };
        assert_eq!(err.to_string(), "API error: array is already started");
    }

    #[test]
    fn test_not_found_passthrough() {
        let err = ClientError::from(ResolveError::NotFound {
            kind: "container",
            token: "plex".into(),
        });
        assert_eq!(err.to_string(), "container not found: plex");
    }
}
