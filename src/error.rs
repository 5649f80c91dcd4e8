//! Error types for the grana CLI.
//!
//! Most fallible code propagates `anyhow::Error` with context attached at each
//! boundary. `ApiError` is the one typed layer: commands need to tell a dead
//! network apart from a rejected token, because only the latter should send the
//! user to `grana login`.

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Failures at the HTTP boundary, classified so callers can react differently
/// to transport problems, expired/invalid tokens, and server-side rejections.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed: timeout, refused connection, DNS failure.
    #[error("could not reach the API: {0}")]
    Transport(reqwest::Error),

    /// The server answered 401. The stored token is missing, expired or revoked.
    #[error("the API rejected the credentials (HTTP 401)")]
    Unauthorized,

    /// Any other non-success status, with whatever message the server supplied.
    #[error("the API rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl ApiError {
    /// True when the failure means the user needs to (re)authenticate.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Looks through an `anyhow` chain for an `ApiError::Unauthorized`.
///
/// Command handlers use this to append a "run grana login" hint without
/// losing the original error.
pub fn is_unauthorized(err: &Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<ApiError>())
        .any(ApiError::is_auth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_is_unauthorized_direct() {
        let err: Error = ApiError::Unauthorized.into();
        assert!(is_unauthorized(&err));
    }

    #[test]
    fn test_is_unauthorized_wrapped() {
        let err = Err::<(), _>(ApiError::Unauthorized)
            .context("Unable to list transactions")
            .unwrap_err();
        assert!(is_unauthorized(&err));
    }

    #[test]
    fn test_is_unauthorized_other_error() {
        let err = anyhow::anyhow!("something else");
        assert!(!is_unauthorized(&err));
    }

    #[test]
    fn test_rejected_message() {
        let err = ApiError::Rejected {
            status: 422,
            message: "amount must be positive".to_string(),
        };
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("amount must be positive"));
        assert!(!err.is_auth());
    }
}
