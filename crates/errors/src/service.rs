//! Errors reported by external services after a completed round trip
//!
//! Every variant carries the raw response body so the failure can be
//! diagnosed without re-running the upload.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceError {
    #[error("{service} rejected the request: {body}")]
    Rejected { service: String, body: String },

    #[error("{service} returned HTTP {status}: {body}")]
    HttpStatus {
        service: String,
        status: u16,
        body: String,
    },

    #[error("{service} returned a malformed response: {body}")]
    MalformedResponse { service: String, body: String },
}

impl ServiceError {
    /// Raw response body as received from the service
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Rejected { body, .. }
            | Self::HttpStatus { body, .. }
            | Self::MalformedResponse { body, .. } => body,
        }
    }
}

impl UserFacingError for ServiceError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Rejected { .. } => Some("Verify the keys and identifiers passed to the action."),
            Self::HttpStatus { .. } | Self::MalformedResponse { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Rejected { .. } => "service.rejected",
            Self::HttpStatus { .. } => "service.http_status",
            Self::MalformedResponse { .. } => "service.malformed_response",
        };
        Some(code)
    }
}
