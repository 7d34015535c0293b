//! Service response classification
//!
//! Each service gets a typed body struct implementing [`ServiceReply`].
//! [`interpret`] turns a raw [`HttpReply`] into [`Reply::Accepted`] with the
//! service's payload, or [`Reply::Rejected`] with the raw body preserved.

use lanekit_errors::ServiceError;
use lanekit_net::HttpReply;
use serde::de::DeserializeOwned;

/// Outcome of one round trip, decided by the service's own status fields
#[derive(Debug)]
pub enum Reply<P> {
    Accepted(P),
    Rejected(ServiceError),
}

impl<P> Reply<P> {
    /// # Errors
    ///
    /// Returns the rejection as an error.
    pub fn into_result(self) -> Result<P, ServiceError> {
        match self {
            Self::Accepted(payload) => Ok(payload),
            Self::Rejected(err) => Err(err),
        }
    }
}

/// Decoded body of a service response
pub trait ServiceReply: DeserializeOwned {
    /// Values a successful response carries
    type Payload;

    /// Payload if the body signals success, `None` otherwise
    fn accepted(self) -> Option<Self::Payload>;
}

/// Classify an HTTP reply from `service`
///
/// Non-2xx statuses and bodies that do not decode as the service's JSON
/// shape are rejections too; every rejection keeps the raw body.
pub fn interpret<R: ServiceReply>(service: &str, reply: &HttpReply) -> Reply<R::Payload> {
    if !reply.is_success() {
        return Reply::Rejected(ServiceError::HttpStatus {
            service: service.to_string(),
            status: reply.status,
            body: reply.body.clone(),
        });
    }

    let decoded: R = match serde_json::from_str(&reply.body) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::debug!(service, error = %err, "response body is not the expected JSON");
            return Reply::Rejected(ServiceError::MalformedResponse {
                service: service.to_string(),
                body: reply.body.clone(),
            });
        }
    };

    match decoded.accepted() {
        Some(payload) => Reply::Accepted(payload),
        None => Reply::Rejected(ServiceError::Rejected {
            service: service.to_string(),
            body: reply.body.clone(),
        }),
    }
}
