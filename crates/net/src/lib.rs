#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for lanekit
//!
//! This crate is the transport shared by all actions: one POST per call,
//! JSON or multipart body, with the deadline carried by the request.

mod client;
mod request;

pub use client::{HttpReply, NetClient, NetConfig};
pub use request::{FilePart, FormField, OutgoingRequest, RequestBody};

use lanekit_errors::{Error, NetworkError};
use url::Url;

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed or not http(s).
pub fn parse_url(url: &str) -> Result<Url, Error> {
    let parsed = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(NetworkError::InvalidUrl(format!("unsupported scheme: {other}")).into()),
    }
}

/// Join a base URL (scheme and host, optionally a path prefix) with an API path
///
/// # Errors
///
/// Returns an error if the resulting URL is invalid.
pub fn endpoint_url(base: &str, path: &str) -> Result<Url, Error> {
    parse_url(&format!("{}{path}", base.trim_end_matches('/')))
}

/// Render a URL for logs and error messages
///
/// Webhook paths and query strings carry credentials, so only the origin is
/// kept.
#[must_use]
pub fn redacted_url(url: &Url) -> String {
    let origin = url.origin().ascii_serialization();
    if url.path() == "/" && url.query().is_none() {
        origin
    } else {
        format!("{origin}/***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://example.com").is_ok());
        assert!(parse_url("not a url").is_err());
        assert!(parse_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("http://www.pgyer.com/", "/apiv1/app/upload").unwrap();
        assert_eq!(url.as_str(), "http://www.pgyer.com/apiv1/app/upload");

        let url = endpoint_url("http://127.0.0.1:4000/mock", "/apiv1/app/upload").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:4000/mock/apiv1/app/upload");
    }

    #[test]
    fn test_redacted_url() {
        let url = parse_url("https://hook.bearychat.com/=bw8NI/incoming/5ae1a3d8").unwrap();
        assert_eq!(redacted_url(&url), "https://hook.bearychat.com/***");

        let url = endpoint_url("http://127.0.0.1:4000", "/openapi/file/upload/symbol?app_key=secret")
            .unwrap();
        assert_eq!(redacted_url(&url), "http://127.0.0.1:4000/***");

        let url = parse_url("http://www.pgyer.com").unwrap();
        assert_eq!(redacted_url(&url), "http://www.pgyer.com");
    }
}
