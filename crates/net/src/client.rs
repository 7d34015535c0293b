//! HTTP client executing single-shot POST requests

use crate::redacted_url;
use crate::request::{FilePart, FormField, OutgoingRequest, RequestBody};
use lanekit_errors::{Error, NetworkError};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::time::{Duration, Instant};

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(lanekit_config::constants::CONNECT_TIMEOUT_SECS),
            user_agent: format!("lanekit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&lanekit_config::NetworkConfig> for NetConfig {
    fn from(config: &lanekit_config::NetworkConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Status and raw body of a completed round trip
///
/// The body is kept as text: services are interpreted by the caller, and a
/// failure must be reportable verbatim even when it is not JSON.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}

impl HttpReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper
///
/// No retries: every call to [`NetClient::execute`] is exactly one request.
/// The request deadline comes from the [`OutgoingRequest`], not the client.
#[derive(Clone)]
pub struct NetClient {
    client: Client,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: &NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::RequestFailed(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(&NetConfig::default())
    }

    /// Send the request and read the whole response body
    ///
    /// Non-2xx statuses are not errors at this layer; they come back in the
    /// [`HttpReply`] for the caller to interpret.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Timeout` if the deadline expires while sending
    /// or reading, an I/O error if an attached file cannot be read, and other
    /// network errors for connection failures.
    pub async fn execute(&self, request: &OutgoingRequest) -> Result<HttpReply, Error> {
        let builder = self
            .client
            .post(request.url().clone())
            .timeout(request.timeout());

        let builder = match request.body() {
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields).await?),
        };

        tracing::debug!(url = %redacted_url(request.url()), timeout = ?request.timeout(), "sending request");

        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| convert_error(&e, request))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| convert_error(&e, request))?;
        let elapsed = started.elapsed();

        tracing::debug!(status, elapsed = ?elapsed, "received response");

        Ok(HttpReply {
            status,
            body,
            elapsed,
        })
    }
}

async fn build_form(fields: &[FormField]) -> Result<Form, Error> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name.clone(), value.clone()),
            FormField::File { name, file } => form.part(name.clone(), file_part(file).await?),
        };
    }
    Ok(form)
}

async fn file_part(file: &FilePart) -> Result<Part, Error> {
    let handle = tokio::fs::File::open(&file.path)
        .await
        .map_err(|e| Error::io_with_path(&e, &file.path))?;
    let length = handle
        .metadata()
        .await
        .map_err(|e| Error::io_with_path(&e, &file.path))?
        .len();

    Part::stream_with_length(Body::from(handle), length)
        .file_name(file.file_name.clone())
        .mime_str(file.mime)
        .map_err(|e| Error::internal(format!("invalid MIME type '{}': {e}", file.mime)))
}

fn convert_error(error: &reqwest::Error, request: &OutgoingRequest) -> Error {
    if error.is_timeout() {
        NetworkError::Timeout {
            url: redacted_url(request.url()),
            seconds: request.timeout().as_secs(),
        }
        .into()
    } else if error.is_connect() {
        NetworkError::ConnectionRefused(error.to_string()).into()
    } else if error.is_builder() {
        NetworkError::InvalidUrl(error.to_string()).into()
    } else if error.is_body() || error.is_decode() {
        NetworkError::BodyReadFailed(error.to_string()).into()
    } else {
        NetworkError::RequestFailed(error.to_string()).into()
    }
}
