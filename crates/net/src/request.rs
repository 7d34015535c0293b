//! Outgoing request description
//!
//! Actions build an [`OutgoingRequest`] from validated parameters and hand it
//! to [`crate::NetClient::execute`]. Building is pure and deterministic, so
//! the wire shape of every action can be checked without a server.

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// A single POST request; the method is not configurable
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    url: Url,
    timeout: Duration,
    body: RequestBody,
}

impl OutgoingRequest {
    #[must_use]
    pub fn json(url: Url, timeout: Duration, body: serde_json::Value) -> Self {
        Self {
            url,
            timeout,
            body: RequestBody::Json(body),
        }
    }

    #[must_use]
    pub fn multipart(url: Url, timeout: Duration, fields: Vec<FormField>) -> Self {
        Self {
            url,
            timeout,
            body: RequestBody::Multipart(fields),
        }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn body(&self) -> &RequestBody {
        &self.body
    }
}

/// Request body variants
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as `application/json`
    Json(serde_json::Value),
    /// Serialized as `multipart/form-data`, fields in the given order
    Multipart(Vec<FormField>),
}

impl RequestBody {
    /// Look up a text field of a multipart body
    #[must_use]
    pub fn text_field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Multipart(fields) => fields.iter().find_map(|field| match field {
                FormField::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            }),
            Self::Json(_) => None,
        }
    }

    /// Look up a file field of a multipart body
    #[must_use]
    pub fn file_field(&self, name: &str) -> Option<&FilePart> {
        match self {
            Self::Multipart(fields) => fields.iter().find_map(|field| match field {
                FormField::File { name: n, file } if n == name => Some(file),
                _ => None,
            }),
            Self::Json(_) => None,
        }
    }
}

/// One multipart form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text { name: String, value: String },
    File { name: String, file: FilePart },
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: impl Into<String>, file: FilePart) -> Self {
        Self::File {
            name: name.into(),
            file,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// A file attachment, streamed from disk when the request is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
}

impl FilePart {
    /// Attach a file under its on-disk name
    pub fn from_path(path: impl Into<PathBuf>, mime: &'static str) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            mime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let url = Url::parse("http://localhost/upload").unwrap();
        let request = OutgoingRequest::multipart(
            url,
            Duration::from_secs(1),
            vec![
                FormField::text("uKey", "u"),
                FormField::file("file", FilePart::from_path("/tmp/App.ipa", "application/octet-stream")),
            ],
        );

        assert_eq!(request.body().text_field("uKey"), Some("u"));
        assert_eq!(request.body().text_field("file"), None);
        let file = request.body().file_field("file").unwrap();
        assert_eq!(file.file_name, "App.ipa");
        assert_eq!(file.mime, "application/octet-stream");
    }

}
