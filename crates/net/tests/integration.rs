//! Integration tests for net crate

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use lanekit_errors::{Error, NetworkError};
    use lanekit_net::*;
    use serde_json::json;
    use std::time::Duration;

    const DEADLINE: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_post_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/hook")
                .header("content-type", "application/json")
                .json_body(json!({"text": "hello"}));
            then.status(200).body(r#"{"code":0}"#);
        });

        let client = NetClient::with_defaults().unwrap();
        let url = parse_url(&server.url("/hook")).unwrap();
        let request = OutgoingRequest::json(url, DEADLINE, json!({"text": "hello"}));

        let reply = client.execute(&request).await.unwrap();

        mock.assert();
        assert!(reply.is_success());
        assert_eq!(reply.body, r#"{"code":0}"#);
    }

    #[tokio::test]
    async fn test_post_multipart_with_file() {
        let server = MockServer::start();
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("mapping.txt");
        std::fs::write(&artifact, "mapping-contents").unwrap();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upload")
                .header_exists("content-length")
                .body_contains("name=\"api_version\"")
                .body_contains("mapping-contents")
                .body_contains("filename=\"mapping.txt\"");
            then.status(200).body("{}");
        });

        let client = NetClient::with_defaults().unwrap();
        let url = parse_url(&server.url("/upload")).unwrap();
        let request = OutgoingRequest::multipart(
            url,
            DEADLINE,
            vec![
                FormField::text("api_version", "1"),
                FormField::file(
                    "file",
                    FilePart::from_path(&artifact, "text/plain"),
                ),
            ],
        );

        client.execute(&request).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_non_success_status_is_returned() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/broken");
            then.status(502).body("Bad Gateway");
        });

        let client = NetClient::with_defaults().unwrap();
        let url = parse_url(&server.url("/broken")).unwrap();
        let request = OutgoingRequest::json(url, DEADLINE, json!({}));

        let reply = client.execute(&request).await.unwrap();
        assert_eq!(reply.status, 502);
        assert!(!reply.is_success());
        assert_eq!(reply.body, "Bad Gateway");
    }

    #[tokio::test]
    async fn test_deadline_reports_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/slow");
            then.status(200)
                .body(r#"{"code":0}"#)
                .delay(Duration::from_secs(3));
        });

        let client = NetClient::with_defaults().unwrap();
        let mut url = parse_url(&server.url("/slow")).unwrap();
        url.set_query(Some("app_key=secret"));
        let request = OutgoingRequest::json(url, Duration::from_millis(200), json!({}));

        let error = client.execute(&request).await.unwrap_err();
        match error {
            Error::Network(NetworkError::Timeout { url, .. }) => {
                assert!(!url.contains("secret"), "{url}");
                assert!(!url.contains("/slow"), "{url}");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreadable_attachment_sends_nothing() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/upload");
            then.status(200);
        });

        let client = NetClient::with_defaults().unwrap();
        let url = parse_url(&server.url("/upload")).unwrap();
        let request = OutgoingRequest::multipart(
            url,
            DEADLINE,
            vec![FormField::file(
                "file",
                FilePart::from_path("/nonexistent/app.ipa", "application/octet-stream"),
            )],
        );

        let error = client.execute(&request).await.unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
        mock.assert_hits(0);
    }
}
