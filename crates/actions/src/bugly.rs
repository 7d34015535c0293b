//! Upload an Android mapping file or iOS symbol archive to Bugly

use crate::action::{round_trip, ActionCategory, ActionInfo, ActionOutcome};
use crate::context::ActionCtx;
use crate::options::{
    existing_file, non_empty, platform_choice, OptionKind, OptionSpec, ResolvedOptions,
};
use crate::reply::{interpret, ServiceReply};
use lanekit_config::constants::BUGLY_SYMBOL_UPLOAD_PATH;
use lanekit_errors::{ConfigError, Error};
use lanekit_net::{endpoint_url, FilePart, FormField, OutgoingRequest};
use lanekit_types::Platform;
use serde::Deserialize;
use std::time::Duration;

pub const NAME: &str = "bugly";

/// Version of the symbol upload API sent with every request
const API_VERSION: &str = "1";

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::required(
        "app_id",
        "FL_BUGLY_APP_ID",
        "App id for Bugly",
        OptionKind::Text,
        &[non_empty],
    ),
    OptionSpec::required(
        "app_key",
        "FL_BUGLY_APP_KEY",
        "App key for Bugly",
        OptionKind::Text,
        &[non_empty],
    ),
    OptionSpec::required(
        "platform",
        "FL_BUGLY_PLATFORM",
        "Platform of the app, android or ios",
        OptionKind::Choice(&["android", "ios"]),
        &[non_empty, platform_choice],
    ),
    OptionSpec::required(
        "package_id",
        "FL_BUGLY_PACKAGE_ID",
        "Package name (android) or bundle id (ios)",
        OptionKind::Text,
        &[non_empty],
    ),
    OptionSpec::required(
        "mapping_file_path",
        "FL_BUGLY_MAPPING_FILE_PATH",
        "Path to the mapping file (android) or zipped dSYM (ios)",
        OptionKind::FilePath,
        &[non_empty, existing_file],
    ),
    OptionSpec::required(
        "version_name",
        "FL_BUGLY_VERSION_NAME",
        "Version name of the build the symbols belong to",
        OptionKind::Text,
        &[non_empty],
    ),
];

pub static INFO: ActionInfo = ActionInfo {
    name: NAME,
    description: "Upload mapping file to Bugly",
    details: "You can retrieve your App id and App key on your settings page (https://www.bugly.qq.com/account/index/)",
    authors: &["flyeek"],
    category: ActionCategory::Release,
    platforms: &[Platform::Ios, Platform::Android],
    options: OPTIONS,
    outputs: &[],
    return_value: None,
    start_message: "Starting uploading mapping file to Bugly...",
    success_message: "Uploading mapping file to Bugly successfully!",
    failure_message: "Error when trying to upload mapping file to Bugly.",
    timeout_message: "Timed out while uploading mapping file to Bugly.",
};

#[derive(Debug, Deserialize)]
struct SymbolReply {
    rtcode: Option<i64>,
    data: Option<SymbolData>,
}

#[derive(Debug, Deserialize)]
struct SymbolData {
    // Field name is misspelled by the service
    #[serde(rename = "reponseCode")]
    response_code: Option<serde_json::Value>,
}

impl ServiceReply for SymbolReply {
    type Payload = ();

    // `rtcode` is numeric while `reponseCode` is a string; both must say success
    fn accepted(self) -> Option<()> {
        let transport_ok = self.rtcode == Some(0);
        let upload_ok = self
            .data
            .and_then(|data| data.response_code)
            .is_some_and(|code| code.as_str() == Some("0"));
        (transport_ok && upload_ok).then_some(())
    }
}

/// Name the uploaded symbol file is stored under
#[must_use]
pub fn symbol_file_name(version_name: &str, platform: Platform) -> String {
    format!("symbol_{version_name}.{}", platform.symbol_extension())
}

/// Build the multipart upload from validated options
///
/// # Errors
///
/// Returns an error if a required option is missing, the platform is not
/// supported or the endpoint URL is invalid.
pub fn build_request(
    opts: &ResolvedOptions,
    base_url: &str,
    timeout: Duration,
) -> Result<OutgoingRequest, Error> {
    let app_id = opts.require("app_id")?;
    let app_key = opts.require("app_key")?;
    let version_name = opts.require("version_name")?;
    let raw_platform = opts.require("platform")?;
    let platform: Platform = raw_platform
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            field: "platform".to_string(),
            value: raw_platform.to_string(),
        })?;

    let mut url = endpoint_url(base_url, BUGLY_SYMBOL_UPLOAD_PATH)?;
    url.query_pairs_mut()
        .append_pair("app_key", app_key)
        .append_pair("app_id", app_id);

    let fields = vec![
        FormField::text("api_version", API_VERSION),
        FormField::text("app_id", app_id),
        FormField::text("app_key", app_key),
        FormField::text("symbolType", platform.symbol_type()),
        FormField::text("bundleId", opts.require("package_id")?),
        FormField::text("productVersion", version_name),
        FormField::text("fileName", symbol_file_name(version_name, platform)),
        FormField::file(
            "file",
            FilePart::from_path(opts.path("mapping_file_path")?, "text/plain"),
        ),
    ];

    Ok(OutgoingRequest::multipart(url, timeout, fields))
}

pub(crate) async fn execute(ctx: &ActionCtx, opts: &ResolvedOptions) -> Result<ActionOutcome, Error> {
    let request = build_request(opts, &ctx.config.endpoints.bugly, ctx.timeout_for(NAME)?)?;
    let reply = round_trip(ctx, NAME, &request).await?;

    interpret::<SymbolReply>("Bugly", &reply).into_result()?;

    Ok(ActionOutcome::empty(NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EnvSource;
    use crate::options::{validate, ActionConfig};
    use crate::reply::Reply;
    use lanekit_net::{HttpReply, RequestBody};
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    fn config(platform: &str, file: &NamedTempFile) -> ActionConfig {
        ActionConfig::new()
            .with("app_id", "900001")
            .with("app_key", "secret")
            .with("platform", platform)
            .with("package_id", "com.example.app")
            .with("mapping_file_path", file.path().to_string_lossy())
            .with("version_name", "1.2.3")
    }

    fn request_for(platform: &str, file: &NamedTempFile) -> OutgoingRequest {
        let opts = validate(OPTIONS, &config(platform, file), &EnvSource::Fixed(HashMap::new()))
            .unwrap();
        build_request(&opts, "https://api.bugly.qq.com", Duration::from_secs(300)).unwrap()
    }

    #[test]
    fn test_android_request() {
        let file = NamedTempFile::new().unwrap();
        let request = request_for("android", &file);

        assert_eq!(
            request.url().as_str(),
            "https://api.bugly.qq.com/openapi/file/upload/symbol?app_key=secret&app_id=900001"
        );
        assert_eq!(request.timeout(), Duration::from_secs(300));

        let body = request.body();
        let RequestBody::Multipart(fields) = body else {
            panic!("expected multipart body");
        };
        let names: Vec<_> = fields.iter().map(FormField::name).collect();
        assert_eq!(
            names,
            [
                "api_version",
                "app_id",
                "app_key",
                "symbolType",
                "bundleId",
                "productVersion",
                "fileName",
                "file"
            ]
        );
        assert_eq!(body.text_field("api_version"), Some("1"));
        assert_eq!(body.text_field("symbolType"), Some("1"));
        assert_eq!(body.text_field("bundleId"), Some("com.example.app"));
        assert_eq!(body.text_field("fileName"), Some("symbol_1.2.3.txt"));

        let part = body.file_field("file").unwrap();
        assert_eq!(part.path, file.path());
        assert_eq!(part.mime, "text/plain");
    }

    #[test]
    fn test_ios_request() {
        let file = NamedTempFile::new().unwrap();
        let request = request_for("ios", &file);

        assert_eq!(request.body().text_field("symbolType"), Some("2"));
        assert_eq!(
            request.body().text_field("fileName"),
            Some("symbol_1.2.3.zip")
        );
    }

    #[test]
    fn test_reply_requires_both_codes() {
        let reply = |body: &str| HttpReply {
            status: 200,
            body: body.to_string(),
            elapsed: Duration::ZERO,
        };

        assert!(matches!(
            interpret::<SymbolReply>("Bugly", &reply(r#"{"rtcode":0,"data":{"reponseCode":"0"}}"#)),
            Reply::Accepted(())
        ));
        for body in [
            r#"{"rtcode":0,"data":{"reponseCode":"1"}}"#,
            r#"{"rtcode":0,"data":{"reponseCode":0}}"#,
            r#"{"rtcode":1,"data":{"reponseCode":"0"}}"#,
            r#"{"rtcode":0}"#,
        ] {
            assert!(
                matches!(interpret::<SymbolReply>("Bugly", &reply(body)), Reply::Rejected(_)),
                "{body} should be rejected"
            );
        }
    }
}
