//! Upload an adhoc build to Pgyer and publish its install links

use crate::action::{round_trip, ActionCategory, ActionInfo, ActionOutcome};
use crate::context::ActionCtx;
use crate::options::{existing_file, non_empty, OptionKind, OptionSpec, ResolvedOptions};
use crate::outputs::{LaneOutputs, PGYER_INSTALL_APP_KEY, PGYER_INSTALL_QRCODE_URL};
use crate::reply::{interpret, ServiceReply};
use lanekit_config::constants::PGYER_UPLOAD_PATH;
use lanekit_errors::{ConfigError, Error};
use lanekit_events::{ActionEvent, AppEvent, EventEmitter};
use lanekit_net::{endpoint_url, FilePart, FormField, OutgoingRequest};
use lanekit_types::Platform;
use serde::Deserialize;
use std::time::Duration;

pub const NAME: &str = "pgyer";

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::required(
        "user_key",
        "FL_PGYER_USER_KEY",
        "User Key for Pgyer",
        OptionKind::Text,
        &[non_empty],
    ),
    OptionSpec::required(
        "api_key",
        "FL_PGYER_API_KEY",
        "API Key for Pgyer",
        OptionKind::Text,
        &[non_empty],
    ),
    OptionSpec::required(
        "app_path",
        "FL_PGYER_APP_PATH",
        "Path to your APP file",
        OptionKind::FilePath,
        &[non_empty, existing_file],
    ),
    OptionSpec::optional(
        "install_password",
        "FL_PGYER_INSTALL_PASSWORD",
        "password when installing app. Default value is none",
        OptionKind::Text,
    )
    .with_default(""),
];

pub static INFO: ActionInfo = ActionInfo {
    name: NAME,
    description: "Upload a new adhoc build to Pgyer",
    details: "You can retrieve your User key and API key on your settings page (https://www.pgyer.com/account/index/)",
    authors: &["flyeek"],
    category: ActionCategory::Beta,
    platforms: &[Platform::Ios, Platform::Android],
    options: OPTIONS,
    outputs: &[
        (
            PGYER_INSTALL_QRCODE_URL,
            "QRCode URL of the newly uploaded build",
        ),
        (PGYER_INSTALL_APP_KEY, "App Key of the newly uploaded build"),
    ],
    return_value: Some("QRCode URL of the newly uploaded build"),
    start_message: "Starting uploading ipa to Pgyer...",
    success_message: "Upload to Pgyer successfully!",
    failure_message: "Error when trying to upload ipa to Pgyer.",
    timeout_message: "Timed out while uploading ipa to Pgyer.",
};

/// Install links of an uploaded build
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedBuild {
    #[serde(rename = "appQRCodeURL")]
    pub qr_code_url: String,
    #[serde(rename = "appKey")]
    pub app_key: String,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    code: Option<i64>,
    data: Option<UploadedBuild>,
}

impl ServiceReply for UploadReply {
    type Payload = UploadedBuild;

    fn accepted(self) -> Option<UploadedBuild> {
        if self.code == Some(0) {
            self.data
        } else {
            None
        }
    }
}

/// Map an option onto the form field the upload API expects
///
/// # Errors
///
/// Returns `UnknownParameter` for an option the API has no field for.
pub fn form_field(key: &str, value: &str) -> Result<FormField, ConfigError> {
    let field = match key {
        "user_key" => FormField::text("uKey", value),
        "api_key" => FormField::text("_api_key", value),
        "app_path" => FormField::file(
            "file",
            FilePart::from_path(value, "application/octet-stream"),
        ),
        "install_password" => FormField::text("password", value),
        other => {
            return Err(ConfigError::UnknownParameter {
                field: other.to_string(),
            })
        }
    };
    Ok(field)
}

/// Build the multipart upload from validated options
///
/// # Errors
///
/// Returns an error if an option has no form field or the endpoint URL is invalid.
pub fn build_request(
    opts: &ResolvedOptions,
    base_url: &str,
    timeout: Duration,
) -> Result<OutgoingRequest, Error> {
    let url = endpoint_url(base_url, PGYER_UPLOAD_PATH)?;
    let fields = opts
        .iter()
        .map(|(key, value)| form_field(key, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OutgoingRequest::multipart(url, timeout, fields))
}

pub(crate) async fn execute(
    ctx: &ActionCtx,
    opts: &ResolvedOptions,
    outputs: &mut LaneOutputs,
) -> Result<ActionOutcome, Error> {
    let request = build_request(opts, &ctx.config.endpoints.pgyer, ctx.timeout_for(NAME)?)?;
    let reply = round_trip(ctx, NAME, &request).await?;

    let build = interpret::<UploadReply>("Pgyer", &reply).into_result()?;

    let published = vec![
        (PGYER_INSTALL_QRCODE_URL.to_string(), build.qr_code_url.clone()),
        (PGYER_INSTALL_APP_KEY.to_string(), build.app_key),
    ];
    for (key, value) in &published {
        outputs.set(key.clone(), value.clone());
        ctx.emit(AppEvent::Action(ActionEvent::OutputPublished {
            action: NAME.to_string(),
            key: key.clone(),
            value: value.clone(),
        }));
    }

    Ok(ActionOutcome {
        action: NAME,
        value: Some(build.qr_code_url),
        published,
    })
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

    #[test]
    fn test_field_renaming() {
        let file = NamedTempFile::new().unwrap();
        let config = ActionConfig::new()
            .with("user_key", "u")
            .with("api_key", "a")
            .with("app_path", file.path().to_string_lossy());
        let opts = validate(OPTIONS, &config, &EnvSource::Fixed(HashMap::new())).unwrap();
        let request =
            build_request(&opts, "http://www.pgyer.com", Duration::from_secs(120)).unwrap();

        assert_eq!(request.url().as_str(), "http://www.pgyer.com/apiv1/app/upload");

        let body = request.body();
        let RequestBody::Multipart(fields) = body else {
            panic!("expected multipart body");
        };
        let names: Vec<_> = fields.iter().map(FormField::name).collect();
        assert_eq!(names, ["uKey", "_api_key", "file", "password"]);
        assert_eq!(body.text_field("uKey"), Some("u"));
        assert_eq!(body.text_field("_api_key"), Some("a"));
        assert_eq!(body.text_field("password"), Some(""));
        assert_eq!(
            body.file_field("file").unwrap().mime,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_unmapped_option() {
        let err = form_field("changelog", "notes").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParameter { ref field } if field == "changelog"));
    }

    #[test]
    fn test_reply() {
        let reply = |body: &str| HttpReply {
            status: 200,
            body: body.to_string(),
            elapsed: Duration::ZERO,
        };

        match interpret::<UploadReply>(
            "Pgyer",
            &reply(r#"{"code":0,"data":{"appQRCodeURL":"https://x","appKey":"k1","appName":"demo"}}"#),
        ) {
            Reply::Accepted(build) => {
                assert_eq!(build.qr_code_url, "https://x");
                assert_eq!(build.app_key, "k1");
            }
            Reply::Rejected(err) => panic!("unexpected rejection: {err}"),
        }

        for body in [r#"{"code":5}"#, r#"{"code":0}"#] {
            assert!(matches!(
                interpret::<UploadReply>("Pgyer", &reply(body)),
                Reply::Rejected(_)
            ));
        }
    }
}
