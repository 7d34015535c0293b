//! Post a message to a BearyChat incoming-robot webhook

use crate::action::{round_trip, ActionCategory, ActionInfo, ActionOutcome};
use crate::context::ActionCtx;
use crate::options::{http_url, non_empty, OptionKind, OptionSpec, ResolvedOptions};
use crate::reply::{interpret, ServiceReply};
use lanekit_errors::Error;
use lanekit_net::{parse_url, OutgoingRequest};
use lanekit_types::Platform;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const NAME: &str = "beary_chat";

/// Attachment color when none is given
pub const DEFAULT_COLOR: &str = "#00cc99";

const OPTIONS: &[OptionSpec] = &[
    OptionSpec::required(
        "robot_url",
        "FL_BEARY_CHAT_ROBOT_KEY",
        "Webhook url for BearyChat Incoming Robot",
        OptionKind::Url,
        &[non_empty, http_url],
    ),
    OptionSpec::required(
        "message_title",
        "FL_BEARY_CHAT_MESSAGE_TITLE",
        "Title for message",
        OptionKind::Text,
        &[non_empty],
    ),
    OptionSpec::required(
        "message_text",
        "FL_BEARY_CHAT_MESSAGE_TEXT",
        "Text for message",
        OptionKind::Text,
        &[non_empty],
    ),
    OptionSpec::optional(
        "message_image",
        "FL_BEARY_CHAT_IMAGE_URL",
        "Image for message. Optional",
        OptionKind::Url,
    ),
    OptionSpec::optional(
        "message_color",
        "FL_BEARY_CHAT_message_color",
        "Color for message. Optional",
        OptionKind::Text,
    ),
];

pub static INFO: ActionInfo = ActionInfo {
    name: NAME,
    description: "Send a message to BearyChat",
    details: "You can see detail info on the BearyChat official page (https://www.bearychat.com/)",
    authors: &["flyeek"],
    category: ActionCategory::Notifications,
    platforms: &[Platform::Ios, Platform::Android],
    options: OPTIONS,
    outputs: &[],
    return_value: None,
    start_message: "Starting sending message to BearyChat...",
    success_message: "Sending message to BearyChat successfully!",
    failure_message: "Error when trying to send message to BearyChat.",
    timeout_message: "Timed out while sending message to BearyChat.",
};

#[derive(Debug, Deserialize)]
struct ChatReply {
    code: Option<i64>,
}

impl ServiceReply for ChatReply {
    type Payload = ();

    fn accepted(self) -> Option<()> {
        (self.code == Some(0)).then_some(())
    }
}

/// Build the webhook request from validated options
///
/// # Errors
///
/// Returns an error if a required option is missing or the webhook URL is invalid.
pub fn build_request(opts: &ResolvedOptions, timeout: Duration) -> Result<OutgoingRequest, Error> {
    let url = parse_url(opts.require("robot_url")?)?;

    let mut attachment = json!({
        "text": opts.require("message_text")?,
        "color": opts.get("message_color").unwrap_or(DEFAULT_COLOR),
    });
    if let Some(image) = opts.get("message_image") {
        attachment["images"] = json!([{ "url": image }]);
    }

    let body = json!({
        "text": opts.require("message_title")?,
        "attachments": [attachment],
    });

    Ok(OutgoingRequest::json(url, timeout, body))
}

pub(crate) async fn execute(ctx: &ActionCtx, opts: &ResolvedOptions) -> Result<ActionOutcome, Error> {
    let request = build_request(opts, ctx.timeout_for(NAME)?)?;
    let reply = round_trip(ctx, NAME, &request).await?;

    interpret::<ChatReply>("BearyChat", &reply).into_result()?;

    Ok(ActionOutcome::empty(NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EnvSource;
    use crate::options::{validate, ActionConfig};
    use lanekit_net::RequestBody;
    use std::collections::HashMap;

    fn resolve(config: &ActionConfig) -> ResolvedOptions {
        validate(OPTIONS, config, &EnvSource::Fixed(HashMap::new())).unwrap()
    }

    fn base_config() -> ActionConfig {
        ActionConfig::new()
            .with("robot_url", "https://hook.bearychat.com/robot/abc")
            .with("message_title", "Build 42")
            .with("message_text", "Ready for testing")
    }

    #[test]
    fn test_minimal_payload_uses_default_color() {
        let request = build_request(&resolve(&base_config()), Duration::from_secs(120)).unwrap();

        assert_eq!(request.url().as_str(), "https://hook.bearychat.com/robot/abc");
        assert_eq!(request.timeout(), Duration::from_secs(120));
        assert_eq!(
            request.body(),
            &RequestBody::Json(json!({
                "text": "Build 42",
                "attachments": [{"text": "Ready for testing", "color": "#00cc99"}],
            }))
        );
    }

    #[test]
    fn test_image_and_color() {
        let config = base_config()
            .with("message_image", "https://qr.example/1.png")
            .with("message_color", "#ff0000");
        let request = build_request(&resolve(&config), Duration::from_secs(120)).unwrap();

        assert_eq!(
            request.body(),
            &RequestBody::Json(json!({
                "text": "Build 42",
                "attachments": [{
                    "text": "Ready for testing",
                    "color": "#ff0000",
                    "images": [{"url": "https://qr.example/1.png"}],
                }],
            }))
        );
    }

    #[test]
    fn test_required_options() {
        for key in ["robot_url", "message_title", "message_text"] {
            let config: ActionConfig = base_config()
                .iter()
                .filter(|(k, _)| *k != key)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            let err = validate(OPTIONS, &config, &EnvSource::Fixed(HashMap::new())).unwrap_err();
            assert_eq!(err.to_string(), format!("missing required field: {key}"));
        }
    }
}
