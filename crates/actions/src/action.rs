//! Action metadata and the shared request round trip

use crate::context::ActionCtx;
use crate::options::OptionSpec;
use lanekit_errors::Error;
use lanekit_events::{ActionEvent, AppEvent, EventEmitter};
use lanekit_net::{redacted_url, HttpReply, OutgoingRequest};
use lanekit_types::Platform;
use serde::Serialize;

/// Grouping used when listing actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Notifications,
    Release,
    Beta,
}

impl ActionCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::Release => "release",
            Self::Beta => "beta",
        }
    }
}

/// Static description of an action
#[derive(Debug)]
pub struct ActionInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub details: &'static str,
    pub authors: &'static [&'static str],
    pub category: ActionCategory,
    pub platforms: &'static [Platform],
    pub options: &'static [OptionSpec],
    /// Output registry keys the action publishes, with descriptions
    pub outputs: &'static [(&'static str, &'static str)],
    pub return_value: Option<&'static str>,
    pub start_message: &'static str,
    pub success_message: &'static str,
    pub failure_message: &'static str,
    pub timeout_message: &'static str,
}

impl ActionInfo {
    #[must_use]
    pub fn is_supported(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

/// Result of a successful action run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub action: &'static str,
    /// Return value handed back to the caller, if the action has one
    pub value: Option<String>,
    /// Output registry entries written by this run
    pub published: Vec<(String, String)>,
}

impl ActionOutcome {
    pub(crate) fn empty(action: &'static str) -> Self {
        Self {
            action,
            value: None,
            published: Vec::new(),
        }
    }
}

/// Send one request, reporting it through the context's events
pub(crate) async fn round_trip(
    ctx: &ActionCtx,
    action: &'static str,
    request: &OutgoingRequest,
) -> Result<HttpReply, Error> {
    ctx.emit(AppEvent::Action(ActionEvent::RequestSent {
        action: action.to_string(),
        url: redacted_url(request.url()),
        timeout: request.timeout(),
    }));

    let reply = ctx.net.execute(request).await?;

    ctx.emit(AppEvent::Action(ActionEvent::ResponseReceived {
        action: action.to_string(),
        status: reply.status,
        elapsed: reply.elapsed,
    }));

    Ok(reply)
}
