#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Pipeline actions for lanekit
//!
//! Three actions share one shape: validate parameters against a static
//! option schema, build a single POST request, send it, and classify the
//! service's reply. Hosts drive them through [`ActionKind::run`] for one
//! action, or [`run_lane`] for an ordered list of steps sharing one
//! [`LaneOutputs`] registry.

pub mod action;
pub mod beary_chat;
pub mod bugly;
pub mod context;
pub mod lane;
pub mod options;
pub mod outputs;
pub mod pgyer;
pub mod reply;

pub use action::{ActionCategory, ActionInfo, ActionOutcome};
pub use context::{ActionCtx, ActionCtxBuilder, EnvSource};
pub use lane::{run_lane, LaneFile, LaneReport, LaneStep, ParamValue};
pub use options::{ActionConfig, OptionKind, OptionSpec, ResolvedOptions};
pub use outputs::{LaneOutputs, PGYER_INSTALL_APP_KEY, PGYER_INSTALL_QRCODE_URL};
pub use reply::{Reply, ServiceReply};

use lanekit_errors::{ConfigError, Error};
use lanekit_events::{ActionEvent, AppEvent, EventEmitter, FailureContext};
use std::fmt;
use std::str::FromStr;

/// The actions this crate provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    BearyChat,
    Bugly,
    Pgyer,
}

impl ActionKind {
    pub const ALL: [Self; 3] = [Self::BearyChat, Self::Bugly, Self::Pgyer];

    /// Look up an action by its registered name
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if no action has that name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ConfigError::UnknownAction {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn info(self) -> &'static ActionInfo {
        match self {
            Self::BearyChat => &beary_chat::INFO,
            Self::Bugly => &bugly::INFO,
            Self::Pgyer => &pgyer::INFO,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Run the action once
    ///
    /// Parameters are validated before anything is sent; a configuration
    /// error never reaches the network. Every run performs a fresh request.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid parameters, a network error
    /// if the request could not complete, or a service error if the service
    /// rejected it.
    pub async fn run(
        self,
        ctx: &ActionCtx,
        params: &ActionConfig,
        outputs: &mut LaneOutputs,
    ) -> Result<ActionOutcome, Error> {
        let info = self.info();
        ctx.emit_action_started(info.name, info.start_message);

        match self.execute(ctx, params, outputs).await {
            Ok(outcome) => {
                ctx.emit_action_succeeded(info.name, info.success_message);
                Ok(outcome)
            }
            Err(err) => {
                ctx.emit_action_failed(info.name, failure_context(info, &err));
                Err(err)
            }
        }
    }

    async fn execute(
        self,
        ctx: &ActionCtx,
        params: &ActionConfig,
        outputs: &mut LaneOutputs,
    ) -> Result<ActionOutcome, Error> {
        let info = self.info();
        let opts = options::validate(info.options, params, &ctx.env)?;
        tracing::debug!(action = info.name, parameters = opts.len(), "parameters validated");
        ctx.emit(AppEvent::Action(ActionEvent::Validated {
            action: info.name.to_string(),
            parameters: opts.len(),
        }));

        match self {
            Self::BearyChat => beary_chat::execute(ctx, &opts).await,
            Self::Bugly => bugly::execute(ctx, &opts).await,
            Self::Pgyer => pgyer::execute(ctx, &opts, outputs).await,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

fn failure_context(info: &ActionInfo, err: &Error) -> FailureContext {
    let headline = if err.is_timeout() {
        info.timeout_message
    } else {
        info.failure_message
    };
    let mut failure = FailureContext::from_error(err);
    failure.message = format!("{headline} {}", failure.message);
    failure
}
