//! Action context for dependency injection

use lanekit_config::Config;
use lanekit_errors::{ConfigError, Error};
use lanekit_events::{EventEmitter, EventSender};
use lanekit_net::{NetClient, NetConfig};
use std::collections::HashMap;
use std::time::Duration;

/// Where option values fall back to when a parameter is not passed
#[derive(Debug, Clone, Default)]
pub enum EnvSource {
    /// The process environment
    #[default]
    Process,
    /// A fixed set of variables, for tests and embedding hosts
    Fixed(HashMap<String, String>),
}

impl EnvSource {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(name).ok(),
            Self::Fixed(vars) => vars.get(name).cloned(),
        }
    }
}

/// Everything an action needs from its host
pub struct ActionCtx {
    /// Network client
    pub net: NetClient,
    /// Event sender for user-facing messages
    pub tx: EventSender,
    /// Endpoints and deadlines
    pub config: Config,
    /// Fallback source for option values
    pub env: EnvSource,
    /// Stamped on every event emitted through this context
    pub run_id: String,
}

impl ActionCtx {
    /// Request deadline configured for an action
    ///
    /// # Errors
    ///
    /// Returns an error if the action has no configured deadline.
    pub fn timeout_for(&self, action: &str) -> Result<Duration, Error> {
        self.config
            .timeouts
            .for_action(action)
            .ok_or_else(|| {
                ConfigError::UnknownAction {
                    name: action.to_string(),
                }
                .into()
            })
    }
}

impl EventEmitter for ActionCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }

    fn correlation_id(&self) -> Option<&str> {
        Some(&self.run_id)
    }
}

/// Builder for [`ActionCtx`]
pub struct ActionCtxBuilder {
    net: Option<NetClient>,
    tx: Option<EventSender>,
    config: Option<Config>,
    env: EnvSource,
    run_id: Option<String>,
}

impl ActionCtxBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            net: None,
            tx: None,
            config: None,
            env: EnvSource::Process,
            run_id: None,
        }
    }

    /// Set network client
    #[must_use]
    pub fn with_net(mut self, net: NetClient) -> Self {
        self.net = Some(net);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the fallback source for option values
    #[must_use]
    pub fn with_env(mut self, env: EnvSource) -> Self {
        self.env = env;
        self
    }

    /// Set the correlation id; a random one is generated otherwise
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Build the context
    ///
    /// The network client defaults to one built from the configuration's
    /// `[network]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the event sender is missing or the default
    /// network client cannot be created.
    pub fn build(self) -> Result<ActionCtx, Error> {
        let tx = self
            .tx
            .ok_or_else(|| Error::internal("action context requires an event sender"))?;

        let config = self.config.unwrap_or_default();

        let net = match self.net {
            Some(net) => net,
            None => NetClient::new(&NetConfig::from(&config.network))?,
        };

        Ok(ActionCtx {
            net,
            tx,
            config,
            env: self.env,
            run_id: self
                .run_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        })
    }
}

impl Default for ActionCtxBuilder {
    fn default() -> Self {
        Self::new()
    }
}
