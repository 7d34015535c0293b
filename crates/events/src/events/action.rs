use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::FailureContext;

/// Events emitted over the life of a single action run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionEvent {
    /// Action started; `message` is the human-readable banner
    Started { action: String, message: String },

    /// Parameters passed validation
    Validated { action: String, parameters: usize },

    /// Request handed to the transport
    RequestSent {
        action: String,
        url: String,
        timeout: Duration,
    },

    /// Response received from the service, before interpretation
    ResponseReceived {
        action: String,
        status: u16,
        elapsed: Duration,
    },

    /// Value written into the lane output registry
    OutputPublished {
        action: String,
        key: String,
        value: String,
    },

    /// Service reported success
    Succeeded { action: String, message: String },

    /// Action aborted
    Failed {
        action: String,
        failure: FailureContext,
    },
}

impl ActionEvent {
    /// Name of the action this event belongs to
    #[must_use]
    pub fn action(&self) -> &str {
        match self {
            Self::Started { action, .. }
            | Self::Validated { action, .. }
            | Self::RequestSent { action, .. }
            | Self::ResponseReceived { action, .. }
            | Self::OutputPublished { action, .. }
            | Self::Succeeded { action, .. }
            | Self::Failed { action, .. } => action,
        }
    }
}
