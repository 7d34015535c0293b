//! Structured logging integration for events
//!
//! Every event that reaches the CLI is also recorded through `tracing`, with
//! the event metadata as structured fields, so `--json --debug` yields a
//! machine-readable log of the whole run.

use lanekit_events::{ActionEvent, AppEvent, EventMessage, LaneEvent};
use tracing::{debug, error, info};

/// Log an `AppEvent` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let event = &message.event;
    let meta = &message.meta;

    match event {
        AppEvent::Action(action_event) => match action_event {
            ActionEvent::Started { action, .. } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    action = %action,
                    "Action started"
                );
            }
            ActionEvent::Validated { action, parameters } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    action = %action,
                    parameters = parameters,
                    "Parameters validated"
                );
            }
            ActionEvent::RequestSent {
                action,
                url,
                timeout,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    action = %action,
                    url = %url,
                    timeout_secs = timeout.as_secs(),
                    "Request sent"
                );
            }
            ActionEvent::ResponseReceived {
                action,
                status,
                elapsed,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    action = %action,
                    status = status,
                    elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    "Response received"
                );
            }
            ActionEvent::OutputPublished { action, key, value } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    action = %action,
                    key = %key,
                    value = %value,
                    "Output published"
                );
            }
            ActionEvent::Succeeded { action, .. } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    action = %action,
                    "Action succeeded"
                );
            }
            ActionEvent::Failed { action, failure } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    action = %action,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Action failed"
                );
            }
        },

        AppEvent::Lane(lane_event) => match lane_event {
            LaneEvent::Started { lane, steps } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    lane = %lane,
                    steps = steps,
                    "Lane started"
                );
            }
            LaneEvent::StepStarted {
                lane,
                index,
                action,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    lane = %lane,
                    step = index,
                    action = %action,
                    "Lane step started"
                );
            }
            LaneEvent::Completed {
                lane,
                steps,
                duration,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    lane = %lane,
                    steps = steps,
                    duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                    "Lane completed"
                );
            }
            LaneEvent::Aborted {
                lane,
                index,
                action,
                error,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    lane = %lane,
                    step = index,
                    action = %action,
                    error = %error,
                    "Lane aborted"
                );
            }
        },
    }
}
