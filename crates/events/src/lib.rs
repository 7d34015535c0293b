#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for lanekit
//!
//! This is the user-facing messaging sink handed to every action. Libraries
//! never print: progress, success and failure text travel as typed events
//! and the CLI decides how to render and log them.

pub mod meta;
pub use meta::{EventLevel, EventMeta, EventSource};

pub mod events;
pub use events::{
    ActionEvent, AppEvent, EventMessage, FailureContext, LaneEvent,
};

use tokio::sync::mpsc::UnboundedSender;

/// Sending half of the event channel
pub type EventSender = UnboundedSender<EventMessage>;

/// Receiving half of the event channel
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events
///
/// Implemented for a raw `EventSender` and for anything that carries one, so
/// call sites read the same either way.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Correlation id stamped on every emitted event, if any
    fn correlation_id(&self) -> Option<&str> {
        None
    }

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            let mut message = EventMessage::from_event(event);
            if let Some(id) = self.correlation_id() {
                message.meta = message.meta.with_correlation_id(id);
            }
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(message);
        }
    }

    /// Emit an action started event
    fn emit_action_started(&self, action: impl Into<String>, message: impl Into<String>) {
        self.emit(AppEvent::Action(ActionEvent::Started {
            action: action.into(),
            message: message.into(),
        }));
    }

    /// Emit an action succeeded event
    fn emit_action_succeeded(&self, action: impl Into<String>, message: impl Into<String>) {
        self.emit(AppEvent::Action(ActionEvent::Succeeded {
            action: action.into(),
            message: message.into(),
        }));
    }

    /// Emit an action failed event
    fn emit_action_failed(&self, action: impl Into<String>, failure: FailureContext) {
        self.emit(AppEvent::Action(ActionEvent::Failed {
            action: action.into(),
            failure,
        }));
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
