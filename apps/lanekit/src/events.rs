//! Event handling and user feedback

use crate::logging::log_event_with_tracing;
use console::{Style, Term};
use lanekit_events::{ActionEvent, AppEvent, EventMessage, LaneEvent};

/// Renders action and lane events for humans and mirrors them into tracing
pub struct EventHandler {
    term: Term,
    colors_enabled: bool,
    debug_enabled: bool,
    /// Structured output owns stdout; human messages are suppressed
    quiet: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            colors_enabled,
            debug_enabled,
            quiet,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);

        if self.quiet {
            return;
        }

        if let Some(line) = self.format_event(&message.event) {
            let _ = self.term.write_line(&line);
        }
    }

    /// Human-readable line for an event, if it should be shown
    fn format_event(&self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::Action(action_event) => self.format_action_event(action_event),
            AppEvent::Lane(lane_event) => self.format_lane_event(lane_event),
        }
    }

    fn format_action_event(&self, event: &ActionEvent) -> Option<String> {
        match event {
            ActionEvent::Started { message, .. } => Some(self.status(message)),
            ActionEvent::Succeeded { message, .. } => Some(self.success(message)),
            ActionEvent::Failed { failure, .. } => {
                let mut line = self.error(&failure.message);
                if let Some(hint) = &failure.hint {
                    line.push_str(&format!("\n  Hint: {hint}"));
                }
                Some(line)
            }
            ActionEvent::OutputPublished { key, value, .. } => {
                Some(self.status(&format!("{key} = {value}")))
            }
            ActionEvent::Validated { action, parameters } if self.debug_enabled => {
                Some(self.dim(&format!("{action}: {parameters} parameters validated")))
            }
            ActionEvent::RequestSent {
                action,
                url,
                timeout,
            } if self.debug_enabled => Some(self.dim(&format!(
                "{action}: POST {url} (timeout {}s)",
                timeout.as_secs()
            ))),
            ActionEvent::ResponseReceived {
                action,
                status,
                elapsed,
            } if self.debug_enabled => Some(self.dim(&format!(
                "{action}: HTTP {status} in {}ms",
                elapsed.as_millis()
            ))),
            _ => None,
        }
    }

    fn format_lane_event(&self, event: &LaneEvent) -> Option<String> {
        match event {
            LaneEvent::Started { lane, steps } => {
                Some(self.heading(&format!("Lane {lane}: {steps} steps")))
            }
            LaneEvent::StepStarted {
                index, action, ..
            } => Some(self.heading(&format!("[{index}] {action}"))),
            LaneEvent::Completed {
                lane,
                steps,
                duration,
            } => Some(self.success(&format!(
                "Lane {lane} finished {steps} steps in {:.1}s",
                duration.as_secs_f64()
            ))),
            LaneEvent::Aborted {
                lane,
                index,
                action,
                ..
            } => Some(self.error(&format!(
                "Lane {lane} aborted at step {index} ({action})"
            ))),
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint(&Style::new().bold(), text)
    }

    fn status(&self, text: &str) -> String {
        self.paint(&Style::new().cyan(), text)
    }

    fn success(&self, text: &str) -> String {
        self.paint(&Style::new().green(), text)
    }

    fn error(&self, text: &str) -> String {
        self.paint(&Style::new().red(), text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(&Style::new().dim(), text)
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.colors_enabled {
            style.apply_to(text).force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }
}
