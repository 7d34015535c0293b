use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Events describing a lane: an ordered run of actions sharing one output registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LaneEvent {
    Started { lane: String, steps: usize },

    StepStarted {
        lane: String,
        index: usize,
        action: String,
    },

    Completed {
        lane: String,
        steps: usize,
        duration: Duration,
    },

    /// The failing step aborts the remainder of the lane
    Aborted {
        lane: String,
        index: usize,
        action: String,
        error: String,
    },
}
