//! Lanes: ordered action steps sharing one output registry
//!
//! A lane file is TOML:
//!
//! ```toml
//! name = "beta"
//!
//! [[step]]
//! action = "pgyer"
//! params = { user_key = "...", api_key = "...", app_path = "build/App.ipa" }
//!
//! [[step]]
//! action = "beary_chat"
//! params = { robot_url = "...", message_title = "New build", message_text = "${PGYER_INSTALL_APP_KEY}" }
//! ```

use crate::action::ActionOutcome;
use crate::context::ActionCtx;
use crate::options::ActionConfig;
use crate::outputs::LaneOutputs;
use crate::ActionKind;
use lanekit_errors::{ConfigError, Error};
use lanekit_events::{AppEvent, EventEmitter, LaneEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Instant;

/// A parsed lane file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaneFile {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "step")]
    pub steps: Vec<LaneStep>,
}

/// One step of a lane
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaneStep {
    pub action: String,
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

/// Parameter value as written in a lane file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged, expecting = "a string, boolean or number")]
pub enum ParamValue {
    Text(String),
    Flag(bool),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Flag(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

impl LaneFile {
    /// Parse a lane from TOML
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for invalid TOML or an unexpected shape.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    /// Load a lane file; an unnamed lane takes the file stem as its name
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(&e, path))?;

        let mut lane = Self::from_toml(&contents)?;
        if lane.name.is_empty() {
            lane.name = path
                .file_stem()
                .map_or_else(|| "lane".to_string(), |stem| stem.to_string_lossy().into_owned());
        }
        Ok(lane)
    }
}

impl LaneStep {
    /// Resolve `${NAME}` references against outputs published so far
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedReference` for a name no earlier step published.
    pub fn resolve_params(&self, outputs: &LaneOutputs) -> Result<ActionConfig, ConfigError> {
        self.params
            .iter()
            .map(|(key, value)| {
                outputs
                    .substitute(key, &value.to_string())
                    .map(|resolved| (key.clone(), resolved))
            })
            .collect()
    }
}

/// Result of a lane that ran to completion
#[derive(Debug, Clone, Serialize)]
pub struct LaneReport {
    pub lane: String,
    pub outcomes: Vec<ActionOutcome>,
    pub outputs: LaneOutputs,
}

/// Run every step of a lane in order
///
/// Steps share one fresh [`LaneOutputs`]. The first failing step aborts the
/// lane and its error is returned.
///
/// # Errors
///
/// Returns the error of the failing step.
pub async fn run_lane(ctx: &ActionCtx, lane: &LaneFile) -> Result<LaneReport, Error> {
    let started = Instant::now();
    ctx.emit(AppEvent::Lane(LaneEvent::Started {
        lane: lane.name.clone(),
        steps: lane.steps.len(),
    }));

    let mut outputs = LaneOutputs::new();
    let mut outcomes = Vec::with_capacity(lane.steps.len());

    for (index, step) in lane.steps.iter().enumerate() {
        let position = index + 1;
        ctx.emit(AppEvent::Lane(LaneEvent::StepStarted {
            lane: lane.name.clone(),
            index: position,
            action: step.action.clone(),
        }));

        match run_step(ctx, step, &mut outputs).await {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                tracing::debug!(lane = %lane.name, step = position, error = %err, "lane aborted");
                ctx.emit(AppEvent::Lane(LaneEvent::Aborted {
                    lane: lane.name.clone(),
                    index: position,
                    action: step.action.clone(),
                    error: err.to_string(),
                }));
                return Err(err);
            }
        }
    }

    ctx.emit(AppEvent::Lane(LaneEvent::Completed {
        lane: lane.name.clone(),
        steps: outcomes.len(),
        duration: started.elapsed(),
    }));

    Ok(LaneReport {
        lane: lane.name.clone(),
        outcomes,
        outputs,
    })
}

async fn run_step(
    ctx: &ActionCtx,
    step: &LaneStep,
    outputs: &mut LaneOutputs,
) -> Result<ActionOutcome, Error> {
    let kind = ActionKind::from_name(&step.action)?;
    let params = step.resolve_params(outputs)?;
    kind.run(ctx, &params, outputs).await
}
