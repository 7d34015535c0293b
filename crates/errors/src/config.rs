//! Configuration error types
//!
//! Everything detected before a request is sent: the CLI configuration file,
//! action parameters, and files referenced by those parameters.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("parse error: {message}")]
    ParseError { message: String },

    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("unknown parameter: {field}")]
    UnknownParameter { field: String },

    #[error("couldn't find file for {field} at path '{path}'")]
    FileNotFound { field: String, path: String },

    #[error("unknown action: {name}")]
    UnknownAction { name: String },

    #[error("unresolved lane output reference ${{{name}}} in {field}")]
    UnresolvedReference { field: String, name: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => {
                Some("Create the configuration file or omit --config to use defaults.")
            }
            Self::MissingField { .. } => {
                Some("Pass the parameter with `-p key=value` or export its environment variable.")
            }
            Self::InvalidValue { .. } | Self::ParseError { .. } => {
                Some("Fix the value and retry the command.")
            }
            Self::UnknownParameter { .. } => {
                Some("Run `lanekit describe <action>` to list the accepted parameters.")
            }
            Self::FileNotFound { .. } => Some("Check that the build produced the artifact."),
            Self::UnknownAction { .. } => Some("Run `lanekit actions` to list available actions."),
            Self::UnresolvedReference { .. } => {
                Some("Only outputs published by an earlier step of the lane can be referenced.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::NotFound { .. } => "config.not_found",
            Self::ParseError { .. } => "config.parse_error",
            Self::MissingField { .. } => "config.missing_field",
            Self::InvalidValue { .. } => "config.invalid_value",
            Self::UnknownParameter { .. } => "config.unknown_parameter",
            Self::FileNotFound { .. } => "config.file_not_found",
            Self::UnknownAction { .. } => "config.unknown_action",
            Self::UnresolvedReference { .. } => "config.unresolved_reference",
        };
        Some(code)
    }
}
