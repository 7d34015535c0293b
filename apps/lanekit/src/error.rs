//! CLI error handling

use std::fmt;

use lanekit_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(lanekit_errors::ConfigError),
    /// Action or lane error
    Action(lanekit_errors::Error),
    /// I/O error
    Io(std::io::Error),
}

impl CliError {
    /// Structured form used in `--json` mode
    pub fn to_json(&self) -> serde_json::Value {
        let (code, message, hint) = match self {
            CliError::Config(e) => (e.user_code(), e.user_message().into_owned(), e.user_hint()),
            CliError::Action(e) => (e.user_code(), e.user_message().into_owned(), e.user_hint()),
            CliError::Io(e) => (Some("error.io"), e.to_string(), None),
        };
        serde_json::json!({
            "success": false,
            "error": {
                "code": code,
                "message": message,
                "hint": hint,
            },
        })
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => {
                write!(f, "Configuration error: {e}")?;
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Action(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Action(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<lanekit_errors::ConfigError> for CliError {
    fn from(e: lanekit_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<lanekit_errors::Error> for CliError {
    fn from(e: lanekit_errors::Error) -> Self {
        CliError::Action(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanekit_errors::{ConfigError, Error};

    #[test]
    fn test_display_includes_code_and_hint() {
        let err = CliError::from(Error::from(ConfigError::MissingField {
            field: "robot_url".to_string(),
        }));
        let rendered = err.to_string();
        assert!(rendered.contains("robot_url"));
        assert!(rendered.contains("Code: config.missing_field"));
    }

    #[test]
    fn test_json_form() {
        let err = CliError::from(ConfigError::UnknownAction {
            name: "slack".to_string(),
        });
        let value = err.to_json();
        assert_eq!(value["success"], false);
        assert!(value["error"]["message"]
            .as_str()
            .unwrap()
            .contains("slack"));
    }
}
