//! Declarative option schemas and parameter validation
//!
//! Every action publishes a static table of [`OptionSpec`] descriptors.
//! [`validate`] resolves each option from the caller's parameters, the
//! environment and the declared default, then runs the option's validators.
//! All of this happens before a request is built, so a configuration error
//! never costs a network call.

use crate::context::EnvSource;
use lanekit_errors::ConfigError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Pure check over a raw option value; `key` is only used for the error
pub type Validator = fn(key: &str, value: &str) -> Result<(), ConfigError>;

/// What kind of value an option holds; drives display and typed access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Text,
    Url,
    FilePath,
    Choice(&'static [&'static str]),
}

impl OptionKind {
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Text => "text".to_string(),
            Self::Url => "url".to_string(),
            Self::FilePath => "file".to_string(),
            Self::Choice(choices) => choices.join("|"),
        }
    }
}

/// One entry of an action's option schema
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub key: &'static str,
    pub env_name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub optional: bool,
    pub default_value: Option<&'static str>,
    pub validators: &'static [Validator],
}

impl OptionSpec {
    /// A required option with the given validators
    #[must_use]
    pub const fn required(
        key: &'static str,
        env_name: &'static str,
        description: &'static str,
        kind: OptionKind,
        validators: &'static [Validator],
    ) -> Self {
        Self {
            key,
            env_name,
            description,
            kind,
            optional: false,
            default_value: None,
            validators,
        }
    }

    /// An optional option with no validation
    #[must_use]
    pub const fn optional(
        key: &'static str,
        env_name: &'static str,
        description: &'static str,
        kind: OptionKind,
    ) -> Self {
        Self {
            key,
            env_name,
            description,
            kind,
            optional: true,
            default_value: None,
            validators: &[],
        }
    }

    #[must_use]
    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Raw parameters for one action run, as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionConfig {
    values: BTreeMap<String, String>,
}

impl ActionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` pairs; the value may itself contain `=`
    ///
    /// # Errors
    ///
    /// Returns an error for a pair without `=` or with an empty key.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            match pair.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    config.set(key.trim(), value);
                }
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "parameter".to_string(),
                        value: pair.to_string(),
                    })
                }
            }
        }
        Ok(config)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for ActionConfig {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parameters that passed validation, keyed by option
///
/// Entries keep schema order, so request builders iterate deterministically.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOptions {
    values: Vec<(&'static str, String)>,
}

impl ResolvedOptions {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of an option the schema declares as required
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if the option was not resolved.
    pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingField {
            field: key.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `MissingField` if the option was not resolved.
    pub fn path(&self, key: &str) -> Result<PathBuf, ConfigError> {
        self.require(key).map(PathBuf::from)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validate caller parameters against a schema
///
/// Resolution order per option: explicit parameter, then the option's
/// environment variable, then its default. Parameters not named by the
/// schema are rejected.
///
/// # Errors
///
/// Returns the first `ConfigError` encountered, in schema order.
pub fn validate(
    schema: &[OptionSpec],
    config: &ActionConfig,
    env: &EnvSource,
) -> Result<ResolvedOptions, ConfigError> {
    if let Some((unknown, _)) = config
        .iter()
        .find(|(key, _)| !schema.iter().any(|spec| spec.key == *key))
    {
        return Err(ConfigError::UnknownParameter {
            field: unknown.to_string(),
        });
    }

    let mut resolved = ResolvedOptions::default();
    for spec in schema {
        let value = config
            .get(spec.key)
            .map(ToString::to_string)
            .or_else(|| env.get(spec.env_name))
            .or_else(|| spec.default_value.map(ToString::to_string));

        match value {
            Some(value) => {
                for validator in spec.validators {
                    validator(spec.key, &value)?;
                }
                resolved.values.push((spec.key, value));
            }
            None if spec.optional => {}
            None => {
                return Err(ConfigError::MissingField {
                    field: spec.key.to_string(),
                })
            }
        }
    }

    Ok(resolved)
}

// Validators

/// Value must not be empty
///
/// # Errors
///
/// Returns `MissingField` for an empty value.
pub fn non_empty(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        Err(ConfigError::MissingField {
            field: key.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Value must name an existing file
///
/// # Errors
///
/// Returns `FileNotFound` carrying the path.
pub fn existing_file(key: &str, value: &str) -> Result<(), ConfigError> {
    if Path::new(value).is_file() {
        Ok(())
    } else {
        Err(ConfigError::FileNotFound {
            field: key.to_string(),
            path: value.to_string(),
        })
    }
}

/// Value must be an absolute http or https URL
///
/// # Errors
///
/// Returns `InvalidValue` for anything else.
pub fn http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Value must be `android` or `ios`
///
/// # Errors
///
/// Returns `InvalidValue` for any other platform.
pub fn platform_choice(key: &str, value: &str) -> Result<(), ConfigError> {
    value
        .parse::<lanekit_types::Platform>()
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
        })
}
