//! Output registry shared by the steps of one lane run

use lanekit_errors::ConfigError;
use serde::Serialize;
use std::collections::BTreeMap;

/// QR code URL of the build most recently uploaded to Pgyer
pub const PGYER_INSTALL_QRCODE_URL: &str = "PGYER_INSTALL_QRCODE_URL";
/// App key of the build most recently uploaded to Pgyer
pub const PGYER_INSTALL_APP_KEY: &str = "PGYER_INSTALL_APP_KEY";

/// Values published by actions for later steps of the same lane
///
/// Owned by the lane run and passed by reference into each action. Writes
/// overwrite; nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LaneOutputs {
    values: BTreeMap<String, String>,
}

impl LaneOutputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Replace every `${NAME}` in `value` with the published output `NAME`
    ///
    /// `$$` escapes a literal dollar sign. Text that does not form a complete
    /// reference is kept as is.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedReference` if `NAME` has not been published.
    pub fn substitute(&self, field: &str, value: &str) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos + 1..];

            if let Some(after) = tail.strip_prefix('$') {
                out.push('$');
                rest = after;
            } else if let Some((name, after)) = tail
                .strip_prefix('{')
                .and_then(|inner| inner.split_once('}'))
            {
                let resolved =
                    self.get(name)
                        .ok_or_else(|| ConfigError::UnresolvedReference {
                            field: field.to_string(),
                            name: name.to_string(),
                        })?;
                out.push_str(resolved);
                rest = after;
            } else {
                out.push('$');
                rest = tail;
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn published() -> LaneOutputs {
        let mut outputs = LaneOutputs::new();
        outputs.set(PGYER_INSTALL_QRCODE_URL, "https://qr/1");
        outputs.set(PGYER_INSTALL_APP_KEY, "k1");
        outputs
    }

    #[test]
    fn test_overwrite() {
        let mut outputs = published();
        outputs.set(PGYER_INSTALL_APP_KEY, "k2");
        assert_eq!(outputs.get(PGYER_INSTALL_APP_KEY), Some("k2"));
        assert_eq!(outputs.len(), 2);
    }

    #[test]
    fn test_substitute() {
        let outputs = published();
        assert_eq!(
            outputs
                .substitute("message_image", "${PGYER_INSTALL_QRCODE_URL}")
                .unwrap(),
            "https://qr/1"
        );
        assert_eq!(
            outputs
                .substitute("message_text", "key ${PGYER_INSTALL_APP_KEY}, cost $$5, $ left")
                .unwrap(),
            "key k1, cost $5, $ left"
        );
        assert_eq!(outputs.substitute("x", "${unterminated").unwrap(), "${unterminated");
    }

    #[test]
    fn test_substitute_unknown_reference() {
        let err = LaneOutputs::new()
            .substitute("message_image", "${PGYER_INSTALL_QRCODE_URL}")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnresolvedReference { ref name, .. } if name == "PGYER_INSTALL_QRCODE_URL"
        ));
    }
}
