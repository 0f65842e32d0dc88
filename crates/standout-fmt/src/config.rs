//! Rendering configuration.
//!
//! [`FmtConfig`] holds the placeholder character and the diagnostic tokens
//! the engine emits. Every field has a default, so a config file only needs
//! to list what it changes:
//!
//! ```rust
//! use standout_fmt::FmtConfig;
//!
//! let config = FmtConfig::from_yaml_str("placeholder: '$'\nmax_output: 64\n").unwrap();
//! assert_eq!(config.placeholder, '$');
//! assert_eq!(config.missing, "%!MISSING");
//! assert_eq!(config.max_output, Some(64));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default placeholder character.
pub const PLACEHOLDER: char = '%';
/// Written in place of a placeholder that has no argument left.
pub const MISSING: &str = "%!MISSING";
/// Opens the block listing surplus arguments.
pub const EXTRA_OPEN: &str = "%!(EXTRA ";
/// Closes the block listing surplus arguments.
pub const EXTRA_CLOSE: &str = ")";
/// Separates a surplus argument's label from its text.
pub const LABEL_SEPARATOR: &str = "=";
/// Separates surplus arguments from each other.
pub const EXTRA_JOINER: &str = ", ";

/// Placeholder and diagnostic settings for a rendering session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FmtConfig {
    /// The single character that marks a substitution point.
    pub placeholder: char,
    /// Token for a placeholder with no argument left.
    pub missing: String,
    /// Opening token of the surplus-argument block.
    pub extra_open: String,
    /// Closing token of the surplus-argument block.
    pub extra_close: String,
    /// Between a surplus argument's label and text.
    pub label_separator: String,
    /// Between surplus arguments.
    pub extra_joiner: String,
    /// Upper bound on bytes written to a stream; `None` is unbounded.
    ///
    /// Bounded buffers are limited by their capacity and ignore this.
    pub max_output: Option<usize>,
}

impl Default for FmtConfig {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER,
            missing: MISSING.to_string(),
            extra_open: EXTRA_OPEN.to_string(),
            extra_close: EXTRA_CLOSE.to_string(),
            label_separator: LABEL_SEPARATOR.to_string(),
            extra_joiner: EXTRA_JOINER.to_string(),
            max_output: None,
        }
    }
}

impl FmtConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the placeholder is usable and that the diagnostics which
    /// signal a count mismatch are visible.
    pub fn validate(&self) -> Result<()> {
        if self.placeholder == '\0' || self.placeholder.is_control() {
            return Err(ConfigError::InvalidPlaceholder(self.placeholder));
        }
        if self.missing.is_empty() {
            return Err(ConfigError::EmptyMarker("missing"));
        }
        if self.extra_open.is_empty() {
            return Err(ConfigError::EmptyMarker("extra_open"));
        }
        Ok(())
    }

    /// Sets the placeholder character.
    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Sets the missing-argument token.
    pub fn with_missing(mut self, missing: impl Into<String>) -> Self {
        self.missing = missing.into();
        self
    }

    /// Sets the tokens around the surplus-argument block.
    pub fn with_extra_block(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.extra_open = open.into();
        self.extra_close = close.into();
        self
    }

    /// Caps the bytes written to stream sinks.
    pub fn with_max_output(mut self, limit: usize) -> Self {
        self.max_output = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FmtConfig::default();
        assert_eq!(config.placeholder, '%');
        assert_eq!(config.missing, "%!MISSING");
        assert_eq!(config.extra_open, "%!(EXTRA ");
        assert_eq!(config.extra_close, ")");
        assert_eq!(config.max_output, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_override() {
        let config = FmtConfig::from_yaml_str("missing: '<?>'\n").unwrap();
        assert_eq!(config.missing, "<?>");
        assert_eq!(config.placeholder, PLACEHOLDER);
    }

    #[test]
    fn test_json_config() {
        let config =
            FmtConfig::from_json_str(r#"{"placeholder": "$", "extra_joiner": "; "}"#).unwrap();
        assert_eq!(config.placeholder, '$');
        assert_eq!(config.extra_joiner, "; ");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = FmtConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, FmtConfig::default());
    }

    #[test]
    fn test_rejects_nul_placeholder() {
        let config = FmtConfig::new().with_placeholder('\0');
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPlaceholder('\0'))
        ));
    }

    #[test]
    fn test_rejects_empty_missing_marker() {
        let err = FmtConfig::from_json_str(r#"{"missing": ""}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyMarker("missing")));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = FmtConfig::from_yaml_str("placeholder: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_builder() {
        let config = FmtConfig::new()
            .with_placeholder('@')
            .with_missing("??")
            .with_extra_block("[+", "]")
            .with_max_output(10);
        assert_eq!(config.placeholder, '@');
        assert_eq!(config.missing, "??");
        assert_eq!(config.extra_open, "[+");
        assert_eq!(config.extra_close, "]");
        assert_eq!(config.max_output, Some(10));
    }
}
