//! Configuration types for decompose-lint.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::types::Severity;

/// Top-level configuration.
///
/// ```toml
/// [ruleset]
/// active = true
///
/// [rules.SerializableDiscriminatorRule]
/// classDiscriminator = "kind"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rule set switches.
    #[serde(default)]
    pub ruleset: RuleSetConfig,

    /// Per-rule configurations, keyed by rule identifier.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Whether a rule runs: both the rule set and the rule must be active.
    #[must_use]
    pub fn is_rule_active(&self, rule_id: &str) -> bool {
        self.ruleset.active
            && self
                .rules
                .get(rule_id)
                .map_or(true, |c| c.active.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_id: &str) -> Option<Severity> {
        self.rules.get(rule_id).and_then(|c| c.severity)
    }

    /// Gets the configuration of one rule.
    #[must_use]
    pub fn rule(&self, rule_id: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_id)
    }
}

/// Rule-set-wide switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetConfig {
    /// Whether any rule of the set runs.
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Default for RuleSetConfig {
    fn default() -> Self {
        Self { active: true }
    }
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is active.
    #[serde(default)]
    pub active: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a non-empty string option, rejecting values of another type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the option is present but
    /// not a non-empty string.
    pub fn require_str(&self, rule: &str, key: &str, default: &str) -> Result<String, ConfigError> {
        let Some(value) = self.options.get(key) else {
            return Ok(default.to_owned());
        };
        match value.as_str() {
            Some(s) if !s.is_empty() => Ok(s.to_owned()),
            Some(_) => Err(ConfigError::InvalidOption {
                rule: rule.to_owned(),
                key: key.to_owned(),
                message: "must not be empty".to_owned(),
            }),
            None => Err(ConfigError::InvalidOption {
                rule: rule.to_owned(),
                key: key.to_owned(),
                message: format!("expected a string, found {}", value.type_str()),
            }),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(decompose_lint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(decompose_lint::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule option has an unusable value.
    #[error("Invalid option {rule}.{key}: {message}")]
    #[diagnostic(
        code(decompose_lint::config::invalid_option),
        help("see the rule documentation for accepted values")
    )]
    InvalidOption {
        /// Rule identifier.
        rule: String,
        /// Option key.
        key: String,
        /// What is wrong with the value.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ruleset.active);
        assert!(config.rules.is_empty());
        assert!(config.is_rule_active("SerializableDiscriminatorRule"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[rules.SerializableDiscriminatorRule]
active = true
severity = "warning"
classDiscriminator = "kind"

[rules.DecomposeComponentContextRule]
active = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert!(config.is_rule_active("SerializableDiscriminatorRule"));
        assert!(!config.is_rule_active("DecomposeComponentContextRule"));
        assert_eq!(
            config.rule_severity("SerializableDiscriminatorRule"),
            Some(Severity::Warning)
        );

        let rule = config.rule("SerializableDiscriminatorRule").unwrap();
        assert_eq!(rule.get_str("classDiscriminator", "type"), "kind");
    }

    #[test]
    fn inactive_ruleset_disables_every_rule() {
        let config = Config::parse("[ruleset]\nactive = false\n").unwrap();
        assert!(!config.is_rule_active("SerializableDiscriminatorRule"));
    }

    #[test]
    fn require_str_rejects_wrong_type() {
        let config =
            Config::parse("[rules.R]\nclassDiscriminator = 3\n").expect("Failed to parse");
        let err = config
            .rule("R")
            .unwrap()
            .require_str("R", "classDiscriminator", "type")
            .unwrap_err();
        assert!(err.to_string().contains("expected a string"));
    }

    #[test]
    fn require_str_rejects_empty_and_defaults_when_missing() {
        let config = Config::parse("[rules.R]\nclassDiscriminator = \"\"\n").unwrap();
        let rule = config.rule("R").unwrap();
        assert!(rule.require_str("R", "classDiscriminator", "type").is_err());
        assert_eq!(
            RuleConfig::default()
                .require_str("R", "classDiscriminator", "type")
                .unwrap(),
            "type"
        );
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::parse("[rules").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules.SerializableDiscriminatorRule]").unwrap();
        writeln!(file, "classDiscriminator = \"kind\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        let rule = config.rule("SerializableDiscriminatorRule").unwrap();
        assert_eq!(rule.get_str("classDiscriminator", "type"), "kind");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/decompose-lint.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
