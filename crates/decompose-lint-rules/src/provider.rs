//! Rule set provider for the Decompose rules.

use decompose_lint_core::{Config, ConfigError, RuleBox, RuleSet, RuleSetProvider};
use tracing::debug;

use crate::{DecomposeComponentContextRule, SerializableDiscriminatorRule};

/// Identifier of the rule set.
pub const RULE_SET_ID: &str = "DecomposeRuleSet";

/// Provides [`RULE_SET_ID`] with every rule of this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecomposeRuleSetProvider;

impl DecomposeRuleSetProvider {
    /// Creates the provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Returns all rules configured from `config`, active or not.
///
/// # Errors
///
/// Returns an error if a rule option is invalid.
pub fn all_rules(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    Ok(vec![
        Box::new(DecomposeComponentContextRule::new()),
        Box::new(SerializableDiscriminatorRule::from_config(config)?),
    ])
}

impl RuleSetProvider for DecomposeRuleSetProvider {
    fn rule_set_id(&self) -> &'static str {
        RULE_SET_ID
    }

    fn instance(&self, config: &Config) -> Result<RuleSet, ConfigError> {
        let set = RuleSet::from_config(RULE_SET_ID, config, all_rules(config)?);
        debug!("{} active rules: {:?}", RULE_SET_ID, set.rule_ids());
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provides_both_rules() {
        let provider = DecomposeRuleSetProvider::new();
        assert_eq!(provider.rule_set_id(), "DecomposeRuleSet");

        let set = provider.instance(&Config::default()).unwrap();
        assert_eq!(set.id(), RULE_SET_ID);
        assert_eq!(
            set.rule_ids(),
            vec!["DecomposeComponentContextRule", "SerializableDiscriminatorRule"]
        );
    }

    #[test]
    fn test_inactive_rule_is_dropped() {
        let config =
            Config::parse("[rules.DecomposeComponentContextRule]\nactive = false\n").unwrap();
        let set = DecomposeRuleSetProvider::new().instance(&config).unwrap();
        assert_eq!(set.rule_ids(), vec!["SerializableDiscriminatorRule"]);
    }

    #[test]
    fn test_inactive_ruleset_is_empty() {
        let config = Config::parse("[ruleset]\nactive = false\n").unwrap();
        let set = DecomposeRuleSetProvider::new().instance(&config).unwrap();
        assert!(set.rules().is_empty());
    }

    #[test]
    fn test_invalid_option_fails() {
        let config = Config::parse(
            "[rules.SerializableDiscriminatorRule]\nclassDiscriminator = \"\"\n",
        )
        .unwrap();
        assert!(DecomposeRuleSetProvider::new().instance(&config).is_err());
    }
}
