use crate::rules::schema::{RuleSet, ValidationError};
use std::fmt;

/// Rule set compiled into the binary.
pub const BUILTIN_RULES: &str = include_str!("../../rules/banner.toml");

#[derive(Debug)]
pub enum RuleError {
    Toml {
        source: toml_edit::de::Error,
    },
    Validation {
        source: ValidationError,
    },
    Pattern {
        id: String,
        source: regex::Error,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::Toml { source } => write!(f, "failed to parse rule set TOML: {}", source),
            RuleError::Validation { source } => write!(f, "invalid rule set: {}", source),
            RuleError::Pattern { id, source } => {
                write!(f, "failed to compile pattern for rule '{}': {}", id, source)
            }
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuleError::Toml { source } => Some(source),
            RuleError::Validation { source } => Some(source),
            RuleError::Pattern { source, .. } => Some(source),
        }
    }
}

pub fn load_from_str(input: &str) -> Result<RuleSet, RuleError> {
    let rules: RuleSet =
        toml_edit::de::from_str(input).map_err(|source| RuleError::Toml { source })?;
    rules
        .validate()
        .map_err(|source| RuleError::Validation { source })?;
    Ok(rules)
}

/// Load the built-in banner rules.
pub fn builtin() -> Result<RuleSet, RuleError> {
    load_from_str(BUILTIN_RULES)
}
