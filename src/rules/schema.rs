use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RuleSet {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

impl RuleSet {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        let mut seen_ids = HashSet::new();

        if self.replacements.is_empty() {
            issues.push(ValidationIssue::EmptyReplacementList);
        }

        for replacement in &self.replacements {
            if replacement.label.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    rule_id: None,
                    field: "label",
                });
            }
            if replacement.text.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    rule_id: None,
                    field: "text",
                });
            }
            if replacement.rules.is_empty() {
                issues.push(ValidationIssue::EmptyRuleList {
                    label: replacement.label.clone(),
                });
            }

            for rule in &replacement.rules {
                if rule.id.trim().is_empty() {
                    issues.push(ValidationIssue::MissingField {
                        rule_id: None,
                        field: "id",
                    });
                } else if !seen_ids.insert(rule.id.as_str()) {
                    issues.push(ValidationIssue::DuplicateId {
                        rule_id: rule.id.clone(),
                    });
                }

                if rule.pattern.is_empty() {
                    issues.push(ValidationIssue::MissingField {
                        rule_id: Some(rule.id.clone()),
                        field: "pattern",
                    });
                    continue;
                }

                match regex_syntax::Parser::new().parse(&rule.pattern) {
                    Ok(hir) => {
                        let unbounded = hir.properties().maximum_len().is_none();
                        if rule.kind == RuleKind::Fallback && unbounded {
                            issues.push(ValidationIssue::UnboundedFallback {
                                rule_id: rule.id.clone(),
                            });
                        }
                    }
                    Err(e) => issues.push(ValidationIssue::InvalidPattern {
                        rule_id: rule.id.clone(),
                        message: e.to_string(),
                    }),
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Iterate over every rule in application order.
    pub fn rules(&self) -> impl Iterator<Item = (&Replacement, &RuleDefinition)> {
        self.replacements
            .iter()
            .flat_map(|group| group.rules.iter().map(move |rule| (group, rule)))
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One logical replacement: every rule in the group rewrites its matches to `text`.
#[derive(Debug, Deserialize, Clone)]
pub struct Replacement {
    /// Banner text this group targets, shown in the success summary
    pub label: String,
    /// Literal replacement text
    pub text: String,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RuleDefinition {
    pub id: String,
    #[serde(default)]
    pub kind: RuleKind,
    pub pattern: String,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// Exact banner shape, whitespace-flexible
    #[default]
    Primary,
    /// Broader net for banner variations; must be bounded
    Fallback,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Primary => write!(f, "primary"),
            RuleKind::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyReplacementList,
    EmptyRuleList {
        label: String,
    },
    MissingField {
        rule_id: Option<String>,
        field: &'static str,
    },
    DuplicateId {
        rule_id: String,
    },
    InvalidPattern {
        rule_id: String,
        message: String,
    },
    UnboundedFallback {
        rule_id: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyReplacementList => {
                write!(f, "rule set contains no replacements")
            }
            ValidationIssue::EmptyRuleList { label } => {
                write!(f, "replacement '{label}' has no rules")
            }
            ValidationIssue::MissingField { rule_id, field } => match rule_id {
                Some(id) => write!(f, "rule '{id}' missing required field '{field}'"),
                None => write!(f, "missing required field '{field}'"),
            },
            ValidationIssue::DuplicateId { rule_id } => {
                write!(f, "rule id '{rule_id}' is used more than once")
            }
            ValidationIssue::InvalidPattern { rule_id, message } => {
                write!(f, "rule '{rule_id}' has an invalid pattern: {message}")
            }
            ValidationIssue::UnboundedFallback { rule_id } => write!(
                f,
                "fallback rule '{rule_id}' has no maximum match length; bound its repetitions"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, kind: RuleKind, pattern: &str) -> RuleDefinition {
        RuleDefinition {
            id: id.to_string(),
            kind,
            pattern: pattern.to_string(),
        }
    }

    fn single_group(rules: Vec<RuleDefinition>) -> RuleSet {
        RuleSet {
            meta: Metadata::default(),
            replacements: vec![Replacement {
                label: "OLD".to_string(),
                text: "NEW".to_string(),
                rules,
            }],
        }
    }

    #[test]
    fn test_empty_rule_set_rejected() {
        let err = RuleSet::default().validate().unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::EmptyReplacementList]);
    }

    #[test]
    fn test_unbounded_fallback_rejected() {
        let set = single_group(vec![rule("wide", RuleKind::Fallback, "OLD.*THING")]);
        let err = set.validate().unwrap_err();
        assert!(matches!(
            err.issues.as_slice(),
            [ValidationIssue::UnboundedFallback { rule_id }] if rule_id == "wide"
        ));
    }

    #[test]
    fn test_unbounded_primary_allowed() {
        let set = single_group(vec![rule("ws", RuleKind::Primary, r"OLD\s+THING")]);
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_bounded_fallback_allowed() {
        let set = single_group(vec![rule("near", RuleKind::Fallback, "OLD.{0,8}?THING")]);
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_collects_every_issue() {
        let set = single_group(vec![
            rule("dup", RuleKind::Primary, "OLD"),
            rule("dup", RuleKind::Primary, "OLD("),
            rule("", RuleKind::Primary, ""),
        ]);
        let err = set.validate().unwrap_err();
        assert!(err
            .issues
            .contains(&ValidationIssue::DuplicateId { rule_id: "dup".to_string() }));
        assert!(err
            .issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::InvalidPattern { .. })));
        assert!(err
            .issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::MissingField { field: "id", .. })));
        assert!(err.to_string().contains("rule id 'dup' is used more than once"));
    }

    #[test]
    fn test_rules_iterate_in_order() {
        let mut set = single_group(vec![
            rule("a", RuleKind::Primary, "A"),
            rule("b", RuleKind::Fallback, "B"),
        ]);
        set.replacements.push(Replacement {
            label: "C".to_string(),
            text: "c".to_string(),
            rules: vec![rule("c", RuleKind::Primary, "C")],
        });
        let ids: Vec<_> = set.rules().map(|(_, r)| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
