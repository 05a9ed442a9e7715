//! Ordered regex substitution over an in-memory document.
//!
//! A [`Substitution`] is the compiled form of a [`RuleSet`]: every rule keeps
//! its position, so rules run in exactly the order the rule set lists them.
//! Replacement text is always literal; `$` in it is never expanded.

use crate::rules::{RuleError, RuleKind, RuleSet};
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use tracing::{debug, trace};

/// A single rule ready to run.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub id: String,
    pub kind: RuleKind,
    pub regex: Regex,
    pub replacement: String,
}

impl CompiledRule {
    /// Replace every match in `content`. Returns `None` when nothing matched.
    fn apply(&self, content: &str) -> Option<(String, usize)> {
        let count = self.regex.find_iter(content).count();
        if count == 0 {
            return None;
        }
        match self
            .regex
            .replace_all(content, NoExpand(self.replacement.as_str()))
        {
            Cow::Owned(replaced) => Some((replaced, count)),
            Cow::Borrowed(_) => None,
        }
    }
}

/// Number of matches a rule replaced during one [`Substitution::apply`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub id: String,
    pub count: usize,
}

/// Output of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Transform holds the substituted content"]
pub struct Transform {
    pub content: String,
    /// One entry per rule, in application order
    pub hits: Vec<RuleHit>,
}

impl Transform {
    /// Exact comparison against the text the pass started from.
    pub fn is_changed(&self, original: &str) -> bool {
        self.content != original
    }

    pub fn total_hits(&self) -> usize {
        self.hits.iter().map(|h| h.count).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Substitution {
    rules: Vec<CompiledRule>,
}

impl Substitution {
    pub fn compile(rule_set: &RuleSet) -> Result<Self, RuleError> {
        let rules = rule_set
            .rules()
            .map(|(group, rule)| {
                let regex = Regex::new(&rule.pattern).map_err(|source| RuleError::Pattern {
                    id: rule.id.clone(),
                    source,
                })?;
                Ok(CompiledRule {
                    id: rule.id.clone(),
                    kind: rule.kind,
                    regex,
                    replacement: group.text.clone(),
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        debug!(rules = rules.len(), "compiled substitution rules");
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Run every rule over `content` in order. Each rule sees the output of
    /// the previous one.
    pub fn apply(&self, content: &str) -> Transform {
        let mut current = content.to_string();
        let mut hits = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let count = match rule.apply(&current) {
                Some((next, count)) => {
                    current = next;
                    count
                }
                None => 0,
            };
            trace!(rule = %rule.id, kind = %rule.kind, count, "applied rule");
            hits.push(RuleHit {
                id: rule.id.clone(),
                count,
            });
        }

        Transform {
            content: current,
            hits,
        }
    }
}
