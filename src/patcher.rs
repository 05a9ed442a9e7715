//! Read, substitute, compare, write.
//!
//! The pipeline has two terminal outcomes ([`PatchOutcome::Patched`] and
//! [`PatchOutcome::Unchanged`]) and one failure path ([`PatchError`]).
//! The target is overwritten in place: no temp file, no rename, no backup.

use crate::rules::{self, RuleError, RuleSet};
use crate::substitute::{Substitution, Transform};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Entry script of the globally installed CLI whose banner gets patched.
pub const DEFAULT_TARGET: &str = "/usr/local/lib/node_modules/@anthropic-ai/claude-code/cli.js";

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Rules(#[from] RuleError),
}

impl PatchError {
    /// Kind of the underlying I/O failure, if there is one.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            PatchError::Read { source, .. } | PatchError::Write { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}

/// One summary line of a successful patch: `label → text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementSummary {
    pub label: String,
    pub text: String,
}

impl fmt::Display for ReplacementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.label, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "PatchOutcome should be reported"]
pub enum PatchOutcome {
    /// The file differed after substitution and was rewritten
    Patched {
        file: PathBuf,
        summary: Vec<ReplacementSummary>,
        replaced: usize,
    },
    /// No rule changed the document; the file was not touched
    Unchanged { file: PathBuf },
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOutcome::Patched { file, replaced, .. } => {
                write!(f, "Patched {} ({} replacements)", file.display(), replaced)
            }
            PatchOutcome::Unchanged { file } => {
                write!(f, "No banner patterns in {}", file.display())
            }
        }
    }
}

/// Applies a compiled rule set to one file.
#[derive(Debug, Clone)]
pub struct Patcher {
    target: PathBuf,
    substitution: Substitution,
    summary: Vec<ReplacementSummary>,
}

impl Patcher {
    /// Patcher for `target` using the built-in banner rules.
    pub fn new(target: impl Into<PathBuf>) -> Result<Self, PatchError> {
        Self::with_rules(target, &rules::builtin()?)
    }

    pub fn with_rules(target: impl Into<PathBuf>, rule_set: &RuleSet) -> Result<Self, PatchError> {
        let substitution = Substitution::compile(rule_set)?;
        let summary = rule_set
            .replacements
            .iter()
            .map(|group| ReplacementSummary {
                label: group.label.clone(),
                text: group.text.clone(),
            })
            .collect();

        Ok(Self {
            target: target.into(),
            substitution,
            summary,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Substitute over an in-memory document without touching the filesystem.
    pub fn transform(&self, content: &str) -> Transform {
        self.substitution.apply(content)
    }

    /// Run the full pipeline against the target file.
    pub fn patch(&self) -> Result<PatchOutcome, PatchError> {
        let original = read_document(&self.target)?;
        debug!(file = %self.target.display(), bytes = original.len(), "read target");

        let transform = self.transform(&original);
        for hit in transform.hits.iter().filter(|h| h.count > 0) {
            debug!(rule = %hit.id, count = hit.count, "rule matched");
        }

        if !transform.is_changed(&original) {
            info!(file = %self.target.display(), "no banner patterns found");
            return Ok(PatchOutcome::Unchanged {
                file: self.target.clone(),
            });
        }

        fs::write(&self.target, transform.content.as_bytes()).map_err(|source| {
            PatchError::Write {
                path: self.target.clone(),
                source,
            }
        })?;
        info!(
            file = %self.target.display(),
            bytes = transform.content.len(),
            replacements = transform.total_hits(),
            "wrote patched target"
        );

        Ok(PatchOutcome::Patched {
            file: self.target.clone(),
            summary: self.summary.clone(),
            replaced: transform.total_hits(),
        })
    }
}

fn read_document(path: &Path) -> Result<String, PatchError> {
    let bytes = fs::read(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| PatchError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
