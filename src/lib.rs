//! Banner Patcher: one-shot, idempotent banner substitution
//!
//! Rewrites the startup banner strings of an installed CLI script in place.
//!
//! # Architecture
//!
//! The pipeline is linear: read the document, run the ordered substitution
//! rules over it, compare with the original, write back only if it changed.
//!
//! - [`rules`]: the rule set as data (embedded TOML), validated on load
//! - [`substitute`]: compiled rules applied in order over a string
//! - [`patcher`]: the read → substitute → compare → write pipeline
//! - [`report`]: status messages and exit codes
//!
//! # Guarantees
//!
//! - Running twice is a no-op the second time
//! - The file is never written when no rule matched
//! - Fallback rules have a bounded match length
//! - Replacement text is literal
//!
//! # Example
//!
//! ```no_run
//! use banner_patcher::{PatchOutcome, Patcher};
//!
//! let patcher = Patcher::new("/tmp/cli.js")?;
//! match patcher.patch()? {
//!     PatchOutcome::Patched { replaced, .. } => println!("{replaced} replacements"),
//!     PatchOutcome::Unchanged { .. } => println!("nothing to do"),
//! }
//! # Ok::<(), banner_patcher::PatchError>(())
//! ```

pub mod patcher;
pub mod report;
pub mod rules;
pub mod substitute;

// Re-exports
pub use patcher::{PatchError, PatchOutcome, Patcher, ReplacementSummary, DEFAULT_TARGET};
pub use rules::{load_from_str, RuleError, RuleKind, RuleSet, ValidationError};
pub use substitute::{RuleHit, Substitution, Transform};
