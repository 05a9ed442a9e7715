pub mod loader;
pub mod schema;

pub use loader::{builtin, load_from_str, RuleError, BUILTIN_RULES};
pub use schema::{
    Metadata, Replacement, RuleDefinition, RuleKind, RuleSet, ValidationError, ValidationIssue,
};
