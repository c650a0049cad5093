//! Error types for path templates
//!
//! - [`PathError`]: malformed patterns, invalid names, missing values
//! - [`ContractMismatchError`]: placeholders the trigger cannot supply

/// Errors raised while parsing, classifying or rendering a path template
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Pattern is empty
    #[error("path pattern is empty")]
    Empty,

    /// `{` without a closing `}`
    #[error("unclosed placeholder at byte {position} in '{pattern}'")]
    UnclosedPlaceholder { pattern: String, position: usize },

    /// `}` without an opening `{`
    #[error("unmatched '}}' at byte {position} in '{pattern}'")]
    UnmatchedBrace { pattern: String, position: usize },

    /// `{}`
    #[error("empty placeholder in '{pattern}'")]
    EmptyPlaceholder { pattern: String },

    /// Placeholder name is not an identifier
    #[error("invalid placeholder name '{name}' in '{pattern}' (must be alphanumeric or underscore, not starting with a digit)")]
    InvalidPlaceholder { pattern: String, name: String },

    /// Container name breaks storage naming rules
    #[error("invalid container name '{name}': {reason}")]
    InvalidContainerName { name: String, reason: &'static str },

    /// Blob name breaks storage naming rules
    #[error("invalid blob name '{name}': {reason}")]
    InvalidBlobName { name: String, reason: &'static str },

    /// Item classification requested for a container-only path
    #[error("path '{pattern}' must contain a container name and a blob name")]
    MissingBlobName { pattern: String },

    /// No value supplied for a placeholder at bind time
    #[error("no value supplied for placeholder '{name}'")]
    MissingValue { name: String },
}

/// A path template references names the trigger contract does not provide
///
/// `missing` lists every offending name once, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no binding parameter exists for {}", .missing.iter().map(|n| format!("'{n}'")).collect::<Vec<_>>().join(", "))]
pub struct ContractMismatchError {
    /// Placeholder names absent from the contract
    pub missing: Vec<String>,
}

impl ContractMismatchError {
    /// Create mismatch error for names
    #[inline]
    #[must_use]
    pub fn new(missing: Vec<String>) -> Self {
        Self { missing }
    }
}
