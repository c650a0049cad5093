//! Error types for binding resolution
//!
//! Provides error handling for:
//! - Missing strategies for a declared type
//! - Placeholder contract mismatches
//! - Structurally invalid container bindings
//! - Storage account acquisition and cancellation
//! - `%setting%` name resolution
//! - Per-invocation materialization

use blob_path::{ContractMismatchError, PathError};
use blob_strategy::{AccessMode, BindError, ParameterType, StrategyError};

/// Main resolution error type
///
/// Every variant names the parameter it was raised for.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Neither registry can bind the declared type
    #[error("can't bind blob to type '{parameter_type}'{} for parameter '{parameter}'", access_suffix(.access))]
    NoBindingStrategy {
        parameter: String,
        parameter_type: ParameterType,
        access: Option<AccessMode>,
    },

    /// Explicit container annotation on a type no container strategy accepts
    #[error("parameter '{parameter}' is declared as a container binding but no container strategy accepts type '{parameter_type}'")]
    NoContainerStrategy {
        parameter: String,
        parameter_type: ParameterType,
    },

    /// Path placeholders the trigger cannot supply
    #[error("parameter '{parameter}': {source}")]
    ContractMismatch {
        parameter: String,
        source: ContractMismatchError,
    },

    /// Type/access combination not valid for a container
    #[error("invalid container binding for parameter '{parameter}' of type '{parameter_type}': {reason}")]
    InvalidContainerBinding {
        parameter: String,
        parameter_type: ParameterType,
        reason: String,
    },

    /// Malformed path pattern
    #[error("invalid blob path for parameter '{parameter}': {source}")]
    InvalidPath { parameter: String, source: PathError },

    /// A strategy rejected the parameter
    #[error("parameter '{parameter}': {source}")]
    Strategy {
        parameter: String,
        source: StrategyError,
    },

    /// Storage account lookup failed
    #[error("storage account unavailable for parameter '{parameter}': {source}")]
    Account {
        parameter: String,
        source: AccountError,
    },

    /// Caller cancelled during account acquisition
    #[error("resolution of parameter '{parameter}' was cancelled")]
    Cancelled { parameter: String },

    /// `%setting%` lookup failed
    #[error("parameter '{parameter}': {source}")]
    NameResolution {
        parameter: String,
        source: NameResolutionError,
    },
}

impl ResolveError {
    /// Parameter the error was raised for
    #[must_use]
    pub fn parameter(&self) -> &str {
        match self {
            Self::NoBindingStrategy { parameter, .. }
            | Self::NoContainerStrategy { parameter, .. }
            | Self::ContractMismatch { parameter, .. }
            | Self::InvalidContainerBinding { parameter, .. }
            | Self::InvalidPath { parameter, .. }
            | Self::Strategy { parameter, .. }
            | Self::Account { parameter, .. }
            | Self::Cancelled { parameter }
            | Self::NameResolution { parameter, .. } => parameter,
        }
    }

    /// Check if error is a defect in the function's declaration
    ///
    /// Configuration errors fail function registration; account failures and
    /// cancellation come from the environment.
    #[inline]
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::Account { .. } | Self::Cancelled { .. })
    }

    /// Check if error is a cancellation
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

fn access_suffix(access: &Option<AccessMode>) -> String {
    access.map(|a| format!(" with {a} access")).unwrap_or_default()
}

/// Errors while materializing a resolved binding for one invocation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterializeError {
    /// Substitution failed or produced an invalid name
    #[error("parameter '{parameter}': {source}")]
    Path { parameter: String, source: PathError },

    /// Strategy rejected the concrete path
    #[error("parameter '{parameter}': {source}")]
    Bind { parameter: String, source: BindError },
}

/// Storage account acquisition errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// No account configured for the parameter
    #[error("no storage account configured for parameter '{0}'")]
    NotConfigured(String),

    /// Account exists but could not be reached
    #[error("storage account '{account}' unavailable: {message}")]
    Unavailable { account: String, message: String },
}

/// `%setting%` resolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameResolutionError {
    /// Setting name not present
    #[error("unknown setting '%{name}%' in '{pattern}'")]
    UnknownSetting { name: String, pattern: String },

    /// Opening `%` without a closing one
    #[error("unterminated '%' in '{0}'")]
    Unterminated(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_strategy_message_names_type_and_access() {
        let err = ResolveError::NoBindingStrategy {
            parameter: "input".into(),
            parameter_type: ParameterType::named("Widget"),
            access: Some(AccessMode::Write),
        };
        assert_eq!(
            err.to_string(),
            "can't bind blob to type 'Widget' with Write access for parameter 'input'"
        );
        assert_eq!(err.parameter(), "input");
    }

    #[test]
    fn contract_mismatch_keeps_names() {
        let err = ResolveError::ContractMismatch {
            parameter: "output".into(),
            source: ContractMismatchError::new(vec!["missing".into()]),
        };
        assert_eq!(
            err.to_string(),
            "parameter 'output': no binding parameter exists for 'missing'"
        );
    }

    #[test]
    fn environment_errors_are_not_configuration_errors() {
        let cancelled = ResolveError::Cancelled {
            parameter: "p".into(),
        };
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_configuration_error());

        let account = ResolveError::Account {
            parameter: "p".into(),
            source: AccountError::NotConfigured("p".into()),
        };
        assert!(!account.is_configuration_error());

        let invalid = ResolveError::InvalidContainerBinding {
            parameter: "p".into(),
            parameter_type: ParameterType::Container,
            reason: "write access".into(),
        };
        assert!(invalid.is_configuration_error());
    }
}
