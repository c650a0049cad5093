//! Binding strategy traits
//!
//! A strategy answers one question: can it bind a declared parameter type?
//! - `Ok(Some(binding))`: yes, and here is the binding
//! - `Ok(None)`: not applicable, ask the next strategy
//! - `Err(StrategyError)`: the type matches but the declaration is unusable;
//!   the chain stops and the error surfaces as a configuration defect

use crate::binding::{ArgumentBinding, ContainerArgumentBinding};
use crate::types::{AccessMode, ParameterType};
use std::fmt::Debug;

/// Strategy for binding a parameter to a single blob
pub trait ItemBindingStrategy: Send + Sync + Debug {
    /// Strategy name (for tracing and diagnostics)
    fn name(&self) -> &'static str;

    /// Try to produce a binding for `parameter_type` with `access`
    ///
    /// # Errors
    /// `StrategyError` when the type matches but the access mode cannot work
    fn try_create(
        &self,
        parameter_type: &ParameterType,
        access: Option<AccessMode>,
    ) -> Result<Option<Box<dyn ArgumentBinding>>, StrategyError>;
}

/// Strategy for binding a parameter to a container or listing
pub trait ContainerBindingStrategy: Send + Sync + Debug {
    /// Strategy name (for tracing and diagnostics)
    fn name(&self) -> &'static str;

    /// Try to produce a binding for `parameter_type`
    ///
    /// # Errors
    /// `StrategyError` when the type matches but cannot be bound
    fn try_create(
        &self,
        parameter_type: &ParameterType,
    ) -> Result<Option<Box<dyn ContainerArgumentBinding>>, StrategyError>;
}

/// Strategy failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyError {
    /// Type matched, access mode is not supported for it
    #[error("cannot bind blob to '{value_type}' using access {access}")]
    UnsupportedAccess {
        value_type: ParameterType,
        access: AccessMode,
    },

    /// Strategy-specific failure
    #[error("strategy '{strategy}' failed: {message}")]
    Failed {
        strategy: &'static str,
        message: String,
    },
}

impl StrategyError {
    /// Create strategy-specific failure
    #[inline]
    #[must_use]
    pub fn failed(strategy: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            strategy,
            message: message.into(),
        }
    }
}

/// Resolve the effective access mode of a matched type
///
/// `None` falls back to `default`; anything outside `allowed` is an error.
pub(crate) fn checked_access(
    value_type: &ParameterType,
    requested: Option<AccessMode>,
    default: AccessMode,
    allowed: &[AccessMode],
) -> Result<AccessMode, StrategyError> {
    match requested {
        None => Ok(default),
        Some(access) if allowed.contains(&access) => Ok(access),
        Some(access) => Err(StrategyError::UnsupportedAccess {
            value_type: value_type.clone(),
            access,
        }),
    }
}
