//! Argument bindings produced by strategies
//!
//! An [`ArgumentBinding`] (single blob) or [`ContainerArgumentBinding`]
//! (container, directory, listing) knows how to materialize a parameter value
//! from a client handle and a concrete path. Materialization only builds
//! references; no storage I/O happens here.

use crate::client::{BlobClient, BlobReference, ContainerReference};
use crate::converter::BlobConverter;
use crate::types::{AccessMode, BlobKind, ParameterType};
use blob_path::BlobPath;
use std::fmt::Debug;
use std::sync::Arc;

/// Binding of a parameter to a single blob
pub trait ArgumentBinding: Send + Sync + Debug {
    /// Type of the value handed to the function
    fn value_type(&self) -> &ParameterType;

    /// Effective access mode
    fn access(&self) -> AccessMode;

    /// Name of the strategy that produced this binding
    fn strategy(&self) -> &'static str;

    /// Materialize the value for a concrete path
    ///
    /// # Errors
    /// `BindError::ExpectedBlob` if `path` names a container
    fn bind(&self, client: &dyn BlobClient, path: &BlobPath) -> Result<BoundValue, BindError>;
}

/// Binding of a parameter to a container, directory or listing
pub trait ContainerArgumentBinding: Send + Sync + Debug {
    /// Type of the value handed to the function
    fn value_type(&self) -> &ParameterType;

    /// Name of the strategy that produced this binding
    fn strategy(&self) -> &'static str;

    /// Materialize the value for a concrete path
    ///
    /// # Errors
    /// `BindError::ExpectedContainer` if `path` names a blob
    fn bind(&self, client: &dyn BlobClient, path: &BlobPath) -> Result<BoundValue, BindError>;
}

/// What a bound value points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget {
    /// A single blob
    Blob(BlobReference),
    /// A container, optionally narrowed to a prefix
    Container {
        /// Container reference
        container: ContainerReference,
        /// Blob name prefix
        prefix: Option<String>,
    },
}

/// Materialized parameter value, ready for the invocation machinery
#[derive(Debug, Clone)]
pub struct BoundValue {
    value_type: ParameterType,
    access: AccessMode,
    target: BindTarget,
    converter: Option<Arc<dyn BlobConverter>>,
}

impl BoundValue {
    /// Declared type
    #[inline]
    #[must_use]
    pub fn value_type(&self) -> &ParameterType {
        &self.value_type
    }

    /// Access mode
    #[inline]
    #[must_use]
    pub fn access(&self) -> AccessMode {
        self.access
    }

    /// Target reference
    #[inline]
    #[must_use]
    pub fn target(&self) -> &BindTarget {
        &self.target
    }

    /// Converter for user types
    #[inline]
    #[must_use]
    pub fn converter(&self) -> Option<&Arc<dyn BlobConverter>> {
        self.converter.as_ref()
    }
}

/// Failures while materializing a value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// Item binding received a container path
    #[error("'{value_type}' binds to a blob but the path '{path}' names a container")]
    ExpectedBlob { value_type: ParameterType, path: String },

    /// Container binding received a blob path
    #[error("'{value_type}' binds to a container but the path '{path}' names a blob")]
    ExpectedContainer { value_type: ParameterType, path: String },
}

/// Item binding shared by the built-in and converter strategies
#[derive(Debug, Clone)]
pub struct BlobValueBinding {
    strategy: &'static str,
    value_type: ParameterType,
    access: AccessMode,
    kind: BlobKind,
    converter: Option<Arc<dyn BlobConverter>>,
}

impl BlobValueBinding {
    /// Create binding for a built-in value shape
    #[inline]
    #[must_use]
    pub fn new(
        strategy: &'static str,
        value_type: ParameterType,
        access: AccessMode,
        kind: BlobKind,
    ) -> Self {
        Self {
            strategy,
            value_type,
            access,
            kind,
            converter: None,
        }
    }

    /// Attach a converter for user types
    #[inline]
    #[must_use]
    pub fn with_converter(mut self, converter: Arc<dyn BlobConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Referenced blob kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> BlobKind {
        self.kind
    }
}

impl ArgumentBinding for BlobValueBinding {
    fn value_type(&self) -> &ParameterType {
        &self.value_type
    }

    fn access(&self) -> AccessMode {
        self.access
    }

    fn strategy(&self) -> &'static str {
        self.strategy
    }

    fn bind(&self, client: &dyn BlobClient, path: &BlobPath) -> Result<BoundValue, BindError> {
        let BlobPath::Blob { container, name } = path else {
            return Err(BindError::ExpectedBlob {
                value_type: self.value_type.clone(),
                path: path.to_string(),
            });
        };

        Ok(BoundValue {
            value_type: self.value_type.clone(),
            access: self.access,
            target: BindTarget::Blob(client.blob(container, name, self.kind)),
            converter: self.converter.clone(),
        })
    }
}

/// Container binding shared by the built-in and converter strategies
#[derive(Debug, Clone)]
pub struct ContainerValueBinding {
    strategy: &'static str,
    value_type: ParameterType,
    converter: Option<Arc<dyn BlobConverter>>,
}

impl ContainerValueBinding {
    /// Create binding for a built-in container shape
    #[inline]
    #[must_use]
    pub fn new(strategy: &'static str, value_type: ParameterType) -> Self {
        Self {
            strategy,
            value_type,
            converter: None,
        }
    }

    /// Attach a converter for listings of user types
    #[inline]
    #[must_use]
    pub fn with_converter(mut self, converter: Arc<dyn BlobConverter>) -> Self {
        self.converter = Some(converter);
        self
    }
}

impl ContainerArgumentBinding for ContainerValueBinding {
    fn value_type(&self) -> &ParameterType {
        &self.value_type
    }

    fn strategy(&self) -> &'static str {
        self.strategy
    }

    fn bind(&self, client: &dyn BlobClient, path: &BlobPath) -> Result<BoundValue, BindError> {
        let BlobPath::Container { container, prefix } = path else {
            return Err(BindError::ExpectedContainer {
                value_type: self.value_type.clone(),
                path: path.to_string(),
            });
        };

        Ok(BoundValue {
            value_type: self.value_type.clone(),
            access: AccessMode::Read,
            target: BindTarget::Container {
                container: client.container(container),
                prefix: prefix.clone(),
            },
            converter: self.converter.clone(),
        })
    }
}
