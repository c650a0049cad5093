//! Resolved bindings
//!
//! A [`Binding`] is the immutable result of resolving one parameter: the
//! winning strategy, the classified path template and the shared client.
//! The invocation machinery asks it to [`Binding::bind`] once per call.

use crate::error::MaterializeError;
use blob_path::{BindingData, BlobPath, PathKind, PathTemplate};
use blob_strategy::{
    AccessMode, ArgumentBinding, BlobClient, BoundValue, ContainerArgumentBinding, ParameterType,
};
use serde::Serialize;
use std::sync::Arc;

/// Winning strategy of a classification
#[derive(Debug)]
pub enum BindingStrategy {
    /// Single blob
    Item(Box<dyn ArgumentBinding>),
    /// Container, directory or listing
    Container(Box<dyn ContainerArgumentBinding>),
}

impl BindingStrategy {
    /// Path shape this strategy binds to
    #[inline]
    #[must_use]
    pub fn kind(&self) -> PathKind {
        match self {
            Self::Item(_) => PathKind::Item,
            Self::Container(_) => PathKind::Container,
        }
    }

    /// Name of the strategy
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Item(binding) => binding.strategy(),
            Self::Container(binding) => binding.strategy(),
        }
    }

    /// Type of the bound value
    #[must_use]
    pub fn value_type(&self) -> &ParameterType {
        match self {
            Self::Item(binding) => binding.value_type(),
            Self::Container(binding) => binding.value_type(),
        }
    }

    /// Effective access; containers are always read
    #[must_use]
    pub fn access(&self) -> AccessMode {
        match self {
            Self::Item(binding) => binding.access(),
            Self::Container(_) => AccessMode::Read,
        }
    }
}

/// Resolved binding of one parameter
#[derive(Debug)]
pub struct Binding {
    parameter_name: String,
    strategy: BindingStrategy,
    client: Arc<dyn BlobClient>,
    path: PathTemplate,
}

impl Binding {
    pub(crate) fn new(
        parameter_name: String,
        strategy: BindingStrategy,
        client: Arc<dyn BlobClient>,
        path: PathTemplate,
    ) -> Self {
        Self {
            parameter_name,
            strategy,
            client,
            path,
        }
    }

    /// Parameter name
    #[inline]
    #[must_use]
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// Winning strategy
    #[inline]
    #[must_use]
    pub fn strategy(&self) -> &BindingStrategy {
        &self.strategy
    }

    /// Shared client handle
    #[inline]
    #[must_use]
    pub fn client(&self) -> &Arc<dyn BlobClient> {
        &self.client
    }

    /// Classified, unsubstituted path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &PathTemplate {
        &self.path
    }

    /// Item or container
    #[inline]
    #[must_use]
    pub fn kind(&self) -> PathKind {
        self.strategy.kind()
    }

    /// Check if bound to a container
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.kind() == PathKind::Container
    }

    /// Materialize the argument for one invocation
    ///
    /// # Errors
    /// - `MaterializeError::Path` when a value is missing or yields an invalid name
    /// - `MaterializeError::Bind` when the rendered path has the wrong shape
    pub fn bind(&self, values: &BindingData) -> Result<BoundArgument, MaterializeError> {
        let path = self.path.bind(values).map_err(|source| MaterializeError::Path {
            parameter: self.parameter_name.clone(),
            source,
        })?;

        let client = self.client.as_ref();
        let value = match &self.strategy {
            BindingStrategy::Item(binding) => binding.bind(client, &path),
            BindingStrategy::Container(binding) => binding.bind(client, &path),
        }
        .map_err(|source| MaterializeError::Bind {
            parameter: self.parameter_name.clone(),
            source,
        })?;

        tracing::trace!(parameter = %self.parameter_name, path = %path, "bound argument");
        Ok(BoundArgument {
            parameter: self.parameter_name.clone(),
            path,
            value,
        })
    }

    /// Serializable description for indexing reports
    #[must_use]
    pub fn describe(&self) -> BindingSummary {
        BindingSummary {
            parameter: self.parameter_name.clone(),
            account: self.client.account_name().to_string(),
            kind: self.kind(),
            parameter_type: self.strategy.value_type().clone(),
            access: self.strategy.access(),
            strategy: self.strategy.name(),
            container_pattern: self.path.container_pattern().raw().to_string(),
            blob_pattern: self.path.item_pattern().map(|p| p.raw().to_string()),
            prefix_pattern: self.path.prefix_pattern().map(|p| p.raw().to_string()),
        }
    }
}

/// Argument ready for one invocation
#[derive(Debug, Clone)]
pub struct BoundArgument {
    /// Parameter name
    pub parameter: String,
    /// Concrete path
    pub path: BlobPath,
    /// Materialized value
    pub value: BoundValue,
}

/// Indexing report line for a binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingSummary {
    pub parameter: String,
    pub account: String,
    pub kind: PathKind,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub access: AccessMode,
    pub strategy: &'static str,
    pub container_pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_pattern: Option<String>,
}
