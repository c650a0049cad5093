//! Item vs container classification
//!
//! Paths are only known as patterns at indexing time, so the decision rests on
//! the declared type and the shape of the pattern:
//! 1. Explicit container annotation: container, or a hard error when no
//!    container strategy accepts the type.
//! 2. A container strategy matches and the pattern has no `.ext` tail:
//!    container.
//! 3. Otherwise: item. The item registry is only consulted here.
//!
//! A placeholder whose values carry dots (`{version}` = `1.2`) is still read
//! as a container when the pattern itself has no dot. No existence check is
//! made against storage.

use crate::binding::BindingStrategy;
use crate::error::ResolveError;
use blob_path::PathTemplate;
use blob_strategy::{
    AccessMode, BlobConverter, ContainerStrategyRegistry, ItemStrategyRegistry, ParameterType,
    StrategyError,
};
use std::sync::Arc;

/// Decides between item and container bindings
#[derive(Debug, Clone, Default)]
pub struct Disambiguator {
    items: ItemStrategyRegistry,
    containers: ContainerStrategyRegistry,
}

impl Disambiguator {
    /// Create disambiguator over two registries
    #[inline]
    #[must_use]
    pub fn new(items: ItemStrategyRegistry, containers: ContainerStrategyRegistry) -> Self {
        Self { items, containers }
    }

    /// Built-in registries extended with converters
    #[must_use]
    pub fn with_converters(converters: &[Arc<dyn BlobConverter>]) -> Self {
        Self::new(
            ItemStrategyRegistry::with_converters(converters),
            ContainerStrategyRegistry::with_converters(converters),
        )
    }

    /// Item registry
    #[inline]
    #[must_use]
    pub fn items(&self) -> &ItemStrategyRegistry {
        &self.items
    }

    /// Container registry
    #[inline]
    #[must_use]
    pub fn containers(&self) -> &ContainerStrategyRegistry {
        &self.containers
    }

    /// Classify a parameter and pick its strategy
    ///
    /// # Errors
    /// - `ResolveError::NoContainerStrategy` for an explicit container binding
    ///   on a type no container strategy accepts
    /// - `ResolveError::NoBindingStrategy` when the item registry has no match
    ///   either
    /// - `ResolveError::Strategy` when a strategy rejects the parameter
    pub fn classify(
        &self,
        parameter: &str,
        template: &PathTemplate,
        parameter_type: &ParameterType,
        access: Option<AccessMode>,
    ) -> Result<BindingStrategy, ResolveError> {
        let strategy_error = |source: StrategyError| ResolveError::Strategy {
            parameter: parameter.to_string(),
            source,
        };

        let container = self
            .containers
            .try_create(parameter_type)
            .map_err(strategy_error)?;

        if template.is_explicit_container_binding() {
            tracing::debug!(parameter, "explicit container binding");
            return container
                .map(BindingStrategy::Container)
                .ok_or_else(|| ResolveError::NoContainerStrategy {
                    parameter: parameter.to_string(),
                    parameter_type: parameter_type.clone(),
                });
        }

        match container {
            Some(binding) if !template.has_extension_suffix() => {
                tracing::debug!(parameter, pattern = %template, "classified as container");
                return Ok(BindingStrategy::Container(binding));
            }
            Some(_) => {
                tracing::debug!(
                    parameter,
                    pattern = %template,
                    "container-capable type but pattern ends like a file name"
                );
            }
            None => {}
        }

        let item = self
            .items
            .try_create(parameter_type, access)
            .map_err(strategy_error)?
            .ok_or_else(|| ResolveError::NoBindingStrategy {
                parameter: parameter.to_string(),
                parameter_type: parameter_type.clone(),
                access,
            })?;
        tracing::debug!(parameter, pattern = %template, "classified as item");
        Ok(BindingStrategy::Item(item))
    }
}
