//! Strategy registries
//!
//! Provides [`ItemStrategyRegistry`] and [`ContainerStrategyRegistry`]:
//! ordered chains where the first strategy that produces a binding wins.
//! Registries are assembled once through their builders and are immutable
//! and cheaply cloneable afterwards.

use crate::binding::{ArgumentBinding, ContainerArgumentBinding};
use crate::container::builtin_container_strategies;
use crate::converter::BlobConverter;
use crate::custom::{ObjectContainerStrategy, ObjectReadStrategy, ObjectWriteStrategy};
use crate::item::builtin_item_strategies;
use crate::strategy::{ContainerBindingStrategy, ItemBindingStrategy, StrategyError};
use crate::types::{AccessMode, ParameterType};
use std::sync::Arc;

/// Ordered chain of item strategies
#[derive(Debug, Clone)]
pub struct ItemStrategyRegistry {
    strategies: Arc<[Box<dyn ItemBindingStrategy>]>,
}

impl ItemStrategyRegistry {
    /// Start an empty builder
    #[inline]
    #[must_use]
    pub fn builder() -> ItemRegistryBuilder {
        ItemRegistryBuilder::default()
    }

    /// Registry with the built-in strategies only
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::builder().builtins().build()
    }

    /// Built-ins followed by read then write strategies of each converter
    #[must_use]
    pub fn with_converters(converters: &[Arc<dyn BlobConverter>]) -> Self {
        Self::builder().builtins().converters(converters).build()
    }

    /// Ask each strategy in order; first binding wins
    ///
    /// # Errors
    /// The first `StrategyError` raised, which ends the chain
    pub fn try_create(
        &self,
        parameter_type: &ParameterType,
        access: Option<AccessMode>,
    ) -> Result<Option<Box<dyn ArgumentBinding>>, StrategyError> {
        for strategy in self.strategies.iter() {
            let binding = strategy.try_create(parameter_type, access)?;
            tracing::trace!(
                strategy = strategy.name(),
                parameter_type = %parameter_type,
                matched = binding.is_some(),
                "probed item strategy"
            );
            if binding.is_some() {
                return Ok(binding);
            }
        }
        Ok(None)
    }

    /// Strategy names in precedence order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Number of strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for ItemStrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Builder for [`ItemStrategyRegistry`]; push order is precedence order
#[derive(Debug, Default)]
pub struct ItemRegistryBuilder {
    strategies: Vec<Box<dyn ItemBindingStrategy>>,
}

impl ItemRegistryBuilder {
    /// Append one strategy
    #[must_use]
    pub fn push(mut self, strategy: impl ItemBindingStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Append the built-in strategies
    #[must_use]
    pub fn builtins(mut self) -> Self {
        self.strategies.extend(builtin_item_strategies());
        self
    }

    /// Append all converter read strategies, then all write strategies
    #[must_use]
    pub fn converters(mut self, converters: &[Arc<dyn BlobConverter>]) -> Self {
        for converter in converters {
            self.strategies
                .push(Box::new(ObjectReadStrategy::new(Arc::clone(converter))));
        }
        for converter in converters {
            self.strategies
                .push(Box::new(ObjectWriteStrategy::new(Arc::clone(converter))));
        }
        self
    }

    /// Freeze the chain
    #[must_use]
    pub fn build(self) -> ItemStrategyRegistry {
        ItemStrategyRegistry {
            strategies: self.strategies.into(),
        }
    }
}

/// Ordered chain of container strategies
#[derive(Debug, Clone)]
pub struct ContainerStrategyRegistry {
    strategies: Arc<[Box<dyn ContainerBindingStrategy>]>,
}

impl ContainerStrategyRegistry {
    /// Start an empty builder
    #[inline]
    #[must_use]
    pub fn builder() -> ContainerRegistryBuilder {
        ContainerRegistryBuilder::default()
    }

    /// Registry with the built-in strategies only
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::builder().builtins().build()
    }

    /// Built-ins followed by the container-read strategy of each converter
    #[must_use]
    pub fn with_converters(converters: &[Arc<dyn BlobConverter>]) -> Self {
        Self::builder().builtins().converters(converters).build()
    }

    /// Ask each strategy in order; first binding wins
    ///
    /// # Errors
    /// The first `StrategyError` raised, which ends the chain
    pub fn try_create(
        &self,
        parameter_type: &ParameterType,
    ) -> Result<Option<Box<dyn ContainerArgumentBinding>>, StrategyError> {
        for strategy in self.strategies.iter() {
            let binding = strategy.try_create(parameter_type)?;
            tracing::trace!(
                strategy = strategy.name(),
                parameter_type = %parameter_type,
                matched = binding.is_some(),
                "probed container strategy"
            );
            if binding.is_some() {
                return Ok(binding);
            }
        }
        Ok(None)
    }

    /// Strategy names in precedence order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Number of strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for ContainerStrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Builder for [`ContainerStrategyRegistry`]; push order is precedence order
#[derive(Debug, Default)]
pub struct ContainerRegistryBuilder {
    strategies: Vec<Box<dyn ContainerBindingStrategy>>,
}

impl ContainerRegistryBuilder {
    /// Append one strategy
    #[must_use]
    pub fn push(mut self, strategy: impl ContainerBindingStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Append the built-in strategies
    #[must_use]
    pub fn builtins(mut self) -> Self {
        self.strategies.extend(builtin_container_strategies());
        self
    }

    /// Append the container-read strategy of each converter
    #[must_use]
    pub fn converters(mut self, converters: &[Arc<dyn BlobConverter>]) -> Self {
        for converter in converters {
            self.strategies
                .push(Box::new(ObjectContainerStrategy::new(Arc::clone(converter))));
        }
        self
    }

    /// Freeze the chain
    #[must_use]
    pub fn build(self) -> ContainerStrategyRegistry {
        ContainerStrategyRegistry {
            strategies: self.strategies.into(),
        }
    }
}
