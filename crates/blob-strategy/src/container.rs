//! Built-in container strategies
//!
//! In registry order: `Container`, `Directory`, `Enumerable<T>` over the
//! listable item shapes.

use crate::binding::{ContainerArgumentBinding, ContainerValueBinding};
use crate::strategy::{ContainerBindingStrategy, StrategyError};
use crate::types::ParameterType;

/// Item shapes a listing can yield
const LISTABLE: &[ParameterType] = &[
    ParameterType::CloudBlob,
    ParameterType::BlockBlob,
    ParameterType::PageBlob,
    ParameterType::Stream,
    ParameterType::TextReader,
    ParameterType::String,
];

/// Exact match on a container-shaped type (`Container`, `Directory`)
#[derive(Debug, Clone)]
pub struct ContainerHandleStrategy {
    name: &'static str,
    value_type: ParameterType,
}

impl ContainerHandleStrategy {
    /// `Container`
    #[must_use]
    pub fn container() -> Self {
        Self {
            name: "container",
            value_type: ParameterType::Container,
        }
    }

    /// `Directory`
    #[must_use]
    pub fn directory() -> Self {
        Self {
            name: "directory",
            value_type: ParameterType::Directory,
        }
    }
}

impl ContainerBindingStrategy for ContainerHandleStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
    ) -> Result<Option<Box<dyn ContainerArgumentBinding>>, StrategyError> {
        if *parameter_type != self.value_type {
            return Ok(None);
        }
        Ok(Some(Box::new(ContainerValueBinding::new(
            self.name,
            self.value_type.clone(),
        ))))
    }
}

/// `Enumerable<T>` for built-in listable `T`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumerableStrategy;

impl ContainerBindingStrategy for EnumerableStrategy {
    fn name(&self) -> &'static str {
        "enumerable"
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
    ) -> Result<Option<Box<dyn ContainerArgumentBinding>>, StrategyError> {
        let ParameterType::Enumerable(element) = parameter_type else {
            return Ok(None);
        };
        if !LISTABLE.contains(element.as_ref()) {
            return Ok(None);
        }
        Ok(Some(Box::new(ContainerValueBinding::new(
            self.name(),
            parameter_type.clone(),
        ))))
    }
}

/// Built-in container strategies in precedence order
#[must_use]
pub fn builtin_container_strategies() -> Vec<Box<dyn ContainerBindingStrategy>> {
    vec![
        Box::new(ContainerHandleStrategy::container()),
        Box::new(ContainerHandleStrategy::directory()),
        Box::new(EnumerableStrategy),
    ]
}
