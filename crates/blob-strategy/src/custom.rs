//! Strategies contributed by registered converters
//!
//! Each [`BlobConverter`] yields three strategies:
//! - [`ObjectReadStrategy`]: `T`, read
//! - [`ObjectWriteStrategy`]: `Out<T>`, write
//! - [`ObjectContainerStrategy`]: `Enumerable<T>`, container listing

use crate::binding::{
    ArgumentBinding, BlobValueBinding, ContainerArgumentBinding, ContainerValueBinding,
};
use crate::converter::BlobConverter;
use crate::strategy::{checked_access, ContainerBindingStrategy, ItemBindingStrategy, StrategyError};
use crate::types::{AccessMode, BlobKind, ParameterType};
use std::sync::Arc;

fn is_named(parameter_type: &ParameterType, converter: &dyn BlobConverter) -> bool {
    matches!(parameter_type, ParameterType::Named(name) if name == converter.type_name())
}

/// Reads a user type through its converter
#[derive(Debug, Clone)]
pub struct ObjectReadStrategy {
    converter: Arc<dyn BlobConverter>,
}

impl ObjectReadStrategy {
    /// Create read strategy for converter
    #[inline]
    #[must_use]
    pub fn new(converter: Arc<dyn BlobConverter>) -> Self {
        Self { converter }
    }
}

impl ItemBindingStrategy for ObjectReadStrategy {
    fn name(&self) -> &'static str {
        "object_read"
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
        access: Option<AccessMode>,
    ) -> Result<Option<Box<dyn ArgumentBinding>>, StrategyError> {
        if !is_named(parameter_type, self.converter.as_ref()) {
            return Ok(None);
        }
        let access = checked_access(parameter_type, access, AccessMode::Read, &[AccessMode::Read])?;
        let binding = BlobValueBinding::new(self.name(), parameter_type.clone(), access, BlobKind::Any)
            .with_converter(Arc::clone(&self.converter));
        Ok(Some(Box::new(binding)))
    }
}

/// Writes a user type (`Out<T>`) through its converter
#[derive(Debug, Clone)]
pub struct ObjectWriteStrategy {
    converter: Arc<dyn BlobConverter>,
}

impl ObjectWriteStrategy {
    /// Create write strategy for converter
    #[inline]
    #[must_use]
    pub fn new(converter: Arc<dyn BlobConverter>) -> Self {
        Self { converter }
    }
}

impl ItemBindingStrategy for ObjectWriteStrategy {
    fn name(&self) -> &'static str {
        "object_write"
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
        access: Option<AccessMode>,
    ) -> Result<Option<Box<dyn ArgumentBinding>>, StrategyError> {
        let ParameterType::Out(inner) = parameter_type else {
            return Ok(None);
        };
        if !is_named(inner, self.converter.as_ref()) {
            return Ok(None);
        }
        let access = checked_access(parameter_type, access, AccessMode::Write, &[AccessMode::Write])?;
        let binding =
            BlobValueBinding::new(self.name(), parameter_type.clone(), access, BlobKind::Block)
                .with_converter(Arc::clone(&self.converter));
        Ok(Some(Box::new(binding)))
    }
}

/// Lists a container as values of a user type
#[derive(Debug, Clone)]
pub struct ObjectContainerStrategy {
    converter: Arc<dyn BlobConverter>,
}

impl ObjectContainerStrategy {
    /// Create container-read strategy for converter
    #[inline]
    #[must_use]
    pub fn new(converter: Arc<dyn BlobConverter>) -> Self {
        Self { converter }
    }
}

impl ContainerBindingStrategy for ObjectContainerStrategy {
    fn name(&self) -> &'static str {
        "object_container"
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
    ) -> Result<Option<Box<dyn ContainerArgumentBinding>>, StrategyError> {
        let ParameterType::Enumerable(inner) = parameter_type else {
            return Ok(None);
        };
        if !is_named(inner, self.converter.as_ref()) {
            return Ok(None);
        }
        let binding = ContainerValueBinding::new(self.name(), parameter_type.clone())
            .with_converter(Arc::clone(&self.converter));
        Ok(Some(Box::new(binding)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::JsonConverter;

    fn order() -> Arc<dyn BlobConverter> {
        Arc::new(JsonConverter::new("Order"))
    }

    #[test]
    fn read_strategy_matches_named_type_only() {
        let strategy = ObjectReadStrategy::new(order());
        assert!(strategy
            .try_create(&ParameterType::named("Invoice"), None)
            .unwrap()
            .is_none());

        let binding = strategy
            .try_create(&ParameterType::named("Order"), None)
            .unwrap()
            .unwrap();
        assert_eq!(binding.access(), AccessMode::Read);
        assert_eq!(binding.strategy(), "object_read");
    }

    #[test]
    fn read_strategy_rejects_write_access() {
        let strategy = ObjectReadStrategy::new(order());
        assert!(strategy
            .try_create(&ParameterType::named("Order"), Some(AccessMode::Write))
            .is_err());
    }

    #[test]
    fn write_strategy_needs_out() {
        let strategy = ObjectWriteStrategy::new(order());
        assert!(strategy
            .try_create(&ParameterType::named("Order"), None)
            .unwrap()
            .is_none());

        let binding = strategy
            .try_create(&ParameterType::out(ParameterType::named("Order")), None)
            .unwrap()
            .unwrap();
        assert_eq!(binding.access(), AccessMode::Write);
    }

    #[test]
    fn container_strategy_needs_enumerable() {
        let strategy = ObjectContainerStrategy::new(order());
        assert!(strategy
            .try_create(&ParameterType::named("Order"))
            .unwrap()
            .is_none());
        assert!(strategy
            .try_create(&ParameterType::enumerable(ParameterType::named("Order")))
            .unwrap()
            .is_some());
    }
}
