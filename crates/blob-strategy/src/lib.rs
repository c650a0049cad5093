//! Blob binding strategies
//!
//! Chain-of-responsibility over the ways a function parameter can be bound to
//! storage.
//!
//! # Core Concepts
//!
//! - [`ParameterType`] / [`AccessMode`]: what the parameter declares
//! - [`ItemBindingStrategy`] / [`ContainerBindingStrategy`]: "can you bind this?"
//! - [`ArgumentBinding`] / [`ContainerArgumentBinding`]: the winning capability
//! - [`ItemStrategyRegistry`] / [`ContainerStrategyRegistry`]: ordered chains,
//!   first match wins
//! - [`BlobConverter`]: user types plugged in at construction time
//!
//! # Example
//!
//! ```rust,ignore
//! use blob_strategy::{ItemStrategyRegistry, JsonConverter, ParameterType};
//! use std::sync::Arc;
//!
//! let registry = ItemStrategyRegistry::with_converters(&[Arc::new(JsonConverter::new("Order"))]);
//! let binding = registry.try_create(&ParameterType::named("Order"), None)?;
//! assert!(binding.is_some());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod binding;
mod client;
mod container;
mod converter;
mod custom;
mod item;
mod registry;
mod strategy;
mod types;

pub use binding::{
    ArgumentBinding, BindError, BindTarget, BlobValueBinding, BoundValue,
    ContainerArgumentBinding, ContainerValueBinding,
};
pub use client::{BlobClient, BlobReference, ContainerReference, ReferenceClient};
pub use container::{builtin_container_strategies, ContainerHandleStrategy, EnumerableStrategy};
pub use converter::{BlobConverter, ConverterError, JsonConverter};
pub use custom::{ObjectContainerStrategy, ObjectReadStrategy, ObjectWriteStrategy};
pub use item::{builtin_item_strategies, AccessCheckedStrategy, BlobReferenceStrategy, StreamStrategy};
pub use registry::{
    ContainerRegistryBuilder, ContainerStrategyRegistry, ItemRegistryBuilder,
    ItemStrategyRegistry,
};
pub use strategy::{ContainerBindingStrategy, ItemBindingStrategy, StrategyError};
pub use types::{AccessMode, BlobKind, ParameterType, TypeParseError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use blob_path::{BindingData, PathKind, PathTemplate};
    use std::sync::Arc;

    #[test]
    fn item_binding_materializes_from_template() {
        let registry = ItemStrategyRegistry::with_defaults();
        let binding = registry
            .try_create(&ParameterType::TextWriter, None)
            .unwrap()
            .unwrap();

        let template = PathTemplate::parse("logs/{date}/output.txt", false)
            .unwrap()
            .classify(PathKind::Item)
            .unwrap();
        let values = BindingData::from([("date".to_string(), "2024-05-01".to_string())]);
        let path = template.bind(&values).unwrap();

        let client = ReferenceClient::new("acct");
        let value = binding.bind(&client, &path).unwrap();
        assert_eq!(value.access(), AccessMode::Write);
        match value.target() {
            BindTarget::Blob(blob) => assert_eq!(blob.name(), "2024-05-01/output.txt"),
            other => panic!("expected blob target, got {other:?}"),
        }
    }

    #[test]
    fn converter_shared_across_all_three_chains() {
        let converter: Arc<dyn BlobConverter> = Arc::new(JsonConverter::new("Order"));
        let items = ItemStrategyRegistry::with_converters(&[Arc::clone(&converter)]);
        let containers = ContainerStrategyRegistry::with_converters(&[Arc::clone(&converter)]);

        let order = ParameterType::named("Order");
        assert!(items.try_create(&order, None).unwrap().is_some());
        assert!(items
            .try_create(&ParameterType::out(order.clone()), None)
            .unwrap()
            .is_some());
        assert!(containers
            .try_create(&ParameterType::enumerable(order))
            .unwrap()
            .is_some());
        // registries + the local handle
        assert_eq!(Arc::strong_count(&converter), 4);
    }
}
