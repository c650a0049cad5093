//! Binding resolver
//!
//! Orchestrates resolution of one blob-annotated parameter:
//! 1. Resolve `%setting%` references in the raw pattern
//! 2. Acquire the storage client (the only suspension point, cancellable)
//! 3. Parse the pattern and classify item vs container
//! 4. Validate placeholders against the trigger contract
//! 5. Validate container access
//! 6. Produce an immutable [`Binding`]
//!
//! Parameters without a blob annotation resolve to `Ok(None)` so other
//! binding kinds can claim them.

use crate::account::StorageAccountProvider;
use crate::binding::Binding;
use crate::descriptor::{BlobAttribute, ParameterDescriptor};
use crate::disambiguate::Disambiguator;
use crate::error::ResolveError;
use crate::name::NameResolver;
use blob_path::{PathError, PathKind, PathTemplate, PlaceholderContract};
use blob_strategy::{
    AccessMode, BlobClient, BlobConverter, ContainerStrategyRegistry, ItemStrategyRegistry,
};
use futures::future::join_all;
use std::borrow::Cow;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Resolves parameter descriptors into bindings
#[derive(Clone)]
pub struct BindingResolver {
    disambiguator: Disambiguator,
    accounts: Arc<dyn StorageAccountProvider>,
    names: Option<Arc<dyn NameResolver>>,
}

impl std::fmt::Debug for BindingResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingResolver")
            .field("items", &self.disambiguator.items().names())
            .field("containers", &self.disambiguator.containers().names())
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl BindingResolver {
    /// Resolver with built-in strategies only
    #[must_use]
    pub fn new(accounts: Arc<dyn StorageAccountProvider>) -> Self {
        Self::builder(accounts).build()
    }

    /// Start a builder
    #[inline]
    #[must_use]
    pub fn builder(accounts: Arc<dyn StorageAccountProvider>) -> BindingResolverBuilder {
        BindingResolverBuilder {
            accounts,
            converters: Vec::new(),
            items: None,
            containers: None,
            names: None,
        }
    }

    /// Classification stage
    #[inline]
    #[must_use]
    pub fn disambiguator(&self) -> &Disambiguator {
        &self.disambiguator
    }

    /// Resolve one parameter
    ///
    /// Returns `Ok(None)` without contacting the account provider when the
    /// parameter carries no blob annotation.
    ///
    /// # Errors
    /// - `ResolveError::Cancelled` if `cancel` fires before the client is acquired
    /// - `ResolveError::Account` when the provider fails
    /// - any configuration error from [`Self::resolve_with_client`]
    pub async fn resolve(
        &self,
        descriptor: &ParameterDescriptor,
        contract: &PlaceholderContract,
        cancel: &CancellationToken,
    ) -> Result<Option<Binding>, ResolveError> {
        let Some(attribute) = &descriptor.blob else {
            tracing::trace!(parameter = %descriptor.name, "no blob annotation");
            return Ok(None);
        };

        let pattern = self.resolve_names(descriptor, attribute)?;

        let client = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::warn!(parameter = %descriptor.name, "resolution cancelled");
                return Err(ResolveError::Cancelled {
                    parameter: descriptor.name.clone(),
                });
            }
            client = self.accounts.client_for(descriptor) => {
                client.map_err(|source| ResolveError::Account {
                    parameter: descriptor.name.clone(),
                    source,
                })?
            }
        };

        match self.build(descriptor, attribute, &pattern, contract, client) {
            Ok(binding) => Ok(Some(binding)),
            Err(err) => {
                tracing::warn!(parameter = %descriptor.name, error = %err, "resolution failed");
                Err(err)
            }
        }
    }

    /// Resolve one parameter against an already acquired client
    ///
    /// # Errors
    /// - `ResolveError::NameResolution` for unknown `%settings%`
    /// - `ResolveError::InvalidPath` for malformed patterns
    /// - `ResolveError::NoBindingStrategy` / `NoContainerStrategy` / `Strategy`
    ///   from classification
    /// - `ResolveError::ContractMismatch` for placeholders outside `contract`
    /// - `ResolveError::InvalidContainerBinding` for container access other than read
    pub fn resolve_with_client(
        &self,
        descriptor: &ParameterDescriptor,
        contract: &PlaceholderContract,
        client: Arc<dyn BlobClient>,
    ) -> Result<Option<Binding>, ResolveError> {
        let Some(attribute) = &descriptor.blob else {
            return Ok(None);
        };
        let pattern = self.resolve_names(descriptor, attribute)?;
        self.build(descriptor, attribute, &pattern, contract, client)
            .map(Some)
    }

    /// Resolve independent parameters concurrently
    ///
    /// Results are returned in input order; one failure does not stop the others.
    pub async fn resolve_all(
        &self,
        descriptors: &[ParameterDescriptor],
        contract: &PlaceholderContract,
        cancel: &CancellationToken,
    ) -> Vec<Result<Option<Binding>, ResolveError>> {
        join_all(
            descriptors
                .iter()
                .map(|descriptor| self.resolve(descriptor, contract, cancel)),
        )
        .await
    }

    fn resolve_names<'a>(
        &self,
        descriptor: &ParameterDescriptor,
        attribute: &'a BlobAttribute,
    ) -> Result<Cow<'a, str>, ResolveError> {
        let Some(names) = &self.names else {
            return Ok(Cow::Borrowed(attribute.path.as_str()));
        };
        names
            .resolve_whole_string(&attribute.path)
            .map(Cow::Owned)
            .map_err(|source| ResolveError::NameResolution {
                parameter: descriptor.name.clone(),
                source,
            })
    }

    fn build(
        &self,
        descriptor: &ParameterDescriptor,
        attribute: &BlobAttribute,
        pattern: &str,
        contract: &PlaceholderContract,
        client: Arc<dyn BlobClient>,
    ) -> Result<Binding, ResolveError> {
        let parameter = descriptor.name.as_str();
        let invalid_path = |source: PathError| ResolveError::InvalidPath {
            parameter: parameter.to_string(),
            source,
        };

        let template =
            PathTemplate::parse(pattern, attribute.explicit_container).map_err(invalid_path)?;
        let strategy = self.disambiguator.classify(
            parameter,
            &template,
            &descriptor.parameter_type,
            attribute.access,
        )?;
        let template = template.classify(strategy.kind()).map_err(invalid_path)?;

        template
            .validate(contract)
            .map_err(|source| ResolveError::ContractMismatch {
                parameter: parameter.to_string(),
                source,
            })?;

        if strategy.kind() == PathKind::Container {
            validate_container_access(descriptor, attribute.access)?;
        }

        tracing::info!(
            parameter,
            kind = %strategy.kind(),
            strategy = strategy.name(),
            account = client.account_name(),
            pattern = %template,
            "resolved blob binding"
        );
        Ok(Binding::new(parameter.to_string(), strategy, client, template))
    }
}

fn validate_container_access(
    descriptor: &ParameterDescriptor,
    access: Option<AccessMode>,
) -> Result<(), ResolveError> {
    match access {
        None | Some(AccessMode::Read) => Ok(()),
        Some(other) => Err(ResolveError::InvalidContainerBinding {
            parameter: descriptor.name.clone(),
            parameter_type: descriptor.parameter_type.clone(),
            reason: format!("only Read access is supported for container bindings, got {other}"),
        }),
    }
}

/// Builder for [`BindingResolver`]
///
/// Strategy sets are fixed once `build` is called.
pub struct BindingResolverBuilder {
    accounts: Arc<dyn StorageAccountProvider>,
    converters: Vec<Arc<dyn BlobConverter>>,
    items: Option<ItemStrategyRegistry>,
    containers: Option<ContainerStrategyRegistry>,
    names: Option<Arc<dyn NameResolver>>,
}

impl BindingResolverBuilder {
    /// Register a custom converter; registration order is precedence order
    #[must_use]
    pub fn converter(mut self, converter: Arc<dyn BlobConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    /// Replace the item registry; converters are then ignored for items
    #[must_use]
    pub fn item_registry(mut self, registry: ItemStrategyRegistry) -> Self {
        self.items = Some(registry);
        self
    }

    /// Replace the container registry; converters are then ignored for containers
    #[must_use]
    pub fn container_registry(mut self, registry: ContainerStrategyRegistry) -> Self {
        self.containers = Some(registry);
        self
    }

    /// Resolve `%setting%` references before parsing
    #[must_use]
    pub fn name_resolver(mut self, names: Arc<dyn NameResolver>) -> Self {
        self.names = Some(names);
        self
    }

    /// Freeze the resolver
    #[must_use]
    pub fn build(self) -> BindingResolver {
        let items = self
            .items
            .unwrap_or_else(|| ItemStrategyRegistry::with_converters(&self.converters));
        let containers = self
            .containers
            .unwrap_or_else(|| ContainerStrategyRegistry::with_converters(&self.converters));
        BindingResolver {
            disambiguator: Disambiguator::new(items, containers),
            accounts: self.accounts,
            names: self.names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::StaticAccountProvider;
    use crate::descriptor::BlobAttribute;
    use crate::name::SettingsNameResolver;
    use blob_strategy::{JsonConverter, ParameterType, ReferenceClient};

    fn resolver() -> BindingResolver {
        BindingResolver::new(Arc::new(StaticAccountProvider::for_account("devstore")))
    }

    fn client() -> Arc<dyn BlobClient> {
        Arc::new(ReferenceClient::new("devstore"))
    }

    fn date() -> PlaceholderContract {
        PlaceholderContract::new().with("date")
    }

    #[test]
    fn unannotated_parameter_is_no_match() {
        let descriptor = ParameterDescriptor::new("ctx", ParameterType::named("Context"));
        assert!(resolver()
            .resolve_with_client(&descriptor, &date(), client())
            .unwrap()
            .is_none());
    }

    #[test]
    fn container_write_access_is_invalid() {
        let descriptor = ParameterDescriptor::new("logs", ParameterType::Container)
            .with_blob(BlobAttribute::new("logs/{date}").with_access(AccessMode::Write));
        let err = resolver()
            .resolve_with_client(&descriptor, &date(), client())
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidContainerBinding { .. }));
    }

    #[test]
    fn container_read_access_is_valid() {
        let descriptor = ParameterDescriptor::new("logs", ParameterType::Container)
            .with_blob(BlobAttribute::new("logs/{date}").with_access(AccessMode::Read));
        let binding = resolver()
            .resolve_with_client(&descriptor, &date(), client())
            .unwrap()
            .unwrap();
        assert!(binding.is_container());
    }

    #[test]
    fn settings_are_resolved_before_parsing() {
        let resolver = BindingResolver::builder(Arc::new(StaticAccountProvider::for_account("a")))
            .name_resolver(Arc::new(SettingsNameResolver::default().with("box", "archive")))
            .build();
        let descriptor = ParameterDescriptor::new("input", ParameterType::Stream)
            .with_blob(BlobAttribute::new("%box%/{date}/in.bin"));
        let binding = resolver
            .resolve_with_client(&descriptor, &date(), client())
            .unwrap()
            .unwrap();
        assert_eq!(binding.path().raw(), "archive/{date}/in.bin");
    }

    #[test]
    fn unknown_setting_is_reported_for_parameter() {
        let resolver = BindingResolver::builder(Arc::new(StaticAccountProvider::for_account("a")))
            .name_resolver(Arc::new(SettingsNameResolver::default()))
            .build();
        let descriptor = ParameterDescriptor::new("input", ParameterType::Stream)
            .with_blob(BlobAttribute::new("%box%/in.bin"));
        let err = resolver
            .resolve_with_client(&descriptor, &date(), client())
            .unwrap_err();
        assert!(matches!(err, ResolveError::NameResolution { .. }));
        assert_eq!(err.parameter(), "input");
    }

    #[test]
    fn item_without_blob_name_is_invalid_path() {
        let descriptor = ParameterDescriptor::new("input", ParameterType::Stream)
            .with_blob(BlobAttribute::new("logs"));
        let err = resolver()
            .resolve_with_client(&descriptor, &date(), client())
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPath { .. }));
    }

    #[test]
    fn builder_registers_converters_for_both_registries() {
        let resolver = BindingResolver::builder(Arc::new(StaticAccountProvider::for_account("a")))
            .converter(Arc::new(JsonConverter::new("Order")))
            .build();
        assert!(resolver.disambiguator().items().names().contains(&"object_write"));
        assert!(resolver
            .disambiguator()
            .containers()
            .names()
            .contains(&"object_container"));
    }
}
