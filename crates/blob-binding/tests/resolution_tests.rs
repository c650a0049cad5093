use blob_binding::prelude::*;
use blob_strategy::{
    ArgumentBinding, BlobKind, BlobValueBinding, ContainerStrategyRegistry, ItemBindingStrategy,
    ItemStrategyRegistry, JsonConverter, StrategyError,
};
use blob_test_utils::{
    blob_param, blob_param_with_access, container_param, contract, resolver,
    CountingAccountProvider,
};
use pretty_assertions::assert_eq;

/// Binds `Directory` as a single blob
#[derive(Debug)]
struct DirectoryAsItem;

impl ItemBindingStrategy for DirectoryAsItem {
    fn name(&self) -> &'static str {
        "directory_as_item"
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
        _access: Option<AccessMode>,
    ) -> Result<Option<Box<dyn ArgumentBinding>>, StrategyError> {
        if *parameter_type != ParameterType::Directory {
            return Ok(None);
        }
        Ok(Some(Box::new(BlobValueBinding::new(
            self.name(),
            ParameterType::Directory,
            AccessMode::Read,
            BlobKind::Any,
        ))))
    }
}

/// Binds `String` ahead of the built-in
#[derive(Debug)]
struct ShadowString;

impl ItemBindingStrategy for ShadowString {
    fn name(&self) -> &'static str {
        "shadow_string"
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
        _access: Option<AccessMode>,
    ) -> Result<Option<Box<dyn ArgumentBinding>>, StrategyError> {
        if *parameter_type != ParameterType::String {
            return Ok(None);
        }
        Ok(Some(Box::new(BlobValueBinding::new(
            self.name(),
            ParameterType::String,
            AccessMode::Read,
            BlobKind::Block,
        ))))
    }
}

async fn resolve(
    resolver: &BindingResolver,
    descriptor: &ParameterDescriptor,
    contract: &PlaceholderContract,
) -> Result<Option<Binding>, ResolveError> {
    resolver
        .resolve(descriptor, contract, &CancellationToken::new())
        .await
}

#[tokio::test]
async fn text_writer_with_extension_binds_item() {
    let provider = CountingAccountProvider::new();
    let resolver = resolver(provider.clone());
    let descriptor = blob_param("output", ParameterType::TextWriter, "logs/{date}/output.txt");

    let binding = resolve(&resolver, &descriptor, &contract(&["date"]))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(binding.kind(), PathKind::Item);
    assert_eq!(binding.parameter_name(), "output");
    assert_eq!(binding.path().container_pattern().raw(), "logs");
    assert_eq!(
        binding.path().item_pattern().map(|p| p.raw()),
        Some("{date}/output.txt")
    );
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn container_handle_binds_container() {
    let resolver = resolver(CountingAccountProvider::new());
    let descriptor = blob_param("history", ParameterType::Container, "logs/{date}");

    let binding = resolve(&resolver, &descriptor, &contract(&["date"]))
        .await
        .unwrap()
        .unwrap();

    assert!(binding.is_container());
    assert!(binding.path().item_pattern().is_none());
    assert_eq!(
        binding.path().prefix_pattern().map(|p| p.raw()),
        Some("{date}")
    );
}

#[tokio::test]
async fn container_wins_when_item_also_matches() {
    let items = ItemStrategyRegistry::builder()
        .builtins()
        .push(DirectoryAsItem)
        .build();
    let resolver = BindingResolver::builder(CountingAccountProvider::new())
        .item_registry(items)
        .build();
    let descriptor = blob_param("dir", ParameterType::Directory, "logs/{date}");

    let binding = resolve(&resolver, &descriptor, &contract(&["date"]))
        .await
        .unwrap()
        .unwrap();

    assert!(binding.is_container());
    assert_eq!(binding.strategy().name(), "directory");
}

#[tokio::test]
async fn extension_turns_container_capable_type_into_item() {
    let items = ItemStrategyRegistry::builder()
        .builtins()
        .push(DirectoryAsItem)
        .build();
    let resolver = BindingResolver::builder(CountingAccountProvider::new())
        .item_registry(items)
        .build();
    let descriptor = blob_param("dir", ParameterType::Directory, "logs/{date}/index.json");

    let binding = resolve(&resolver, &descriptor, &contract(&["date"]))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(binding.kind(), PathKind::Item);
    assert_eq!(binding.strategy().name(), "directory_as_item");
}

#[tokio::test]
async fn missing_placeholder_is_contract_mismatch() {
    let resolver = resolver(CountingAccountProvider::new());
    let descriptor = blob_param("input", ParameterType::Stream, "logs/{missing}/file.csv");

    let err = resolve(&resolver, &descriptor, &contract(&["date"]))
        .await
        .unwrap_err();

    match err {
        ResolveError::ContractMismatch { parameter, source } => {
            assert_eq!(parameter, "input");
            assert_eq!(source.missing, vec!["missing".to_string()]);
        }
        other => panic!("expected contract mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_type_has_no_strategy() {
    let resolver = resolver(CountingAccountProvider::new());
    let descriptor = blob_param("widget", ParameterType::named("Widget"), "logs/{date}/w.bin");

    let err = resolve(&resolver, &descriptor, &contract(&["date"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::NoBindingStrategy { .. }));
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("'Widget'"));
}

#[tokio::test]
async fn explicit_container_without_container_strategy_is_hard_error() {
    let resolver = resolver(CountingAccountProvider::new());
    let descriptor = container_param("output", ParameterType::TextWriter, "logs/{date}");

    let err = resolve(&resolver, &descriptor, &contract(&["date"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ResolveError::NoContainerStrategy { .. }));
    assert!(err.is_configuration_error());
}

#[tokio::test]
async fn explicit_container_ignores_extension() {
    let resolver = resolver(CountingAccountProvider::new());
    let descriptor = container_param("listing", ParameterType::Container, "logs/{name}.csv");

    let binding = resolve(&resolver, &descriptor, &contract(&["name"]))
        .await
        .unwrap()
        .unwrap();

    assert!(binding.is_container());
    assert!(binding.path().is_explicit_container_binding());
}

#[tokio::test]
async fn unannotated_parameter_skips_provider() {
    let provider = CountingAccountProvider::new();
    let resolver = resolver(provider.clone());
    let descriptor = ParameterDescriptor::new("ctx", ParameterType::named("Context"));

    assert!(resolve(&resolver, &descriptor, &contract(&[]))
        .await
        .unwrap()
        .is_none());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn registration_order_decides_precedence() {
    let items = ItemStrategyRegistry::builder()
        .push(ShadowString)
        .builtins()
        .build();
    let resolver = BindingResolver::builder(CountingAccountProvider::new())
        .item_registry(items)
        .build();
    let descriptor = blob_param("body", ParameterType::String, "inbox/{id}.txt");

    let binding = resolve(&resolver, &descriptor, &contract(&["id"]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(binding.strategy().name(), "shadow_string");
}

#[tokio::test]
async fn custom_converter_binds_all_three_shapes() {
    let resolver = BindingResolver::builder(CountingAccountProvider::new())
        .converter(Arc::new(JsonConverter::new("Order")))
        .build();
    let contract = contract(&["id"]);
    let order = ParameterType::named("Order");

    let read = resolve(
        &resolver,
        &blob_param("order", order.clone(), "orders/{id}.json"),
        &contract,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(read.strategy().name(), "object_read");

    let write = resolve(
        &resolver,
        &blob_param("receipt", ParameterType::out(order.clone()), "receipts/{id}.json"),
        &contract,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(write.strategy().name(), "object_write");
    assert_eq!(write.strategy().access(), AccessMode::Write);

    let listing = resolve(
        &resolver,
        &blob_param("all", ParameterType::enumerable(order), "orders"),
        &contract,
    )
    .await
    .unwrap()
    .unwrap();
    assert!(listing.is_container());
    assert_eq!(listing.strategy().name(), "object_container");
}

#[tokio::test]
async fn container_write_access_is_rejected() {
    let resolver = resolver(CountingAccountProvider::new());
    let descriptor = blob_param_with_access(
        "history",
        ParameterType::enumerable(ParameterType::TextReader),
        "logs/{date}",
        AccessMode::Write,
    );

    let err = resolve(&resolver, &descriptor, &contract(&["date"]))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::InvalidContainerBinding { .. }));
}

#[tokio::test]
async fn stream_read_write_is_strategy_error() {
    let resolver = resolver(CountingAccountProvider::new());
    let descriptor = blob_param_with_access(
        "data",
        ParameterType::Stream,
        "logs/{date}/data.bin",
        AccessMode::ReadWrite,
    );

    let err = resolve(&resolver, &descriptor, &contract(&["date"]))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::Strategy { .. }));
}

#[tokio::test]
async fn dotted_placeholder_values_still_bind_as_container() {
    let resolver = resolver(CountingAccountProvider::new());
    let descriptor = blob_param("release", ParameterType::Container, "builds/{version}");

    let binding = resolve(&resolver, &descriptor, &contract(&["version"]))
        .await
        .unwrap()
        .unwrap();
    assert!(binding.is_container());

    let values = BindingData::from([("version".to_string(), "1.2.3".to_string())]);
    let bound = binding.bind(&values).unwrap();
    assert_eq!(bound.path.prefix(), Some("1.2.3"));
}

#[test]
fn resolve_with_client_uses_given_client() {
    let provider = CountingAccountProvider::new();
    let resolver = BindingResolver::new(provider.clone());
    let descriptor = blob_param("input", ParameterType::TextReader, "inbox/{id}.txt");

    let binding = resolver
        .resolve_with_client(&descriptor, &contract(&["id"]), provider.client())
        .unwrap()
        .unwrap();

    assert!(Arc::ptr_eq(binding.client(), &provider.client()));
    assert_eq!(provider.calls(), 0);
}

#[test]
fn custom_container_registry_replaces_builtins() {
    let resolver = BindingResolver::builder(CountingAccountProvider::new())
        .container_registry(ContainerStrategyRegistry::builder().build())
        .build();
    let descriptor = blob_param("history", ParameterType::Container, "logs/{date}");

    let err = resolver
        .resolve_with_client(
            &descriptor,
            &contract(&["date"]),
            CountingAccountProvider::new().client(),
        )
        .unwrap_err();
    assert!(matches!(err, ResolveError::NoBindingStrategy { .. }));
}
