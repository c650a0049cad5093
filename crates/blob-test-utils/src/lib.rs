//! Testing utilities for the blob binding workspace
//!
//! Account provider fakes and descriptor fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use blob_binding::{
    AccountError, BindingResolver, BlobAttribute, ParameterDescriptor, StorageAccountProvider,
};
use blob_path::PlaceholderContract;
use blob_strategy::{AccessMode, BlobClient, ParameterType, ReferenceClient};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_ACCOUNT: &str = "testaccount";

/// Provider that counts acquisitions
#[derive(Debug)]
pub struct CountingAccountProvider {
    client: Arc<dyn BlobClient>,
    calls: AtomicUsize,
}

impl CountingAccountProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            client: Arc::new(ReferenceClient::new(TEST_ACCOUNT)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn client(&self) -> Arc<dyn BlobClient> {
        Arc::clone(&self.client)
    }
}

#[async_trait]
impl StorageAccountProvider for CountingAccountProvider {
    async fn client_for(
        &self,
        _parameter: &ParameterDescriptor,
    ) -> Result<Arc<dyn BlobClient>, AccountError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.client))
    }
}

/// Provider whose account is always unreachable
#[derive(Debug, Default)]
pub struct FailingAccountProvider;

#[async_trait]
impl StorageAccountProvider for FailingAccountProvider {
    async fn client_for(
        &self,
        _parameter: &ParameterDescriptor,
    ) -> Result<Arc<dyn BlobClient>, AccountError> {
        Err(AccountError::Unavailable {
            account: TEST_ACCOUNT.to_string(),
            message: "connection refused".to_string(),
        })
    }
}

/// Provider that never completes
#[derive(Debug, Default)]
pub struct PendingAccountProvider;

#[async_trait]
impl StorageAccountProvider for PendingAccountProvider {
    async fn client_for(
        &self,
        _parameter: &ParameterDescriptor,
    ) -> Result<Arc<dyn BlobClient>, AccountError> {
        std::future::pending().await
    }
}

/// Provider that answers after a per-parameter delay
#[derive(Debug, Default)]
pub struct DelayedAccountProvider {
    delays: HashMap<String, Duration>,
}

impl DelayedAccountProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(mut self, parameter: &str, millis: u64) -> Self {
        self.delays
            .insert(parameter.to_string(), Duration::from_millis(millis));
        self
    }
}

#[async_trait]
impl StorageAccountProvider for DelayedAccountProvider {
    async fn client_for(
        &self,
        parameter: &ParameterDescriptor,
    ) -> Result<Arc<dyn BlobClient>, AccountError> {
        if let Some(delay) = self.delays.get(&parameter.name) {
            tokio::time::sleep(*delay).await;
        }
        Ok(Arc::new(ReferenceClient::new(TEST_ACCOUNT)))
    }
}

pub fn resolver(accounts: Arc<dyn StorageAccountProvider>) -> BindingResolver {
    BindingResolver::new(accounts)
}

pub fn blob_param(name: &str, parameter_type: ParameterType, path: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name, parameter_type).with_blob(BlobAttribute::new(path))
}

pub fn blob_param_with_access(
    name: &str,
    parameter_type: ParameterType,
    path: &str,
    access: AccessMode,
) -> ParameterDescriptor {
    ParameterDescriptor::new(name, parameter_type)
        .with_blob(BlobAttribute::new(path).with_access(access))
}

pub fn container_param(name: &str, parameter_type: ParameterType, path: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name, parameter_type).with_blob(BlobAttribute::new(path).container())
}

pub fn contract(names: &[&str]) -> PlaceholderContract {
    names.iter().copied().collect()
}
