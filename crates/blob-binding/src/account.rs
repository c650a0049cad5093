//! Storage account acquisition
//!
//! The resolver never owns a client: it borrows an `Arc` from a
//! [`StorageAccountProvider`], which decides lifetime, caching and retries.

use crate::descriptor::ParameterDescriptor;
use crate::error::AccountError;
use async_trait::async_trait;
use blob_strategy::{BlobClient, ReferenceClient};
use std::sync::Arc;

/// Hands out a client for a parameter's storage account
#[async_trait]
pub trait StorageAccountProvider: Send + Sync {
    /// Acquire the client for `parameter`
    ///
    /// # Errors
    /// `AccountError` when the account is unknown or unreachable
    async fn client_for(
        &self,
        parameter: &ParameterDescriptor,
    ) -> Result<Arc<dyn BlobClient>, AccountError>;
}

/// Provider with one shared client for every parameter
#[derive(Debug, Clone)]
pub struct StaticAccountProvider {
    client: Arc<dyn BlobClient>,
}

impl StaticAccountProvider {
    /// Share `client` with every caller
    #[inline]
    #[must_use]
    pub fn new(client: Arc<dyn BlobClient>) -> Self {
        Self { client }
    }

    /// Reference-only client for a named account
    #[must_use]
    pub fn for_account(account: impl Into<String>) -> Self {
        Self::new(Arc::new(ReferenceClient::new(account)))
    }
}

#[async_trait]
impl StorageAccountProvider for StaticAccountProvider {
    async fn client_for(
        &self,
        _parameter: &ParameterDescriptor,
    ) -> Result<Arc<dyn BlobClient>, AccountError> {
        Ok(Arc::clone(&self.client))
    }
}
