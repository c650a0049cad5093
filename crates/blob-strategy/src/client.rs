//! Storage client handles
//!
//! A [`BlobClient`] is owned by the account provider and only lends itself to
//! bindings. It hands out plain references; reading and writing through them
//! belongs to the invocation machinery.

use crate::types::BlobKind;
use serde::Serialize;
use std::fmt::{self, Debug, Display, Formatter};

/// Client handle for one storage account
pub trait BlobClient: Send + Sync + Debug {
    /// Storage account name
    fn account_name(&self) -> &str;

    /// Reference to a container
    fn container(&self, name: &str) -> ContainerReference {
        ContainerReference::new(self.account_name(), name)
    }

    /// Reference to a blob inside a container
    fn blob(&self, container: &str, name: &str, kind: BlobKind) -> BlobReference {
        BlobReference::new(self.container(container), name, kind)
    }
}

/// Address of a container
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContainerReference {
    account: String,
    name: String,
}

impl ContainerReference {
    /// Create container reference
    #[inline]
    #[must_use]
    pub fn new(account: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            name: name.into(),
        }
    }

    /// Account name
    #[inline]
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Container name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for ContainerReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.account, self.name)
    }
}

/// Address of a blob
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BlobReference {
    container: ContainerReference,
    name: String,
    kind: BlobKind,
}

impl BlobReference {
    /// Create blob reference
    #[inline]
    #[must_use]
    pub fn new(container: ContainerReference, name: impl Into<String>, kind: BlobKind) -> Self {
        Self {
            container,
            name: name.into(),
            kind,
        }
    }

    /// Owning container
    #[inline]
    #[must_use]
    pub fn container(&self) -> &ContainerReference {
        &self.container
    }

    /// Blob name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blob kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> BlobKind {
        self.kind
    }
}

impl Display for BlobReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.name)
    }
}

/// Client that only builds references for a named account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceClient {
    account: String,
}

impl ReferenceClient {
    /// Create client for account
    #[inline]
    #[must_use]
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }
}

impl BlobClient for ReferenceClient {
    fn account_name(&self) -> &str {
        &self.account
    }
}
