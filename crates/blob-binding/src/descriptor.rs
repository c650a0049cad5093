//! Parameter descriptors
//!
//! What the indexer knows about one function parameter: its name, declared
//! type and, when present, the blob annotation.

use blob_strategy::{AccessMode, ParameterType};
use serde::{Deserialize, Serialize};

/// Blob annotation on a parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobAttribute {
    /// Raw path pattern, e.g. `logs/{date}/output.txt`
    pub path: String,
    /// Requested access, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessMode>,
    /// Forces a container binding
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub explicit_container: bool,
}

impl BlobAttribute {
    /// Create annotation for a path
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            access: None,
            explicit_container: false,
        }
    }

    /// Request an access mode
    #[inline]
    #[must_use]
    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = Some(access);
        self
    }

    /// Mark as explicit container binding
    #[inline]
    #[must_use]
    pub fn container(mut self) -> Self {
        self.explicit_container = true;
        self
    }
}

/// One function parameter as seen by the indexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    /// Blob annotation; `None` means another binding kind owns the parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<BlobAttribute>,
}

impl ParameterDescriptor {
    /// Create unannotated descriptor
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            blob: None,
        }
    }

    /// Attach a blob annotation
    #[inline]
    #[must_use]
    pub fn with_blob(mut self, blob: BlobAttribute) -> Self {
        self.blob = Some(blob);
        self
    }

    /// Requested access, if annotated
    #[inline]
    #[must_use]
    pub fn access(&self) -> Option<AccessMode> {
        self.blob.as_ref().and_then(|b| b.access)
    }
}
