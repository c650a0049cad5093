//! Concrete storage paths
//!
//! Provides [`BlobPath`], the result of substituting values into a
//! [`PathTemplate`](crate::PathTemplate), and the storage naming rules.

use crate::error::PathError;
use std::fmt::{self, Display, Formatter};

/// Containers with reserved names that bypass the regular rules
const RESERVED_CONTAINERS: &[&str] = &["$root", "$logs", "$web"];

/// Maximum blob name length in characters
pub const MAX_BLOB_NAME_LEN: usize = 1024;

/// Fully substituted storage path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlobPath {
    /// A single blob
    Blob {
        /// Container name
        container: String,
        /// Blob name within the container
        name: String,
    },
    /// A container, optionally narrowed to a virtual directory
    Container {
        /// Container name
        container: String,
        /// Blob name prefix
        prefix: Option<String>,
    },
}

impl BlobPath {
    /// Container name
    #[inline]
    #[must_use]
    pub fn container(&self) -> &str {
        match self {
            Self::Blob { container, .. } | Self::Container { container, .. } => container,
        }
    }

    /// Blob name (blob paths only)
    #[inline]
    #[must_use]
    pub fn blob_name(&self) -> Option<&str> {
        match self {
            Self::Blob { name, .. } => Some(name),
            Self::Container { .. } => None,
        }
    }

    /// Directory prefix (container paths only)
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::Container { prefix, .. } => prefix.as_deref(),
            Self::Blob { .. } => None,
        }
    }

    /// Check if path names a container
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container { .. })
    }
}

impl Display for BlobPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob { container, name } => write!(f, "{container}/{name}"),
            Self::Container {
                container,
                prefix: Some(prefix),
            } => write!(f, "{container}/{prefix}"),
            Self::Container {
                container,
                prefix: None,
            } => f.write_str(container),
        }
    }
}

/// Check a container name against storage naming rules
///
/// 3-63 characters of lowercase letters, digits and single hyphens, starting and
/// ending with a letter or digit. `$root`, `$logs` and `$web` are accepted.
///
/// # Errors
/// `PathError::InvalidContainerName` with the violated rule
pub fn validate_container_name(name: &str) -> Result<(), PathError> {
    if RESERVED_CONTAINERS.contains(&name) {
        return Ok(());
    }

    let invalid = |reason| {
        Err(PathError::InvalidContainerName {
            name: name.to_string(),
            reason,
        })
    };

    if !(3..=63).contains(&name.len()) {
        return invalid("must be 3-63 characters long");
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return invalid("only lowercase letters, digits and hyphens are allowed");
    }
    if name.starts_with('-') || name.ends_with('-') {
        return invalid("must start and end with a letter or digit");
    }
    if name.contains("--") {
        return invalid("consecutive hyphens are not allowed");
    }
    Ok(())
}

/// Check a blob name against storage naming rules
///
/// # Errors
/// `PathError::InvalidBlobName` when empty or longer than [`MAX_BLOB_NAME_LEN`]
pub fn validate_blob_name(name: &str) -> Result<(), PathError> {
    let len = name.chars().count();
    if len == 0 {
        return Err(PathError::InvalidBlobName {
            name: name.to_string(),
            reason: "must not be empty",
        });
    }
    if len > MAX_BLOB_NAME_LEN {
        return Err(PathError::InvalidBlobName {
            name: name.to_string(),
            reason: "must be at most 1024 characters long",
        });
    }
    Ok(())
}
