//! Blob Binding Resolution
//!
//! Decides, once per function parameter at indexing time, whether a
//! blob-annotated parameter binds to a single blob or to a container, and
//! which strategy materializes its value.
//!
//! # Architecture
//!
//! ```text
//! ParameterDescriptor
//!        │
//!        ▼
//! ┌───────────────────────────────────────────────┐
//! │ BindingResolver                               │
//! │  %setting% → client → classify → contract     │
//! │                 │         │                   │
//! │                 │    Disambiguator            │
//! │                 │   (container registry,      │
//! │                 │    `.ext` heuristic,        │
//! │                 │    item registry)           │
//! └─────────────────┼─────────────────────────────┘
//!                   ▼
//!               Binding ── bind(values) ──► BoundArgument
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use blob_binding::prelude::*;
//!
//! let resolver = BindingResolver::new(Arc::new(StaticAccountProvider::for_account("devstore")));
//! let output = ParameterDescriptor::new("output", ParameterType::TextWriter)
//!     .with_blob(BlobAttribute::new("logs/{date}/output.txt"));
//! let contract = PlaceholderContract::new().with("date");
//!
//! let binding = resolver
//!     .resolve(&output, &contract, &CancellationToken::new())
//!     .await?
//!     .expect("annotated");
//! assert_eq!(binding.kind(), PathKind::Item);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod account;
mod binding;
mod config;
mod descriptor;
mod disambiguate;
mod error;
mod manifest;
mod name;
mod resolver;

pub use account::{StaticAccountProvider, StorageAccountProvider};
pub use binding::{Binding, BindingStrategy, BindingSummary, BoundArgument};
pub use config::{ConfigError, ResolverConfig, DEFAULT_ACCOUNT};
pub use descriptor::{BlobAttribute, ParameterDescriptor};
pub use disambiguate::Disambiguator;
pub use error::{AccountError, MaterializeError, NameResolutionError, ResolveError};
pub use manifest::{FunctionManifest, FunctionReport, IndexManifest, IndexReport, ParameterOutcome};
pub use name::{NameResolver, SettingsNameResolver};
pub use resolver::{BindingResolver, BindingResolverBuilder};

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::{
        BindingResolver, BlobAttribute, Binding, ParameterDescriptor, ResolveError,
        StaticAccountProvider, StorageAccountProvider,
    };
    pub use blob_path::{BindingData, PathKind, PathTemplate, PlaceholderContract};
    pub use blob_strategy::{AccessMode, BlobClient, ParameterType};
    pub use std::sync::Arc;
    pub use tokio_util::sync::CancellationToken;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;

    #[tokio::test]
    async fn resolve_then_bind_round_trip() {
        let resolver =
            BindingResolver::new(Arc::new(StaticAccountProvider::for_account("devstore")));
        let output = ParameterDescriptor::new("output", ParameterType::TextWriter)
            .with_blob(BlobAttribute::new("logs/{date}/output.txt"));
        let contract = PlaceholderContract::new().with("date");

        let binding = resolver
            .resolve(&output, &contract, &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(binding.kind(), PathKind::Item);

        let values = BindingData::from([("date".to_string(), "2024-05-01".to_string())]);
        let bound = binding.bind(&values).unwrap();
        assert_eq!(bound.path.blob_name(), Some("2024-05-01/output.txt"));
        assert_eq!(bound.value.access(), AccessMode::Write);
    }
}
