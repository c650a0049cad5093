//! Blob path templates
//!
//! Storage path patterns with named placeholders, as written on a function
//! parameter (`container/{date}/{name}.csv`).
//!
//! # Core Concepts
//!
//! - [`PathTemplate`]: container and item patterns split on the first `/`
//! - [`TemplateString`]: tokenized pattern with `{name}` placeholders
//! - [`PlaceholderContract`]: names a trigger can supply at invocation time
//! - [`BlobPath`]: concrete path after substitution
//!
//! # Example
//!
//! ```rust,ignore
//! use blob_path::{PathTemplate, PlaceholderContract};
//!
//! let template = PathTemplate::parse("logs/{date}/output.txt", false)?;
//! let contract = PlaceholderContract::new().with("date");
//! template.validate(&contract)?;
//! assert!(template.has_extension_suffix());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod contract;
mod error;
mod placeholder;
mod resolved;
mod template;

use std::collections::HashMap;

pub use contract::PlaceholderContract;
pub use error::{ContractMismatchError, PathError};
pub use placeholder::{Segment, TemplateString};
pub use resolved::{validate_blob_name, validate_container_name, BlobPath, MAX_BLOB_NAME_LEN};
pub use template::{PathKind, PathTemplate};

/// Placeholder values available at invocation time
pub type BindingData = HashMap<String, String>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
