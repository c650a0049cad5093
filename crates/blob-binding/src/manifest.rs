//! Index manifests
//!
//! A manifest lists functions, the placeholder names their trigger supplies,
//! and their parameters:
//!
//! ```toml
//! [[functions]]
//! name = "archive_logs"
//! contract = ["date"]
//!
//! [[functions.parameters]]
//! name = "output"
//! type = "TextWriter"
//! blob = { path = "logs/{date}/output.txt" }
//! ```

use crate::binding::{Binding, BindingSummary};
use crate::config::{ConfigError, ResolverConfig};
use crate::descriptor::ParameterDescriptor;
use crate::error::ResolveError;
use crate::resolver::BindingResolver;
use blob_path::PlaceholderContract;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Functions to index, with optional resolver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexManifest {
    /// Resolver configuration
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Functions in declaration order
    #[serde(default)]
    pub functions: Vec<FunctionManifest>,
}

/// One function's binding metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionManifest {
    /// Function name
    pub name: String,
    /// Placeholder names supplied by the trigger
    #[serde(default)]
    pub contract: PlaceholderContract,
    /// Declared parameters
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl IndexManifest {
    /// Parse TOML text
    ///
    /// # Errors
    /// `ConfigError::Parse` for malformed TOML
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML file
    ///
    /// # Errors
    /// `ConfigError` when the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Resolve every parameter of every function
    pub async fn index(&self, resolver: &BindingResolver, cancel: &CancellationToken) -> IndexReport {
        let mut functions = Vec::with_capacity(self.functions.len());
        for function in &self.functions {
            let results = resolver
                .resolve_all(&function.parameters, &function.contract, cancel)
                .await;
            let parameters = function
                .parameters
                .iter()
                .zip(results)
                .map(|(parameter, result)| ParameterOutcome::from_result(parameter, result))
                .collect();
            functions.push(FunctionReport {
                name: function.name.clone(),
                parameters,
            });
        }
        IndexReport { functions }
    }
}

/// Indexing result for a manifest
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    /// Per-function results, in manifest order
    pub functions: Vec<FunctionReport>,
}

impl IndexReport {
    /// Number of failed parameters
    #[must_use]
    pub fn failures(&self) -> usize {
        self.functions
            .iter()
            .flat_map(|f| &f.parameters)
            .filter(|p| matches!(p, ParameterOutcome::Failed { .. }))
            .count()
    }

    /// Check if every parameter resolved or was skipped
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures() == 0
    }

    /// Plain text rendering
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut out = String::new();
        for function in &self.functions {
            let _ = writeln!(out, "{}", function.name);
            for parameter in &function.parameters {
                let line = match parameter {
                    ParameterOutcome::Bound(summary) => format!(
                        "  {} -> {} {}/{} via {} ({})",
                        summary.parameter,
                        summary.kind,
                        summary.container_pattern,
                        summary
                            .blob_pattern
                            .as_deref()
                            .or(summary.prefix_pattern.as_deref())
                            .unwrap_or(""),
                        summary.strategy,
                        summary.access,
                    ),
                    ParameterOutcome::Skipped { parameter } => {
                        format!("  {parameter} -> not a blob parameter")
                    }
                    ParameterOutcome::Failed { parameter, error } => {
                        format!("  {parameter} -> FAILED: {error}")
                    }
                };
                let _ = writeln!(out, "{line}");
            }
        }
        let _ = writeln!(out, "failures: {}", self.failures());
        out
    }
}

/// Indexing result for one function
#[derive(Debug, Clone, Serialize)]
pub struct FunctionReport {
    /// Function name
    pub name: String,
    /// Per-parameter outcomes, in declaration order
    pub parameters: Vec<ParameterOutcome>,
}

/// Outcome of resolving one parameter
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParameterOutcome {
    /// Resolved to a blob binding
    Bound(BindingSummary),
    /// No blob annotation
    Skipped { parameter: String },
    /// Resolution failed
    Failed { parameter: String, error: String },
}

impl ParameterOutcome {
    fn from_result(
        parameter: &ParameterDescriptor,
        result: Result<Option<Binding>, ResolveError>,
    ) -> Self {
        match result {
            Ok(Some(binding)) => Self::Bound(binding.describe()),
            Ok(None) => Self::Skipped {
                parameter: parameter.name.clone(),
            },
            Err(err) => Self::Failed {
                parameter: parameter.name.clone(),
                error: err.to_string(),
            },
        }
    }
}
