//! Placeholder contract supplied by a trigger
//!
//! Provides [`PlaceholderContract`]: the names guaranteed to have a value at
//! invocation time.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Set of placeholder names resolvable at invocation time
///
/// Keeps the trigger's declaration order for stable diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderContract {
    names: IndexSet<String>,
}

impl PlaceholderContract {
    /// Create empty contract
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name, returning the extended contract
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    /// Check if name is part of the contract
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if contract is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate names in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names from `candidates` absent from this contract, deduplicated, in order
    #[must_use]
    pub fn missing<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut missing: IndexSet<&str> = IndexSet::new();
        for name in candidates {
            if !self.contains(name) {
                missing.insert(name);
            }
        }
        missing.into_iter().map(str::to_string).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PlaceholderContract {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_new_empty() {
        let contract = PlaceholderContract::new();
        assert!(contract.is_empty());
        assert_eq!(contract.len(), 0);
    }

    #[test]
    fn contract_from_iter_dedups() {
        let contract: PlaceholderContract = ["date", "name", "date"].into_iter().collect();
        assert_eq!(contract.len(), 2);
        assert_eq!(contract.iter().collect::<Vec<_>>(), vec!["date", "name"]);
    }

    #[test]
    fn contract_missing_keeps_first_appearance_order() {
        let contract = PlaceholderContract::new().with("date");
        let missing = contract.missing(["b", "date", "a", "b"]);
        assert_eq!(missing, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn contract_deserializes_from_list() {
        let contract: PlaceholderContract = serde_json::from_str(r#"["date","name"]"#).unwrap();
        assert!(contract.contains("date"));
        assert!(contract.contains("name"));
    }
}
