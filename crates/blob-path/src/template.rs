//! Storage path templates
//!
//! Provides [`PathTemplate`]: a `container/item` pattern whose placeholders are
//! substituted at invocation time. Parsing only splits and tokenizes; deciding
//! whether the pattern names a blob or a container happens later through
//! [`PathTemplate::classify`].

use crate::contract::PlaceholderContract;
use crate::error::{ContractMismatchError, PathError};
use crate::placeholder::TemplateString;
use crate::resolved::{validate_blob_name, validate_container_name, BlobPath};
use crate::BindingData;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A trailing `.ext` with no slash after the dot
static EXTENSION_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[^/]+$").expect("extension pattern is valid"));

/// Final shape of a classified template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// Single blob
    Item,
    /// Container, directory or listing
    Container,
}

impl Display for PathKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => f.write_str("item"),
            Self::Container => f.write_str("container"),
        }
    }
}

/// Unsubstituted storage path
///
/// # Examples
/// - `logs/{date}/output.txt` → container `logs`, item `{date}/output.txt`
/// - `logs/{date}` classified as a container → container `logs`, prefix `{date}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    container: TemplateString,
    remainder: Option<TemplateString>,
    explicit_container: bool,
    kind: Option<PathKind>,
}

impl PathTemplate {
    /// Split a raw pattern on its first `/`
    ///
    /// # Errors
    /// - `PathError::Empty` for an empty pattern
    /// - placeholder syntax errors from either half
    /// - `PathError::InvalidContainerName` for a literal container name that
    ///   breaks naming rules
    pub fn parse(raw: &str, explicit_container: bool) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let (container_raw, remainder_raw) = match raw.split_once('/') {
            Some((container, rest)) => (container, Some(rest)),
            None => (raw, None),
        };

        let container = TemplateString::parse(container_raw)?;
        if let Some(name) = container.as_literal() {
            validate_container_name(&name)?;
        }

        let remainder = remainder_raw
            .filter(|rest| !rest.is_empty())
            .map(TemplateString::parse)
            .transpose()?;

        Ok(Self {
            raw: raw.to_string(),
            container,
            remainder,
            explicit_container,
            kind: None,
        })
    }

    /// Pattern as written (after name resolution)
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Container name pattern
    #[inline]
    #[must_use]
    pub fn container_pattern(&self) -> &TemplateString {
        &self.container
    }

    /// Blob name pattern
    ///
    /// `None` when the source declared an explicit container binding, when the
    /// template was classified as a container, or when no `/` was present.
    #[must_use]
    pub fn item_pattern(&self) -> Option<&TemplateString> {
        if self.explicit_container || self.kind == Some(PathKind::Container) {
            return None;
        }
        self.remainder.as_ref()
    }

    /// Virtual directory pattern of a container-shaped template
    #[must_use]
    pub fn prefix_pattern(&self) -> Option<&TemplateString> {
        if self.item_pattern().is_some() {
            return None;
        }
        self.remainder.as_ref()
    }

    /// Whether the annotation forced a container binding
    #[inline]
    #[must_use]
    pub fn is_explicit_container_binding(&self) -> bool {
        self.explicit_container
    }

    /// Classification, once made
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Option<PathKind> {
        self.kind
    }

    /// Whether the pattern ends like a file name (`\.[^/]+$`)
    ///
    /// Runs on the pattern with placeholder braces removed, so `{name}.csv`
    /// and `v1.{build}` both qualify while `logs/{date}` does not.
    #[must_use]
    pub fn has_extension_suffix(&self) -> bool {
        let mut flat = self.container.unbraced();
        if let Some(rest) = &self.remainder {
            flat.push('/');
            flat.push_str(&rest.unbraced());
        }
        EXTENSION_SUFFIX.is_match(&flat)
    }

    /// Fix the template's shape
    ///
    /// # Errors
    /// `PathError::MissingBlobName` when classifying as an item a pattern that
    /// has no blob part or is declared as an explicit container
    pub fn classify(mut self, kind: PathKind) -> Result<Self, PathError> {
        if kind == PathKind::Item {
            let Some(item) = self.remainder.as_ref().filter(|_| !self.explicit_container) else {
                return Err(PathError::MissingBlobName {
                    pattern: self.raw.clone(),
                });
            };
            if let Some(name) = item.as_literal() {
                validate_blob_name(&name)?;
            }
        }
        self.kind = Some(kind);
        Ok(self)
    }

    /// Unique placeholder names across both halves, in order of appearance
    #[must_use]
    pub fn placeholders(&self) -> IndexSet<&str> {
        self.container
            .placeholders()
            .chain(self.remainder.iter().flat_map(TemplateString::placeholders))
            .collect()
    }

    /// Check every placeholder against a trigger contract
    ///
    /// # Errors
    /// `ContractMismatchError` listing every name the contract lacks
    pub fn validate(&self, contract: &PlaceholderContract) -> Result<(), ContractMismatchError> {
        let missing = contract.missing(self.placeholders());
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ContractMismatchError::new(missing))
        }
    }

    /// Substitute invocation values into a concrete path
    ///
    /// Unclassified templates bind as items when they carry a blob part.
    ///
    /// # Errors
    /// - `PathError::MissingValue` for a placeholder without a value
    /// - naming-rule violations of the substituted names
    pub fn bind(&self, values: &BindingData) -> Result<BlobPath, PathError> {
        let container = self.container.render(values)?;
        validate_container_name(&container)?;

        if let Some(item) = self.item_pattern() {
            let name = item.render(values)?;
            validate_blob_name(&name)?;
            return Ok(BlobPath::Blob { container, name });
        }

        let prefix = self
            .prefix_pattern()
            .map(|p| p.render(values))
            .transpose()?;
        Ok(BlobPath::Container { container, prefix })
    }
}

impl Display for PathTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, &str)]) -> BindingData {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn parse_splits_on_first_slash() {
        let t = PathTemplate::parse("logs/{date}/output.txt", false).unwrap();
        assert_eq!(t.container_pattern().raw(), "logs");
        assert_eq!(t.item_pattern().unwrap().raw(), "{date}/output.txt");
        assert!(t.kind().is_none());
    }

    #[test]
    fn parse_container_only() {
        let t = PathTemplate::parse("logs", false).unwrap();
        assert!(t.item_pattern().is_none());
        assert!(t.prefix_pattern().is_none());

        let trailing = PathTemplate::parse("logs/", false).unwrap();
        assert!(trailing.item_pattern().is_none());
    }

    #[test]
    fn explicit_container_suppresses_item_pattern() {
        let t = PathTemplate::parse("logs/{date}", true).unwrap();
        assert!(t.is_explicit_container_binding());
        assert!(t.item_pattern().is_none());
        assert_eq!(t.prefix_pattern().unwrap().raw(), "{date}");
    }

    #[test]
    fn parse_rejects_bad_literal_container() {
        assert!(matches!(
            PathTemplate::parse("Logs/x.txt", false),
            Err(PathError::InvalidContainerName { .. })
        ));
        // Placeholder containers are checked at bind time
        assert!(PathTemplate::parse("{env}-logs/x.txt", false).is_ok());
    }

    #[test]
    fn parse_empty_fails() {
        assert_eq!(PathTemplate::parse("", false).unwrap_err(), PathError::Empty);
    }

    #[test]
    fn extension_suffix_detection() {
        let cases = [
            ("logs/{date}/output.txt", true),
            ("data/{name}.csv", true),
            ("data/{name}.{ext}", true),
            ("logs/{date}", false),
            ("logs", false),
            ("logs/v1.2/{date}", false),
        ];
        for (raw, expected) in cases {
            let t = PathTemplate::parse(raw, false).unwrap();
            assert_eq!(t.has_extension_suffix(), expected, "{raw}");
        }
    }

    #[test]
    fn classify_as_container_clears_item_pattern() {
        let t = PathTemplate::parse("logs/{date}", false)
            .unwrap()
            .classify(PathKind::Container)
            .unwrap();
        assert_eq!(t.kind(), Some(PathKind::Container));
        assert!(t.item_pattern().is_none());
        assert_eq!(t.prefix_pattern().unwrap().raw(), "{date}");
    }

    #[test]
    fn classify_item_requires_blob_name() {
        let err = PathTemplate::parse("logs", false)
            .unwrap()
            .classify(PathKind::Item)
            .unwrap_err();
        assert!(matches!(err, PathError::MissingBlobName { .. }));

        let explicit = PathTemplate::parse("logs/a.txt", true)
            .unwrap()
            .classify(PathKind::Item);
        assert!(explicit.is_err());
    }

    #[test]
    fn placeholders_are_unique_and_ordered() {
        let t = PathTemplate::parse("{env}/{date}/{env}-{name}.txt", false).unwrap();
        let names: Vec<_> = t.placeholders().into_iter().collect();
        assert_eq!(names, vec!["env", "date", "name"]);
    }

    #[test]
    fn validate_against_contract() {
        let t = PathTemplate::parse("logs/{missing}/file.csv", false).unwrap();
        let contract = PlaceholderContract::new().with("date");
        let err = t.validate(&contract).unwrap_err();
        assert_eq!(err.missing, vec!["missing".to_string()]);

        let ok = PathTemplate::parse("logs/{date}/file.csv", false).unwrap();
        assert!(ok.validate(&contract).is_ok());
    }

    #[test]
    fn bind_item() {
        let t = PathTemplate::parse("logs/{date}/output.txt", false)
            .unwrap()
            .classify(PathKind::Item)
            .unwrap();
        let path = t.bind(&values(&[("date", "2024-05-01")])).unwrap();
        assert_eq!(
            path,
            BlobPath::Blob {
                container: "logs".into(),
                name: "2024-05-01/output.txt".into()
            }
        );
    }

    #[test]
    fn bind_container_with_prefix() {
        let t = PathTemplate::parse("logs/{date}", false)
            .unwrap()
            .classify(PathKind::Container)
            .unwrap();
        let path = t.bind(&values(&[("date", "2024")])).unwrap();
        assert_eq!(path.container(), "logs");
        assert_eq!(path.prefix(), Some("2024"));
    }

    #[test]
    fn bind_validates_substituted_container() {
        let t = PathTemplate::parse("{box}/a.txt", false).unwrap();
        let err = t.bind(&values(&[("box", "UPPER")])).unwrap_err();
        assert!(matches!(err, PathError::InvalidContainerName { .. }));
    }
}
