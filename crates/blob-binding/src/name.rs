//! `%setting%` name resolution
//!
//! Path patterns may reference application settings as `%name%`; they are
//! replaced before the pattern is parsed. `%%` is a literal percent sign.

use crate::error::NameResolutionError;
use std::collections::HashMap;
use std::fmt::Debug;

/// Resolves setting references in a whole pattern string
pub trait NameResolver: Send + Sync + Debug {
    /// Replace every `%name%` token in `pattern`
    ///
    /// # Errors
    /// `NameResolutionError` for unknown settings or an unterminated token
    fn resolve_whole_string(&self, pattern: &str) -> Result<String, NameResolutionError>;
}

/// Resolver backed by a settings map
#[derive(Debug, Clone, Default)]
pub struct SettingsNameResolver {
    settings: HashMap<String, String>,
}

impl SettingsNameResolver {
    /// Create resolver from settings
    #[inline]
    #[must_use]
    pub fn new(settings: HashMap<String, String>) -> Self {
        Self { settings }
    }

    /// Add one setting
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(name.into(), value.into());
        self
    }
}

impl NameResolver for SettingsNameResolver {
    fn resolve_whole_string(&self, pattern: &str) -> Result<String, NameResolutionError> {
        let mut out = String::with_capacity(pattern.len());
        let mut rest = pattern;

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('%') else {
                return Err(NameResolutionError::Unterminated(pattern.to_string()));
            };

            let name = &after[..end];
            if name.is_empty() {
                out.push('%');
            } else {
                let value = self.settings.get(name).ok_or_else(|| {
                    NameResolutionError::UnknownSetting {
                        name: name.to_string(),
                        pattern: pattern.to_string(),
                    }
                })?;
                out.push_str(value);
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}
