//! Placeholder tokenizer
//!
//! Splits a pattern such as `{date}/out-{name}.csv` into literal and
//! placeholder [`Segment`]s. `{{` and `}}` stand for literal braces.

use crate::error::PathError;
use crate::BindingData;
use std::fmt::{self, Display, Formatter};

/// Fragment of a parsed pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal text (escapes already folded)
    Literal(String),
    /// `{name}`
    Placeholder(String),
}

/// A pattern string split into segments once, at parse time
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateString {
    raw: String,
    segments: Vec<Segment>,
}

impl TemplateString {
    /// Tokenize a raw pattern
    ///
    /// # Errors
    /// - `PathError::UnclosedPlaceholder` for `{name` without `}`
    /// - `PathError::UnmatchedBrace` for a stray `}`
    /// - `PathError::EmptyPlaceholder` / `PathError::InvalidPlaceholder` for bad names
    pub fn parse(raw: impl Into<String>) -> Result<Self, PathError> {
        let raw = raw.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.char_indices().peekable();

        while let Some((position, ch)) = chars.next() {
            match ch {
                '{' if chars.peek().map(|(_, c)| *c) == Some('{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().map(|(_, c)| *c) == Some('}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(PathError::UnclosedPlaceholder {
                            pattern: raw.clone(),
                            position,
                        });
                    }
                    check_name(&raw, &name)?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                '}' => {
                    return Err(PathError::UnmatchedBrace {
                        pattern: raw.clone(),
                        position,
                    });
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { raw, segments })
    }

    /// Pattern as written
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in order of appearance (duplicates included)
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether any placeholder occurs
    #[inline]
    #[must_use]
    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Literal text of a placeholder-free pattern
    #[must_use]
    pub fn as_literal(&self) -> Option<String> {
        if self.has_placeholders() {
            return None;
        }
        Some(self.unbraced())
    }

    /// Pattern with placeholder braces removed, names kept
    ///
    /// `{name}.csv` becomes `name.csv`.
    #[must_use]
    pub fn unbraced(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) | Segment::Placeholder(text) => text.as_str(),
            })
            .collect()
    }

    /// Substitute placeholder values
    ///
    /// # Errors
    /// `PathError::MissingValue` naming the first placeholder without a value
    pub fn render(&self, values: &BindingData) -> Result<String, PathError> {
        let mut out = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = values
                        .get(name)
                        .ok_or_else(|| PathError::MissingValue { name: name.clone() })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Whether the pattern is the empty string
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl Display for TemplateString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn check_name(pattern: &str, name: &str) -> Result<(), PathError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(PathError::EmptyPlaceholder {
            pattern: pattern.to_string(),
        });
    };

    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PathError::InvalidPlaceholder {
            pattern: pattern.to_string(),
            name: name.to_string(),
        })
    }
}
