//! Parameter type model
//!
//! Declared parameter types are values, not reflected types:
//! - [`ParameterType`]: the shape a function parameter asks for
//! - [`AccessMode`]: requested file access
//! - [`BlobKind`]: blob flavour a reference points at

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Declared type of a bound parameter
///
/// Parses from and displays as `Stream`, `Out<String>`, `Enumerable<TextReader>`
/// or a user type name such as `Order`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ParameterType {
    /// Blob reference of unspecified kind
    CloudBlob,
    /// Block blob reference
    BlockBlob,
    /// Page blob reference
    PageBlob,
    /// Byte stream
    Stream,
    /// Write stream that commits on completion
    CloudBlobStream,
    /// Text reader
    TextReader,
    /// Text writer
    TextWriter,
    /// Whole blob as text
    String,
    /// Container reference
    Container,
    /// Virtual directory reference
    Directory,
    /// User type handled by a registered converter
    Named(String),
    /// Output parameter
    Out(Box<ParameterType>),
    /// Listing of items
    Enumerable(Box<ParameterType>),
}

impl ParameterType {
    /// User type
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Output parameter of `inner`
    #[inline]
    #[must_use]
    pub fn out(inner: Self) -> Self {
        Self::Out(Box::new(inner))
    }

    /// Listing of `inner`
    #[inline]
    #[must_use]
    pub fn enumerable(inner: Self) -> Self {
        Self::Enumerable(Box::new(inner))
    }

    /// Check if this is an output parameter
    #[inline]
    #[must_use]
    pub fn is_out(&self) -> bool {
        matches!(self, Self::Out(_))
    }

    /// Element type of `Out<T>` or `Enumerable<T>`
    #[inline]
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self {
            Self::Out(inner) | Self::Enumerable(inner) => Some(inner),
            _ => None,
        }
    }

    fn builtin(name: &str) -> Option<Self> {
        Some(match name {
            "CloudBlob" => Self::CloudBlob,
            "BlockBlob" => Self::BlockBlob,
            "PageBlob" => Self::PageBlob,
            "Stream" => Self::Stream,
            "CloudBlobStream" => Self::CloudBlobStream,
            "TextReader" => Self::TextReader,
            "TextWriter" => Self::TextWriter,
            "String" => Self::String,
            "Container" => Self::Container,
            "Directory" => Self::Directory,
            _ => return None,
        })
    }
}

impl Display for ParameterType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CloudBlob => f.write_str("CloudBlob"),
            Self::BlockBlob => f.write_str("BlockBlob"),
            Self::PageBlob => f.write_str("PageBlob"),
            Self::Stream => f.write_str("Stream"),
            Self::CloudBlobStream => f.write_str("CloudBlobStream"),
            Self::TextReader => f.write_str("TextReader"),
            Self::TextWriter => f.write_str("TextWriter"),
            Self::String => f.write_str("String"),
            Self::Container => f.write_str("Container"),
            Self::Directory => f.write_str("Directory"),
            Self::Named(name) => f.write_str(name),
            Self::Out(inner) => write!(f, "Out<{inner}>"),
            Self::Enumerable(inner) => write!(f, "Enumerable<{inner}>"),
        }
    }
}

impl FromStr for ParameterType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let generic = |prefix: &str| {
            s.strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix('>'))
        };
        if let Some(inner) = generic("Out<") {
            return Ok(Self::out(inner.parse()?));
        }
        if let Some(inner) = generic("Enumerable<") {
            return Ok(Self::enumerable(inner.parse()?));
        }
        if let Some(builtin) = Self::builtin(s) {
            return Ok(builtin);
        }

        let valid = s.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
            && s.chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '.'));
        if valid {
            Ok(Self::Named(s.to_string()))
        } else {
            Err(TypeParseError(s.to_string()))
        }
    }
}

impl TryFrom<String> for ParameterType {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParameterType> for String {
    fn from(value: ParameterType) -> Self {
        value.to_string()
    }
}

/// Unparseable type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid parameter type: '{0}'")]
pub struct TypeParseError(pub String);

/// Requested file access on a blob parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Read only
    Read,
    /// Write only
    Write,
    /// Read and write
    ReadWrite,
}

impl Display for AccessMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("Read"),
            Self::Write => f.write_str("Write"),
            Self::ReadWrite => f.write_str("ReadWrite"),
        }
    }
}

/// Blob flavour behind a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobKind {
    /// Decided by the service
    #[default]
    Any,
    /// Block blob
    Block,
    /// Page blob
    Page,
}
