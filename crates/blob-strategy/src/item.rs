//! Built-in item strategies
//!
//! In registry order:
//! 1. [`BlobReferenceStrategy`] for `CloudBlob`, `BlockBlob`, `PageBlob`
//! 2. [`StreamStrategy`]
//! 3. [`AccessCheckedStrategy`] for `CloudBlobStream`, `TextReader`,
//!    `TextWriter`, `String`, `Out<String>`

use crate::binding::{ArgumentBinding, BlobValueBinding};
use crate::strategy::{checked_access, ItemBindingStrategy, StrategyError};
use crate::types::{AccessMode, BlobKind, ParameterType};

const READ: &[AccessMode] = &[AccessMode::Read];
const WRITE: &[AccessMode] = &[AccessMode::Write];

/// Hands out a blob reference for an exact reference type; any access
#[derive(Debug, Clone)]
pub struct BlobReferenceStrategy {
    name: &'static str,
    value_type: ParameterType,
    kind: BlobKind,
}

impl BlobReferenceStrategy {
    /// `CloudBlob` (kind decided by the service)
    #[must_use]
    pub fn cloud_blob() -> Self {
        Self {
            name: "cloud_blob",
            value_type: ParameterType::CloudBlob,
            kind: BlobKind::Any,
        }
    }

    /// `BlockBlob`
    #[must_use]
    pub fn block_blob() -> Self {
        Self {
            name: "block_blob",
            value_type: ParameterType::BlockBlob,
            kind: BlobKind::Block,
        }
    }

    /// `PageBlob`
    #[must_use]
    pub fn page_blob() -> Self {
        Self {
            name: "page_blob",
            value_type: ParameterType::PageBlob,
            kind: BlobKind::Page,
        }
    }
}

impl ItemBindingStrategy for BlobReferenceStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
        access: Option<AccessMode>,
    ) -> Result<Option<Box<dyn ArgumentBinding>>, StrategyError> {
        if *parameter_type != self.value_type {
            return Ok(None);
        }
        Ok(Some(Box::new(BlobValueBinding::new(
            self.name,
            self.value_type.clone(),
            access.unwrap_or(AccessMode::ReadWrite),
            self.kind,
        ))))
    }
}

/// `Stream`: read by default, write on request, never both
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamStrategy;

impl ItemBindingStrategy for StreamStrategy {
    fn name(&self) -> &'static str {
        "stream"
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
        access: Option<AccessMode>,
    ) -> Result<Option<Box<dyn ArgumentBinding>>, StrategyError> {
        if *parameter_type != ParameterType::Stream {
            return Ok(None);
        }

        let (access, kind) = match access {
            None | Some(AccessMode::Read) => (AccessMode::Read, BlobKind::Any),
            Some(AccessMode::Write) => (AccessMode::Write, BlobKind::Block),
            Some(AccessMode::ReadWrite) => {
                return Err(StrategyError::UnsupportedAccess {
                    value_type: ParameterType::Stream,
                    access: AccessMode::ReadWrite,
                })
            }
        };
        Ok(Some(Box::new(BlobValueBinding::new(
            self.name(),
            ParameterType::Stream,
            access,
            kind,
        ))))
    }
}

/// Exact type match with a single permitted access mode
#[derive(Debug, Clone)]
pub struct AccessCheckedStrategy {
    name: &'static str,
    value_type: ParameterType,
    default: AccessMode,
    allowed: &'static [AccessMode],
}

impl AccessCheckedStrategy {
    /// `CloudBlobStream`, write only
    #[must_use]
    pub fn cloud_blob_stream() -> Self {
        Self::write_only("cloud_blob_stream", ParameterType::CloudBlobStream)
    }

    /// `TextReader`, read only
    #[must_use]
    pub fn text_reader() -> Self {
        Self::read_only("text_reader", ParameterType::TextReader)
    }

    /// `TextWriter`, write only
    #[must_use]
    pub fn text_writer() -> Self {
        Self::write_only("text_writer", ParameterType::TextWriter)
    }

    /// `String`, read only
    #[must_use]
    pub fn string() -> Self {
        Self::read_only("string", ParameterType::String)
    }

    /// `Out<String>`, write only
    #[must_use]
    pub fn out_string() -> Self {
        Self::write_only("out_string", ParameterType::out(ParameterType::String))
    }

    fn read_only(name: &'static str, value_type: ParameterType) -> Self {
        Self {
            name,
            value_type,
            default: AccessMode::Read,
            allowed: READ,
        }
    }

    fn write_only(name: &'static str, value_type: ParameterType) -> Self {
        Self {
            name,
            value_type,
            default: AccessMode::Write,
            allowed: WRITE,
        }
    }
}

impl ItemBindingStrategy for AccessCheckedStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn try_create(
        &self,
        parameter_type: &ParameterType,
        access: Option<AccessMode>,
    ) -> Result<Option<Box<dyn ArgumentBinding>>, StrategyError> {
        if *parameter_type != self.value_type {
            return Ok(None);
        }

        let access = checked_access(&self.value_type, access, self.default, self.allowed)?;
        let kind = if access == AccessMode::Write {
            BlobKind::Block
        } else {
            BlobKind::Any
        };
        Ok(Some(Box::new(BlobValueBinding::new(
            self.name,
            self.value_type.clone(),
            access,
            kind,
        ))))
    }
}

/// Built-in item strategies in precedence order
#[must_use]
pub fn builtin_item_strategies() -> Vec<Box<dyn ItemBindingStrategy>> {
    vec![
        Box::new(BlobReferenceStrategy::cloud_blob()),
        Box::new(BlobReferenceStrategy::block_blob()),
        Box::new(BlobReferenceStrategy::page_blob()),
        Box::new(StreamStrategy),
        Box::new(AccessCheckedStrategy::cloud_blob_stream()),
        Box::new(AccessCheckedStrategy::text_reader()),
        Box::new(AccessCheckedStrategy::text_writer()),
        Box::new(AccessCheckedStrategy::string()),
        Box::new(AccessCheckedStrategy::out_string()),
    ]
}
