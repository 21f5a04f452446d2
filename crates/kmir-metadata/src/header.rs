//! Raw metadata header and kind dispatch.
//!
//! A compiled Kotlin class carries a `@kotlin.Metadata` annotation. Its
//! arguments are mirrored by [`KotlinClassHeader`]; an external reader turns
//! a header into a [`KotlinClassMetadata`], of which only the class kind is of
//! interest to kmir.

use crate::nodes::KmClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Oldest metadata version the node tree layout is defined for.
pub const MIN_METADATA_VERSION: [u32; 2] = [1, 1];

/// The arguments of a `@kotlin.Metadata` annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KotlinClassHeader {
    /// `k`
    pub kind: i32,
    /// `mv`
    pub metadata_version: Vec<u32>,
    /// `bv`
    pub bytecode_version: Vec<u32>,
    /// `d1`
    pub data1: Vec<String>,
    /// `d2`
    pub data2: Vec<String>,
    /// `xs`
    pub extra_string: Option<String>,
    /// `pn`
    pub package_name: Option<String>,
    /// `xi`
    pub extra_int: i32,
}

impl KotlinClassHeader {
    pub fn new(kind: i32, metadata_version: &[u32]) -> Self {
        KotlinClassHeader {
            kind,
            metadata_version: metadata_version.to_vec(),
            ..KotlinClassHeader::default()
        }
    }

    pub fn metadata_kind(&self) -> MetadataKind {
        MetadataKind::from_raw(self.kind)
    }

    /// Compare the first two version components against [`MIN_METADATA_VERSION`].
    /// Missing components count as zero.
    pub fn is_supported_version(&self) -> bool {
        let major = self.metadata_version.first().copied().unwrap_or(0);
        let minor = self.metadata_version.get(1).copied().unwrap_or(0);
        (major, minor) >= (MIN_METADATA_VERSION[0], MIN_METADATA_VERSION[1])
    }

    pub fn version_string(&self) -> String {
        self.metadata_version
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Metadata kind, from the `k` argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataKind {
    Class,
    FileFacade,
    SyntheticClass,
    MultiFileClassFacade,
    MultiFileClassPart,
    Unknown(i32),
}

impl MetadataKind {
    pub fn from_raw(kind: i32) -> Self {
        match kind {
            1 => MetadataKind::Class,
            2 => MetadataKind::FileFacade,
            3 => MetadataKind::SyntheticClass,
            4 => MetadataKind::MultiFileClassFacade,
            5 => MetadataKind::MultiFileClassPart,
            other => MetadataKind::Unknown(other),
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataKind::Class => f.write_str("class"),
            MetadataKind::FileFacade => f.write_str("file facade"),
            MetadataKind::SyntheticClass => f.write_str("synthetic class"),
            MetadataKind::MultiFileClassFacade => f.write_str("multi-file class facade"),
            MetadataKind::MultiFileClassPart => f.write_str("multi-file class part"),
            MetadataKind::Unknown(kind) => write!(f, "unknown kind {kind}"),
        }
    }
}

/// What a reader produces for a header.
#[derive(Clone, Debug, PartialEq)]
pub enum KotlinClassMetadata {
    Class(KmClass),
    FileFacade,
    SyntheticClass,
    MultiFileClassFacade { part_class_names: Vec<String> },
    MultiFileClassPart { facade_class_name: String },
    Unknown(i32),
}

impl KotlinClassMetadata {
    pub fn kind(&self) -> MetadataKind {
        match self {
            KotlinClassMetadata::Class(_) => MetadataKind::Class,
            KotlinClassMetadata::FileFacade => MetadataKind::FileFacade,
            KotlinClassMetadata::SyntheticClass => MetadataKind::SyntheticClass,
            KotlinClassMetadata::MultiFileClassFacade { .. } => MetadataKind::MultiFileClassFacade,
            KotlinClassMetadata::MultiFileClassPart { .. } => MetadataKind::MultiFileClassPart,
            KotlinClassMetadata::Unknown(kind) => MetadataKind::Unknown(*kind),
        }
    }

    pub fn into_class(self) -> Option<KmClass> {
        match self {
            KotlinClassMetadata::Class(class) => Some(class),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("metadata version {found} is older than the supported minimum 1.1")]
    UnsupportedMetadataVersion { found: String },

    #[error("corrupt metadata payload: {0}")]
    Corrupt(String),
}

// =============================================================================
// Host seams
// =============================================================================

/// Turns a header into a node tree. Provided by the host; kmir does not
/// decode the wire format itself.
pub trait MetadataReader {
    fn read(&self, header: &KotlinClassHeader) -> Result<KotlinClassMetadata, MetadataError>;
}

impl<F> MetadataReader for F
where
    F: Fn(&KotlinClassHeader) -> Result<KotlinClassMetadata, MetadataError>,
{
    fn read(&self, header: &KotlinClassHeader) -> Result<KotlinClassMetadata, MetadataError> {
        self(header)
    }
}

/// A program element that may carry a metadata annotation.
pub trait AnnotatedElement {
    /// Fully qualified name, used for diagnostics.
    fn qualified_name(&self) -> &str;

    fn metadata_header(&self) -> Option<&KotlinClassHeader>;
}

#[cfg(test)]
#[path = "../tests/header_tests.rs"]
mod tests;
