//! Parsed Kotlin declaration metadata.
//!
//! This crate is the boundary between kmir and whatever library turns the raw
//! `@kotlin.Metadata` annotation payload into a typed node tree. It provides:
//! - Flag predicates over the per-node flag word (`Flags`, `Visibility`, `Modality`)
//! - The already-decoded node tree (`KmClass`, `KmType`, ...)
//! - The header and kind dispatch surface (`KotlinClassHeader`, `KotlinClassMetadata`)
//! - The seams a host implements (`MetadataReader`, `AnnotatedElement`)

// Flag word and predicates
pub mod flags;
pub use flags::{ClassKind, Flags, Modality, Visibility};

// Decoded declaration nodes
pub mod nodes;
pub use nodes::{
    KmClass, KmClassifier, KmConstructor, KmFlexibleTypeUpperBound, KmFunction, KmProperty,
    KmType, KmTypeParameter, KmTypeProjection, KmValueParameter, KmVariance,
};

// Header, metadata kinds and reader seams
pub mod header;
pub use header::{
    AnnotatedElement, KotlinClassHeader, KotlinClassMetadata, MetadataError, MetadataKind,
    MetadataReader,
};
