//! Metadata to IR decoding.
//!
//! Turns a parsed `KmClass` node tree into an immutable `ClassDecl`:
//! - `type_ref`: one type node to a `TypeExpression`
//! - `type_param`: one type parameter to a `TypeVariable`
//! - `scope`: layered id to type variable tables
//! - `decode`: class, constructor, property and function shapes, plus the
//!   element and metadata-kind entry points
//!
//! Decoding is synchronous and fails fast on the first malformed or
//! unsupported node; no partial IR is ever returned.

pub mod error;
pub use error::DecodeError;

pub mod scope;
pub use scope::{TypeParameterLookup, TypeParameterScope};

pub mod type_ref;
pub use type_ref::TypeResolver;

pub mod type_param;
pub use type_param::resolve_type_parameter;

pub mod decode;
pub use decode::{DecodeOptions, decode_class, decode_class_with, decode_element, decode_metadata};
