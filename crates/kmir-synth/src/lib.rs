//! Declaration synthesis from decoded class IR.
//!
//! Given a `ClassDecl` with a primary constructor, builds a
//! `<Name>DynamicBuilder` type with one mutable property per constructor
//! parameter and a `copyDynamic` extension that runs a configuration block
//! against the builder. Output is a structured `SynthesizedFile`; turning it
//! into Kotlin source is left to the host.

pub mod error;
pub use error::SynthesisError;

pub mod name_allocator;
pub use name_allocator::NameAllocator;

pub mod spec;
pub use spec::{
    AnnotationMember, AnnotationSpec, Argument, Expr, FunSpec, Lambda, ParameterSpec,
    PropertySpec, Statement, SynthesizedFile, TypeSpec,
};

pub mod options;
pub use options::{GeneratedAnnotation, SynthOptions};

pub mod copy_builder;
pub use copy_builder::{BUILDER_SUFFIX, EXTENSION_NAME, builder_class_name, synthesize};
