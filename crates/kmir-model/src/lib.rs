//! Typed intermediate representation of decoded Kotlin declarations.
//!
//! This crate provides:
//! - Qualified class names (`ClassName`)
//! - The recursive type model (`TypeExpression`, `TypeArgument`, `TypeVariable`)
//! - Declaration nodes (`ClassDecl`, `ConstructorDecl`, `FunctionDecl`, `PropertyDecl`, `Parameter`)
//! - Source modifiers derived from declaration flags (`Modifier`)
//! - Failure families reported by downstream crates (`ErrorCategory`)
//!
//! Every node is immutable once built and `Send + Sync`. Type variables are
//! shared through `Arc`, so all references to one declared parameter point at
//! the same allocation.

// Qualified names
pub mod names;
pub use names::ClassName;

// Type expressions and type variables
pub mod types;
pub use types::{TypeArgument, TypeExpression, TypeVariable, Variance, WildcardKind};

// Declaration nodes
pub mod decls;
pub use decls::{
    ClassDecl, ConstructorDecl, Declaration, FunctionDecl, Parameter, PropertyDecl,
};

// Modifier derivation
pub mod modifiers;
pub use modifiers::Modifier;

// Failure families
pub mod category;
pub use category::ErrorCategory;

pub use kmir_metadata::{ClassKind, Flags, Modality, Visibility};
