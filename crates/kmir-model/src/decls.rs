//! Declaration nodes.

use crate::modifiers::{self, Modifier};
use crate::names::ClassName;
use crate::types::{TypeArgument, TypeExpression, TypeVariable};
use kmir_metadata::{ClassKind, Flags, Visibility};
use serde::Serialize;
use std::sync::Arc;

/// Common surface of every declaration node.
pub trait Declaration {
    fn flags(&self) -> Flags;

    fn name(&self) -> &str;

    fn visibility(&self) -> Visibility {
        self.flags().visibility()
    }

    /// Source modifiers implied by the node's flags, in declaration order.
    fn modifiers(&self) -> Vec<Modifier>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    pub flags: Flags,
    pub name: ClassName,
    pub kind: ClassKind,
    pub type_parameters: Vec<Arc<TypeVariable>>,
    /// `kotlin.Any` when the class declares no supertypes.
    pub superclass: TypeExpression,
    pub superinterfaces: Vec<TypeExpression>,
    pub constructors: Vec<ConstructorDecl>,
    pub properties: Vec<PropertyDecl>,
    pub functions: Vec<FunctionDecl>,
    pub companion_object_name: Option<String>,
    pub enum_entries: Vec<String>,
    pub nested_class_names: Vec<String>,
    pub sealed_subclasses: Vec<ClassName>,
}

impl ClassDecl {
    pub fn primary_constructor(&self) -> Option<&ConstructorDecl> {
        self.constructors.iter().find(|c| c.is_primary())
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn is_data(&self) -> bool {
        self.flags.is_data_class()
    }

    /// The class applied to its own type parameters: `Foo<T, R>`.
    pub fn as_type(&self) -> TypeExpression {
        let arguments = self
            .type_parameters
            .iter()
            .map(|tv| TypeArgument::invariant(TypeExpression::variable(Arc::clone(tv))))
            .collect();
        TypeExpression::parameterized(self.name.clone(), arguments)
    }
}

impl Declaration for ClassDecl {
    fn flags(&self) -> Flags {
        self.flags
    }
    fn name(&self) -> &str {
        self.name.simple_name()
    }
    fn modifiers(&self) -> Vec<Modifier> {
        modifiers::class_modifiers(self.flags)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorDecl {
    pub flags: Flags,
    pub parameters: Vec<Parameter>,
}

impl ConstructorDecl {
    pub fn is_primary(&self) -> bool {
        self.flags.is_primary_constructor()
    }
}

impl Declaration for ConstructorDecl {
    fn flags(&self) -> Flags {
        self.flags
    }
    fn name(&self) -> &str {
        "constructor"
    }
    fn modifiers(&self) -> Vec<Modifier> {
        vec![Modifier::from(self.flags.visibility())]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDecl {
    pub flags: Flags,
    pub name: String,
    pub type_parameters: Vec<Arc<TypeVariable>>,
    pub receiver_type: Option<TypeExpression>,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeExpression,
}

impl Declaration for FunctionDecl {
    fn flags(&self) -> Flags {
        self.flags
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn modifiers(&self) -> Vec<Modifier> {
        modifiers::function_modifiers(self.flags)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDecl {
    pub flags: Flags,
    pub name: String,
    pub type_parameters: Vec<Arc<TypeVariable>>,
    pub receiver_type: Option<TypeExpression>,
    #[serde(rename = "type")]
    pub ty: TypeExpression,
    pub getter_flags: Flags,
    /// Present for `var` properties only.
    pub setter_flags: Option<Flags>,
}

impl PropertyDecl {
    pub fn is_mutable(&self) -> bool {
        self.flags.is_var_property()
    }

    pub fn getter_modifiers(&self) -> Vec<Modifier> {
        modifiers::accessor_modifiers(self.getter_flags, self.flags)
    }

    /// `None` for `val` properties.
    pub fn setter_modifiers(&self) -> Option<Vec<Modifier>> {
        self.setter_flags
            .map(|setter| modifiers::accessor_modifiers(setter, self.flags))
    }
}

impl Declaration for PropertyDecl {
    fn flags(&self) -> Flags {
        self.flags
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn modifiers(&self) -> Vec<Modifier> {
        modifiers::property_modifiers(self.flags)
    }
}

/// A value parameter. Exactly one of `ty` and `vararg_element_type` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub flags: Flags,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<TypeExpression>,
    pub vararg_element_type: Option<TypeExpression>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeExpression) -> Self {
        Parameter {
            flags: Flags::empty(),
            name: name.into(),
            ty: Some(ty),
            vararg_element_type: None,
        }
    }

    pub fn vararg(name: impl Into<String>, element_type: TypeExpression) -> Self {
        Parameter {
            flags: Flags::empty(),
            name: name.into(),
            ty: None,
            vararg_element_type: Some(element_type),
        }
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_vararg(&self) -> bool {
        self.vararg_element_type.is_some()
    }

    /// The written type: the element type for varargs.
    pub fn declared_type(&self) -> Option<&TypeExpression> {
        self.vararg_element_type.as_ref().or(self.ty.as_ref())
    }

    pub fn declares_default_value(&self) -> bool {
        self.flags.declares_default_value()
    }
}

impl Declaration for Parameter {
    fn flags(&self) -> Flags {
        self.flags
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn modifiers(&self) -> Vec<Modifier> {
        modifiers::parameter_modifiers(self.flags, self.is_vararg())
    }
}

#[cfg(test)]
#[path = "../tests/decls_tests.rs"]
mod tests;
