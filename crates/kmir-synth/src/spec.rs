//! Structured declarations for generated code.
//!
//! Synthesized declarations are trees of spec objects rather than text. The
//! expression IR covers only what generated members need: names, member
//! access, calls with named arguments and a trailing lambda, and constructor
//! invocations. `Display` renders expressions in Kotlin notation for
//! diagnostics and tests.

use kmir_model::{ClassName, Modifier, TypeExpression, TypeVariable};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Expr {
    /// Identifier reference: `source`
    Name { name: String },

    /// `this`
    This,

    /// Implicit lambda parameter: `it`
    It,

    /// String literal: `"kmir"`
    StringLiteral { value: String },

    /// `arrayOf(..)` as written in annotation arguments: `["a", "b"]`
    ArrayLiteral { elements: Vec<Expr> },

    /// Member access: `source.bar`
    Member { receiver: Box<Expr>, name: String },

    /// Call: `receiver.function(a = b) { .. }`
    Call {
        receiver: Option<Box<Expr>>,
        function: String,
        arguments: Vec<Argument>,
        trailing_lambda: Option<Lambda>,
    },

    /// Constructor invocation: `FooDynamicBuilder(this)`
    Construct {
        #[serde(rename = "type")]
        ty: TypeExpression,
        arguments: Vec<Argument>,
    },
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral {
            value: value.into(),
        }
    }

    pub fn member(self, name: impl Into<String>) -> Self {
        Expr::Member {
            receiver: Box::new(self),
            name: name.into(),
        }
    }

    /// `self.function(arguments)`
    pub fn call(self, function: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Expr::Call {
            receiver: Some(Box::new(self)),
            function: function.into(),
            arguments,
            trailing_lambda: None,
        }
    }

    /// `self.function { body }`
    pub fn call_with_lambda(self, function: impl Into<String>, lambda: Lambda) -> Self {
        Expr::Call {
            receiver: Some(Box::new(self)),
            function: function.into(),
            arguments: Vec::new(),
            trailing_lambda: Some(lambda),
        }
    }

    /// Call without a receiver: `function(arguments)`
    pub fn invoke(function: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Expr::Call {
            receiver: None,
            function: function.into(),
            arguments,
            trailing_lambda: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    /// Set for named arguments.
    pub name: Option<String>,
    pub value: Expr,
}

impl Argument {
    pub fn positional(value: Expr) -> Self {
        Argument { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Argument {
            name: Some(name.into()),
            value,
        }
    }
}

/// Lambda literal with an implicit `it` parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lambda {
    pub body: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "expr", rename_all = "camelCase")]
pub enum Statement {
    Expr(Expr),
    Return(Expr),
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSpec {
    #[serde(rename = "type")]
    pub ty: ClassName,
    pub members: Vec<AnnotationMember>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationMember {
    pub name: String,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpression,
    pub modifiers: Vec<Modifier>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpression,
    pub mutable: bool,
    pub modifiers: Vec<Modifier>,
    pub initializer: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunSpec {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationSpec>,
    pub type_variables: Vec<Arc<TypeVariable>>,
    pub receiver: Option<TypeExpression>,
    pub parameters: Vec<ParameterSpec>,
    /// `None` means `Unit`.
    pub return_type: Option<TypeExpression>,
    pub body: Vec<Statement>,
}

impl FunSpec {
    pub const CONSTRUCTOR: &'static str = "constructor";

    pub fn new(name: impl Into<String>) -> Self {
        FunSpec {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            type_variables: Vec::new(),
            receiver: None,
            parameters: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn constructor() -> Self {
        FunSpec::new(FunSpec::CONSTRUCTOR)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == FunSpec::CONSTRUCTOR
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A class declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSpec {
    pub name: ClassName,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationSpec>,
    pub type_variables: Vec<Arc<TypeVariable>>,
    pub primary_constructor: Option<FunSpec>,
    pub properties: Vec<PropertySpec>,
    pub functions: Vec<FunSpec>,
}

impl TypeSpec {
    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&FunSpec> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// One generated file: the builder type and its extension entry point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedFile {
    pub package_name: String,
    pub file_name: String,
    pub comment: String,
    pub builder: TypeSpec,
    pub extension: FunSpec,
}

// =============================================================================
// Kotlin notation
// =============================================================================

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Name { name } => f.write_str(name),
            Expr::This => f.write_str("this"),
            Expr::It => f.write_str("it"),
            Expr::StringLiteral { value } => write!(f, "{value:?}"),
            Expr::ArrayLiteral { elements } => {
                f.write_str("[")?;
                write_joined(f, elements)?;
                f.write_str("]")
            }
            Expr::Member { receiver, name } => write!(f, "{receiver}.{name}"),
            Expr::Call {
                receiver,
                function,
                arguments,
                trailing_lambda,
            } => {
                if let Some(receiver) = receiver {
                    write!(f, "{receiver}.")?;
                }
                f.write_str(function)?;
                if !arguments.is_empty() || trailing_lambda.is_none() {
                    f.write_str("(")?;
                    write_joined(f, arguments)?;
                    f.write_str(")")?;
                }
                if let Some(lambda) = trailing_lambda {
                    write!(f, " {lambda}")?;
                }
                Ok(())
            }
            Expr::Construct { ty, arguments } => {
                write!(f, "{ty}(")?;
                write_joined(f, arguments)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} = {}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, statement) in self.body.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{statement}")?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Expr(expr) => write!(f, "{expr}"),
            Statement::Return(expr) => write!(f, "return {expr}"),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
