//! Type expressions.
//!
//! `TypeExpression` is the recursive type model produced by the decoder.
//! Nullability is carried at every level, so `List<String?>?` has a nullable
//! flag on both the outer `Named` and its argument.
//!
//! References to a declared type parameter hold the parameter's `Arc`
//! directly. Structural equality compares the referenced variable by value;
//! use [`TypeExpression::same_variable`] (or `Arc::ptr_eq`) when identity
//! matters.

use crate::names::ClassName;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Projection variance of a type argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    In,
    Out,
    Invariant,
    Star,
}

impl Variance {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Variance::In => Some("in"),
            Variance::Out => Some("out"),
            Variance::Invariant | Variance::Star => None,
        }
    }
}

/// Direction of a wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WildcardKind {
    /// `out T`, also used for flexible (platform) types.
    Producer,
    /// `in T`, also used for the enclosing type of an inner class.
    Consumer,
    Star,
}

/// A declared type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeVariable {
    pub name: String,
    /// Unique within the declaring scope.
    pub id: u32,
    /// `Some(In)` for `in` parameters. `out` is implied at the declaration
    /// site and is never stored, nor is invariance.
    pub variance: Option<Variance>,
    pub upper_bounds: Vec<TypeExpression>,
    pub reified: bool,
}

impl TypeVariable {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        TypeVariable {
            name: name.into(),
            id,
            variance: None,
            upper_bounds: Vec::new(),
            reified: false,
        }
    }
}

/// A type argument of a `Named` type. `ty` is `None` only for stars.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeArgument {
    pub variance: Variance,
    #[serde(rename = "type")]
    pub ty: Option<TypeExpression>,
}

impl TypeArgument {
    pub fn invariant(ty: TypeExpression) -> Self {
        TypeArgument {
            variance: Variance::Invariant,
            ty: Some(ty),
        }
    }

    /// `out T`
    pub fn covariant(ty: TypeExpression) -> Self {
        TypeArgument {
            variance: Variance::Out,
            ty: Some(ty),
        }
    }

    /// `in T`
    pub fn contravariant(ty: TypeExpression) -> Self {
        TypeArgument {
            variance: Variance::In,
            ty: Some(ty),
        }
    }

    pub fn star() -> Self {
        TypeArgument {
            variance: Variance::Star,
            ty: None,
        }
    }

    pub fn is_star(&self) -> bool {
        self.variance == Variance::Star
    }

    /// Reinterpret the argument as a standalone type, turning projections
    /// into wildcards. Used when function-type arguments become parameters.
    pub fn into_type_expression(self) -> TypeExpression {
        match (self.variance, self.ty) {
            (Variance::Invariant, Some(ty)) => ty,
            (Variance::Out, Some(ty)) => TypeExpression::producer_of(ty),
            (Variance::In, Some(ty)) => TypeExpression::consumer_of(ty),
            _ => TypeExpression::star(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TypeExpression {
    /// A class, interface or type alias, with its arguments.
    Named {
        name: ClassName,
        arguments: Vec<TypeArgument>,
        nullable: bool,
    },
    /// A reference to a declared type parameter.
    TypeVariable {
        variable: Arc<TypeVariable>,
        nullable: bool,
    },
    /// `suspend R.(A, B) -> C`
    Function {
        receiver: Option<Box<TypeExpression>>,
        parameters: Vec<TypeExpression>,
        return_type: Box<TypeExpression>,
        is_suspend: bool,
        nullable: bool,
    },
    Wildcard {
        bound: Option<Box<TypeExpression>>,
        direction: WildcardKind,
        nullable: bool,
    },
}

impl TypeExpression {
    pub fn named(name: ClassName) -> Self {
        TypeExpression::Named {
            name,
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn parameterized(name: ClassName, arguments: Vec<TypeArgument>) -> Self {
        TypeExpression::Named {
            name,
            arguments,
            nullable: false,
        }
    }

    pub fn variable(variable: Arc<TypeVariable>) -> Self {
        TypeExpression::TypeVariable {
            variable,
            nullable: false,
        }
    }

    pub fn function(
        receiver: Option<TypeExpression>,
        parameters: Vec<TypeExpression>,
        return_type: TypeExpression,
    ) -> Self {
        TypeExpression::Function {
            receiver: receiver.map(Box::new),
            parameters,
            return_type: Box::new(return_type),
            is_suspend: false,
            nullable: false,
        }
    }

    pub fn producer_of(bound: TypeExpression) -> Self {
        TypeExpression::Wildcard {
            bound: Some(Box::new(bound)),
            direction: WildcardKind::Producer,
            nullable: false,
        }
    }

    pub fn consumer_of(bound: TypeExpression) -> Self {
        TypeExpression::Wildcard {
            bound: Some(Box::new(bound)),
            direction: WildcardKind::Consumer,
            nullable: false,
        }
    }

    pub fn star() -> Self {
        TypeExpression::Wildcard {
            bound: None,
            direction: WildcardKind::Star,
            nullable: false,
        }
    }

    pub fn any() -> Self {
        TypeExpression::named(ClassName::any())
    }

    pub fn unit() -> Self {
        TypeExpression::named(ClassName::unit())
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeExpression::Named { nullable, .. }
            | TypeExpression::TypeVariable { nullable, .. }
            | TypeExpression::Function { nullable, .. }
            | TypeExpression::Wildcard { nullable, .. } => *nullable,
        }
    }

    /// Replace the outermost nullability flag.
    pub fn with_nullable(mut self, value: bool) -> Self {
        match &mut self {
            TypeExpression::Named { nullable, .. }
            | TypeExpression::TypeVariable { nullable, .. }
            | TypeExpression::Function { nullable, .. }
            | TypeExpression::Wildcard { nullable, .. } => *nullable = value,
        }
        self
    }

    pub fn with_suspend(mut self, value: bool) -> Self {
        if let TypeExpression::Function { is_suspend, .. } = &mut self {
            *is_suspend = value;
        }
        self
    }

    /// Non-null `kotlin.Any` with no arguments.
    pub fn is_any(&self) -> bool {
        matches!(
            self,
            TypeExpression::Named { name, arguments, nullable: false }
                if arguments.is_empty() && name.is_kotlin_any()
        )
    }

    pub fn class_name(&self) -> Option<&ClassName> {
        match self {
            TypeExpression::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn arguments(&self) -> &[TypeArgument] {
        match self {
            TypeExpression::Named { arguments, .. } => arguments,
            _ => &[],
        }
    }

    pub fn as_variable(&self) -> Option<&Arc<TypeVariable>> {
        match self {
            TypeExpression::TypeVariable { variable, .. } => Some(variable),
            _ => None,
        }
    }

    /// Rebuild the expression with every type variable reference passed
    /// through `rebind`.
    pub fn map_variables(
        &self,
        rebind: &impl Fn(&Arc<TypeVariable>) -> Arc<TypeVariable>,
    ) -> TypeExpression {
        match self {
            TypeExpression::Named {
                name,
                arguments,
                nullable,
            } => TypeExpression::Named {
                name: name.clone(),
                arguments: arguments
                    .iter()
                    .map(|argument| TypeArgument {
                        variance: argument.variance,
                        ty: argument.ty.as_ref().map(|ty| ty.map_variables(rebind)),
                    })
                    .collect(),
                nullable: *nullable,
            },
            TypeExpression::TypeVariable { variable, nullable } => TypeExpression::TypeVariable {
                variable: rebind(variable),
                nullable: *nullable,
            },
            TypeExpression::Function {
                receiver,
                parameters,
                return_type,
                is_suspend,
                nullable,
            } => TypeExpression::Function {
                receiver: receiver
                    .as_ref()
                    .map(|receiver| Box::new(receiver.map_variables(rebind))),
                parameters: parameters
                    .iter()
                    .map(|parameter| parameter.map_variables(rebind))
                    .collect(),
                return_type: Box::new(return_type.map_variables(rebind)),
                is_suspend: *is_suspend,
                nullable: *nullable,
            },
            TypeExpression::Wildcard {
                bound,
                direction,
                nullable,
            } => TypeExpression::Wildcard {
                bound: bound
                    .as_ref()
                    .map(|bound| Box::new(bound.map_variables(rebind))),
                direction: *direction,
                nullable: *nullable,
            },
        }
    }

    /// Both sides reference the very same declared type parameter.
    pub fn same_variable(&self, other: &TypeExpression) -> bool {
        match (self.as_variable(), other.as_variable()) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// =============================================================================
// Kotlin notation
// =============================================================================

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.ty, self.variance.keyword()) {
            (Some(ty), Some(keyword)) => write!(f, "{keyword} {ty}"),
            (Some(ty), None) => write!(f, "{ty}"),
            (None, _) => f.write_str("*"),
        }
    }
}

impl fmt::Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reified {
            f.write_str("reified ")?;
        }
        if let Some(keyword) = self.variance.and_then(Variance::keyword) {
            write!(f, "{keyword} ")?;
        }
        f.write_str(&self.name)?;
        if let [bound] = self.upper_bounds.as_slice() {
            write!(f, " : {bound}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpression::Named {
                name,
                arguments,
                nullable,
            } => {
                write!(f, "{name}")?;
                if !arguments.is_empty() {
                    f.write_str("<")?;
                    write_joined(f, arguments)?;
                    f.write_str(">")?;
                }
                write_nullable(f, *nullable)
            }
            TypeExpression::TypeVariable { variable, nullable } => {
                f.write_str(&variable.name)?;
                write_nullable(f, *nullable)
            }
            TypeExpression::Function {
                receiver,
                parameters,
                return_type,
                is_suspend,
                nullable,
            } => {
                if *nullable {
                    f.write_str("(")?;
                }
                if *is_suspend {
                    f.write_str("suspend ")?;
                }
                if let Some(receiver) = receiver {
                    if matches!(**receiver, TypeExpression::Function { .. }) {
                        write!(f, "({receiver}).")?;
                    } else {
                        write!(f, "{receiver}.")?;
                    }
                }
                f.write_str("(")?;
                write_joined(f, parameters)?;
                write!(f, ") -> {return_type}")?;
                if *nullable {
                    f.write_str(")?")?;
                }
                Ok(())
            }
            TypeExpression::Wildcard {
                bound,
                direction,
                nullable,
            } => {
                let keyword = match (direction, bound) {
                    (WildcardKind::Producer, Some(bound)) => Some(("out", bound)),
                    (WildcardKind::Consumer, Some(bound)) => Some(("in", bound)),
                    _ => None,
                };
                match keyword {
                    // `(out T)?`
                    Some((keyword, bound)) if *nullable => write!(f, "({keyword} {bound})?"),
                    Some((keyword, bound)) => write!(f, "{keyword} {bound}"),
                    None => {
                        f.write_str("*")?;
                        write_nullable(f, *nullable)
                    }
                }
            }
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

fn write_nullable(f: &mut fmt::Formatter<'_>, nullable: bool) -> fmt::Result {
    if nullable { f.write_str("?") } else { Ok(()) }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
