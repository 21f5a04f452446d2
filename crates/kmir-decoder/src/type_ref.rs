//! Type reference resolution: `KmType` → `TypeExpression`.
//!
//! Rules are tried in priority order and the first match wins:
//!
//! 1. Flexible (platform) types resolve their upper bound and become a
//!    producer wildcard.
//! 2. References with an enclosing type resolve that type and become a
//!    consumer wildcard.
//! 3. Type-parameter classifiers are looked up in the current scope.
//! 4. Class and type-alias classifiers resolve to a name (or, for aliases
//!    outside alias mode, to the pre-expanded underlying type).
//! 5. Named types carry their projected arguments.
//! 6. `kotlin.FunctionN` family types are rebuilt as function types,
//!    including the suspend and extension-receiver encodings.
//!
//! The node's own nullability is applied to the outermost result in every
//! case.

use crate::decode::DecodeOptions;
use crate::error::DecodeError;
use crate::scope::TypeParameterLookup;
use kmir_metadata::{Flags, KmClassifier, KmType, KmTypeProjection, KmVariance};
use kmir_model::{ClassName, TypeArgument, TypeExpression};
use tracing::trace;

/// Classifier of function types whose arity is only known at runtime.
const UNBOUNDED_FUNCTION: &str = "kotlin.FunctionN";
const FUNCTION_PREFIX: &str = "kotlin.Function";

pub struct TypeResolver<'s> {
    params: &'s dyn TypeParameterLookup,
    prefer_type_aliases: bool,
}

impl<'s> TypeResolver<'s> {
    pub fn new(params: &'s dyn TypeParameterLookup, options: DecodeOptions) -> Self {
        TypeResolver {
            params,
            prefer_type_aliases: options.prefer_type_aliases,
        }
    }

    pub fn resolve(&self, ty: &KmType) -> Result<TypeExpression, DecodeError> {
        let nullable = ty.flags.is_nullable_type();

        if let Some(upper) = &ty.flexible_type_upper_bound {
            let bound = self.resolve(&upper.ty)?;
            return Ok(TypeExpression::producer_of(bound).with_nullable(nullable));
        }

        if let Some(outer) = &ty.outer_type {
            let outer = self.resolve(outer)?;
            return Ok(TypeExpression::consumer_of(outer).with_nullable(nullable));
        }

        let classifier = ty
            .classifier
            .as_ref()
            .ok_or_else(|| DecodeError::unexpected("type", "type node has no classifier"))?;

        let resolved = match classifier {
            KmClassifier::TypeParameter(id) => {
                let variable = self
                    .params
                    .lookup(*id)
                    .ok_or(DecodeError::UnresolvedTypeParameter { id: *id })?;
                TypeExpression::variable(variable).with_nullable(nullable)
            }
            KmClassifier::Class(name) => match &ty.abbreviated_type {
                Some(alias) if self.prefer_type_aliases => {
                    let alias = self.resolve(alias)?;
                    let alias_nullable = alias.is_nullable();
                    alias.with_nullable(nullable || alias_nullable)
                }
                _ => self.resolve_named(name, ty)?.with_nullable(nullable),
            },
            KmClassifier::TypeAlias(name) => {
                if self.prefer_type_aliases {
                    self.resolve_named(name, ty)?.with_nullable(nullable)
                } else {
                    let expanded = ty.expanded_type.as_deref().ok_or_else(|| {
                        DecodeError::unexpected(
                            format!("type alias `{name}`"),
                            "alias reference carries no expanded type",
                        )
                    })?;
                    // `typealias Name = String?` stays nullable at a non-null use site.
                    let expanded = self.resolve(expanded)?;
                    let expanded_nullable = expanded.is_nullable();
                    expanded.with_nullable(nullable || expanded_nullable)
                }
            }
        };

        trace!(resolved = %resolved, "resolved type reference");
        Ok(resolved)
    }

    fn resolve_named(&self, name: &str, ty: &KmType) -> Result<TypeExpression, DecodeError> {
        let class_name = ClassName::from_metadata(name);
        let qualified = class_name.qualified_name();
        if qualified == UNBOUNDED_FUNCTION {
            return Err(DecodeError::UnsupportedArity { name: qualified });
        }

        let arguments = ty
            .arguments
            .iter()
            .map(|projection| self.resolve_argument(projection))
            .collect::<Result<Vec<_>, _>>()?;

        if !arguments.is_empty() && is_fixed_arity_function(&qualified) {
            return resolve_function_type(arguments, ty.flags);
        }

        Ok(TypeExpression::parameterized(class_name, arguments))
    }

    fn resolve_argument(
        &self,
        projection: &KmTypeProjection,
    ) -> Result<TypeArgument, DecodeError> {
        let (variance, ty) = match (projection.variance, &projection.ty) {
            (None, None) => return Ok(TypeArgument::star()),
            (None, Some(_)) => {
                return Err(DecodeError::unexpected(
                    "type argument",
                    "projection has a type but no variance",
                ));
            }
            (Some(variance), None) => {
                return Err(DecodeError::StarProjectionVariance {
                    variance: variance_keyword(variance).to_string(),
                });
            }
            (Some(variance), Some(ty)) => (variance, self.resolve(ty)?),
        };

        Ok(match variance {
            KmVariance::In => TypeArgument::contravariant(ty),
            // `out Any` reads as a star projection; keep the argument plain.
            KmVariance::Out if ty.is_any() => TypeArgument::invariant(ty),
            KmVariance::Out => TypeArgument::covariant(ty),
            KmVariance::Invariant => TypeArgument::invariant(ty),
        })
    }
}

/// `kotlin.Function0` .. `kotlin.Function22` and beyond: the family prefix
/// followed by decimal digits only.
fn is_fixed_arity_function(qualified: &str) -> bool {
    qualified
        .strip_prefix(FUNCTION_PREFIX)
        .is_some_and(|arity| !arity.is_empty() && arity.bytes().all(|b| b.is_ascii_digit()))
}

/// Rebuild `FunctionN<P1, .., Pn, R>` as `(P1, .., Pn) -> R`.
///
/// Suspend function types are encoded with two trailing slots,
/// `FunctionN<P1, .., Pn, Continuation<R>, Any?>`: the last slot is dropped
/// and `R` is taken from the continuation. With the extension flag the first
/// remaining slot is the receiver.
fn resolve_function_type(
    arguments: Vec<TypeArgument>,
    flags: Flags,
) -> Result<TypeExpression, DecodeError> {
    let is_suspend = flags.is_suspend_type();
    let mut slots: Vec<TypeExpression> = arguments
        .into_iter()
        .map(TypeArgument::into_type_expression)
        .collect();

    let return_type = if is_suspend {
        if slots.len() < 2 {
            return Err(DecodeError::malformed_suspend(format!(
                "expected a continuation and a result slot, found {} argument(s)",
                slots.len()
            )));
        }
        slots.pop();
        match slots.pop() {
            Some(continuation) => continuation_result_type(continuation)?,
            None => return Err(DecodeError::malformed_suspend("missing continuation slot")),
        }
    } else {
        slots
            .pop()
            .ok_or_else(|| DecodeError::unexpected("function type", "no return type slot"))?
    };

    let receiver = if flags.is_extension_function_type() {
        if slots.is_empty() {
            return Err(DecodeError::unexpected(
                "extension function type",
                "no receiver slot",
            ));
        }
        Some(Box::new(slots.remove(0)))
    } else {
        None
    };

    Ok(TypeExpression::Function {
        receiver,
        parameters: slots,
        return_type: Box::new(return_type),
        is_suspend,
        nullable: false,
    })
}

/// The sole type argument of the continuation slot.
fn continuation_result_type(continuation: TypeExpression) -> Result<TypeExpression, DecodeError> {
    // A projected continuation arrives wrapped; look through the wildcard.
    let continuation = match continuation {
        TypeExpression::Wildcard {
            bound: Some(bound), ..
        } => *bound,
        other => other,
    };

    match continuation {
        TypeExpression::Named { arguments, .. } if arguments.len() == 1 => arguments
            .into_iter()
            .next()
            .and_then(|argument| argument.ty)
            .ok_or_else(|| {
                DecodeError::malformed_suspend("continuation argument is a star projection")
            }),
        other => Err(DecodeError::malformed_suspend(format!(
            "continuation slot `{other}` is not a single-argument generic type"
        ))),
    }
}

fn variance_keyword(variance: KmVariance) -> &'static str {
    match variance {
        KmVariance::In => "in",
        KmVariance::Out => "out",
        KmVariance::Invariant => "invariant",
    }
}

#[cfg(test)]
#[path = "../tests/type_ref_tests.rs"]
mod tests;
