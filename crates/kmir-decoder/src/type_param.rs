use crate::decode::DecodeOptions;
use crate::error::DecodeError;
use crate::scope::TypeParameterLookup;
use crate::type_ref::TypeResolver;
use kmir_metadata::{KmTypeParameter, KmVariance};
use kmir_model::{TypeVariable, Variance};

/// Decode one type parameter. `params` must only expose the parameters
/// declared before this one.
///
/// `out` is implied at the declaration site and is not stored; invariance is
/// stored as `None` too, so only `in` survives.
pub fn resolve_type_parameter(
    param: &KmTypeParameter,
    params: &dyn TypeParameterLookup,
    options: DecodeOptions,
) -> Result<TypeVariable, DecodeError> {
    let types = TypeResolver::new(params, options);
    let upper_bounds = param
        .upper_bounds
        .iter()
        .map(|bound| types.resolve(bound))
        .collect::<Result<Vec<_>, _>>()?;

    let variance = match param.variance {
        KmVariance::In => Some(Variance::In),
        KmVariance::Out | KmVariance::Invariant => None,
    };

    Ok(TypeVariable {
        name: param.name.clone(),
        id: param.id,
        variance,
        upper_bounds,
        reified: param.flags.is_reified_type_parameter(),
    })
}

#[cfg(test)]
#[path = "../tests/type_param_tests.rs"]
mod tests;
