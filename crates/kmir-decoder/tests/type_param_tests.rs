use super::*;
use crate::scope::TypeParameterScope;
use kmir_metadata::KmType;
use kmir_metadata::flags::type_parameter_flags;
use kmir_model::{ClassName, TypeExpression};

fn resolve(param: &KmTypeParameter) -> TypeVariable {
    let scope = TypeParameterScope::root();
    resolve_type_parameter(param, &scope, DecodeOptions::default()).expect("parameter resolves")
}

#[test]
fn test_out_variance_is_not_stored() {
    let t = resolve(&KmTypeParameter::new("T", 0, KmVariance::Out));
    assert_eq!(t.variance, None);
}

#[test]
fn test_in_variance_is_kept() {
    let r = resolve(&KmTypeParameter::new("R", 1, KmVariance::In));
    assert_eq!(r.variance, Some(Variance::In));
}

#[test]
fn test_invariance_is_absent() {
    let v = resolve(&KmTypeParameter::new("V", 2, KmVariance::Invariant));
    assert_eq!(v.variance, None);
    assert_eq!(v.name, "V");
    assert_eq!(v.id, 2);
}

#[test]
fn test_reified_flag() {
    let param = KmTypeParameter::new("T", 0, KmVariance::Invariant)
        .with_flags(type_parameter_flags::IS_REIFIED);
    assert!(resolve(&param).reified);
    assert!(!resolve(&KmTypeParameter::new("T", 0, KmVariance::Invariant)).reified);
}

#[test]
fn test_upper_bounds_are_resolved() {
    let param = KmTypeParameter::new("T", 0, KmVariance::Invariant).with_upper_bound(
        KmType::class("kotlin/Comparable").with_arguments([KmType::class("kotlin/String")]),
    );
    let t = resolve(&param);
    assert_eq!(t.upper_bounds.len(), 1);
    assert_eq!(
        t.upper_bounds[0].class_name(),
        Some(&ClassName::from_metadata("kotlin/Comparable"))
    );
    assert_eq!(
        t.upper_bounds[0].arguments()[0].ty,
        Some(TypeExpression::named(ClassName::from_metadata("kotlin/String")))
    );
}

#[test]
fn test_self_referential_bound_is_unresolved() {
    // `T : Comparable<T>` refers to itself before it is declared.
    let param = KmTypeParameter::new("T", 0, KmVariance::Invariant).with_upper_bound(
        KmType::class("kotlin/Comparable").with_arguments([KmType::type_parameter(0)]),
    );
    let scope = TypeParameterScope::root();
    let err = resolve_type_parameter(&param, &scope, DecodeOptions::default())
        .expect_err("self reference is not visible yet");
    assert_eq!(err, DecodeError::UnresolvedTypeParameter { id: 0 });
}
