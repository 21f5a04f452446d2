use super::*;
use kmir_metadata::{KmType, KmVariance};
use kmir_model::TypeExpression;

fn variable(name: &str, id: u32) -> Arc<TypeVariable> {
    Arc::new(TypeVariable::new(name, id))
}

#[test]
fn test_lookup_falls_back_to_parent() {
    let mut root = TypeParameterScope::root();
    let t = variable("T", 0);
    root.declare(Arc::clone(&t));

    let child = root.child();
    let found = child.lookup(0).expect("parent parameter is visible");
    assert!(Arc::ptr_eq(&found, &t));
    assert_eq!(child.depth(), 1);
    assert!(child.declared().is_empty());
}

#[test]
fn test_child_shadows_without_touching_parent() {
    let mut root = TypeParameterScope::root();
    let class_t = variable("T", 0);
    root.declare(Arc::clone(&class_t));

    {
        let mut child = root.child();
        let local = variable("R", 0);
        child.declare(Arc::clone(&local));
        let found = child.lookup(0).expect("local parameter is visible");
        assert!(Arc::ptr_eq(&found, &local), "local table wins on id collision");
    }

    let found = root.lookup(0).expect("class parameter still declared");
    assert!(Arc::ptr_eq(&found, &class_t));
    assert_eq!(root.declared().len(), 1);
}

#[test]
fn test_missing_id_is_none() {
    let root = TypeParameterScope::root();
    assert!(root.lookup(3).is_none());
    assert!(root.child().lookup(3).is_none());
}

#[test]
fn test_declare_all_sees_only_earlier_parameters() {
    // <T, R : T> resolves; <T : R, R> does not.
    let ordered = [
        KmTypeParameter::new("T", 0, KmVariance::Invariant),
        KmTypeParameter::new("R", 1, KmVariance::Invariant)
            .with_upper_bound(KmType::type_parameter(0)),
    ];
    let mut scope = TypeParameterScope::root();
    scope
        .declare_all(&ordered, DecodeOptions::default())
        .expect("bound on an earlier parameter resolves");
    let declared = scope.declared();
    let t_ref = TypeExpression::variable(Arc::clone(&declared[0]));
    assert!(declared[1].upper_bounds[0].same_variable(&t_ref));

    let reversed = [
        KmTypeParameter::new("T", 0, KmVariance::Invariant)
            .with_upper_bound(KmType::type_parameter(1)),
        KmTypeParameter::new("R", 1, KmVariance::Invariant),
    ];
    let err = TypeParameterScope::root()
        .declare_all(&reversed, DecodeOptions::default())
        .expect_err("forward reference is rejected");
    assert_eq!(err, DecodeError::UnresolvedTypeParameter { id: 1 });
}

#[test]
fn test_closure_lookup() {
    let t = variable("T", 7);
    let lookup = |id: u32| (id == 7).then(|| Arc::clone(&t));
    assert!(lookup.lookup(7).is_some());
    assert!(lookup.lookup(8).is_none());
}
