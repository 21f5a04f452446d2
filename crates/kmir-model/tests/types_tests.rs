use super::*;

fn string() -> TypeExpression {
    TypeExpression::named(ClassName::from_metadata("kotlin/String"))
}

fn list_of(element: TypeExpression) -> TypeExpression {
    TypeExpression::parameterized(
        ClassName::from_metadata("kotlin/collections/List"),
        vec![TypeArgument::invariant(element)],
    )
}

#[test]
fn test_nullable_and_non_null_are_distinct() {
    let plain = string();
    let nullable = string().with_nullable(true);
    assert_ne!(plain, nullable);
    assert!(nullable.is_nullable());
    assert_eq!(nullable.with_nullable(false), plain);
}

#[test]
fn test_named_display() {
    assert_eq!(string().to_string(), "kotlin.String");
    assert_eq!(
        list_of(string().with_nullable(true)).with_nullable(true).to_string(),
        "kotlin.collections.List<kotlin.String?>?"
    );
}

#[test]
fn test_argument_display() {
    let map = TypeExpression::parameterized(
        ClassName::from_metadata("kotlin/collections/Map"),
        vec![TypeArgument::contravariant(string()), TypeArgument::star()],
    );
    assert_eq!(map.to_string(), "kotlin.collections.Map<in kotlin.String, *>");
}

#[test]
fn test_function_display() {
    let int = TypeExpression::named(ClassName::from_metadata("kotlin/Int"));
    let long = TypeExpression::named(ClassName::from_metadata("kotlin/Long"));
    let suspend_fn = TypeExpression::function(None, vec![int, long], string()).with_suspend(true);
    assert_eq!(
        suspend_fn.to_string(),
        "suspend (kotlin.Int, kotlin.Long) -> kotlin.String"
    );

    let ext = TypeExpression::function(Some(string()), Vec::new(), TypeExpression::unit())
        .with_nullable(true);
    assert_eq!(ext.to_string(), "(kotlin.String.() -> kotlin.Unit)?");
}

#[test]
fn test_into_type_expression_maps_projections() {
    assert_eq!(TypeArgument::invariant(string()).into_type_expression(), string());
    assert_eq!(
        TypeArgument::covariant(string()).into_type_expression(),
        TypeExpression::producer_of(string())
    );
    assert_eq!(
        TypeArgument::contravariant(string()).into_type_expression(),
        TypeExpression::consumer_of(string())
    );
    assert_eq!(TypeArgument::star().into_type_expression(), TypeExpression::star());
}

#[test]
fn test_is_any_requires_non_null() {
    assert!(TypeExpression::any().is_any());
    assert!(!TypeExpression::any().with_nullable(true).is_any());
    assert!(!string().is_any());
}

#[test]
fn test_variable_identity_vs_equality() {
    let a = Arc::new(TypeVariable::new("T", 0));
    let b = Arc::new(TypeVariable::new("T", 0));
    let first = TypeExpression::variable(Arc::clone(&a));
    let second = TypeExpression::variable(Arc::clone(&a));
    let lookalike = TypeExpression::variable(b);

    assert!(first.same_variable(&second));
    assert_eq!(first, lookalike, "structural equality compares by value");
    assert!(!first.same_variable(&lookalike));
}

#[test]
fn test_type_variable_display() {
    let mut tv = TypeVariable::new("R", 1);
    tv.variance = Some(Variance::In);
    tv.upper_bounds.push(string());
    assert_eq!(tv.to_string(), "in R : kotlin.String");
}

#[test]
fn test_serializes_with_kind_tag() {
    let json = serde_json::to_value(string().with_nullable(true)).expect("serialize type");
    assert_eq!(json["kind"], "named");
    assert_eq!(json["nullable"], true);
    assert_eq!(json["name"]["packageName"], "kotlin");

    let fun = TypeExpression::function(None, Vec::new(), string());
    let json = serde_json::to_value(fun).expect("serialize function type");
    assert_eq!(json["kind"], "function");
    assert_eq!(json["isSuspend"], false);

    let wildcard = TypeExpression::consumer_of(string());
    let json = serde_json::to_value(wildcard).expect("serialize wildcard");
    assert_eq!(json["kind"], "wildcard");
    assert_eq!(json["direction"], "consumer");
    assert_eq!(json["bound"]["kind"], "named");
}

#[test]
fn test_nullable_wildcard_display() {
    assert_eq!(TypeExpression::producer_of(string()).to_string(), "out kotlin.String");
    assert_eq!(
        TypeExpression::producer_of(string())
            .with_nullable(true)
            .to_string(),
        "(out kotlin.String)?"
    );
    assert_eq!(
        TypeExpression::producer_of(string().with_nullable(true)).to_string(),
        "out kotlin.String?"
    );
    assert_eq!(
        TypeExpression::consumer_of(string())
            .with_nullable(true)
            .to_string(),
        "(in kotlin.String)?"
    );
    assert_eq!(TypeExpression::star().to_string(), "*");
}
