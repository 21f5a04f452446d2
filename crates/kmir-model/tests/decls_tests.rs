use super::*;
use kmir_metadata::flags::{class_flags, constructor_flags, parameter_flags, property_flags};

fn string() -> TypeExpression {
    TypeExpression::named(ClassName::from_metadata("kotlin/String"))
}

fn sample_class() -> ClassDecl {
    let t = Arc::new(TypeVariable::new("T", 0));
    ClassDecl {
        flags: Flags::IS_PUBLIC | Flags::IS_FINAL | class_flags::IS_CLASS | class_flags::IS_DATA,
        name: ClassName::from_metadata("io/acme/Foo"),
        kind: ClassKind::Class,
        type_parameters: vec![Arc::clone(&t)],
        superclass: TypeExpression::any(),
        superinterfaces: Vec::new(),
        constructors: vec![
            ConstructorDecl {
                flags: Flags::IS_PUBLIC,
                parameters: Vec::new(),
            },
            ConstructorDecl {
                flags: Flags::IS_PUBLIC | constructor_flags::IS_PRIMARY,
                parameters: vec![
                    Parameter::new("bar", string())
                        .with_flags(parameter_flags::DECLARES_DEFAULT_VALUE),
                    Parameter::new("item", TypeExpression::variable(t)),
                ],
            },
        ],
        properties: vec![PropertyDecl {
            flags: Flags::IS_PUBLIC | Flags::IS_FINAL | property_flags::IS_VAR,
            name: "bar".to_string(),
            type_parameters: Vec::new(),
            receiver_type: None,
            ty: string(),
            getter_flags: Flags::IS_PUBLIC,
            setter_flags: Some(Flags::IS_PUBLIC),
        }],
        functions: Vec::new(),
        companion_object_name: None,
        enum_entries: Vec::new(),
        nested_class_names: Vec::new(),
        sealed_subclasses: Vec::new(),
    }
}

#[test]
fn test_primary_constructor_lookup() {
    let class = sample_class();
    let primary = class.primary_constructor().expect("primary constructor");
    assert_eq!(primary.parameters.len(), 2);
    assert!(primary.parameters[0].declares_default_value());
    assert!(!class.constructors[0].is_primary());
}

#[test]
fn test_as_type_applies_own_parameters() {
    let class = sample_class();
    assert_eq!(class.as_type().to_string(), "io.acme.Foo<T>");
}

#[test]
fn test_declaration_trait_surface() {
    let class = sample_class();
    assert_eq!(Declaration::name(&class), "Foo");
    assert_eq!(class.visibility(), Visibility::Public);
    assert_eq!(class.modifiers(), vec![Modifier::Public, Modifier::Data]);

    let bar = class.property("bar").expect("bar property");
    assert!(bar.is_mutable());
    assert_eq!(bar.modifiers(), vec![Modifier::Public]);
}

#[test]
fn test_accessor_modifiers_follow_accessor_flags() {
    let mut class = sample_class();
    let bar = class.property("bar").expect("bar property");
    assert!(bar.getter_modifiers().is_empty());
    assert_eq!(bar.setter_modifiers(), Some(Vec::new()));

    class.properties[0].setter_flags = Some(Flags::IS_PRIVATE | Flags::IS_FINAL);
    let bar = &class.properties[0];
    assert_eq!(bar.setter_modifiers(), Some(vec![Modifier::Private]));

    class.properties[0].setter_flags = None;
    assert_eq!(class.properties[0].setter_modifiers(), None);
}

#[test]
fn test_vararg_parameter_declared_type() {
    let param = Parameter::vararg("values", string());
    assert!(param.is_vararg());
    assert_eq!(param.ty, None);
    assert_eq!(param.declared_type(), Some(&string()));
    assert_eq!(param.modifiers(), vec![Modifier::Vararg]);
}
