use super::*;
use kmir_metadata::flags::{class_flags, constructor_flags, function_flags, property_flags};
use kmir_metadata::{
    Flags, KmType, KmTypeParameter, KmVariance, KotlinClassHeader, MetadataError, MetadataKind,
};
use kmir_model::{ClassKind, ErrorCategory, Variance};
use std::sync::Arc;

// =============================================================================
// Fixtures
// =============================================================================

fn final_class() -> Flags {
    Flags::IS_PUBLIC | Flags::IS_FINAL | class_flags::IS_CLASS
}

fn primary() -> Flags {
    Flags::IS_PUBLIC | constructor_flags::IS_PRIMARY
}

fn val_flags() -> Flags {
    Flags::IS_PUBLIC
        | Flags::IS_FINAL
        | property_flags::HAS_GETTER
        | property_flags::IS_DECLARATION
}

fn var_flags() -> Flags {
    val_flags() | property_flags::IS_VAR | property_flags::HAS_SETTER
}

fn string() -> KmType {
    KmType::class("kotlin/String")
}

fn named(name: &str) -> TypeExpression {
    TypeExpression::named(ClassName::from_metadata(name))
}

fn class(name: &str) -> KmClass {
    KmClass::new(final_class(), name)
}

/// `class ConstructorClass(val foo: String, vararg bar: Int) { constructor(bar: Int) }`
fn constructor_class() -> KmClass {
    let mut km = class("io/acme/ConstructorClass");
    km.constructors = vec![
        KmConstructor::new(
            primary(),
            vec![
                KmValueParameter::new("foo", string()),
                KmValueParameter::vararg(
                    "bar",
                    KmType::class("kotlin/IntArray"),
                    KmType::class("kotlin/Int"),
                ),
            ],
        ),
        KmConstructor::new(
            Flags::IS_PUBLIC,
            vec![KmValueParameter::new("bar", KmType::class("kotlin/Int"))],
        ),
    ];
    km.properties = vec![KmProperty::new(val_flags(), "foo", string())];
    km
}

/// `class Generics<out T, in R, V>(val genericInput: T)`
fn generics_class() -> KmClass {
    let mut km = class("io/acme/Generics");
    km.type_parameters = vec![
        KmTypeParameter::new("T", 0, KmVariance::Out),
        KmTypeParameter::new("R", 1, KmVariance::In),
        KmTypeParameter::new("V", 2, KmVariance::Invariant),
    ];
    km.constructors = vec![KmConstructor::new(
        primary(),
        vec![KmValueParameter::new("genericInput", KmType::type_parameter(0))],
    )];
    km.properties = vec![KmProperty::new(
        val_flags(),
        "genericInput",
        KmType::type_parameter(0),
    )];
    km
}

struct Element {
    name: &'static str,
    header: Option<KotlinClassHeader>,
}

impl AnnotatedElement for Element {
    fn qualified_name(&self) -> &str {
        self.name
    }

    fn metadata_header(&self) -> Option<&KotlinClassHeader> {
        self.header.as_ref()
    }
}

// =============================================================================
// Class shape
// =============================================================================

#[test]
fn test_constructor_data() {
    let decl = decode_class(&constructor_class()).expect("class decodes");
    assert_eq!(decl.constructors.len(), 2);

    let primary = decl.primary_constructor().expect("primary constructor");
    assert_eq!(primary.parameters.len(), 2);

    let foo = &primary.parameters[0];
    assert_eq!(foo.name, "foo");
    assert_eq!(foo.ty, Some(named("kotlin/String")));
    assert!(!foo.is_vararg());

    let bar = &primary.parameters[1];
    assert_eq!(bar.name, "bar");
    assert!(bar.is_vararg());
    assert_eq!(bar.ty, None, "vararg parameters keep only the element type");
    assert_eq!(bar.vararg_element_type, Some(named("kotlin/Int")));

    assert!(!decl.constructors[1].is_primary());
}

#[test]
fn test_supertypes_split_superclass_first() {
    let mut km = class("io/acme/Supertype");
    km.supertypes = vec![
        KmType::class("io/acme/BaseType"),
        KmType::class("io/acme/BaseInterface"),
        KmType::class("io/acme/OtherInterface"),
    ];
    let decl = decode_class(&km).expect("class decodes");
    assert_eq!(decl.superclass, named("io/acme/BaseType"));
    assert_eq!(
        decl.superinterfaces,
        vec![named("io/acme/BaseInterface"), named("io/acme/OtherInterface")]
    );
}

#[test]
fn test_missing_supertypes_default_to_any() {
    let decl = decode_class(&class("io/acme/Plain")).expect("class decodes");
    assert!(decl.superclass.is_any());
    assert!(decl.superinterfaces.is_empty());
}

#[test]
fn test_properties_and_mutability() {
    let mut km = class("io/acme/Properties");
    let mut baz = KmProperty::new(var_flags(), "baz", KmType::class("kotlin/Int"));
    baz.setter_flags = Flags::IS_PUBLIC;
    km.properties = vec![
        KmProperty::new(val_flags(), "foo", string()),
        KmProperty::new(val_flags(), "bar", string().nullable()),
        baz,
        KmProperty::new(
            var_flags(),
            "aList",
            KmType::class("kotlin/collections/List").with_arguments([KmType::class("kotlin/Int")]),
        ),
    ];
    let decl = decode_class(&km).expect("class decodes");
    assert_eq!(decl.properties.len(), 4);

    let foo = decl.property("foo").expect("foo");
    assert_eq!(foo.ty, named("kotlin/String"));
    assert!(!foo.is_mutable());
    assert_eq!(foo.setter_flags, None);

    let bar = decl.property("bar").expect("bar");
    assert_eq!(bar.ty, named("kotlin/String").with_nullable(true));

    let baz = decl.property("baz").expect("baz");
    assert!(baz.is_mutable());
    assert_eq!(baz.setter_flags, Some(Flags::IS_PUBLIC));

    let list = decl.property("aList").expect("aList");
    assert_eq!(list.ty.to_string(), "kotlin.collections.List<kotlin.Int>");
}

#[test]
fn test_generics_variance_and_identity() {
    let decl = decode_class(&generics_class()).expect("class decodes");
    let variances: Vec<_> = decl.type_parameters.iter().map(|tv| tv.variance).collect();
    assert_eq!(variances, vec![None, Some(Variance::In), None]);

    let t = &decl.type_parameters[0];
    let param_ty = decl.primary_constructor().expect("primary").parameters[0]
        .ty
        .as_ref()
        .expect("typed parameter");
    let property_ty = &decl.property("genericInput").expect("property").ty;

    assert!(Arc::ptr_eq(param_ty.as_variable().expect("T reference"), t));
    assert!(param_ty.same_variable(property_ty));
    assert_eq!(decl.as_type().to_string(), "io.acme.Generics<T, R, V>");
}

#[test]
fn test_collection_mutability_is_preserved() {
    let mut km = class("io/acme/CollectionMutability");
    km.constructors = vec![KmConstructor::new(
        primary(),
        vec![
            KmValueParameter::new(
                "immutableList",
                KmType::class("kotlin/collections/List").with_arguments([string()]),
            ),
            KmValueParameter::new(
                "mutableList",
                KmType::class("kotlin/collections/MutableList").with_arguments([string()]),
            ),
        ],
    )];
    let decl = decode_class(&km).expect("class decodes");
    let params = &decl.primary_constructor().expect("primary").parameters;
    let immutable = params[0].ty.as_ref().expect("typed");
    let mutable = params[1].ty.as_ref().expect("typed");
    assert_eq!(immutable.to_string(), "kotlin.collections.List<kotlin.String>");
    assert_eq!(
        mutable.to_string(),
        "kotlin.collections.MutableList<kotlin.String>"
    );
    assert_ne!(immutable, mutable);
}

#[test]
fn test_suspend_property_type() {
    let mut km = class("io/acme/SuspendTypes");
    km.properties = vec![KmProperty::new(
        val_flags(),
        "testProp",
        KmType::class("kotlin/Function3").suspend().with_arguments([
            KmType::class("kotlin/Int"),
            KmType::class("kotlin/Long"),
            KmType::class("kotlin/coroutines/Continuation").with_arguments([string()]),
            KmType::class("kotlin/Any").nullable(),
        ]),
    )];
    let decl = decode_class(&km).expect("class decodes");
    assert_eq!(
        decl.property("testProp").expect("testProp").ty,
        TypeExpression::Function {
            receiver: None,
            parameters: vec![named("kotlin/Int"), named("kotlin/Long")],
            return_type: Box::new(named("kotlin/String")),
            is_suspend: true,
            nullable: false,
        }
    );
}

#[test]
fn test_function_type_parameters_shadow_class_parameters() {
    let mut km = generics_class();
    // fun <E> pick(input: E, fallback: R): E, where E reuses id 0.
    let mut pick = KmFunction::new(
        Flags::IS_PUBLIC | Flags::IS_FINAL | function_flags::IS_DECLARATION,
        "pick",
        KmType::type_parameter(0),
    );
    pick.type_parameters = vec![KmTypeParameter::new("E", 0, KmVariance::Invariant)];
    pick.value_parameters = vec![
        KmValueParameter::new("input", KmType::type_parameter(0)),
        KmValueParameter::new("fallback", KmType::type_parameter(1)),
    ];
    km.functions = vec![pick];

    let decl = decode_class(&km).expect("class decodes");
    let pick = decl.function("pick").expect("pick");
    assert_eq!(pick.type_parameters.len(), 1);
    assert_eq!(pick.return_type.to_string(), "E");
    assert_eq!(
        pick.parameters[1].ty.as_ref().map(ToString::to_string),
        Some("R".to_string()),
        "class parameters stay visible"
    );

    // The shadowing never leaked into the class scope.
    assert_eq!(
        decl.property("genericInput").expect("property").ty.to_string(),
        "T"
    );
}

#[test]
fn test_extension_property_receiver() {
    let mut km = class("io/acme/Extensions");
    let mut prop = KmProperty::new(val_flags(), "size", KmType::class("kotlin/Int"));
    prop.receiver_parameter_type = Some(string());
    km.properties = vec![prop];
    let decl = decode_class(&km).expect("class decodes");
    assert_eq!(
        decl.property("size").expect("size").receiver_type,
        Some(named("kotlin/String"))
    );
}

#[test]
fn test_class_metadata_is_carried() {
    let mut km = KmClass::new(
        Flags::IS_PUBLIC | Flags::IS_SEALED | class_flags::IS_CLASS,
        "io/acme/Shape",
    );
    km.companion_object = Some("Named".to_string());
    km.nested_classes = vec!["Circle".to_string()];
    km.sealed_subclasses = vec!["io/acme/Shape.Circle".to_string()];
    let decl = decode_class(&km).expect("class decodes");

    assert_eq!(decl.kind, ClassKind::Class);
    assert_eq!(decl.companion_object_name.as_deref(), Some("Named"));
    assert_eq!(decl.nested_class_names, vec!["Circle".to_string()]);
    assert_eq!(
        decl.sealed_subclasses[0].qualified_name(),
        "io.acme.Shape.Circle"
    );
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_two_primary_constructors_are_malformed() {
    let mut km = class("io/acme/Twice");
    km.constructors = vec![
        KmConstructor::new(primary(), Vec::new()),
        KmConstructor::new(primary(), Vec::new()),
    ];
    let err = decode_class(&km).expect_err("two primaries");
    assert!(matches!(err, DecodeError::UnexpectedNodeShape { .. }));
}

#[test]
fn test_untyped_parameter_is_malformed() {
    let mut km = class("io/acme/Untyped");
    km.constructors = vec![KmConstructor::new(
        primary(),
        vec![KmValueParameter {
            flags: Flags::empty(),
            name: "oops".to_string(),
            ty: None,
            vararg_element_type: None,
        }],
    )];
    let err = decode_class(&km).expect_err("parameter without type");
    assert_eq!(err.category(), ErrorCategory::MalformedInput);
    assert!(err.to_string().contains("oops"));
}

#[test]
fn test_unresolved_member_type_fails_whole_class() {
    let mut km = class("io/acme/Broken");
    km.properties = vec![KmProperty::new(val_flags(), "t", KmType::type_parameter(3))];
    assert_eq!(
        decode_class(&km),
        Err(DecodeError::UnresolvedTypeParameter { id: 3 })
    );
}

// =============================================================================
// Entry points
// =============================================================================

#[test]
fn test_decode_metadata_dispatches_on_kind() {
    let metadata = KotlinClassMetadata::Class(generics_class());
    assert!(decode_metadata(&metadata, DecodeOptions::default()).is_ok());

    let err = decode_metadata(&KotlinClassMetadata::FileFacade, DecodeOptions::default())
        .expect_err("file facades carry no class");
    assert_eq!(
        err,
        DecodeError::UnsupportedMetadataKind {
            kind: MetadataKind::FileFacade
        }
    );
    assert_eq!(err.category(), ErrorCategory::UnsupportedConstruct);
}

#[test]
fn test_decode_element_reads_through_reader() {
    let element = Element {
        name: "io.acme.Generics",
        header: Some(KotlinClassHeader::new(1, &[1, 1, 13])),
    };
    let reader = |_: &KotlinClassHeader| -> Result<KotlinClassMetadata, MetadataError> {
        Ok(KotlinClassMetadata::Class(generics_class()))
    };
    let decl = decode_element(&element, &reader, DecodeOptions::default())
        .expect("element decodes");
    assert_eq!(decl.name.qualified_name(), "io.acme.Generics");
}

#[test]
fn test_decode_element_without_annotation() {
    let element = Element {
        name: "io.acme.Plain",
        header: None,
    };
    let reader = |_: &KotlinClassHeader| -> Result<KotlinClassMetadata, MetadataError> {
        panic!("reader must not be called without a header")
    };
    let err = decode_element(&element, &reader, DecodeOptions::default())
        .expect_err("no annotation");
    assert_eq!(
        err,
        DecodeError::MissingMetadataAnnotation {
            element: "io.acme.Plain".to_string()
        }
    );
    assert_eq!(err.category(), ErrorCategory::Gate);
}

#[test]
fn test_decode_element_rejects_old_metadata() {
    let element = Element {
        name: "io.acme.Old",
        header: Some(KotlinClassHeader::new(1, &[1, 0, 3])),
    };
    let reader = |_: &KotlinClassHeader| -> Result<KotlinClassMetadata, MetadataError> {
        Ok(KotlinClassMetadata::Class(generics_class()))
    };
    let err = decode_element(&element, &reader, DecodeOptions::default())
        .expect_err("version 1.0 is too old");
    assert_eq!(
        err,
        DecodeError::UnsupportedMetadataVersion {
            found: "1.0.3".to_string()
        }
    );
}

#[test]
fn test_reader_failures_propagate() {
    let element = Element {
        name: "io.acme.Corrupt",
        header: Some(KotlinClassHeader::new(1, &[1, 1])),
    };
    let reader = |_: &KotlinClassHeader| -> Result<KotlinClassMetadata, MetadataError> {
        Err(MetadataError::Corrupt("truncated d1".to_string()))
    };
    let err = decode_element(&element, &reader, DecodeOptions::default())
        .expect_err("reader failed");
    assert_eq!(
        err,
        DecodeError::Metadata(MetadataError::Corrupt("truncated d1".to_string()))
    );
    assert_eq!(err.category(), ErrorCategory::MalformedInput);
}

#[test]
fn test_options_parse_from_camel_case_json() {
    let options: DecodeOptions =
        serde_json::from_str(r#"{ "preferTypeAliases": true }"#).expect("options parse");
    assert!(options.prefer_type_aliases);
    let defaults: DecodeOptions = serde_json::from_str("{}").expect("empty options parse");
    assert_eq!(defaults, DecodeOptions::default());
}
