//! Copy-builder synthesis.
//!
//! For a class `Foo(val bar: String, val baz: Int)` this produces
//!
//! ```text
//! class FooDynamicBuilder internal constructor(source: Foo) {
//!     private val source: Foo = source
//!     var bar: String = source.bar
//!     var baz: Int = source.baz
//!     internal fun build(): Foo = source.copy(bar = bar, baz = baz)
//! }
//!
//! fun Foo.copyDynamic(copyBlock: FooDynamicBuilder.() -> Unit): Foo =
//!     FooDynamicBuilder(this).also { copyBlock(it) }.build()
//! ```
//!
//! as structured specs.

use crate::error::SynthesisError;
use crate::name_allocator::NameAllocator;
use crate::options::SynthOptions;
use crate::spec::{
    AnnotationSpec, Argument, Expr, FunSpec, Lambda, ParameterSpec, PropertySpec, Statement,
    SynthesizedFile, TypeSpec,
};
use kmir_model::{
    ClassDecl, ClassName, Declaration, Modifier, PropertyDecl, TypeExpression, TypeVariable,
    Visibility,
};
use std::sync::Arc;
use tracing::debug;

pub const BUILDER_SUFFIX: &str = "DynamicBuilder";
pub const EXTENSION_NAME: &str = "copyDynamic";

const SOURCE_NAME: &str = "source";
const COPY_BLOCK_NAME: &str = "copyBlock";
const BUILD_NAME: &str = "build";
const FILE_COMMENT: &str = "Code generated by kmir. Do not edit.";

#[tracing::instrument(level = "debug", skip_all, fields(class = %class.name))]
pub fn synthesize(
    class: &ClassDecl,
    options: &SynthOptions,
) -> Result<SynthesizedFile, SynthesisError> {
    let backing = backing_properties(class)?;

    // Real parameter names win; the captured source gets whatever is left.
    let mut names = NameAllocator::new();
    for property in &backing {
        names.new_name(&property.name);
    }
    let source = names.new_name_tagged(SOURCE_NAME, SOURCE_NAME)?;

    let type_variables = invariant_type_variables(&class.type_parameters);
    let rebind_type = |ty: &TypeExpression| {
        ty.map_variables(&|tv: &Arc<TypeVariable>| rebind(&type_variables, tv))
    };
    let declared_variables: Vec<Arc<TypeVariable>> = type_variables
        .iter()
        .map(|(_, copy)| Arc::clone(copy))
        .collect();

    let builder_name = builder_class_name(&class.name);
    let source_type = rebind_type(&class.as_type());
    let builder_type =
        TypeExpression::parameterized(builder_name.clone(), source_type.arguments().to_vec());

    let visibility = mirrored_visibility(class.visibility());
    let annotations: Vec<AnnotationSpec> = options
        .generated
        .map(|generated| generated.annotation_spec())
        .into_iter()
        .collect();

    let mut properties = Vec::with_capacity(backing.len() + 1);
    properties.push(PropertySpec {
        name: source.clone(),
        ty: source_type.clone(),
        mutable: false,
        modifiers: vec![Modifier::Private],
        initializer: Some(Expr::name(&source)),
    });
    properties.extend(backing.iter().map(|property| PropertySpec {
        name: property.name.clone(),
        ty: rebind_type(&property.ty),
        mutable: true,
        modifiers: mirrored_visibility(property.visibility()),
        initializer: Some(Expr::name(&source).member(&property.name)),
    }));

    let copy_arguments = backing
        .iter()
        .map(|property| Argument::named(&property.name, Expr::name(&property.name)))
        .collect();
    let build = FunSpec {
        modifiers: vec![Modifier::Internal],
        return_type: Some(source_type.clone()),
        body: vec![Statement::Return(
            Expr::name(&source).call("copy", copy_arguments),
        )],
        ..FunSpec::new(BUILD_NAME)
    };

    let builder = TypeSpec {
        name: builder_name.clone(),
        modifiers: visibility.clone(),
        annotations: annotations.clone(),
        type_variables: declared_variables.clone(),
        primary_constructor: Some(FunSpec {
            modifiers: vec![Modifier::Internal],
            parameters: vec![ParameterSpec {
                name: source.clone(),
                ty: source_type.clone(),
                modifiers: Vec::new(),
            }],
            ..FunSpec::constructor()
        }),
        properties,
        functions: vec![build],
    };

    let extension = copy_extension(
        declared_variables,
        &builder_type,
        source_type,
        visibility,
        annotations,
    );

    debug!(
        builder = %builder_name,
        properties = backing.len(),
        source = %source,
        "synthesized copy builder"
    );

    Ok(SynthesizedFile {
        package_name: builder_name.package_name().to_string(),
        file_name: builder_name.simple_name().to_string(),
        comment: FILE_COMMENT.to_string(),
        builder,
        extension,
    })
}

/// The property backing each primary-constructor parameter, in parameter
/// order. Every one must be reachable from a peer class in the same module.
fn backing_properties(class: &ClassDecl) -> Result<Vec<&PropertyDecl>, SynthesisError> {
    let class_name = class.name.qualified_name();
    let constructor =
        class
            .primary_constructor()
            .ok_or_else(|| SynthesisError::MissingPrimaryConstructor {
                class: class_name.clone(),
            })?;

    constructor
        .parameters
        .iter()
        .map(|parameter| {
            let property = class.property(&parameter.name).ok_or_else(|| {
                SynthesisError::MissingBackingProperty {
                    class: class_name.clone(),
                    parameter: parameter.name.clone(),
                }
            })?;
            match property.visibility() {
                Visibility::Public | Visibility::Internal => Ok(property),
                visibility => Err(SynthesisError::UnsupportedPropertyVisibility {
                    class: class_name.clone(),
                    property: property.name.clone(),
                    visibility,
                }),
            }
        })
        .collect()
}

/// `fun Foo.copyDynamic(copyBlock: FooDynamicBuilder.() -> Unit): Foo`
fn copy_extension(
    type_variables: Vec<Arc<TypeVariable>>,
    builder_type: &TypeExpression,
    source_type: TypeExpression,
    modifiers: Vec<Modifier>,
    annotations: Vec<AnnotationSpec>,
) -> FunSpec {
    let block_type =
        TypeExpression::function(Some(builder_type.clone()), Vec::new(), TypeExpression::unit());

    let configure = Lambda {
        body: vec![Statement::Expr(Expr::invoke(
            COPY_BLOCK_NAME,
            vec![Argument::positional(Expr::It)],
        ))],
    };
    let body = Expr::Construct {
        ty: builder_type.clone(),
        arguments: vec![Argument::positional(Expr::This)],
    }
    .call_with_lambda("also", configure)
    .call(BUILD_NAME, Vec::new());

    FunSpec {
        modifiers,
        annotations,
        type_variables,
        receiver: Some(source_type.clone()),
        parameters: vec![ParameterSpec {
            name: COPY_BLOCK_NAME.to_string(),
            ty: block_type,
            modifiers: Vec::new(),
        }],
        return_type: Some(source_type),
        body: vec![Statement::Return(body)],
        ..FunSpec::new(EXTENSION_NAME)
    }
}

/// Copies of the class type parameters without declaration-site variance,
/// paired with the originals. Function type parameters cannot carry `in`,
/// and the builder reads and writes every parameter. Parameters that need
/// no change keep their original `Arc`.
fn invariant_type_variables(
    declared: &[Arc<TypeVariable>],
) -> Vec<(Arc<TypeVariable>, Arc<TypeVariable>)> {
    let mut pairs: Vec<(Arc<TypeVariable>, Arc<TypeVariable>)> =
        Vec::with_capacity(declared.len());
    for variable in declared {
        let upper_bounds: Vec<TypeExpression> = variable
            .upper_bounds
            .iter()
            .map(|bound| bound.map_variables(&|tv: &Arc<TypeVariable>| rebind(&pairs, tv)))
            .collect();
        let copy = if variable.variance.is_none() && upper_bounds == variable.upper_bounds {
            Arc::clone(variable)
        } else {
            Arc::new(TypeVariable {
                name: variable.name.clone(),
                id: variable.id,
                variance: None,
                upper_bounds,
                reified: variable.reified,
            })
        };
        pairs.push((Arc::clone(variable), copy));
    }
    pairs
}

fn rebind(
    pairs: &[(Arc<TypeVariable>, Arc<TypeVariable>)],
    variable: &Arc<TypeVariable>,
) -> Arc<TypeVariable> {
    pairs
        .iter()
        .find(|(original, _)| Arc::ptr_eq(original, variable))
        .map_or_else(|| Arc::clone(variable), |(_, copy)| Arc::clone(copy))
}

/// Public is the default and stays implicit.
fn mirrored_visibility(visibility: Visibility) -> Vec<Modifier> {
    match visibility {
        Visibility::Public => Vec::new(),
        other => vec![Modifier::from(other)],
    }
}

/// Name of the builder generated for `class`.
pub fn builder_class_name(class: &ClassName) -> ClassName {
    class.peer_class(format!("{}{BUILDER_SUFFIX}", class.simple_name()))
}

#[cfg(test)]
#[path = "../tests/copy_builder_tests.rs"]
mod tests;
