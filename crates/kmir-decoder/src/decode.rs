//! Declaration-shape decoding.
//!
//! Recursive descent over a `KmClass`. Class type parameters are declared
//! before any member is looked at, since constructor, property and function
//! types refer to them by id. Members with their own type parameters decode
//! inside a child scope that is discarded afterwards.

use crate::error::DecodeError;
use crate::scope::TypeParameterScope;
use crate::type_ref::TypeResolver;
use kmir_metadata::{
    AnnotatedElement, KmClass, KmConstructor, KmFunction, KmProperty, KmValueParameter,
    KotlinClassMetadata, MetadataReader,
};
use kmir_model::{
    ClassDecl, ClassName, ConstructorDecl, FunctionDecl, Parameter, PropertyDecl, TypeExpression,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecodeOptions {
    /// Keep type-alias names instead of expanding them.
    pub prefer_type_aliases: bool,
}

pub fn decode_class(class: &KmClass) -> Result<ClassDecl, DecodeError> {
    decode_class_with(class, DecodeOptions::default())
}

#[tracing::instrument(level = "debug", skip_all, fields(class = %class.name))]
pub fn decode_class_with(class: &KmClass, options: DecodeOptions) -> Result<ClassDecl, DecodeError> {
    let mut scope = TypeParameterScope::root();
    scope.declare_all(&class.type_parameters, options)?;
    let types = TypeResolver::new(&scope, options);

    // The superclass, when present, is always encoded first.
    let mut supertypes = class.supertypes.iter().map(|ty| types.resolve(ty));
    let superclass = supertypes
        .next()
        .transpose()?
        .unwrap_or_else(TypeExpression::any);
    let superinterfaces = supertypes.collect::<Result<Vec<_>, _>>()?;

    let constructors = class
        .constructors
        .iter()
        .map(|ctor| decode_constructor(ctor, &types))
        .collect::<Result<Vec<_>, _>>()?;
    let primary_count = constructors.iter().filter(|c| c.is_primary()).count();
    if primary_count > 1 {
        return Err(DecodeError::unexpected(
            format!("class `{}`", class.name),
            format!("{primary_count} constructors are marked primary"),
        ));
    }

    let properties = class
        .properties
        .iter()
        .map(|property| decode_property(property, &scope, options))
        .collect::<Result<Vec<_>, _>>()?;
    let functions = class
        .functions
        .iter()
        .map(|function| decode_function(function, &scope, options))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        constructors = constructors.len(),
        properties = properties.len(),
        functions = functions.len(),
        "decoded class"
    );

    Ok(ClassDecl {
        flags: class.flags,
        name: ClassName::from_metadata(&class.name),
        kind: class.flags.class_kind(),
        type_parameters: scope.declared().to_vec(),
        superclass,
        superinterfaces,
        constructors,
        properties,
        functions,
        companion_object_name: class.companion_object.clone(),
        enum_entries: class.enum_entries.clone(),
        nested_class_names: class.nested_classes.clone(),
        sealed_subclasses: class
            .sealed_subclasses
            .iter()
            .map(|name| ClassName::from_metadata(name))
            .collect(),
    })
}

fn decode_constructor(
    ctor: &KmConstructor,
    types: &TypeResolver<'_>,
) -> Result<ConstructorDecl, DecodeError> {
    let parameters = ctor
        .value_parameters
        .iter()
        .map(|param| decode_parameter(param, types))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ConstructorDecl {
        flags: ctor.flags,
        parameters,
    })
}

fn decode_function(
    function: &KmFunction,
    parent: &TypeParameterScope<'_>,
    options: DecodeOptions,
) -> Result<FunctionDecl, DecodeError> {
    trace!(function = %function.name, "decoding function");
    let mut scope = parent.child();
    scope.declare_all(&function.type_parameters, options)?;
    let types = TypeResolver::new(&scope, options);

    let receiver_type = function
        .receiver_parameter_type
        .as_ref()
        .map(|ty| types.resolve(ty))
        .transpose()?;
    let parameters = function
        .value_parameters
        .iter()
        .map(|param| decode_parameter(param, &types))
        .collect::<Result<Vec<_>, _>>()?;
    let return_type = types.resolve(&function.return_type)?;

    Ok(FunctionDecl {
        flags: function.flags,
        name: function.name.clone(),
        type_parameters: scope.declared().to_vec(),
        receiver_type,
        parameters,
        return_type,
    })
}

fn decode_property(
    property: &KmProperty,
    parent: &TypeParameterScope<'_>,
    options: DecodeOptions,
) -> Result<PropertyDecl, DecodeError> {
    trace!(property = %property.name, "decoding property");
    let mut scope = parent.child();
    scope.declare_all(&property.type_parameters, options)?;
    let types = TypeResolver::new(&scope, options);

    let receiver_type = property
        .receiver_parameter_type
        .as_ref()
        .map(|ty| types.resolve(ty))
        .transpose()?;
    let ty = types.resolve(&property.return_type)?;

    Ok(PropertyDecl {
        flags: property.flags,
        name: property.name.clone(),
        type_parameters: scope.declared().to_vec(),
        receiver_type,
        ty,
        getter_flags: property.getter_flags,
        setter_flags: property
            .flags
            .is_var_property()
            .then_some(property.setter_flags),
    })
}

fn decode_parameter(
    param: &KmValueParameter,
    types: &TypeResolver<'_>,
) -> Result<Parameter, DecodeError> {
    if let Some(element) = &param.vararg_element_type {
        return Ok(Parameter {
            flags: param.flags,
            name: param.name.clone(),
            ty: None,
            vararg_element_type: Some(types.resolve(element)?),
        });
    }

    let ty = param.ty.as_ref().ok_or_else(|| {
        DecodeError::unexpected(
            format!("parameter `{}`", param.name),
            "parameter has neither a type nor a vararg element type",
        )
    })?;
    Ok(Parameter {
        flags: param.flags,
        name: param.name.clone(),
        ty: Some(types.resolve(ty)?),
        vararg_element_type: None,
    })
}

// =============================================================================
// Entry points by metadata kind and by element
// =============================================================================

/// Dispatch on the metadata kind. Only classes carry a declaration shape.
pub fn decode_metadata(
    metadata: &KotlinClassMetadata,
    options: DecodeOptions,
) -> Result<ClassDecl, DecodeError> {
    match metadata {
        KotlinClassMetadata::Class(class) => decode_class_with(class, options),
        other => Err(DecodeError::UnsupportedMetadataKind { kind: other.kind() }),
    }
}

/// Gate on the metadata annotation, read it with `reader` and decode.
pub fn decode_element<E, R>(
    element: &E,
    reader: &R,
    options: DecodeOptions,
) -> Result<ClassDecl, DecodeError>
where
    E: AnnotatedElement + ?Sized,
    R: MetadataReader + ?Sized,
{
    let header = element.metadata_header().ok_or_else(|| {
        DecodeError::MissingMetadataAnnotation {
            element: element.qualified_name().to_string(),
        }
    })?;
    if !header.is_supported_version() {
        return Err(DecodeError::UnsupportedMetadataVersion {
            found: header.version_string(),
        });
    }

    let metadata = reader.read(header)?;
    decode_metadata(&metadata, options)
}

#[cfg(test)]
#[path = "../tests/decode_tests.rs"]
mod tests;
