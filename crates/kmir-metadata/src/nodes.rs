//! Decoded declaration node tree.
//!
//! These nodes are what the external metadata reader hands back after the
//! wire-level decoding: plain owned data, one struct per node kind of the
//! fixed declaration schema. Class names use the metadata spelling, where `/`
//! separates package segments and `.` separates nested classes
//! (`"kotlin/collections/Map.Entry"`).
//!
//! The tree derives `Deserialize` so metadata dumps can be stored as JSON
//! fixtures. The chained constructors at the bottom of the file exist for the
//! same reason.

use crate::flags::{Flags, type_flags};
use serde::{Deserialize, Serialize};

/// A class declaration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmClass {
    #[serde(default)]
    pub flags: Flags,
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<KmTypeParameter>,
    /// Superclass first (when there is one), then interfaces.
    #[serde(default)]
    pub supertypes: Vec<KmType>,
    #[serde(default)]
    pub constructors: Vec<KmConstructor>,
    #[serde(default)]
    pub properties: Vec<KmProperty>,
    #[serde(default)]
    pub functions: Vec<KmFunction>,
    #[serde(default)]
    pub companion_object: Option<String>,
    #[serde(default)]
    pub nested_classes: Vec<String>,
    #[serde(default)]
    pub enum_entries: Vec<String>,
    #[serde(default)]
    pub sealed_subclasses: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmConstructor {
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub value_parameters: Vec<KmValueParameter>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmFunction {
    #[serde(default)]
    pub flags: Flags,
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<KmTypeParameter>,
    #[serde(default)]
    pub receiver_parameter_type: Option<KmType>,
    #[serde(default)]
    pub value_parameters: Vec<KmValueParameter>,
    pub return_type: KmType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmProperty {
    #[serde(default)]
    pub flags: Flags,
    pub name: String,
    #[serde(default)]
    pub getter_flags: Flags,
    #[serde(default)]
    pub setter_flags: Flags,
    #[serde(default)]
    pub type_parameters: Vec<KmTypeParameter>,
    #[serde(default)]
    pub receiver_parameter_type: Option<KmType>,
    pub return_type: KmType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmValueParameter {
    #[serde(default)]
    pub flags: Flags,
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<KmType>,
    /// Set only for `vararg` parameters; `ty` then holds the array type.
    #[serde(default)]
    pub vararg_element_type: Option<KmType>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmTypeParameter {
    #[serde(default)]
    pub flags: Flags,
    pub name: String,
    /// Unique within the declaring scope only.
    pub id: u32,
    #[serde(default)]
    pub variance: KmVariance,
    #[serde(default)]
    pub upper_bounds: Vec<KmType>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KmVariance {
    #[default]
    Invariant,
    In,
    Out,
}

/// A type reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmType {
    #[serde(default)]
    pub flags: Flags,
    /// Always present in well-formed input.
    #[serde(default)]
    pub classifier: Option<KmClassifier>,
    #[serde(default)]
    pub arguments: Vec<KmTypeProjection>,
    /// Type-alias spelling of a type whose classifier is the expanded class.
    #[serde(default)]
    pub abbreviated_type: Option<Box<KmType>>,
    /// Underlying type of a type-alias classifier.
    #[serde(default)]
    pub expanded_type: Option<Box<KmType>>,
    /// Enclosing type of an inner class reference.
    #[serde(default)]
    pub outer_type: Option<Box<KmType>>,
    #[serde(default)]
    pub flexible_type_upper_bound: Option<Box<KmFlexibleTypeUpperBound>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KmClassifier {
    Class(String),
    TypeParameter(u32),
    TypeAlias(String),
}

/// A type argument. Star projections have neither variance nor type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmTypeProjection {
    #[serde(default)]
    pub variance: Option<KmVariance>,
    #[serde(default, rename = "type")]
    pub ty: Option<KmType>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmFlexibleTypeUpperBound {
    #[serde(rename = "type")]
    pub ty: KmType,
    #[serde(default)]
    pub type_flexibility_id: Option<String>,
}

// =============================================================================
// Construction helpers
// =============================================================================

impl KmClass {
    pub fn new(flags: Flags, name: impl Into<String>) -> Self {
        KmClass {
            flags,
            name: name.into(),
            ..KmClass::default()
        }
    }
}

impl KmConstructor {
    pub fn new(flags: Flags, value_parameters: Vec<KmValueParameter>) -> Self {
        KmConstructor {
            flags,
            value_parameters,
        }
    }
}

impl KmFunction {
    pub fn new(flags: Flags, name: impl Into<String>, return_type: KmType) -> Self {
        KmFunction {
            flags,
            name: name.into(),
            type_parameters: Vec::new(),
            receiver_parameter_type: None,
            value_parameters: Vec::new(),
            return_type,
        }
    }
}

impl KmProperty {
    pub fn new(flags: Flags, name: impl Into<String>, return_type: KmType) -> Self {
        KmProperty {
            flags,
            name: name.into(),
            getter_flags: Flags::empty(),
            setter_flags: Flags::empty(),
            type_parameters: Vec::new(),
            receiver_parameter_type: None,
            return_type,
        }
    }
}

impl KmValueParameter {
    pub fn new(name: impl Into<String>, ty: KmType) -> Self {
        KmValueParameter {
            flags: Flags::empty(),
            name: name.into(),
            ty: Some(ty),
            vararg_element_type: None,
        }
    }

    pub fn vararg(name: impl Into<String>, array_type: KmType, element_type: KmType) -> Self {
        KmValueParameter {
            flags: Flags::empty(),
            name: name.into(),
            ty: Some(array_type),
            vararg_element_type: Some(element_type),
        }
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }
}

impl KmTypeParameter {
    pub fn new(name: impl Into<String>, id: u32, variance: KmVariance) -> Self {
        KmTypeParameter {
            flags: Flags::empty(),
            name: name.into(),
            id,
            variance,
            upper_bounds: Vec::new(),
        }
    }

    pub fn with_upper_bound(mut self, bound: KmType) -> Self {
        self.upper_bounds.push(bound);
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }
}

impl KmType {
    pub fn class(name: impl Into<String>) -> Self {
        KmType {
            classifier: Some(KmClassifier::Class(name.into())),
            ..KmType::default()
        }
    }

    pub fn type_parameter(id: u32) -> Self {
        KmType {
            classifier: Some(KmClassifier::TypeParameter(id)),
            ..KmType::default()
        }
    }

    pub fn type_alias(name: impl Into<String>, expanded: KmType) -> Self {
        KmType {
            classifier: Some(KmClassifier::TypeAlias(name.into())),
            expanded_type: Some(Box::new(expanded)),
            ..KmType::default()
        }
    }

    pub fn nullable(mut self) -> Self {
        self.flags |= type_flags::IS_NULLABLE;
        self
    }

    pub fn suspend(mut self) -> Self {
        self.flags |= type_flags::IS_SUSPEND;
        self
    }

    pub fn extension_function(mut self) -> Self {
        self.flags |= type_flags::IS_EXTENSION_FUNCTION;
        self
    }

    pub fn with_argument(mut self, argument: KmTypeProjection) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Adds each type as an invariant argument.
    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = KmType>) -> Self {
        self.arguments
            .extend(arguments.into_iter().map(KmTypeProjection::invariant));
        self
    }

    pub fn with_abbreviation(mut self, alias: KmType) -> Self {
        self.abbreviated_type = Some(Box::new(alias));
        self
    }

    pub fn with_outer_type(mut self, outer: KmType) -> Self {
        self.outer_type = Some(Box::new(outer));
        self
    }

    pub fn with_flexible_upper_bound(mut self, upper: KmType) -> Self {
        self.flexible_type_upper_bound = Some(Box::new(KmFlexibleTypeUpperBound {
            ty: upper,
            type_flexibility_id: None,
        }));
        self
    }
}

impl KmTypeProjection {
    pub fn star() -> Self {
        KmTypeProjection::default()
    }

    pub fn new(variance: KmVariance, ty: KmType) -> Self {
        KmTypeProjection {
            variance: Some(variance),
            ty: Some(ty),
        }
    }

    pub fn invariant(ty: KmType) -> Self {
        KmTypeProjection::new(KmVariance::Invariant, ty)
    }

    /// `out T`
    pub fn covariant(ty: KmType) -> Self {
        KmTypeProjection::new(KmVariance::Out, ty)
    }

    /// `in T`
    pub fn contravariant(ty: KmType) -> Self {
        KmTypeProjection::new(KmVariance::In, ty)
    }

    pub fn is_star(&self) -> bool {
        self.variance.is_none() && self.ty.is_none()
    }
}

#[cfg(test)]
#[path = "../tests/nodes_tests.rs"]
mod tests;
