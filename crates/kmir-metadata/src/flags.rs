//! Flag word attached to every declaration node.
//!
//! Every metadata node carries a single `u32` flag word. The low bits have the
//! same meaning for every node kind (annotations, visibility, modality); the
//! bits from [`KIND_SPECIFIC_SHIFT`] upward are interpreted per node kind and
//! are named in the `*_flags` modules below. Predicates are pure and total:
//! any bit pattern is accepted and answers every question.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// First bit whose meaning depends on the node kind.
pub const KIND_SPECIFIC_SHIFT: u32 = 11;

const fn kind_bit(offset: u32) -> Flags {
    Flags::from_bits_retain(1 << (KIND_SPECIFIC_SHIFT + offset))
}

bitflags! {
    /// Common flags shared by every node kind.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        const HAS_ANNOTATIONS = 1 << 0;

        const IS_INTERNAL = 1 << 1;
        const IS_PRIVATE = 1 << 2;
        const IS_PROTECTED = 1 << 3;
        const IS_PUBLIC = 1 << 4;
        const IS_PRIVATE_TO_THIS = 1 << 5;
        const IS_LOCAL = 1 << 6;

        const IS_FINAL = 1 << 7;
        const IS_OPEN = 1 << 8;
        const IS_ABSTRACT = 1 << 9;
        const IS_SEALED = 1 << 10;
    }
}

/// Type node flags.
pub mod type_flags {
    use super::{Flags, kind_bit};

    pub const IS_NULLABLE: Flags = kind_bit(0);
    pub const IS_SUSPEND: Flags = kind_bit(1);
    /// The type is a function type written with a receiver (`T.() -> R`).
    pub const IS_EXTENSION_FUNCTION: Flags = kind_bit(2);
}

/// Class node flags.
pub mod class_flags {
    use super::{Flags, kind_bit};

    pub const IS_CLASS: Flags = kind_bit(0);
    pub const IS_INTERFACE: Flags = kind_bit(1);
    pub const IS_ENUM_CLASS: Flags = kind_bit(2);
    pub const IS_ENUM_ENTRY: Flags = kind_bit(3);
    pub const IS_ANNOTATION_CLASS: Flags = kind_bit(4);
    pub const IS_OBJECT: Flags = kind_bit(5);
    pub const IS_COMPANION_OBJECT: Flags = kind_bit(6);
    pub const IS_INNER: Flags = kind_bit(7);
    pub const IS_DATA: Flags = kind_bit(8);
    pub const IS_EXTERNAL: Flags = kind_bit(9);
    pub const IS_EXPECT: Flags = kind_bit(10);
    pub const IS_INLINE: Flags = kind_bit(11);
}

/// Constructor node flags.
pub mod constructor_flags {
    use super::{Flags, kind_bit};

    pub const IS_PRIMARY: Flags = kind_bit(0);
}

/// Function node flags.
pub mod function_flags {
    use super::{Flags, kind_bit};

    pub const IS_DECLARATION: Flags = kind_bit(0);
    pub const IS_FAKE_OVERRIDE: Flags = kind_bit(1);
    pub const IS_DELEGATION: Flags = kind_bit(2);
    pub const IS_SYNTHESIZED: Flags = kind_bit(3);
    pub const IS_OPERATOR: Flags = kind_bit(4);
    pub const IS_INFIX: Flags = kind_bit(5);
    pub const IS_INLINE: Flags = kind_bit(6);
    pub const IS_TAILREC: Flags = kind_bit(7);
    pub const IS_EXTERNAL: Flags = kind_bit(8);
    pub const IS_SUSPEND: Flags = kind_bit(9);
    pub const IS_EXPECT: Flags = kind_bit(10);
}

/// Property node flags.
pub mod property_flags {
    use super::{Flags, kind_bit};

    pub const IS_VAR: Flags = kind_bit(0);
    pub const HAS_GETTER: Flags = kind_bit(1);
    pub const HAS_SETTER: Flags = kind_bit(2);
    pub const IS_CONST: Flags = kind_bit(3);
    pub const IS_LATEINIT: Flags = kind_bit(4);
    pub const HAS_CONSTANT: Flags = kind_bit(5);
    pub const IS_EXTERNAL: Flags = kind_bit(6);
    pub const IS_DELEGATED: Flags = kind_bit(7);
    pub const IS_EXPECT: Flags = kind_bit(8);
    pub const IS_DECLARATION: Flags = kind_bit(9);
    pub const IS_FAKE_OVERRIDE: Flags = kind_bit(10);
    pub const IS_DELEGATION: Flags = kind_bit(11);
    pub const IS_SYNTHESIZED: Flags = kind_bit(12);
}

/// Getter/setter flags.
pub mod accessor_flags {
    use super::{Flags, kind_bit};

    pub const IS_NOT_DEFAULT: Flags = kind_bit(0);
    pub const IS_EXTERNAL: Flags = kind_bit(1);
    pub const IS_INLINE: Flags = kind_bit(2);
}

/// Value parameter flags.
pub mod parameter_flags {
    use super::{Flags, kind_bit};

    pub const DECLARES_DEFAULT_VALUE: Flags = kind_bit(0);
    pub const IS_CROSSINLINE: Flags = kind_bit(1);
    pub const IS_NOINLINE: Flags = kind_bit(2);
}

/// Type parameter flags.
pub mod type_parameter_flags {
    use super::{Flags, kind_bit};

    pub const IS_REIFIED: Flags = kind_bit(0);
}

// =============================================================================
// Derived enums
// =============================================================================

/// Declared visibility of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Declared modality of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Final,
    Open,
    Abstract,
    Sealed,
}

/// What kind of classifier a class node declares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    Object,
    CompanionObject,
}

// =============================================================================
// Predicates
// =============================================================================

impl Flags {
    /// Test an arbitrary mask, common or kind-specific.
    pub const fn has(self, mask: Flags) -> bool {
        self.contains(mask)
    }

    // Common flags.
    pub const fn has_annotations(self) -> bool {
        self.contains(Flags::HAS_ANNOTATIONS)
    }
    pub const fn is_internal(self) -> bool {
        self.contains(Flags::IS_INTERNAL)
    }
    pub const fn is_private(self) -> bool {
        self.contains(Flags::IS_PRIVATE)
    }
    pub const fn is_private_to_this(self) -> bool {
        self.contains(Flags::IS_PRIVATE_TO_THIS)
    }
    pub const fn is_protected(self) -> bool {
        self.contains(Flags::IS_PROTECTED)
    }
    pub const fn is_public(self) -> bool {
        self.contains(Flags::IS_PUBLIC)
    }
    pub const fn is_local(self) -> bool {
        self.contains(Flags::IS_LOCAL)
    }
    pub const fn is_final(self) -> bool {
        self.contains(Flags::IS_FINAL)
    }
    pub const fn is_open(self) -> bool {
        self.contains(Flags::IS_OPEN)
    }
    pub const fn is_abstract(self) -> bool {
        self.contains(Flags::IS_ABSTRACT)
    }
    pub const fn is_sealed(self) -> bool {
        self.contains(Flags::IS_SEALED)
    }

    /// Visibility by priority: internal, then private, then protected.
    /// Public when none of those bits is set.
    pub const fn visibility(self) -> Visibility {
        if self.is_internal() {
            Visibility::Internal
        } else if self.is_private() || self.is_private_to_this() {
            Visibility::Private
        } else if self.is_protected() {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }

    /// Modalities present on the node. A lone `Final` is the default and is
    /// dropped, so a plain final class reports no modality at all.
    pub fn modalities(self) -> SmallVec<[Modality; 2]> {
        let mut modalities = self.declared_modalities();
        if modalities.len() == 1 && modalities[0] == Modality::Final {
            modalities.clear();
        }
        modalities
    }

    /// Every modality bit that is set, `Final` included.
    pub fn declared_modalities(self) -> SmallVec<[Modality; 2]> {
        let mut modalities = SmallVec::new();
        if self.is_final() {
            modalities.push(Modality::Final);
        }
        if self.is_open() {
            modalities.push(Modality::Open);
        }
        if self.is_abstract() {
            modalities.push(Modality::Abstract);
        }
        if self.is_sealed() {
            modalities.push(Modality::Sealed);
        }
        modalities
    }

    // Type flags.
    pub const fn is_nullable_type(self) -> bool {
        self.contains(type_flags::IS_NULLABLE)
    }
    pub const fn is_suspend_type(self) -> bool {
        self.contains(type_flags::IS_SUSPEND)
    }
    pub const fn is_extension_function_type(self) -> bool {
        self.contains(type_flags::IS_EXTENSION_FUNCTION)
    }

    // Class flags.
    pub const fn is_class(self) -> bool {
        self.contains(class_flags::IS_CLASS)
    }
    pub const fn is_interface(self) -> bool {
        self.contains(class_flags::IS_INTERFACE)
    }
    pub const fn is_enum_class(self) -> bool {
        self.contains(class_flags::IS_ENUM_CLASS)
    }
    pub const fn is_enum_entry(self) -> bool {
        self.contains(class_flags::IS_ENUM_ENTRY)
    }
    pub const fn is_annotation_class(self) -> bool {
        self.contains(class_flags::IS_ANNOTATION_CLASS)
    }
    pub const fn is_object_class(self) -> bool {
        self.contains(class_flags::IS_OBJECT)
    }
    pub const fn is_companion_object_class(self) -> bool {
        self.contains(class_flags::IS_COMPANION_OBJECT)
    }
    pub const fn is_inner_class(self) -> bool {
        self.contains(class_flags::IS_INNER)
    }
    pub const fn is_data_class(self) -> bool {
        self.contains(class_flags::IS_DATA)
    }
    pub const fn is_external_class(self) -> bool {
        self.contains(class_flags::IS_EXTERNAL)
    }
    pub const fn is_expect_class(self) -> bool {
        self.contains(class_flags::IS_EXPECT)
    }
    pub const fn is_inline_class(self) -> bool {
        self.contains(class_flags::IS_INLINE)
    }

    /// Classifier kind, checked from the most to the least specific flag.
    pub const fn class_kind(self) -> ClassKind {
        if self.is_annotation_class() {
            ClassKind::AnnotationClass
        } else if self.is_companion_object_class() {
            ClassKind::CompanionObject
        } else if self.is_enum_entry() {
            ClassKind::EnumEntry
        } else if self.is_enum_class() {
            ClassKind::EnumClass
        } else if self.is_object_class() {
            ClassKind::Object
        } else if self.is_interface() {
            ClassKind::Interface
        } else {
            ClassKind::Class
        }
    }

    // Constructor flags.
    pub const fn is_primary_constructor(self) -> bool {
        self.contains(constructor_flags::IS_PRIMARY)
    }
    pub const fn is_secondary_constructor(self) -> bool {
        !self.is_primary_constructor()
    }

    // Function flags.
    pub const fn is_declaration_function(self) -> bool {
        self.contains(function_flags::IS_DECLARATION)
    }
    pub const fn is_fake_override_function(self) -> bool {
        self.contains(function_flags::IS_FAKE_OVERRIDE)
    }
    pub const fn is_delegation_function(self) -> bool {
        self.contains(function_flags::IS_DELEGATION)
    }
    pub const fn is_synthesized_function(self) -> bool {
        self.contains(function_flags::IS_SYNTHESIZED)
    }
    pub const fn is_operator_function(self) -> bool {
        self.contains(function_flags::IS_OPERATOR)
    }
    pub const fn is_infix_function(self) -> bool {
        self.contains(function_flags::IS_INFIX)
    }
    pub const fn is_inline_function(self) -> bool {
        self.contains(function_flags::IS_INLINE)
    }
    pub const fn is_tailrec_function(self) -> bool {
        self.contains(function_flags::IS_TAILREC)
    }
    pub const fn is_external_function(self) -> bool {
        self.contains(function_flags::IS_EXTERNAL)
    }
    pub const fn is_suspend_function(self) -> bool {
        self.contains(function_flags::IS_SUSPEND)
    }
    pub const fn is_expect_function(self) -> bool {
        self.contains(function_flags::IS_EXPECT)
    }

    // Property flags.
    pub const fn is_var_property(self) -> bool {
        self.contains(property_flags::IS_VAR)
    }
    pub const fn is_val_property(self) -> bool {
        !self.is_var_property()
    }
    pub const fn has_getter(self) -> bool {
        self.contains(property_flags::HAS_GETTER)
    }
    pub const fn has_setter(self) -> bool {
        self.contains(property_flags::HAS_SETTER)
    }
    pub const fn is_const_property(self) -> bool {
        self.contains(property_flags::IS_CONST)
    }
    pub const fn is_lateinit_property(self) -> bool {
        self.contains(property_flags::IS_LATEINIT)
    }
    pub const fn has_constant(self) -> bool {
        self.contains(property_flags::HAS_CONSTANT)
    }
    pub const fn is_external_property(self) -> bool {
        self.contains(property_flags::IS_EXTERNAL)
    }
    pub const fn is_delegated_property(self) -> bool {
        self.contains(property_flags::IS_DELEGATED)
    }
    pub const fn is_expect_property(self) -> bool {
        self.contains(property_flags::IS_EXPECT)
    }
    pub const fn is_fake_override_property(self) -> bool {
        self.contains(property_flags::IS_FAKE_OVERRIDE)
    }
    pub const fn is_synthesized_property(self) -> bool {
        self.contains(property_flags::IS_SYNTHESIZED)
    }

    // Accessor flags.
    pub const fn is_accessor_not_default(self) -> bool {
        self.contains(accessor_flags::IS_NOT_DEFAULT)
    }
    pub const fn is_accessor_external(self) -> bool {
        self.contains(accessor_flags::IS_EXTERNAL)
    }
    pub const fn is_accessor_inline(self) -> bool {
        self.contains(accessor_flags::IS_INLINE)
    }

    // Value parameter flags.
    pub const fn declares_default_value(self) -> bool {
        self.contains(parameter_flags::DECLARES_DEFAULT_VALUE)
    }
    pub const fn is_crossinline(self) -> bool {
        self.contains(parameter_flags::IS_CROSSINLINE)
    }
    pub const fn is_noinline(self) -> bool {
        self.contains(parameter_flags::IS_NOINLINE)
    }

    // Type parameter flags.
    pub const fn is_reified_type_parameter(self) -> bool {
        self.contains(type_parameter_flags::IS_REIFIED)
    }
}

// The word travels as a bare integer; kind-specific bits have no global names.
impl Serialize for Flags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for Flags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Flags::from_bits_retain)
    }
}

#[cfg(test)]
#[path = "../tests/flags_tests.rs"]
mod tests;
