//! Source modifiers implied by declaration flags.

use kmir_metadata::{Flags, Modality, Visibility};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Internal,
    Private,
    Final,
    Open,
    Abstract,
    Sealed,
    Data,
    Inline,
    Inner,
    External,
    Expect,
    Override,
    Operator,
    Infix,
    Tailrec,
    Suspend,
    Const,
    Lateinit,
    Vararg,
    Crossinline,
    Noinline,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Internal => "internal",
            Modifier::Private => "private",
            Modifier::Final => "final",
            Modifier::Open => "open",
            Modifier::Abstract => "abstract",
            Modifier::Sealed => "sealed",
            Modifier::Data => "data",
            Modifier::Inline => "inline",
            Modifier::Inner => "inner",
            Modifier::External => "external",
            Modifier::Expect => "expect",
            Modifier::Override => "override",
            Modifier::Operator => "operator",
            Modifier::Infix => "infix",
            Modifier::Tailrec => "tailrec",
            Modifier::Suspend => "suspend",
            Modifier::Const => "const",
            Modifier::Lateinit => "lateinit",
            Modifier::Vararg => "vararg",
            Modifier::Crossinline => "crossinline",
            Modifier::Noinline => "noinline",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl From<Visibility> for Modifier {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => Modifier::Public,
            Visibility::Internal => Modifier::Internal,
            Visibility::Protected => Modifier::Protected,
            Visibility::Private => Modifier::Private,
        }
    }
}

impl From<Modality> for Modifier {
    fn from(modality: Modality) -> Self {
        match modality {
            Modality::Final => Modifier::Final,
            Modality::Open => Modifier::Open,
            Modality::Abstract => Modifier::Abstract,
            Modality::Sealed => Modifier::Sealed,
        }
    }
}

fn push_if(out: &mut Vec<Modifier>, condition: bool, modifier: Modifier) {
    if condition {
        out.push(modifier);
    }
}

pub fn class_modifiers(flags: Flags) -> Vec<Modifier> {
    let mut out = vec![Modifier::from(flags.visibility())];
    out.extend(flags.modalities().into_iter().map(Modifier::from));
    push_if(&mut out, flags.is_data_class(), Modifier::Data);
    push_if(&mut out, flags.is_external_class(), Modifier::External);
    push_if(&mut out, flags.is_inline_class(), Modifier::Inline);
    push_if(&mut out, flags.is_inner_class(), Modifier::Inner);
    push_if(&mut out, flags.is_expect_class(), Modifier::Expect);
    out
}

pub fn function_modifiers(flags: Flags) -> Vec<Modifier> {
    let mut out = vec![Modifier::from(flags.visibility())];
    out.extend(flags.modalities().into_iter().map(Modifier::from));
    push_if(&mut out, flags.is_fake_override_function(), Modifier::Override);
    push_if(&mut out, flags.is_operator_function(), Modifier::Operator);
    push_if(&mut out, flags.is_infix_function(), Modifier::Infix);
    push_if(&mut out, flags.is_inline_function(), Modifier::Inline);
    push_if(&mut out, flags.is_tailrec_function(), Modifier::Tailrec);
    push_if(&mut out, flags.is_external_function(), Modifier::External);
    push_if(&mut out, flags.is_expect_function(), Modifier::Expect);
    push_if(&mut out, flags.is_suspend_function(), Modifier::Suspend);
    out
}

/// Properties keep `final` only when it closes an override.
pub fn property_modifiers(flags: Flags) -> Vec<Modifier> {
    let is_override = flags.is_fake_override_property();
    let mut out = vec![Modifier::from(flags.visibility())];
    out.extend(
        flags
            .declared_modalities()
            .into_iter()
            .filter(|m| *m != Modality::Final || is_override)
            .map(Modifier::from),
    );
    push_if(&mut out, is_override, Modifier::Override);
    push_if(&mut out, flags.is_const_property(), Modifier::Const);
    push_if(&mut out, flags.is_expect_property(), Modifier::Expect);
    push_if(&mut out, flags.is_external_property(), Modifier::External);
    push_if(&mut out, flags.is_lateinit_property(), Modifier::Lateinit);
    out
}

/// Modifiers of a getter or setter. Empty when the accessor is a plain
/// public one, so callers can leave it implicit.
pub fn accessor_modifiers(accessor: Flags, property: Flags) -> Vec<Modifier> {
    let is_override = property.is_fake_override_property();
    let visibility = accessor.visibility();
    let modalities: Vec<Modifier> = accessor
        .declared_modalities()
        .into_iter()
        .filter(|m| *m != Modality::Final || is_override)
        .map(Modifier::from)
        .collect();
    let is_external = accessor.is_accessor_external();
    let is_inline = accessor.is_accessor_inline();
    if visibility == Visibility::Public && modalities.is_empty() && !is_external && !is_inline {
        return Vec::new();
    }

    let mut out = vec![Modifier::from(visibility)];
    out.extend(modalities);
    push_if(&mut out, is_external, Modifier::External);
    push_if(&mut out, is_inline, Modifier::Inline);
    out
}

pub fn parameter_modifiers(flags: Flags, is_vararg: bool) -> Vec<Modifier> {
    let mut out = Vec::new();
    push_if(&mut out, is_vararg, Modifier::Vararg);
    push_if(&mut out, flags.is_crossinline(), Modifier::Crossinline);
    push_if(&mut out, flags.is_noinline(), Modifier::Noinline);
    out
}

#[cfg(test)]
#[path = "../tests/modifiers_tests.rs"]
mod tests;
