//! Type parameter scopes.
//!
//! Type parameters are referenced by small integer ids that are only unique
//! within their declaring scope. A class opens a root scope; each function or
//! property with its own type parameters opens a child scope that shadows the
//! class table on id collision and is dropped once the member is decoded.

use crate::decode::DecodeOptions;
use crate::error::DecodeError;
use crate::type_param::resolve_type_parameter;
use kmir_metadata::KmTypeParameter;
use kmir_model::TypeVariable;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Id to type variable resolution, as seen from one point in a declaration.
pub trait TypeParameterLookup {
    fn lookup(&self, id: u32) -> Option<Arc<TypeVariable>>;
}

impl<F> TypeParameterLookup for F
where
    F: Fn(u32) -> Option<Arc<TypeVariable>>,
{
    fn lookup(&self, id: u32) -> Option<Arc<TypeVariable>> {
        self(id)
    }
}

#[derive(Debug, Default)]
pub struct TypeParameterScope<'a> {
    parent: Option<&'a TypeParameterScope<'a>>,
    table: FxHashMap<u32, Arc<TypeVariable>>,
    /// Local declarations in order.
    declared: Vec<Arc<TypeVariable>>,
}

impl<'a> TypeParameterScope<'a> {
    pub fn root() -> Self {
        TypeParameterScope::default()
    }

    /// An empty scope layered over `self`.
    pub fn child(&self) -> TypeParameterScope<'_> {
        TypeParameterScope {
            parent: Some(self),
            table: FxHashMap::default(),
            declared: Vec::new(),
        }
    }

    pub fn declare(&mut self, variable: Arc<TypeVariable>) {
        self.table.insert(variable.id, Arc::clone(&variable));
        self.declared.push(variable);
    }

    /// Declare `params` in order. Each parameter's bounds see the enclosing
    /// scopes and the parameters declared before it, never later ones.
    pub fn declare_all(
        &mut self,
        params: &[KmTypeParameter],
        options: DecodeOptions,
    ) -> Result<(), DecodeError> {
        for param in params {
            let variable = resolve_type_parameter(param, &*self, options)?;
            self.declare(Arc::new(variable));
        }
        Ok(())
    }

    /// Parameters declared in this scope, excluding parents.
    pub fn declared(&self) -> &[Arc<TypeVariable>] {
        &self.declared
    }

    pub fn depth(&self) -> usize {
        self.parent.map_or(0, |parent| parent.depth() + 1)
    }
}

impl TypeParameterLookup for TypeParameterScope<'_> {
    fn lookup(&self, id: u32) -> Option<Arc<TypeVariable>> {
        match self.table.get(&id) {
            Some(variable) => Some(Arc::clone(variable)),
            None => self.parent.and_then(|parent| parent.lookup(id)),
        }
    }
}

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod tests;
