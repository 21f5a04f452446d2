//! Collision-free identifier allocation.
//!
//! Real names are reserved first; synthesized symbols are then minted from a
//! suggestion, sanitized into a Kotlin identifier and suffixed with `_` until
//! they collide with neither a keyword nor an earlier allocation.

use crate::error::SynthesisError;
use rustc_hash::{FxHashMap, FxHashSet};

/// Kotlin hard keywords, which can never be used as bare identifiers.
const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

#[derive(Debug, Default, Clone)]
pub struct NameAllocator {
    allocated: FxHashSet<String>,
    tags: FxHashMap<String, String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        NameAllocator::default()
    }

    /// Allocate a name derived from `suggestion`.
    pub fn new_name(&mut self, suggestion: &str) -> String {
        let mut candidate = to_identifier(suggestion);
        while is_keyword(&candidate) || self.allocated.contains(&candidate) {
            candidate.push('_');
        }
        self.allocated.insert(candidate.clone());
        candidate
    }

    /// Allocate a name and remember it under `tag`.
    pub fn new_name_tagged(&mut self, suggestion: &str, tag: &str) -> Result<String, SynthesisError> {
        if self.tags.contains_key(tag) {
            return Err(SynthesisError::DuplicateNameTag {
                tag: tag.to_string(),
            });
        }
        let name = self.new_name(suggestion);
        self.tags.insert(tag.to_string(), name.clone());
        Ok(name)
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.tags.get(tag).map(String::as_str)
    }

    pub fn is_allocated(&self, name: &str) -> bool {
        self.allocated.contains(name)
    }
}

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Replace every non-identifier character with `_` and make sure the result
/// starts with a letter or `_`.
pub fn to_identifier(suggestion: &str) -> String {
    let mut out = String::with_capacity(suggestion.len() + 1);
    for (i, ch) in suggestion.chars().enumerate() {
        if i == 0 && !(ch.is_alphabetic() || ch == '_') {
            out.push('_');
        }
        out.push(if ch.is_alphanumeric() || ch == '_' { ch } else { '_' });
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

#[cfg(test)]
#[path = "../tests/name_allocator_tests.rs"]
mod tests;
