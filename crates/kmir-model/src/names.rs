//! Qualified class names.

use serde::Serialize;
use std::fmt;

/// A class name split into its package and its chain of simple names
/// (outermost first). `Map.Entry` in `kotlin.collections` is
/// `{ package_name: "kotlin.collections", simple_names: ["Map", "Entry"] }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassName {
    package_name: String,
    simple_names: Vec<String>,
}

impl ClassName {
    pub fn new<S: Into<String>>(
        package_name: impl Into<String>,
        simple_names: impl IntoIterator<Item = S>,
    ) -> Self {
        ClassName {
            package_name: package_name.into(),
            simple_names: simple_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a metadata class name such as `"kotlin/collections/Map.Entry"`.
    /// Package segments are separated by `/`, nested classes by `.`.
    pub fn from_metadata(name: &str) -> Self {
        let (package, classes) = match name.rfind('/') {
            Some(idx) => (&name[..idx], &name[idx + 1..]),
            None => ("", name),
        };
        ClassName {
            package_name: package.replace('/', "."),
            simple_names: classes.split('.').map(str::to_string).collect(),
        }
    }

    /// Split a dotted name by convention: leading segments that start with a
    /// lowercase letter form the package, the rest are nested simple names.
    pub fn best_guess(dotted: &str) -> Self {
        let segments: Vec<&str> = dotted.split('.').collect();
        let split = segments
            .iter()
            .position(|segment| segment.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len().saturating_sub(1));
        ClassName {
            package_name: segments[..split].join("."),
            simple_names: segments[split..].iter().map(|s| (*s).to_string()).collect(),
        }
    }

    pub fn any() -> Self {
        ClassName::new("kotlin", ["Any"])
    }

    pub fn unit() -> Self {
        ClassName::new("kotlin", ["Unit"])
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// Innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map_or("", String::as_str)
    }

    pub fn enclosing_class_name(&self) -> Option<ClassName> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(ClassName {
            package_name: self.package_name.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    pub fn nested_class(&self, name: impl Into<String>) -> ClassName {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(name.into());
        ClassName {
            package_name: self.package_name.clone(),
            simple_names,
        }
    }

    /// Sibling in the same package, replacing the whole simple-name chain.
    pub fn peer_class(&self, name: impl Into<String>) -> ClassName {
        ClassName {
            package_name: self.package_name.clone(),
            simple_names: vec![name.into()],
        }
    }

    pub fn qualified_name(&self) -> String {
        let mut out = String::with_capacity(
            self.package_name.len() + self.simple_names.iter().map(|s| s.len() + 1).sum::<usize>(),
        );
        if !self.package_name.is_empty() {
            out.push_str(&self.package_name);
            out.push('.');
        }
        out.push_str(&self.simple_names.join("."));
        out
    }

    pub fn is_kotlin_any(&self) -> bool {
        self.package_name == "kotlin" && self.simple_names.len() == 1 && self.simple_names[0] == "Any"
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

#[cfg(test)]
#[path = "../tests/names_tests.rs"]
mod tests;
