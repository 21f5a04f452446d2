use crate::error::SynthesisError;
use crate::spec::{AnnotationMember, AnnotationSpec, Expr};
use kmir_model::ClassName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value of the `value` member on generated annotations.
pub const GENERATOR_NAME: &str = "kmir";
const GENERATOR_URL: &str = "https://github.com/kmir-rs/kmir";

/// The `@Generated` annotation to attach to synthesized declarations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GeneratedAnnotation {
    /// `javax.annotation.processing.Generated` (JDK 9+)
    Processing,
    /// `javax.annotation.Generated` (before JDK 9)
    Legacy,
}

impl GeneratedAnnotation {
    pub fn qualified_name(self) -> &'static str {
        match self {
            GeneratedAnnotation::Processing => "javax.annotation.processing.Generated",
            GeneratedAnnotation::Legacy => "javax.annotation.Generated",
        }
    }

    pub fn class_name(self) -> ClassName {
        ClassName::best_guess(self.qualified_name())
    }

    pub fn annotation_spec(self) -> AnnotationSpec {
        AnnotationSpec {
            ty: self.class_name(),
            members: vec![
                AnnotationMember {
                    name: "value".to_string(),
                    value: Expr::ArrayLiteral {
                        elements: vec![Expr::string(GENERATOR_NAME)],
                    },
                },
                AnnotationMember {
                    name: "comments".to_string(),
                    value: Expr::string(GENERATOR_URL),
                },
            ],
        }
    }
}

impl FromStr for GeneratedAnnotation {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "javax.annotation.processing.Generated" => Ok(GeneratedAnnotation::Processing),
            "javax.annotation.Generated" => Ok(GeneratedAnnotation::Legacy),
            other => Err(SynthesisError::InvalidGeneratedAnnotation {
                found: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for GeneratedAnnotation {
    type Error = SynthesisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GeneratedAnnotation> for String {
    fn from(value: GeneratedAnnotation) -> Self {
        value.qualified_name().to_string()
    }
}

impl fmt::Display for GeneratedAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SynthOptions {
    /// Annotate the builder and the extension with `@Generated`.
    pub generated: Option<GeneratedAnnotation>,
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
