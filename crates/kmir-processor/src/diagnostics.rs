use kmir_decoder::DecodeError;
use kmir_model::ErrorCategory;
use kmir_synth::SynthesisError;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A per-element failure. Generation is skipped for that element only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    /// Qualified name of the element the failure is attached to.
    pub element: String,
    pub message: String,
    pub kind: ErrorCategory,
}

impl Diagnostic {
    pub fn error(element: impl Into<String>, message: impl Into<String>, kind: ErrorCategory) -> Self {
        Self {
            severity: Severity::Error,
            element: element.into(),
            message: message.into(),
            kind,
        }
    }

    /// Elements without metadata are not Kotlin classes; they only warrant a
    /// warning.
    pub fn from_decode(element: &str, err: &DecodeError) -> Self {
        let kind = err.category();
        let severity = match kind {
            ErrorCategory::Gate => Severity::Warning,
            _ => Severity::Error,
        };
        Self {
            severity,
            element: element.to_string(),
            message: err.to_string(),
            kind,
        }
    }

    pub fn from_synthesis(element: &str, err: &SynthesisError) -> Self {
        Self::error(element, err.to_string(), err.category())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{severity}[{}] {}: {}", self.kind, self.element, self.message)
    }
}
