//! Failure families shared by the decoder and the synthesizer.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    /// The declaration violates the metadata schema.
    MalformedInput,
    /// Valid input with no mapping rule.
    UnsupportedConstruct,
    /// The declaration cannot be used for synthesis.
    PreconditionViolation,
    /// The element is not a metadata-carrying class at all.
    Gate,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::MalformedInput => "malformed-input",
            ErrorCategory::UnsupportedConstruct => "unsupported-construct",
            ErrorCategory::PreconditionViolation => "precondition-violation",
            ErrorCategory::Gate => "gate",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
