use kmir_metadata::Visibility;
use kmir_model::ErrorCategory;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("cannot synthesize a copy builder for `{class}`: it has no primary constructor")]
    MissingPrimaryConstructor { class: String },

    #[error(
        "cannot synthesize a copy builder for `{class}`: constructor parameter `{parameter}` is not backed by a property"
    )]
    MissingBackingProperty { class: String, parameter: String },

    #[error(
        "cannot synthesize a copy builder for `{class}`: property `{property}` is {visibility}, constructor properties must be public or internal"
    )]
    UnsupportedPropertyVisibility {
        class: String,
        property: String,
        visibility: Visibility,
    },

    #[error(
        "invalid generated annotation `{found}`, expected `javax.annotation.processing.Generated` or `javax.annotation.Generated`"
    )]
    InvalidGeneratedAnnotation { found: String },

    #[error("name tag `{tag}` is already allocated")]
    DuplicateNameTag { tag: String },
}

impl SynthesisError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::PreconditionViolation
    }
}
