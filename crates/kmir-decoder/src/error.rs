use kmir_metadata::{MetadataError, MetadataKind};
use kmir_model::ErrorCategory;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected node shape in {position}: {detail}")]
    UnexpectedNodeShape { position: String, detail: String },

    #[error("malformed suspend function type: {detail}")]
    MalformedSuspendEncoding { detail: String },

    #[error("type parameter #{id} is not declared in any enclosing scope")]
    UnresolvedTypeParameter { id: u32 },

    #[error("`{name}` has no fixed arity and cannot be expressed as a function type")]
    UnsupportedArity { name: String },

    #[error("star projection carries `{variance}` variance but no type")]
    StarProjectionVariance { variance: String },

    #[error("metadata kind `{kind}` is not supported, only classes can be decoded")]
    UnsupportedMetadataKind { kind: MetadataKind },

    #[error("metadata version {found} is older than the supported minimum 1.1")]
    UnsupportedMetadataVersion { found: String },

    #[error("`{element}` has no kotlin.Metadata annotation")]
    MissingMetadataAnnotation { element: String },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl DecodeError {
    pub fn unexpected(position: impl Into<String>, detail: impl Into<String>) -> Self {
        DecodeError::UnexpectedNodeShape {
            position: position.into(),
            detail: detail.into(),
        }
    }

    pub fn malformed_suspend(detail: impl Into<String>) -> Self {
        DecodeError::MalformedSuspendEncoding {
            detail: detail.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DecodeError::UnexpectedNodeShape { .. }
            | DecodeError::MalformedSuspendEncoding { .. }
            | DecodeError::UnresolvedTypeParameter { .. }
            | DecodeError::Metadata(MetadataError::Corrupt(_)) => ErrorCategory::MalformedInput,
            DecodeError::UnsupportedArity { .. }
            | DecodeError::StarProjectionVariance { .. }
            | DecodeError::UnsupportedMetadataKind { .. }
            | DecodeError::UnsupportedMetadataVersion { .. }
            | DecodeError::Metadata(MetadataError::UnsupportedMetadataVersion { .. }) => {
                ErrorCategory::UnsupportedConstruct
            }
            DecodeError::MissingMetadataAnnotation { .. } => ErrorCategory::Gate,
        }
    }
}
