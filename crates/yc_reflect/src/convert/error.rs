use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use thiserror::Error;
use yc_doc::{CodecError, DocKind};

use crate::ops::ScalarError;

// -----------------------------------------------------------------------------
// ConvertError

/// Failure to convert between a value and a document node.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The document node has the wrong shape for the target.
    #[error("expected {expected} for `{type_path}`, found {found}")]
    Mismatch {
        type_path: &'static str,
        expected: &'static str,
        found: DocKind,
    },

    /// A value of another type than the expected one was supplied.
    #[error("expected a value of type `{expected}`, found `{found}`")]
    MismatchedTypes {
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{type_path}` has no default constructor")]
    NoDefault { type_path: &'static str },

    /// An opaque type without a registered converter.
    #[error("`{type_path}` has no registered converter")]
    NotConvertible { type_path: &'static str },

    #[error("`{type_path}` cannot be used as a mapping key")]
    UnsupportedKey { type_path: &'static str },

    /// A converter rejected the content of a node. Leaf error.
    #[error("invalid value for `{type_path}`: {reason}")]
    InvalidValue {
        type_path: &'static str,
        reason: String,
    },

    /// A scalar could not be coerced. Leaf error.
    #[error("invalid `{type_path}`: {source}")]
    Scalar {
        type_path: &'static str,
        #[source]
        source: ScalarError,
    },

    /// No variant has the given name. Leaf error.
    #[error("`{type_path}` has no variant named `{name}`")]
    UnknownVariant { type_path: &'static str, name: String },

    /// The failure happened below the document key `key`.
    #[error("at `{key}`: {source}")]
    Field {
        key: String,
        #[source]
        source: Box<ConvertError>,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Custom(String),
}

impl ConvertError {
    /// Creates an [`InvalidValue`](Self::InvalidValue) error for `T`.
    pub fn invalid<T: ?Sized>(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            type_path: core::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// Creates a [`Custom`](Self::Custom) error.
    pub fn custom(message: impl ToString) -> Self {
        Self::Custom(message.to_string())
    }

    /// Wraps the error as happening below the document key `key`.
    pub fn in_field(self, key: impl Into<String>) -> Self {
        Self::Field {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// Returns `true` for failures confined to a single leaf value.
    ///
    /// A leaf error does not abort a load: the target keeps its current
    /// value and a warning is logged.
    ///
    /// ```
    /// use yc_reflect::ConvertError;
    ///
    /// assert!(ConvertError::invalid::<u8>("too large").in_field("level").is_leaf());
    /// assert!(!ConvertError::NoDefault { type_path: "A" }.is_leaf());
    /// ```
    pub fn is_leaf(&self) -> bool {
        match self {
            Self::InvalidValue { .. } | Self::Scalar { .. } | Self::UnknownVariant { .. } => true,
            Self::Field { source, .. } => source.is_leaf(),
            _ => false,
        }
    }

    /// Returns the document keys leading to the failure, outermost first.
    ///
    /// ```
    /// use yc_reflect::ConvertError;
    ///
    /// let err = ConvertError::custom("boom").in_field("max").in_field("region");
    /// assert_eq!(err.key_path(), ["region", "max"]);
    /// ```
    pub fn key_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Field { key, source } = current {
            path.push(key.as_str());
            current = source;
        }
        path
    }

    /// Returns the innermost error, below every [`Field`](Self::Field).
    pub fn root_cause(&self) -> &ConvertError {
        match self {
            Self::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
