use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;
use yc_doc::CodecError;
use yc_reflect::ConvertError;

// -----------------------------------------------------------------------------
// ConfigError

/// Failure of binding, loading or saving a [`Config`](crate::Config).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be created while binding.
    #[error("failed to bind `{}`: {source}", path.display())]
    Bind {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The endpoint address is not an `http`/`https` URI with a host.
    #[error("invalid endpoint address `{address}`: {reason}")]
    InvalidEndpoint { address: String, reason: String },

    #[error("I/O failure on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Failure of a custom endpoint transport.
    #[error("endpoint transport failed: {0}")]
    Transport(Box<dyn core::error::Error + Send + Sync>),

    /// The endpoint answered with a non-success status.
    #[error("endpoint answered with status {0}")]
    Status(u16),

    /// An endpoint source is bound but no endpoint transport is available.
    #[error("no endpoint transport is configured")]
    NoTransport,

    #[error("the source is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// `load` was called without a bound source.
    #[error("no source is bound")]
    Unbound,

    /// The value is borrowed by the caller while it is loaded or saved.
    #[error("the configuration value is already borrowed")]
    Borrowed,
}

impl ConfigError {
    #[inline]
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Wraps the error of a custom [`EndpointTransport`](crate::EndpointTransport).
    pub fn transport(error: impl Into<Box<dyn core::error::Error + Send + Sync>>) -> Self {
        Self::Transport(error.into())
    }
}
