use thiserror::Error;

use crate::DocKind;

// -----------------------------------------------------------------------------
// CodecError

/// Failure of the YAML codec.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("failed to parse document: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("failed to render document: {0}")]
    Render(#[source] serde_yaml::Error),

    #[error("failed to bridge a serde value: {0}")]
    Bridge(#[source] serde_yaml::Error),

    #[error("expected a mapping at the document root, found {0}")]
    NotAMapping(DocKind),
}
