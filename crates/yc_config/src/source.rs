use core::fmt;
use core::str::FromStr;
use std::path::{Path, PathBuf};

use http::Uri;

use crate::ConfigError;

// -----------------------------------------------------------------------------
// Endpoint

/// A validated `http`/`https` address.
///
/// ```
/// use yc_config::Endpoint;
///
/// let endpoint: Endpoint = "https://config.example.net/players/alice".parse().unwrap();
/// assert_eq!(endpoint.uri().host(), Some("config.example.net"));
///
/// assert!("ftp://example.net/a".parse::<Endpoint>().is_err());
/// assert!("not an address".parse::<Endpoint>().is_err());
/// assert!("/relative/path".parse::<Endpoint>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    address: String,
    uri: Uri,
}

impl Endpoint {
    /// Parses and validates `address`.
    pub fn parse(address: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidEndpoint {
            address: address.to_owned(),
            reason: reason.to_owned(),
        };

        let uri: Uri = address.trim().parse().map_err(|e: http::uri::InvalidUri| invalid(&e.to_string()))?;
        match uri.scheme_str() {
            Some("http" | "https") => {}
            Some(_) => return Err(invalid("the scheme must be `http` or `https`")),
            None => return Err(invalid("the address has no scheme")),
        }
        if uri.host().is_none_or(str::is_empty) {
            return Err(invalid("the address has no host"));
        }

        Ok(Self {
            address: address.to_owned(),
            uri,
        })
    }

    /// Returns the address as given.
    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

impl FromStr for Endpoint {
    type Err = ConfigError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

// -----------------------------------------------------------------------------
// Source

/// The single backing store of a [`Config`](crate::Config).
///
/// Binding one variant replaces whatever was bound before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Source {
    #[default]
    Unbound,
    File(PathBuf),
    Endpoint(Endpoint),
    /// An in-memory text slot.
    Text(String),
}

impl Source {
    #[inline]
    pub fn is_bound(&self) -> bool {
        !matches!(self, Self::Unbound)
    }

    #[inline]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            _ => None,
        }
    }

    #[inline]
    pub fn as_endpoint(&self) -> Option<&Endpoint> {
        match self {
            Self::Endpoint(endpoint) => Some(endpoint),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbound => f.write_str("nothing"),
            Self::File(path) => write!(f, "file `{}`", path.display()),
            Self::Endpoint(endpoint) => write!(f, "endpoint `{endpoint}`"),
            Self::Text(_) => f.write_str("text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_address() {
        let endpoint = Endpoint::parse("http://127.0.0.1:8080/cfg?id=3").unwrap();
        assert_eq!(endpoint.address(), "http://127.0.0.1:8080/cfg?id=3");
        assert_eq!(endpoint.uri().port_u16(), Some(8080));
        assert_eq!(endpoint.to_string(), "http://127.0.0.1:8080/cfg?id=3");
    }

    #[test]
    fn malformed_endpoint_reports_address() {
        let err = Endpoint::parse("http://exa mple.net").unwrap_err();
        match err {
            ConfigError::InvalidEndpoint { address, .. } => assert_eq!(address, "http://exa mple.net"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn source_accessors() {
        let source = Source::Text("a: 1\n".into());
        assert!(source.is_bound());
        assert_eq!(source.as_text(), Some("a: 1\n"));
        assert!(source.as_path().is_none());
        assert!(!Source::default().is_bound());
    }
}
