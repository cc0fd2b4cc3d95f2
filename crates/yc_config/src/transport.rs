//! The I/O behind the sources of a [`Config`](crate::Config).
//!
//! - [`FileTransport`], with the default [`FsTransport`] over `std::fs`.
//! - [`EndpointTransport`], with the default `HttpTransport` over `ureq`
//!   (feature `http`).
//!
//! Both are injectable, e.g. to test against an in-process endpoint.

use std::fs;
use std::io;
use std::path::Path;

use http::Uri;

use crate::ConfigError;

/// The media type of the documents exchanged with endpoints.
pub const YAML_MEDIA_TYPE: &str = "application/yaml";

// -----------------------------------------------------------------------------
// FileTransport

/// Access to file sources.
pub trait FileTransport {
    fn exists(&self, path: &Path) -> bool;

    /// Returns the size in bytes.
    fn size(&self, path: &Path) -> io::Result<u64>;

    fn read_all_text(&self, path: &Path) -> io::Result<String>;

    /// Overwrites the file with `text`.
    fn write_all_text(&self, path: &Path, text: &str) -> io::Result<()>;

    /// Creates the parent directories and an empty file.
    fn create_with_parents(&self, path: &Path) -> io::Result<()>;
}

/// The [`FileTransport`] of the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsTransport;

impl FileTransport for FsTransport {
    #[inline]
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    #[inline]
    fn size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|m| m.len())
    }

    #[inline]
    fn read_all_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    #[inline]
    fn write_all_text(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }

    fn create_with_parents(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map(drop)
    }
}

// -----------------------------------------------------------------------------
// EndpointTransport

/// Access to endpoint sources.
///
/// There are no retries: a failed request fails the load or save.
pub trait EndpointTransport {
    /// Fetches the document with `Accept: application/yaml`.
    /// An empty body means an empty source.
    fn get(&self, uri: &Uri) -> Result<Vec<u8>, ConfigError>;

    /// Sends the document with `Content-Type: application/yaml` and returns
    /// the status code.
    fn post(&self, uri: &Uri, body: &[u8]) -> Result<u16, ConfigError>;
}

#[cfg(feature = "http")]
pub use http_transport::HttpTransport;

#[cfg(feature = "http")]
mod http_transport {
    use http::Uri;
    use ureq::Agent;

    use super::{EndpointTransport, YAML_MEDIA_TYPE};
    use crate::ConfigError;

    /// The blocking [`EndpointTransport`] over `ureq`.
    ///
    /// Timeouts and proxies come from the [`Agent`].
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        agent: Agent,
    }

    impl HttpTransport {
        pub fn new() -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .into();
            Self { agent }
        }

        /// Uses a configured agent. Its status handling is respected, so an
        /// agent treating statuses as errors reports them as
        /// [`ConfigError::Http`].
        #[inline]
        pub fn with_agent(agent: Agent) -> Self {
            Self { agent }
        }
    }

    impl Default for HttpTransport {
        #[inline]
        fn default() -> Self {
            Self::new()
        }
    }

    impl EndpointTransport for HttpTransport {
        fn get(&self, uri: &Uri) -> Result<Vec<u8>, ConfigError> {
            let mut response = self
                .agent
                .get(uri.clone())
                .header("Accept", YAML_MEDIA_TYPE)
                .call()?;
            let status = response.status();
            if !status.is_success() {
                return Err(ConfigError::Status(status.as_u16()));
            }
            Ok(response.body_mut().read_to_vec()?)
        }

        fn post(&self, uri: &Uri, body: &[u8]) -> Result<u16, ConfigError> {
            let response = self
                .agent
                .post(uri.clone())
                .header("Content-Type", YAML_MEDIA_TYPE)
                .send(body)?;
            Ok(response.status().as_u16())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_create_with_parents_is_empty_and_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/player.yml");
        let fs = FsTransport;

        assert!(!fs.exists(&path));
        fs.create_with_parents(&path).unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.size(&path).unwrap(), 0);

        fs.write_all_text(&path, "name: Alice\n").unwrap();
        fs.create_with_parents(&path).unwrap();
        assert_eq!(fs.read_all_text(&path).unwrap(), "name: Alice\n");
    }
}
