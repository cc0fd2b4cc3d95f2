//! Binding of reflected values to YAML sources.
//!
//! ## Menu
//!
//! - [`Config`]: a value plus its [`Source`], with guarded `load`/`save`.
//! - [`Source`]: unbound, a file, an HTTP endpoint or an in-memory text.
//! - [`Endpoint`]: a validated `http`/`https` address.
//! - [`transport`]: the injectable file and endpoint I/O.
//! - [`guard`]: the re-entrancy flag of `load`/`save`.
//! - [`ConfigError`]: everything that can go wrong.
//!
//! ## Lifecycle
//!
//! ```text
//! bind_* -> load -> (use, mutate) -> save
//!             \-> empty source: write the current value
//! ```
//!
//! A `save` from inside a running save (e.g. from a converter) or from
//! inside a load does nothing.

// -----------------------------------------------------------------------------
// Modules

mod config;
mod error;
mod source;

pub mod guard;
pub mod transport;

// -----------------------------------------------------------------------------
// Exports

pub use config::Config;
pub use error::ConfigError;
pub use source::{Endpoint, Source};

pub use transport::{EndpointTransport, FileTransport, FsTransport};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
