//! The document model of `yconf`.
//!
//! ## Menu
//!
//! - [`DocValue`], [`Mapping`]: the null/scalar/sequence/mapping tree that
//!   sits between reflected values and text.
//! - [`yaml`]: parsing and rendering of YAML text.
//! - [`annotate`]: comment injection and empty-collection normalisation over
//!   rendered text.
//! - [`CodecError`]: failures of the codec.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod serde_impls;
mod value;

pub mod annotate;
pub mod yaml;

// -----------------------------------------------------------------------------
// Exports

pub use error::CodecError;
pub use value::{DocKind, DocValue, Mapping};
