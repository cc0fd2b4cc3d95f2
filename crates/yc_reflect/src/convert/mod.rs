//! Conversion between reflected values and document trees.
//!
//! ## Menu
//!
//! - [`DocumentConverter`]: the recursive value <-> [`DocValue`] algorithm.
//! - [`ConvertError`]: its failures, split into structural errors (fatal)
//!   and [leaf errors](ConvertError::is_leaf), which are replaced by the
//!   current or default value with a warning.
//!
//! [`DocValue`]: yc_doc::DocValue

// -----------------------------------------------------------------------------
// Modules

mod document_converter;
mod error;

// -----------------------------------------------------------------------------
// Exports

pub use document_converter::DocumentConverter;
pub use error::ConvertError;
