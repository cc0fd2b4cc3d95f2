//! Data access interfaces, one subtrait of [`Reflect`] per kind.
//!
//! ## Menu
//!
//! - [`Struct`]: named fields (e.g. `A { .. }`).
//! - [`Array`]: fixed-size arrays (e.g. `[i32; 5]`).
//! - [`List`]: ordered sequences (e.g. `Vec<i32>`).
//! - [`Set`]: unique values (e.g. `BTreeSet<String>`).
//! - [`Map`]: key-value collections (e.g. `HashMap<String, f32>`).
//! - [`Optional`]: `Option<T>`.
//! - [`Enum`]: fieldless enums.
//! - [`Scalar`]: leaves with a scalar document form, together with
//!   the coercion helpers used to read them leniently.
//!
//! Collections accept new elements as `Box<dyn Reflect>`; an element of
//! the wrong type is handed back to the caller.
//!
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod enum_ops;
mod list_ops;
mod map_ops;
mod option_ops;
mod scalar_ops;
mod set_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use array_ops::{Array, ArrayIter};
pub use enum_ops::Enum;
pub use list_ops::{List, ListIter};
pub use map_ops::Map;
pub use option_ops::Optional;
pub use scalar_ops::{Scalar, ScalarError};
pub use scalar_ops::{coerce_bool, coerce_char, coerce_float, coerce_int, coerce_string, parse_text};
pub use set_ops::Set;
pub use struct_ops::Struct;
