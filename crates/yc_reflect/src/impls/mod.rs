//! Reflection implementations of foreign types, and the helpers used to
//! implement [`Typed`](crate::info::Typed).
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `char`, `String`, `f32`, `f64`, `i8`-`i128`,
//!   `isize`, `u8`-`u64`, `usize` (`u128` does not fit a document integer)
//! - lists: `Vec<T>`, `VecDeque<T>`
//! - arrays: `[T; N]` with `T: Default`
//! - optional: `Option<T>`
//! - sets: `BTreeSet<T>`, `IndexSet<T>`, `HashSet<T>` (unordered)
//! - maps: `BTreeMap<K, V>`, `IndexMap<K, V>`, `HashMap<K, V>` (unordered)
//! - documents: [`DocValue`](yc_doc::DocValue), stored as-is

// -----------------------------------------------------------------------------
// Modules

mod array;
mod cell;
mod document;
mod list;
mod map;
mod option;
mod scalar;
mod set;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
