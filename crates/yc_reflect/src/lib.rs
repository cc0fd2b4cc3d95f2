//! Compile-time reflection and the object <-> document marshaller of `yconf`.
//!
//! ## Menu
//!
//! - [`Reflect`], [`ReflectRef`], [`ReflectMut`]: dynamic access to values.
//! - [`info`]: static type information, including the field descriptors of
//!   structs ([`info::describe`]).
//! - [`ops`]: the per-kind traits ([`ops::Struct`], [`ops::List`], ...).
//! - [`registry`]: the converter registry for types without a structural
//!   document form.
//! - [`convert`]: the recursive value <-> [`DocValue`](yc_doc::DocValue)
//!   converter.
//! - [`mapper`]: whole-object `to_map` / `from_map` and comment tables.
//! - [`serde`]: serde adapters over the converter.
//!
//! ## Example
//!
//! ```
//! use std::collections::{BTreeMap, BTreeSet};
//! use yc_reflect::{Reflect, mapper::ObjectMapper, registry::ConverterRegistry};
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Player {
//!     #[reflect(comment = "Player's display name")]
//!     name: String,
//!     tags: BTreeSet<String>,
//!     scores: BTreeMap<String, i32>,
//! }
//!
//! let player = Player {
//!     name: "Alice".into(),
//!     tags: ["a".to_owned(), "b".to_owned()].into(),
//!     scores: [("x".to_owned(), 1)].into(),
//! };
//!
//! let registry = ConverterRegistry::new();
//! let mapper = ObjectMapper::new(&registry);
//! let map = mapper.to_map(&player).unwrap();
//! assert_eq!(map.keys().collect::<Vec<_>>(), ["name", "tags", "scores"]);
//!
//! let mut loaded = Player::default();
//! mapper.from_map(&map, &mut loaded).unwrap();
//! assert_eq!(loaded, player);
//! ```
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::yc_reflect` paths, which must also resolve inside
// this crate and its doc tests.
extern crate self as yc_reflect;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod convert;
pub mod impls;
pub mod info;
pub mod mapper;
pub mod ops;
pub mod registry;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::{Reflect, ReflectKind, ReflectMut, ReflectRef};
pub use yc_reflect_derive::Reflect;

pub use convert::ConvertError;
