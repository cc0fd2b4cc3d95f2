//! The `#[derive(Reflect)]` macro of `yc_reflect`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `Typed`, `Reflect` and the trait of the
/// type's kind:
///
/// - `Struct` for `struct T { ... }`;
/// - `Enum` for enums whose variants are all units, stored by variant name;
/// - `Scalar` for types declared `#[reflect(scalar)]`;
/// - nothing more for types declared `#[reflect(opaque)]`.
///
/// Tuple structs, unit structs and enums with data must be declared
/// `opaque` or `scalar`. Types with lifetime parameters are rejected.
///
/// ## Type Attributes
///
/// - `default`: the type implements `Default`, which is then used to
///   construct values while loading. Without it a struct cannot be
///   constructed from a document, only updated in place. An enum without
///   it defaults to its first variant.
/// - `opaque`: the structure is hidden, a registered converter is required
///   to store the type.
/// - `scalar`: the type is stored as its `Display` text and read back with
///   `FromStr`.
/// - `rename_all = "..."`: the key projection of the fields, `kebab-case`
///   by default. On enums it renames the variants, which keep their Rust
///   names by default. Accepted rules: `kebab-case`, `snake_case`,
///   `camelCase`, `PascalCase`, `SCREAMING_SNAKE_CASE`,
///   `SCREAMING-KEBAB-CASE`, `lowercase`, `UPPERCASE`.
/// - `convert` / `key_convert`: with the `auto_register` feature, submits
///   the type's `Convert` / `KeyConvert` implementation, collected by
///   `ConverterRegistry::auto_register`. No-op for generic types.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default, rename_all = "snake_case")]
/// struct Foo { /* ... */ }
/// ```
///
/// ## Field Attributes
///
/// - `skip`: the field stays in the descriptor but is never read or
///   written. Its type does not need to implement `Reflect`.
/// - `ignore`: the field does not exist for reflection.
/// - `rename = "..."`: the document key.
/// - `comment = "..."`: a comment line written above the key, repeatable.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Player {
///     #[reflect(comment = "Player's display name")]
///     name: String,
///     #[reflect(rename = "hp")]
///     health: u32,
///     #[reflect(skip)]
///     session: Option<std::net::TcpStream>,
/// }
/// ```
///
/// `rename` is also accepted on enum variants.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast)
}
