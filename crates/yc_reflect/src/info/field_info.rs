use core::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// The descriptor of one persistable struct field.
///
/// # Examples
///
/// ```
/// use yc_reflect::{Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// struct Server {
///     #[reflect(comment = "Port to bind")]
///     listen_port: u16,
/// }
///
/// let info = Server::type_info().as_struct().unwrap();
/// let field = info.field_at(0).unwrap();
///
/// assert_eq!(field.name(), "listen_port");
/// assert_eq!(field.key(), "listen-port");
/// assert!(field.ty().is::<u16>());
/// assert_eq!(field.comments(), ["Port to bind"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NamedField {
    name: &'static str,
    key: &'static str,
    ty: Type,
    // Created on first access; the pointer delays it and allows recursive types.
    type_info: Option<fn() -> &'static TypeInfo>,
    skip: bool,
    comments: &'static [&'static str],
}

impl NamedField {
    /// Creates a persisted field of type `T`, stored under the document `key`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            ty: Type::of::<T>(),
            type_info: Some(T::type_info),
            skip: false,
            comments: &[],
        }
    }

    /// Creates a field that is never read from or written to a document.
    /// Its type does not need to be reflectable.
    #[inline]
    pub fn skipped<T: Any>(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            ty: Type::of::<T>(),
            type_info: None,
            skip: true,
            comments: &[],
        }
    }

    /// Attaches comment lines, written above the key when saving.
    #[inline]
    pub const fn with_comments(mut self, comments: &'static [&'static str]) -> Self {
        self.comments = comments;
        self
    }

    /// Returns the Rust identifier of the field.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the document key of the field.
    #[inline]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the declared [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the [`TypeInfo`] of the declared type, `None` for skipped
    /// fields.
    #[inline]
    pub fn type_info(&self) -> Option<&'static TypeInfo> {
        self.type_info.map(|f| f())
    }

    /// Returns the generic arguments of an aggregate field type: the item
    /// type of lists, sets, arrays and options, or the key and value types
    /// of maps. Empty for everything else.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use yc_reflect::info::{NamedField, Type};
    ///
    /// let field = NamedField::new::<BTreeMap<String, u32>>("scores", "scores");
    /// assert_eq!(field.generic_args(), [Type::of::<String>(), Type::of::<u32>()]);
    /// ```
    pub fn generic_args(&self) -> &'static [Type] {
        match self.type_info() {
            Some(info) => info.generic_args(),
            None => &[],
        }
    }

    #[inline]
    pub const fn is_skipped(&self) -> bool {
        self.skip
    }

    /// Returns the comment lines, in declaration order.
    #[inline]
    pub const fn comments(&self) -> &'static [&'static str] {
        self.comments
    }
}
