use serde_core::ser::Error;
use serde_core::{Serialize, Serializer};

use crate::Reflect;
use crate::convert::DocumentConverter;
use crate::registry::ConverterRegistry;

/// Serializes a reflected value.
///
/// An absent value (e.g. `None`) is serialized as `none`.
///
/// # Examples
///
/// ```
/// use yc_reflect::{Reflect, registry::ConverterRegistry, serde::ReflectSerializer};
///
/// #[derive(Reflect, Default)]
/// struct Warp {
///     name: String,
///     cost: Option<u32>,
/// }
///
/// let registry = ConverterRegistry::new();
/// let warp = Warp { name: "spawn".into(), cost: None };
/// let json = serde_json::to_string(&ReflectSerializer::new(&warp, &registry)).unwrap();
/// assert_eq!(json, r#"{"name":"spawn"}"#);
/// ```
pub struct ReflectSerializer<'a> {
    value: &'a dyn Reflect,
    registry: &'a ConverterRegistry,
}

impl<'a> ReflectSerializer<'a> {
    #[inline]
    pub const fn new(value: &'a dyn Reflect, registry: &'a ConverterRegistry) -> Self {
        Self { value, registry }
    }
}

impl Serialize for ReflectSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let doc = DocumentConverter::new(self.registry)
            .to_document(self.value)
            .map_err(S::Error::custom)?;
        match doc {
            Some(doc) => doc.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}
