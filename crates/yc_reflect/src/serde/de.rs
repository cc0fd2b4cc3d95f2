use alloc::boxed::Box;

use serde_core::de::{DeserializeSeed, Error};
use serde_core::{Deserialize, Deserializer};
use yc_doc::DocValue;

use crate::Reflect;
use crate::convert::DocumentConverter;
use crate::info::TypeInfo;
use crate::registry::ConverterRegistry;

/// Deserializes a value of the type described by a [`TypeInfo`].
///
/// Follows [`DocumentConverter::from_document`]: invalid leaves fall back
/// to their default with a warning.
///
/// # Examples
///
/// ```
/// use serde::de::DeserializeSeed;
/// use yc_reflect::{Reflect, info::Typed, registry::ConverterRegistry, serde::ReflectDeserializer};
///
/// #[derive(Reflect, Default, PartialEq, Debug)]
/// #[reflect(default)]
/// struct Warp {
///     name: String,
///     cost: Option<u32>,
/// }
///
/// let registry = ConverterRegistry::new();
/// let seed = ReflectDeserializer::new(Warp::type_info(), &registry);
/// let mut de = serde_json::Deserializer::from_str(r#"{"name":"spawn","cost":3}"#);
/// let warp = seed.deserialize(&mut de).unwrap().take::<Warp>().unwrap();
/// assert_eq!(warp, Warp { name: "spawn".into(), cost: Some(3) });
/// ```
pub struct ReflectDeserializer<'a> {
    info: &'static TypeInfo,
    registry: &'a ConverterRegistry,
}

impl<'a> ReflectDeserializer<'a> {
    #[inline]
    pub const fn new(info: &'static TypeInfo, registry: &'a ConverterRegistry) -> Self {
        Self { info, registry }
    }
}

impl<'de> DeserializeSeed<'de> for ReflectDeserializer<'_> {
    type Value = Box<dyn Reflect>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let doc = DocValue::deserialize(deserializer)?;
        DocumentConverter::new(self.registry)
            .from_document(&doc, self.info)
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use serde_core::de::DeserializeSeed;

    use crate::info::Typed;
    use crate::registry::ConverterRegistry;
    use crate::serde::{ReflectDeserializer, ReflectSerializer};
    use crate::Reflect;

    #[derive(Reflect, Default, PartialEq, Debug)]
    #[reflect(default)]
    struct Kit {
        items: Vec<String>,
        costs: BTreeMap<String, u32>,
    }

    #[test]
    fn json_round_trip() {
        let registry = ConverterRegistry::new();
        let kit = Kit {
            items: vec![String::from("sword"), String::from("sword")],
            costs: BTreeMap::from([(String::from("sword"), 10)]),
        };
        let json = serde_json::to_string(&ReflectSerializer::new(&kit, &registry)).unwrap();
        assert_eq!(json, r#"{"items":["sword","sword"],"costs":{"sword":10}}"#);

        let mut de = serde_json::Deserializer::from_str(&json);
        let back: Box<dyn Reflect> = ReflectDeserializer::new(Kit::type_info(), &registry)
            .deserialize(&mut de)
            .unwrap();
        assert_eq!(back.take::<Kit>().unwrap(), kit);
    }
}
