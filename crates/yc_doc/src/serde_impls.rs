//! `Serialize` and `Deserialize` for [`DocValue`] and [`Mapping`].
//!
//! Any serde data format can produce or consume the document tree. Mapping
//! keys of a non-string scalar type (`1: a`, `true: b`) are read back as
//! their text.

use core::fmt;

use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{DocValue, Mapping};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for DocValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => {
                if let Ok(v) = i64::try_from(*i) {
                    serializer.serialize_i64(v)
                } else if let Ok(v) = u64::try_from(*i) {
                    serializer.serialize_u64(v)
                } else {
                    serializer.serialize_i128(*i)
                }
            }
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(seq) => {
                let mut state = serializer.serialize_seq(Some(seq.len()))?;
                for item in seq {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Self::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = DocValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a document value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<DocValue, E> {
        Ok(DocValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DocValue, E> {
        Ok(DocValue::Int(i128::from(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<DocValue, E> {
        Ok(DocValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DocValue, E> {
        Ok(DocValue::Int(i128::from(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<DocValue, E> {
        i128::try_from(v)
            .map(DocValue::Int)
            .map_err(|_| E::custom("integer exceeds the i128 range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<DocValue, E> {
        Ok(DocValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<DocValue, E> {
        Ok(DocValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<DocValue, E> {
        Ok(DocValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<DocValue, E> {
        Ok(DocValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<DocValue, E> {
        Ok(DocValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<DocValue, D::Error> {
        DocValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DocValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<DocValue>()? {
            items.push(item);
        }
        Ok(DocValue::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<DocValue, A::Error> {
        MappingVisitor.visit_map(map).map(DocValue::Mapping)
    }
}

impl<'de> Deserialize<'de> for DocValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = Mapping;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Mapping, A::Error> {
        let mut out = Mapping::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(MappingKey(key)) = map.next_key::<MappingKey>()? {
            let value = map.next_value::<DocValue>()?;
            out.insert(key, value);
        }
        Ok(out)
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MappingVisitor)
    }
}

/// A mapping key, any scalar read back as text.
struct MappingKey(String);

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = MappingKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MappingKey, E> {
        Ok(MappingKey(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MappingKey, E> {
        Ok(MappingKey(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MappingKey, E> {
        Ok(MappingKey(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MappingKey, E> {
        Ok(MappingKey(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MappingKey, E> {
        Ok(MappingKey(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<MappingKey, E> {
        Ok(MappingKey(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MappingKey, E> {
        Ok(MappingKey(String::from("null")))
    }
}

impl<'de> Deserialize<'de> for MappingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DocValue, Mapping};

    #[test]
    fn yaml_numbers_keep_their_kind() {
        let value: DocValue = serde_yaml::from_str("[1, -2, 2.5, true, x]").unwrap();
        assert_eq!(
            value,
            DocValue::Sequence(vec![
                DocValue::Int(1),
                DocValue::Int(-2),
                DocValue::Float(2.5),
                DocValue::Bool(true),
                DocValue::from("x"),
            ])
        );
    }

    #[test]
    fn scalar_keys_become_text() {
        let map: Mapping = serde_yaml::from_str("1: a\ntrue: b\nname: c\n").unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["1", "true", "name"]);
    }

    #[test]
    fn wide_integers_survive() {
        let big = DocValue::Int(i128::from(u64::MAX));
        let text = serde_yaml::to_string(&big).unwrap();
        let back: DocValue = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, big);
    }
}
