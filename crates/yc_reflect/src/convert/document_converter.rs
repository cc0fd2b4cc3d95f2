use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;

use log::warn;
use yc_doc::{DocValue, Mapping};

use crate::convert::ConvertError;
use crate::info::{TypeInfo, Typed};
use crate::mapper::ObjectMapper;
use crate::registry::ConverterRegistry;
use crate::{Reflect, ReflectMut, ReflectRef};

/// The recursive conversion between reflected values and [`DocValue`]s.
///
/// A registered converter for the exact type always wins. Otherwise the
/// value is converted structurally according to its
/// [`ReflectKind`](crate::ReflectKind), and structs go through the
/// [`ObjectMapper`].
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use yc_doc::DocValue;
/// use yc_reflect::{convert::DocumentConverter, registry::ConverterRegistry};
///
/// let registry = ConverterRegistry::new();
/// let converter = DocumentConverter::new(&registry);
///
/// let tags = HashSet::from(["b".to_owned(), "a".to_owned()]);
/// let doc = converter.to_document(&tags).unwrap().unwrap();
/// assert_eq!(doc, DocValue::Sequence(vec!["a".into(), "b".into()]));
///
/// let back: HashSet<String> = converter.from_document_typed(&doc).unwrap();
/// assert_eq!(back, tags);
/// ```
#[derive(Clone, Copy)]
pub struct DocumentConverter<'a> {
    registry: &'a ConverterRegistry,
}

impl<'a> DocumentConverter<'a> {
    #[inline]
    pub const fn new(registry: &'a ConverterRegistry) -> Self {
        Self { registry }
    }

    #[inline]
    pub const fn registry(&self) -> &'a ConverterRegistry {
        self.registry
    }

    /// Returns the [`ObjectMapper`] sharing this converter's registry.
    #[inline]
    pub const fn mapper(&self) -> ObjectMapper<'a> {
        ObjectMapper::new(self.registry)
    }

    // -------------------------------------------------------------------------
    // value -> document

    /// Converts a value to a document node. `Ok(None)` means the value is
    /// absent and its key must be omitted.
    pub fn to_document(&self, value: &dyn Reflect) -> Result<Option<DocValue>, ConvertError> {
        if let ReflectRef::Optional(opt) = value.reflect_ref()
            && opt.value().is_none()
        {
            return Ok(None);
        }

        if let Some(converter) = self.registry.get(value.ty_id()) {
            return converter.serialize(value).map(present);
        }

        match value.reflect_ref() {
            ReflectRef::Optional(opt) => match opt.value() {
                Some(inner) => self.to_document(inner),
                None => Ok(None),
            },
            ReflectRef::Array(array) => self.sequence(array.iter()).map(Some),
            ReflectRef::List(list) => self.sequence(list.iter()).map(Some),
            ReflectRef::Set(set) => {
                let mut items = self.sequence_items(set.iter())?;
                if !is_ordered(value.reflect_type_info()) {
                    items.sort_by(unordered_item_order);
                }
                Ok(Some(DocValue::Sequence(items)))
            }
            ReflectRef::Map(map) => {
                let mut mapping = Mapping::with_capacity(map.len());
                for (key, item) in map.iter() {
                    let key = self.to_key(key)?;
                    let item = self.to_document(item).map_err(|e| e.in_field(key.as_str()))?;
                    mapping.insert_present(key, item);
                }
                if !is_ordered(value.reflect_type_info()) {
                    mapping.sort_keys();
                }
                Ok(Some(DocValue::Mapping(mapping)))
            }
            ReflectRef::Enum(e) => Ok(Some(DocValue::from(e.variant_name()))),
            ReflectRef::Struct(s) => {
                let mapping = self.mapper().to_map(s)?;
                Ok((!mapping.is_empty()).then_some(DocValue::Mapping(mapping)))
            }
            ReflectRef::Scalar(s) => Ok(present(s.to_scalar())),
            ReflectRef::Document(doc) => Ok(present(doc.clone())),
            ReflectRef::Opaque(v) => Err(ConvertError::NotConvertible {
                type_path: v.reflect_type_path(),
            }),
        }
    }

    fn sequence<'v>(
        &self,
        items: impl Iterator<Item = &'v dyn Reflect>,
    ) -> Result<DocValue, ConvertError> {
        self.sequence_items(items).map(DocValue::Sequence)
    }

    fn sequence_items<'v>(
        &self,
        items: impl Iterator<Item = &'v dyn Reflect>,
    ) -> Result<Vec<DocValue>, ConvertError> {
        let mut out = Vec::new();
        for (index, item) in items.enumerate() {
            if let Some(doc) = self.to_document(item).map_err(|e| e.in_field(index.to_string()))? {
                out.push(doc);
            }
        }
        Ok(out)
    }

    /// Converts a value to a mapping key, through the key converters, the
    /// scalar text or the enum variant name.
    pub fn to_key(&self, key: &dyn Reflect) -> Result<String, ConvertError> {
        if let Some(converter) = self.registry.get_key(key.ty_id()) {
            return converter.serialize(key);
        }
        let unsupported = || ConvertError::UnsupportedKey {
            type_path: key.reflect_type_path(),
        };
        match key.reflect_ref() {
            ReflectRef::Scalar(s) => s.to_scalar().scalar_text().ok_or_else(unsupported),
            ReflectRef::Enum(e) => Ok(e.variant_name().into()),
            _ => Err(unsupported()),
        }
    }

    // -------------------------------------------------------------------------
    // document -> value

    /// Builds a value of the type described by `info` from a document node.
    ///
    /// When the node holds an invalid leaf, the default value is returned
    /// and a warning is logged.
    pub fn from_document(
        &self,
        doc: &DocValue,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, ConvertError> {
        match self.construct(doc, info) {
            Err(err) if err.is_leaf() => match info.create_default() {
                Some(value) => {
                    warn!("Using the default value of `{}`: {err}", info.type_path());
                    Ok(value)
                }
                None => Err(err),
            },
            other => other,
        }
    }

    /// Typed version of [`from_document`](Self::from_document).
    pub fn from_document_typed<T: Reflect + Typed>(&self, doc: &DocValue) -> Result<T, ConvertError> {
        self.from_document(doc, T::type_info())?
            .take::<T>()
            .map_err(|value| ConvertError::MismatchedTypes {
                expected: T::type_info().type_path(),
                found: value.reflect_type_path(),
            })
    }

    /// Builds a value without leaf fallback: the registered deserializer if
    /// any, otherwise a default instance filled by [`apply`](Self::apply).
    pub fn construct(
        &self,
        doc: &DocValue,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, ConvertError> {
        if let Some(converter) = self.registry.get(info.type_id()) {
            return converter.deserialize(doc);
        }
        let mut value = info.create_default().ok_or(ConvertError::NoDefault {
            type_path: info.type_path(),
        })?;
        self.apply_strict(doc, value.as_reflect_mut())?;
        Ok(value)
    }

    /// Builds a map key of the type described by `info`.
    pub fn from_key(&self, key: &str, info: &'static TypeInfo) -> Result<Box<dyn Reflect>, ConvertError> {
        if let Some(converter) = self.registry.get_key(info.type_id()) {
            return converter.deserialize(key);
        }
        if !matches!(info, TypeInfo::Scalar(_) | TypeInfo::Enum(_)) {
            return Err(ConvertError::UnsupportedKey {
                type_path: info.type_path(),
            });
        }
        let mut value = info.create_default().ok_or(ConvertError::NoDefault {
            type_path: info.type_path(),
        })?;
        self.apply_strict(&DocValue::from(key), value.as_reflect_mut())?;
        Ok(value)
    }

    /// Writes a document node into an existing value.
    ///
    /// `Null` leaves the target unchanged, except that options become
    /// `None`. A leaf failure keeps the current value and logs a warning;
    /// structural failures are returned.
    pub fn apply(&self, doc: &DocValue, target: &mut dyn Reflect) -> Result<(), ConvertError> {
        match self.apply_strict(doc, target) {
            Err(err) if err.is_leaf() => {
                warn!("Keeping the current value of `{}`: {err}", target.reflect_type_path());
                Ok(())
            }
            other => other,
        }
    }

    /// [`apply`](Self::apply) without the leaf fallback at the top level.
    /// Nested values still use the fallback.
    fn apply_strict(&self, doc: &DocValue, target: &mut dyn Reflect) -> Result<(), ConvertError> {
        let type_path = target.reflect_type_path();

        if doc.is_null() {
            match target.reflect_mut() {
                ReflectMut::Optional(opt) => opt.set_none(),
                ReflectMut::Document(value) => *value = DocValue::Null,
                _ => {}
            }
            return Ok(());
        }

        if let Some(converter) = self.registry.get(target.ty_id()) {
            let value = converter.deserialize(doc)?;
            return target.set(value).map_err(|value| mismatched_types(type_path, &*value));
        }

        match target.reflect_mut() {
            ReflectMut::Struct(s) => {
                let mapping = expect_mapping(doc, type_path)?;
                self.mapper().from_map(mapping, s)
            }
            ReflectMut::Array(array) => {
                let items = expect_sequence(doc, type_path)?;
                for (index, item) in items.iter().enumerate() {
                    let Some(slot) = array.get_mut(index) else {
                        break;
                    };
                    self.apply(item, slot).map_err(|e| e.in_field(index.to_string()))?;
                }
                Ok(())
            }
            ReflectMut::List(list) => {
                let items = expect_sequence(doc, type_path)?;
                let info = list_item_info(list.reflect_type_info())?;
                let values = self.construct_items(items, info)?;
                list.clear();
                for value in values {
                    list.push(value).map_err(|value| mismatched_types(info.type_path(), &*value))?;
                }
                Ok(())
            }
            ReflectMut::Set(set) => {
                let items = expect_sequence(doc, type_path)?;
                let info = list_item_info(set.reflect_type_info())?;
                let values = self.construct_items(items, info)?;
                set.clear();
                for value in values {
                    set.insert(value).map_err(|value| mismatched_types(info.type_path(), &*value))?;
                }
                Ok(())
            }
            ReflectMut::Map(map) => {
                let mapping = expect_mapping(doc, type_path)?;
                let TypeInfo::Map(info) = map.reflect_type_info() else {
                    return Err(ConvertError::NotConvertible { type_path });
                };
                let mut entries = Vec::with_capacity(mapping.len());
                for (key, item) in mapping {
                    if item.is_null() {
                        continue;
                    }
                    let Some(key_value) = self.leaf_or_skip(key, self.from_key(key, info.key_info()))? else {
                        continue;
                    };
                    let Some(value) = self.leaf_or_skip(key, self.construct(item, info.value_info()))? else {
                        continue;
                    };
                    entries.push((key_value, value));
                }
                map.clear();
                for (key, value) in entries {
                    map.insert(key, value)
                        .map_err(|(_, value)| mismatched_types(info.value_info().type_path(), &*value))?;
                }
                Ok(())
            }
            ReflectMut::Optional(opt) => {
                if let Some(inner) = opt.value_mut() {
                    return self.apply_strict(doc, inner);
                }
                let TypeInfo::Optional(info) = opt.reflect_type_info() else {
                    return Err(ConvertError::NotConvertible { type_path });
                };
                let value = self.construct(doc, info.item_info())?;
                opt.set_some(value).map_err(|value| mismatched_types(info.item_info().type_path(), &*value))
            }
            ReflectMut::Enum(e) => {
                let name = doc.scalar_text().ok_or(ConvertError::Mismatch {
                    type_path,
                    expected: "a variant name",
                    found: doc.kind(),
                })?;
                if e.set_variant(&name) {
                    Ok(())
                } else {
                    Err(ConvertError::UnknownVariant { type_path, name })
                }
            }
            ReflectMut::Scalar(s) => {
                if !doc.is_scalar() {
                    return Err(ConvertError::Mismatch {
                        type_path,
                        expected: "a scalar",
                        found: doc.kind(),
                    });
                }
                s.assign_scalar(doc)
                    .map_err(|source| ConvertError::Scalar { type_path, source })
            }
            ReflectMut::Document(value) => {
                value.clone_from(doc);
                Ok(())
            }
            ReflectMut::Opaque(_) => Err(ConvertError::NotConvertible { type_path }),
        }
    }

    /// Builds the elements of a list or set, skipping null elements and,
    /// with a warning, elements holding an invalid leaf.
    fn construct_items(
        &self,
        items: &[DocValue],
        info: &'static TypeInfo,
    ) -> Result<Vec<Box<dyn Reflect>>, ConvertError> {
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if item.is_null() {
                continue;
            }
            let key = index.to_string();
            if let Some(value) = self.leaf_or_skip(&key, self.construct(item, info))? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Turns a leaf error of a collection element into a skipped element.
    fn leaf_or_skip(
        &self,
        key: &str,
        result: Result<Box<dyn Reflect>, ConvertError>,
    ) -> Result<Option<Box<dyn Reflect>>, ConvertError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_leaf() => {
                warn!("Skipping the invalid element `{key}`: {err}");
                Ok(None)
            }
            Err(err) => Err(err.in_field(key)),
        }
    }
}

#[inline]
fn present(doc: DocValue) -> Option<DocValue> {
    (!doc.is_null()).then_some(doc)
}

fn is_ordered(info: &TypeInfo) -> bool {
    match info {
        TypeInfo::Set(info) => info.is_ordered(),
        TypeInfo::Map(info) => info.is_ordered(),
        _ => true,
    }
}

/// The rendering order of unordered set elements: numbers by value first,
/// then everything else by its scalar text.
fn unordered_item_order(a: &DocValue, b: &DocValue) -> Ordering {
    let number = |doc: &DocValue| match doc {
        DocValue::Int(_) | DocValue::Float(_) => doc.as_f64(),
        _ => None,
    };
    match (number(a), number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.to_string().cmp(&b.to_string())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}

fn list_item_info(info: &'static TypeInfo) -> Result<&'static TypeInfo, ConvertError> {
    match info {
        TypeInfo::List(info) => Ok(info.item_info()),
        TypeInfo::Set(info) => Ok(info.item_info()),
        _ => Err(ConvertError::NotConvertible {
            type_path: info.type_path(),
        }),
    }
}

fn expect_mapping<'d>(doc: &'d DocValue, type_path: &'static str) -> Result<&'d Mapping, ConvertError> {
    doc.as_mapping().ok_or(ConvertError::Mismatch {
        type_path,
        expected: "a mapping",
        found: doc.kind(),
    })
}

fn expect_sequence<'d>(doc: &'d DocValue, type_path: &'static str) -> Result<&'d [DocValue], ConvertError> {
    doc.as_sequence().ok_or(ConvertError::Mismatch {
        type_path,
        expected: "a sequence",
        found: doc.kind(),
    })
}

fn mismatched_types(expected: &'static str, found: &dyn Reflect) -> ConvertError {
    ConvertError::MismatchedTypes {
        expected,
        found: found.reflect_type_path(),
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use alloc::format;
    use std::collections::HashSet;

    use yc_doc::{DocValue, Mapping};

    use super::DocumentConverter;
    use crate::registry::ConverterRegistry;
    use crate::{ConvertError, Reflect};

    #[derive(Reflect, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
    #[reflect(opaque, default)]
    struct Chunk {
        x: i32,
        z: i32,
    }

    #[derive(Reflect, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
    enum Slot {
        Head,
        Feet,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Limits {
        max: Option<u32>,
        note: Option<String>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Zone {
        name: String,
        limits: Limits,
    }

    fn mapping<const N: usize>(entries: [(&str, DocValue); N]) -> DocValue {
        DocValue::Mapping(entries.into_iter().collect::<Mapping>())
    }

    fn ints(values: &[i32]) -> DocValue {
        values.iter().copied().map(DocValue::from).collect()
    }

    #[test]
    fn registered_key_converter_is_used_both_ways() {
        let mut registry = ConverterRegistry::new();
        registry.register_key::<Chunk>(
            |chunk| format!("{},{}", chunk.x, chunk.z),
            |text| {
                let (x, z) = text
                    .split_once(',')
                    .ok_or_else(|| ConvertError::invalid::<Chunk>(text))?;
                let parse = |s: &str| {
                    s.trim()
                        .parse::<i32>()
                        .map_err(|e| ConvertError::invalid::<Chunk>(e.to_string()))
                };
                Ok(Chunk { x: parse(x)?, z: parse(z)? })
            },
        );
        let converter = DocumentConverter::new(&registry);

        let owners = BTreeMap::from([(Chunk { x: 1, z: -2 }, String::from("alice"))]);
        let doc = converter.to_document(&owners).unwrap().unwrap();
        assert_eq!(doc, mapping([("1,-2", DocValue::from("alice"))]));

        let input = mapping([("3,4", DocValue::from("bob")), ("nowhere", DocValue::from("eve"))]);
        let mut target = owners.clone();
        converter.apply(&input, &mut target).unwrap();
        assert_eq!(target, BTreeMap::from([(Chunk { x: 3, z: 4 }, String::from("bob"))]));
    }

    #[test]
    fn enum_keys_use_variant_names() {
        let registry = ConverterRegistry::new();
        let converter = DocumentConverter::new(&registry);

        let loadout = BTreeMap::from([(Slot::Feet, 2_u32), (Slot::Head, 1)]);
        let doc = converter.to_document(&loadout).unwrap().unwrap();
        assert_eq!(doc, mapping([("Head", DocValue::from(1_u32)), ("Feet", DocValue::from(2_u32))]));

        let input = mapping([("Feet", DocValue::from(5)), ("Hand", DocValue::from(1))]);
        let mut target = loadout.clone();
        converter.apply(&input, &mut target).unwrap();
        assert_eq!(target, BTreeMap::from([(Slot::Feet, 5)]));
    }

    #[test]
    fn empty_nested_struct_is_omitted_and_reloads_as_default() {
        let registry = ConverterRegistry::new();
        let converter = DocumentConverter::new(&registry);

        let zone = Zone {
            name: String::from("spawn"),
            limits: Limits::default(),
        };
        let doc = converter.to_document(&zone).unwrap().unwrap();
        assert_eq!(doc, mapping([("name", DocValue::from("spawn"))]));

        let back: Zone = converter.from_document_typed(&doc).unwrap();
        assert_eq!(back, zone);
    }

    #[test]
    fn array_takes_what_fits() {
        let registry = ConverterRegistry::new();
        let converter = DocumentConverter::new(&registry);

        let mut spawn = [1_i32, 2, 3];
        converter.apply(&ints(&[7, 8]), &mut spawn).unwrap();
        assert_eq!(spawn, [7, 8, 3]);

        converter.apply(&ints(&[4, 5, 6, 9]), &mut spawn).unwrap();
        assert_eq!(spawn, [4, 5, 6]);
    }

    #[test]
    fn invalid_elements_are_skipped() {
        let registry = ConverterRegistry::new();
        let converter = DocumentConverter::new(&registry);
        let doc = DocValue::Sequence(vec![DocValue::from(1), DocValue::from("two"), DocValue::from(3)]);

        let mut list = vec![0_u8];
        converter.apply(&doc, &mut list).unwrap();
        assert_eq!(list, [1, 3]);

        let mut set = BTreeSet::from([9_u8]);
        converter.apply(&doc, &mut set).unwrap();
        assert_eq!(set, BTreeSet::from([1, 3]));

        let mut map = BTreeMap::<String, u8>::new();
        converter
            .apply(&mapping([("a", DocValue::from(1)), ("b", DocValue::from("x"))]), &mut map)
            .unwrap();
        assert_eq!(map, BTreeMap::from([(String::from("a"), 1)]));
    }

    #[test]
    fn structural_element_error_is_not_skipped() {
        let registry = ConverterRegistry::new();
        let converter = DocumentConverter::new(&registry);
        let doc = DocValue::Sequence(vec![ints(&[1]), DocValue::from(5)]);

        let mut nested: Vec<Vec<u8>> = Vec::new();
        let err = converter.apply(&doc, &mut nested).unwrap_err();
        assert_eq!(err.key_path(), ["1"]);
        assert!(nested.is_empty());
    }

    #[test]
    fn registered_converter_wins_over_structure() {
        let mut registry = ConverterRegistry::new();
        registry.register::<Limits>(
            |limits| Ok(DocValue::from(limits.max.unwrap_or(0))),
            |doc| {
                let max = doc
                    .as_f64()
                    .ok_or_else(|| ConvertError::invalid::<Limits>("expected a number"))?;
                Ok(Limits {
                    max: Some(max as u32),
                    note: Some(String::from("registered")),
                })
            },
        );
        let converter = DocumentConverter::new(&registry);

        let input = mapping([("name", DocValue::from("arena")), ("limits", DocValue::from(5))]);
        let mut zone = Zone::default();
        converter.apply(&input, &mut zone).unwrap();
        assert_eq!(zone.name, "arena");
        assert_eq!(
            zone.limits,
            Limits {
                max: Some(5),
                note: Some(String::from("registered")),
            }
        );

        let doc = converter.to_document(&zone).unwrap().unwrap();
        assert_eq!(doc, mapping([("name", DocValue::from("arena")), ("limits", DocValue::from(5_u32))]));
    }

    #[test]
    fn unordered_numbers_sort_by_value() {
        let registry = ConverterRegistry::new();
        let converter = DocumentConverter::new(&registry);

        let levels = HashSet::from([10_i32, -1, 9]);
        let doc = converter.to_document(&levels).unwrap().unwrap();
        assert_eq!(doc, ints(&[-1, 9, 10]));

        let names = HashSet::from(["b", "a", "10"].map(String::from));
        let doc = converter.to_document(&names).unwrap().unwrap();
        assert_eq!(doc, DocValue::Sequence(vec!["10".into(), "a".into(), "b".into()]));
    }
}
