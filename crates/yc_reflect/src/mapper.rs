//! The field walk between a struct and a document mapping.
//!
//! - [`ObjectMapper::to_map`] writes the persistable fields in declaration
//!   order, omitting absent values and empty mappings.
//! - [`ObjectMapper::from_map`] applies the keys present in a mapping and
//!   ignores unknown ones.
//! - [`comment_table`] collects the declared field comments by key path.

use alloc::vec::Vec;
use core::any::TypeId;

use yc_doc::Mapping;
use yc_doc::annotate::CommentTable;

use crate::convert::{ConvertError, DocumentConverter};
use crate::info::{StructInfo, TypeInfo};
use crate::ops::Struct;
use crate::registry::ConverterRegistry;

/// Maps structs to document mappings and back, field by field.
#[derive(Clone, Copy)]
pub struct ObjectMapper<'a> {
    registry: &'a ConverterRegistry,
}

impl<'a> ObjectMapper<'a> {
    #[inline]
    pub const fn new(registry: &'a ConverterRegistry) -> Self {
        Self { registry }
    }

    #[inline]
    pub const fn converter(&self) -> DocumentConverter<'a> {
        DocumentConverter::new(self.registry)
    }

    /// Converts the persistable fields of `value` into a mapping.
    ///
    /// Keys follow the declaration order of the fields. Fields converting to
    /// nothing (e.g. `None`) or to an empty mapping are omitted.
    pub fn to_map(&self, value: &dyn Struct) -> Result<Mapping, ConvertError> {
        let info = struct_info(value)?;
        let converter = self.converter();
        let mut mapping = Mapping::with_capacity(info.field_len());

        for (index, field) in info.iter().enumerate() {
            if field.is_skipped() {
                continue;
            }
            let Some(field_value) = value.field_at(index) else {
                continue;
            };
            let doc = converter
                .to_document(field_value)
                .map_err(|e| e.in_field(field.key()))?;
            if let Some(doc) = doc
                && !doc.is_empty_mapping()
            {
                mapping.insert(field.key(), doc);
            }
        }
        Ok(mapping)
    }

    /// Applies the entries of `mapping` to the persistable fields of
    /// `target`.
    ///
    /// Missing keys leave their field unchanged and unknown keys are
    /// ignored. The first structural error is returned with the key path
    /// attached; fields applied before it keep their new value.
    pub fn from_map(&self, mapping: &Mapping, target: &mut dyn Struct) -> Result<(), ConvertError> {
        let info = struct_info(target)?;
        let converter = self.converter();

        for (index, field) in info.iter().enumerate() {
            if field.is_skipped() {
                continue;
            }
            let Some(doc) = mapping.get(field.key()) else {
                continue;
            };
            let Some(slot) = target.field_at_mut(index) else {
                continue;
            };
            converter.apply(doc, slot).map_err(|e| e.in_field(field.key()))?;
        }
        Ok(())
    }
}

fn struct_info(value: &dyn Struct) -> Result<&'static StructInfo, ConvertError> {
    value.struct_info().ok_or(ConvertError::NotConvertible {
        type_path: value.reflect_type_path(),
    })
}

/// Collects the comment lines of the persistable fields of `info`,
/// recursing into struct and optional struct fields.
///
/// ```
/// use yc_reflect::{Reflect, info::describe, mapper::comment_table};
///
/// #[derive(Reflect, Default)]
/// struct Corner {
///     #[reflect(comment = "Block x")]
///     x: i32,
/// }
///
/// #[derive(Reflect, Default)]
/// struct Region {
///     #[reflect(comment = "Lower corner")]
///     min: Corner,
/// }
///
/// let table = comment_table(describe::<Region>().unwrap());
/// assert_eq!(table.get(&["min"]).unwrap(), ["Lower corner"]);
/// assert_eq!(table.get(&["min", "x"]).unwrap(), ["Block x"]);
/// ```
pub fn comment_table(info: &StructInfo) -> CommentTable {
    let mut table = CommentTable::new();
    let mut path = Vec::new();
    let mut visiting = Vec::from([info.type_id()]);
    collect_comments(info, &mut path, &mut visiting, &mut table);
    table
}

fn collect_comments(
    info: &StructInfo,
    path: &mut Vec<&'static str>,
    visiting: &mut Vec<TypeId>,
    table: &mut CommentTable,
) {
    for field in info.iter().filter(|f| !f.is_skipped()) {
        path.push(field.key());
        table.insert(path.iter().copied(), field.comments().iter().copied());

        let nested = match field.type_info() {
            Some(TypeInfo::Struct(nested)) => Some(nested),
            Some(TypeInfo::Optional(opt)) => opt.item_info().as_struct(),
            _ => None,
        };
        if let Some(nested) = nested
            && !visiting.contains(&nested.type_id())
        {
            visiting.push(nested.type_id());
            collect_comments(nested, path, visiting, table);
            visiting.pop();
        }
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use yc_doc::{DocValue, Mapping};

    use super::ObjectMapper;
    use crate::registry::ConverterRegistry;
    use crate::{ConvertError, Reflect};

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Settings {
        title: String,
        max_players: u32,
        motd: Option<String>,
        #[reflect(skip)]
        session: u64,
    }

    fn settings() -> Settings {
        Settings {
            title: String::from("Lobby"),
            max_players: 20,
            motd: None,
            session: 99,
        }
    }

    #[test]
    fn to_map_follows_declaration_order() {
        let registry = ConverterRegistry::new();
        let map = ObjectMapper::new(&registry).to_map(&settings()).unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["title", "max-players"]);
    }

    #[test]
    fn from_map_ignores_unknown_and_missing_keys() {
        let registry = ConverterRegistry::new();
        let mut map = Mapping::new();
        map.insert("max-players", 50);
        map.insert("unknown", "x");
        map.insert("session", 1);

        let mut target = settings();
        ObjectMapper::new(&registry).from_map(&map, &mut target).unwrap();
        assert_eq!(target.max_players, 50);
        assert_eq!(target.title, "Lobby");
        assert_eq!(target.session, 99);
    }

    #[test]
    fn null_clears_option() {
        let registry = ConverterRegistry::new();
        let mut map = Mapping::new();
        map.insert("motd", DocValue::Null);

        let mut target = Settings {
            motd: Some(String::from("hi")),
            ..settings()
        };
        ObjectMapper::new(&registry).from_map(&map, &mut target).unwrap();
        assert_eq!(target.motd, None);
    }

    #[test]
    fn structural_error_carries_the_key() {
        let registry = ConverterRegistry::new();
        let mut map = Mapping::new();
        map.insert("title", DocValue::Sequence(Vec::new()));

        let err = ObjectMapper::new(&registry)
            .from_map(&map, &mut settings())
            .unwrap_err();
        assert_eq!(err.key_path(), ["title"]);
        assert!(matches!(err.root_cause(), ConvertError::Mismatch { .. }));
    }

    #[test]
    fn leaf_error_keeps_the_value() {
        let registry = ConverterRegistry::new();
        let mut map = Mapping::new();
        map.insert("max-players", "many");

        let mut target = settings();
        ObjectMapper::new(&registry).from_map(&map, &mut target).unwrap();
        assert_eq!(target.max_players, 20);
    }
}
