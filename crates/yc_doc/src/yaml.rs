//! The YAML codec: text <-> [`DocValue`].
//!
//! Rendering uses block style for aggregates and preserves mapping key
//! order. No `---` document start marker is written.

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;

use crate::{CodecError, DocValue, Mapping};

/// Parses a YAML text into a document tree.
///
/// Text without any document (blank lines and comments only) parses to
/// [`DocValue::Null`].
pub fn parse(text: &str) -> Result<DocValue, CodecError> {
    if !has_document(text) {
        return Ok(DocValue::Null);
    }
    serde_yaml::from_str(text).map_err(CodecError::Parse)
}

/// Parses a YAML text whose root must be a mapping.
///
/// Returns `Ok(None)` when the text holds no document at all (blank or
/// comments only).
///
/// ```
/// use yc_doc::{DocValue, yaml};
///
/// let map = yaml::parse_mapping("name: Alice\n").unwrap().unwrap();
/// assert_eq!(map.get("name"), Some(&DocValue::from("Alice")));
/// assert!(yaml::parse_mapping("# nothing here\n").unwrap().is_none());
/// assert!(yaml::parse_mapping("- 1\n").is_err());
/// ```
pub fn parse_mapping(text: &str) -> Result<Option<Mapping>, CodecError> {
    match parse(text)? {
        DocValue::Null => Ok(None),
        DocValue::Mapping(map) => Ok(Some(map)),
        other => Err(CodecError::NotAMapping(other.kind())),
    }
}

fn has_document(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    })
}

/// Renders a document tree to YAML text.
///
/// ```
/// use yc_doc::{DocValue, Mapping, yaml};
///
/// let mut map = Mapping::new();
/// map.insert("name", "Alice");
/// map.insert("tags", DocValue::Sequence(vec!["a".into(), "b".into()]));
/// assert_eq!(yaml::render(&map.into()).unwrap(), "name: Alice\ntags:\n- a\n- b\n");
/// ```
pub fn render(value: &DocValue) -> Result<String, CodecError> {
    serde_yaml::to_string(value).map_err(CodecError::Render)
}

/// Converts any serde-serializable value into a document tree.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<DocValue, CodecError> {
    let yaml = serde_yaml::to_value(value).map_err(CodecError::Bridge)?;
    serde_yaml::from_value(yaml).map_err(CodecError::Bridge)
}

/// Builds a serde-deserializable value from a document tree.
pub fn from_document<T: DeserializeOwned>(value: &DocValue) -> Result<T, CodecError> {
    let yaml = serde_yaml::to_value(value).map_err(CodecError::Bridge)?;
    serde_yaml::from_value(yaml).map_err(CodecError::Bridge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Effect {
        kind: String,
        amplifier: u8,
        duration: i32,
    }

    #[test]
    fn serde_bridge_round_trip() {
        let effect = Effect {
            kind: "SPEED".into(),
            amplifier: 1,
            duration: 200,
        };
        let doc = to_document(&effect).unwrap();
        let map = doc.as_mapping().unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["kind", "amplifier", "duration"]);
        assert_eq!(from_document::<Effect>(&doc).unwrap(), effect);
    }

    #[test]
    fn render_then_parse_keeps_order() {
        let mut map = Mapping::new();
        map.insert("z", 1);
        map.insert("a", 2);
        let text = render(&DocValue::Mapping(map.clone())).unwrap();
        assert!(!text.starts_with("---"));
        assert_eq!(parse_mapping(&text).unwrap(), Some(map));
    }

    #[test]
    fn blank_is_null() {
        assert_eq!(parse("  \n").unwrap(), DocValue::Null);
        assert_eq!(parse("# only\n\n# comments\n").unwrap(), DocValue::Null);
        assert!(parse_mapping("").unwrap().is_none());
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        assert!(matches!(parse("a: [1, 2"), Err(CodecError::Parse(_))));
    }
}
