use core::fmt;

use indexmap::IndexMap;

// -----------------------------------------------------------------------------
// DocValue

/// The intermediate tree produced by serialization and consumed by
/// deserialization, independent of the final text syntax.
///
/// Integers are stored as `i128` so that every Rust primitive integer except
/// `u128` round-trips without loss.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DocValue {
    #[default]
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    String(String),
    Sequence(Vec<DocValue>),
    Mapping(Mapping),
}

/// The shape of a [`DocValue`], used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Sequence,
    Mapping,
}

impl DocKind {
    /// Lowercase name of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DocValue {
    /// Returns the shape of the value.
    pub const fn kind(&self) -> DocKind {
        match self {
            Self::Null => DocKind::Null,
            Self::Bool(_) => DocKind::Bool,
            Self::Int(_) => DocKind::Int,
            Self::Float(_) => DocKind::Float,
            Self::String(_) => DocKind::String,
            Self::Sequence(_) => DocKind::Sequence,
            Self::Mapping(_) => DocKind::Mapping,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `Bool`, `Int`, `Float` and `String`.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
        )
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as `f64`, widening integers.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sequence(&self) -> Option<&[DocValue]> {
        match self {
            Self::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    #[inline]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns `true` for a mapping without entries.
    #[inline]
    pub fn is_empty_mapping(&self) -> bool {
        matches!(self, Self::Mapping(map) if map.is_empty())
    }

    /// Returns the plain text of a scalar, as used for mapping keys.
    ///
    /// ```
    /// use yc_doc::DocValue;
    ///
    /// assert_eq!(DocValue::Int(-3).scalar_text().as_deref(), Some("-3"));
    /// assert_eq!(DocValue::from("x").scalar_text().as_deref(), Some("x"));
    /// assert_eq!(DocValue::Null.scalar_text(), None);
    /// ```
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Compact flow-style rendering, e.g. `{a: [1, 2]}`.
///
/// Used for diagnostics and to order elements of unordered collections.
impl fmt::Display for DocValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Sequence(seq) => {
                f.write_str("[")?;
                for (i, item) in seq.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {$(
        impl From<$ty> for DocValue {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::Int(value as i128)
            }
        }
    )*};
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<bool> for DocValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for DocValue {
    /// Keeps the shortest decimal form of the `f32`, so `0.1_f32` is stored
    /// as `0.1` rather than its exact binary widening.
    fn from(value: f32) -> Self {
        Self::Float(value.to_string().parse().unwrap_or(f64::from(value)))
    }
}

impl From<f64> for DocValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for DocValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for DocValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<DocValue>> for DocValue {
    #[inline]
    fn from(value: Vec<DocValue>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping> for DocValue {
    #[inline]
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl FromIterator<DocValue> for DocValue {
    fn from_iter<I: IntoIterator<Item = DocValue>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

// -----------------------------------------------------------------------------
// Mapping

/// An insertion-ordered map from string keys to [`DocValue`]s.
///
/// Keys are unique; inserting an existing key replaces its value in place
/// and keeps its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping(IndexMap<String, DocValue>);

impl Mapping {
    #[inline]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Inserts an entry, returning the previous value of the key.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DocValue>) -> Option<DocValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Inserts the entry only when `value` is present and not null.
    ///
    /// Returns `true` if the entry was inserted.
    ///
    /// ```
    /// use yc_doc::{DocValue, Mapping};
    ///
    /// let mut map = Mapping::new();
    /// assert!(!map.insert_present("a", None));
    /// assert!(!map.insert_present("b", Some(DocValue::Null)));
    /// assert!(map.insert_present("c", Some(DocValue::Int(1))));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert_present(&mut self, key: impl Into<String>, value: Option<DocValue>) -> bool {
        match value {
            Some(value) if !value.is_null() => {
                self.0.insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.0.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut DocValue> {
        self.0.get_mut(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, keeping the order of the remaining entries.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<DocValue> {
        self.0.shift_remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, DocValue> {
        self.0.iter()
    }

    #[inline]
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, DocValue> {
        self.0.keys()
    }

    #[inline]
    pub fn values(&self) -> indexmap::map::Values<'_, String, DocValue> {
        self.0.values()
    }

    /// Sorts the entries by key.
    #[inline]
    pub fn sort_keys(&mut self) {
        self.0.sort_keys();
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a DocValue);
    type IntoIter = indexmap::map::Iter<'a, String, DocValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Mapping {
    type Item = (String, DocValue);
    type IntoIter = indexmap::map::IntoIter<String, DocValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, DocValue)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, DocValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>> Extend<(K, DocValue)> for Mapping {
    fn extend<I: IntoIterator<Item = (K, DocValue)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

#[cfg(test)]
mod tests {
    use super::{DocValue, Mapping};

    #[test]
    fn insert_keeps_position() {
        let mut map = Mapping::new();
        map.insert("b", 1);
        map.insert("a", 2);
        map.insert("b", 3);
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(map.get("b"), Some(&DocValue::Int(3)));
    }

    #[test]
    fn display_is_flow_style() {
        let mut inner = Mapping::new();
        inner.insert("x", 1);
        let value = DocValue::Sequence(vec![DocValue::from("a"), DocValue::Mapping(inner)]);
        assert_eq!(value.to_string(), "[a, {x: 1}]");
    }

    #[test]
    fn remove_preserves_order() {
        let mut map: Mapping = [("a", DocValue::Int(1)), ("b", DocValue::Int(2)), ("c", DocValue::Int(3))]
            .into_iter()
            .collect();
        assert_eq!(map.remove("b"), Some(DocValue::Int(2)));
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn float_widening() {
        assert_eq!(DocValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(DocValue::from("2").as_f64(), None);
    }

    #[test]
    fn f32_keeps_its_shortest_form() {
        assert_eq!(DocValue::from(0.1_f32), DocValue::Float(0.1));
        assert_eq!(DocValue::from(-2.5_f32), DocValue::Float(-2.5));
        assert_eq!(DocValue::from(f32::INFINITY), DocValue::Float(f64::INFINITY));
    }
}
