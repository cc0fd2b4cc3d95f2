use alloc::string::{String, ToString};
use core::str::FromStr;

use thiserror::Error;
use yc_doc::{DocKind, DocValue};

use crate::Reflect;

// -----------------------------------------------------------------------------
// Scalar

/// A leaf value with a direct scalar document form.
///
/// Reading is lenient: [`assign_scalar`](Scalar::assign_scalar) accepts
/// any scalar that coerces to the target, e.g. `"42"` for an integer or
/// `3.0` for an integer. The helpers in this module implement that.
pub trait Scalar: Reflect {
    /// Returns the document form of the value.
    fn to_scalar(&self) -> DocValue;

    /// Replaces the value with the coerced `value`. On failure the current
    /// value is kept.
    fn assign_scalar(&mut self, value: &DocValue) -> Result<(), ScalarError>;
}

/// Failure to coerce a document node into a scalar.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ScalarError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: DocKind,
    },

    #[error("cannot parse `{text}` as {expected}")]
    Parse { expected: &'static str, text: String },

    #[error("{value} is out of range for {expected}")]
    OutOfRange { expected: &'static str, value: String },
}

impl ScalarError {
    #[inline]
    fn mismatch(expected: &'static str, value: &DocValue) -> Self {
        Self::Mismatch {
            expected,
            found: value.kind(),
        }
    }

    #[inline]
    fn parse(expected: &'static str, text: &str) -> Self {
        Self::Parse {
            expected,
            text: text.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// Coercion

/// Coerces a document node to an integer type.
///
/// Accepts integers, floats without fractional part and strings holding
/// either of them.
///
/// ```
/// use yc_doc::DocValue;
/// use yc_reflect::ops::{ScalarError, coerce_int};
///
/// assert_eq!(coerce_int::<u8>(&DocValue::from("42"), "u8"), Ok(42));
/// assert_eq!(coerce_int::<i32>(&DocValue::Float(3.0), "i32"), Ok(3));
/// assert!(matches!(
///     coerce_int::<u8>(&DocValue::Int(300), "u8"),
///     Err(ScalarError::OutOfRange { .. })
/// ));
/// ```
pub fn coerce_int<T: TryFrom<i128>>(value: &DocValue, expected: &'static str) -> Result<T, ScalarError> {
    let int = match value {
        DocValue::Int(i) => *i,
        DocValue::Float(f) => whole_float(*f).ok_or_else(|| ScalarError::parse(expected, &f.to_string()))?,
        DocValue::String(s) => {
            let text = s.trim();
            match text.parse::<i128>() {
                Ok(i) => i,
                Err(_) => text
                    .parse::<f64>()
                    .ok()
                    .and_then(whole_float)
                    .ok_or_else(|| ScalarError::parse(expected, s))?,
            }
        }
        other => return Err(ScalarError::mismatch(expected, other)),
    };
    T::try_from(int).map_err(|_| ScalarError::OutOfRange {
        expected,
        value: int.to_string(),
    })
}

fn whole_float(f: f64) -> Option<i128> {
    const LIMIT: f64 = i128::MAX as f64;
    if !(-LIMIT < f && f < LIMIT) {
        return None;
    }
    let int = f as i128;
    (int as f64 == f).then_some(int)
}

/// Coerces a document node to a float. Integers and numeric strings are
/// accepted.
pub fn coerce_float(value: &DocValue, expected: &'static str) -> Result<f64, ScalarError> {
    match value {
        DocValue::Float(f) => Ok(*f),
        DocValue::Int(i) => Ok(*i as f64),
        DocValue::String(s) => s.trim().parse().map_err(|_| ScalarError::parse(expected, s)),
        other => Err(ScalarError::mismatch(expected, other)),
    }
}

/// Coerces a document node to a bool. Strings `true`/`false` are accepted
/// in any letter case.
pub fn coerce_bool(value: &DocValue, expected: &'static str) -> Result<bool, ScalarError> {
    match value {
        DocValue::Bool(b) => Ok(*b),
        DocValue::String(s) => {
            let text = s.trim();
            if text.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if text.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(ScalarError::parse(expected, s))
            }
        }
        other => Err(ScalarError::mismatch(expected, other)),
    }
}

/// Coerces a document node to a string. Numbers and bools are written in
/// their plain text form.
pub fn coerce_string(value: &DocValue, expected: &'static str) -> Result<String, ScalarError> {
    value
        .scalar_text()
        .ok_or_else(|| ScalarError::mismatch(expected, value))
}

/// Coerces a document node to a single character.
pub fn coerce_char(value: &DocValue, expected: &'static str) -> Result<char, ScalarError> {
    let text = coerce_string(value, expected)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ScalarError::parse(expected, &text)),
    }
}

/// Coerces a document node to text and parses it with [`FromStr`].
///
/// Used for types declared `#[reflect(scalar)]`.
pub fn parse_text<T: FromStr>(value: &DocValue, expected: &'static str) -> Result<T, ScalarError> {
    let text = coerce_string(value, expected)?;
    text.parse().map_err(|_| ScalarError::parse(expected, &text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn int_from_strings_and_floats() {
        assert_eq!(coerce_int::<i64>(&DocValue::from(" -7 "), "i64"), Ok(-7));
        assert_eq!(coerce_int::<i64>(&DocValue::from("2.0"), "i64"), Ok(2));
        assert!(matches!(
            coerce_int::<i64>(&DocValue::Float(2.5), "i64"),
            Err(ScalarError::Parse { .. })
        ));
        assert!(matches!(
            coerce_int::<i64>(&DocValue::Bool(true), "i64"),
            Err(ScalarError::Mismatch { found: DocKind::Bool, .. })
        ));
    }

    #[test]
    fn bool_is_case_insensitive() {
        assert_eq!(coerce_bool(&DocValue::from("TRUE"), "bool"), Ok(true));
        assert_eq!(coerce_bool(&DocValue::from("False"), "bool"), Ok(false));
        assert!(coerce_bool(&DocValue::from("yes"), "bool").is_err());
    }

    #[test]
    fn string_from_numbers() {
        assert_eq!(coerce_string(&DocValue::Int(5), "String").unwrap(), "5");
        assert_eq!(coerce_string(&DocValue::Bool(false), "String").unwrap(), "false");
        assert!(coerce_string(&DocValue::Sequence(Vec::new()), "String").is_err());
    }

    #[test]
    fn char_needs_exactly_one() {
        assert_eq!(coerce_char(&DocValue::from("x"), "char"), Ok('x'));
        assert!(coerce_char(&DocValue::from("xy"), "char").is_err());
    }

    #[test]
    fn float_from_int() {
        assert_eq!(coerce_float(&DocValue::Int(3), "f64"), Ok(3.0));
        assert_eq!(coerce_float(&DocValue::from("0.5"), "f64"), Ok(0.5));
    }

    #[derive(crate::Reflect, Default, PartialEq, Debug)]
    #[reflect(scalar, default)]
    struct Version(u16, u16);

    impl core::fmt::Display for Version {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            write!(f, "{}.{}", self.0, self.1)
        }
    }

    impl FromStr for Version {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, ()> {
            let (major, minor) = s.split_once('.').ok_or(())?;
            Ok(Self(major.parse().map_err(|_| ())?, minor.parse().map_err(|_| ())?))
        }
    }

    #[test]
    fn derived_scalar_goes_through_text() {
        let mut version = Version(1, 20);
        assert_eq!(version.to_scalar(), DocValue::from("1.20"));
        version.assign_scalar(&DocValue::from("2.5")).unwrap();
        assert_eq!(version, Version(2, 5));
        assert!(matches!(
            version.assign_scalar(&DocValue::from("two")),
            Err(ScalarError::Parse { .. })
        ));
        assert_eq!(version, Version(2, 5));
    }
}
