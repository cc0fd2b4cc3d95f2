use alloc::string::String;

use yc_doc::DocValue;

use crate::convert::ConvertError;

/// A type with its own document form.
///
/// Registered with [`ConverterRegistry::register_convert`], or declared
/// `#[reflect(convert)]` to be collected by
/// [`ConverterRegistry::auto_register`].
///
/// A deserializer should report malformed input as
/// [`ConvertError::InvalidValue`]: the loader then keeps the default value
/// and warns instead of failing.
///
/// [`ConverterRegistry::register_convert`]: crate::registry::ConverterRegistry::register_convert
/// [`ConverterRegistry::auto_register`]: crate::registry::ConverterRegistry::auto_register
pub trait Convert: Sized {
    fn to_document(&self) -> Result<DocValue, ConvertError>;

    fn from_document(doc: &DocValue) -> Result<Self, ConvertError>;
}

/// A type usable as a mapping key.
///
/// Registered with [`ConverterRegistry::register_key_convert`], or declared
/// `#[reflect(key_convert)]`.
///
/// [`ConverterRegistry::register_key_convert`]: crate::registry::ConverterRegistry::register_key_convert
pub trait KeyConvert: Sized {
    fn to_key(&self) -> String;

    fn from_key(key: &str) -> Result<Self, ConvertError>;
}
