use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;
use yc_doc::{DocValue, yaml};
use yc_utils::TypeIdMap;

use crate::Reflect;
use crate::convert::ConvertError;
use crate::registry::{Convert, KeyConvert, KeyConverter, ValueConverter};
use crate::registry::{DeserializeFn, KeyDeserializeFn, KeySerializeFn, SerializeFn};

// -----------------------------------------------------------------------------
// ConverterRegistry

/// Type-specific converters, keyed by exact [`TypeId`].
///
/// Values and mapping keys use separate channels, so a type can have a
/// rich document form and still be used as a map key.
///
/// # Examples
///
/// ```
/// use yc_doc::DocValue;
/// use yc_reflect::{Reflect, convert::ConvertError, registry::ConverterRegistry};
///
/// #[derive(Reflect, Clone, Copy, PartialEq, Debug)]
/// #[reflect(opaque)]
/// struct Celsius(f64);
///
/// let mut registry = ConverterRegistry::new();
/// registry.register::<Celsius>(
///     |c| Ok(DocValue::from(format!("{}C", c.0))),
///     |doc| {
///         let text = doc.as_str().unwrap_or_default();
///         text.trim_end_matches('C')
///             .parse()
///             .map(Celsius)
///             .map_err(|_| ConvertError::invalid::<Celsius>("not a temperature"))
///     },
/// );
///
/// let ser = registry.lookup_serializer(core::any::TypeId::of::<Celsius>()).unwrap();
/// assert_eq!(ser(&Celsius(21.5)).unwrap(), DocValue::from("21.5C"));
/// ```
#[derive(Default)]
pub struct ConverterRegistry {
    values: TypeIdMap<ValueConverter>,
    keys: TypeIdMap<KeyConverter>,
}

impl ConverterRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            values: TypeIdMap::new(),
            keys: TypeIdMap::new(),
        }
    }

    /// Registers a value converter. An existing converter for `T` is
    /// replaced.
    pub fn register<T: Reflect>(
        &mut self,
        serialize: impl Fn(&T) -> Result<DocValue, ConvertError> + Send + Sync + 'static,
        deserialize: impl Fn(&DocValue) -> Result<T, ConvertError> + Send + Sync + 'static,
    ) {
        self.insert_value(ValueConverter::new(serialize, deserialize));
    }

    /// Registers a key converter. An existing key converter for `T` is
    /// replaced.
    pub fn register_key<T: Reflect>(
        &mut self,
        serialize: impl Fn(&T) -> String + Send + Sync + 'static,
        deserialize: impl Fn(&str) -> Result<T, ConvertError> + Send + Sync + 'static,
    ) {
        self.insert_key(KeyConverter::new(serialize, deserialize));
    }

    /// Registers the [`Convert`] implementation of `T`.
    #[inline]
    pub fn register_convert<T: Reflect + Convert>(&mut self) {
        self.register::<T>(T::to_document, T::from_document);
    }

    /// Registers the [`KeyConvert`] implementation of `T`.
    #[inline]
    pub fn register_key_convert<T: Reflect + KeyConvert>(&mut self) {
        self.register_key::<T>(T::to_key, T::from_key);
    }

    /// Registers a converter going through the serde implementation of `T`.
    ///
    /// Deserialization failures are reported as
    /// [`ConvertError::InvalidValue`], so a malformed node falls back to the
    /// default value instead of aborting the load.
    ///
    /// ```
    /// use serde::{Deserialize, Serialize};
    /// use yc_doc::yaml;
    /// use yc_reflect::{Reflect, registry::ConverterRegistry};
    ///
    /// #[derive(Reflect, Serialize, Deserialize, Default, PartialEq, Debug)]
    /// #[reflect(opaque, default)]
    /// struct Effect {
    ///     kind: String,
    ///     amplifier: u8,
    /// }
    ///
    /// let mut registry = ConverterRegistry::new();
    /// registry.register_serde::<Effect>();
    ///
    /// let de = registry.lookup_deserializer(core::any::TypeId::of::<Effect>()).unwrap();
    /// let doc = yaml::parse("kind: SPEED\namplifier: 2\n").unwrap();
    /// let effect = de(&doc).unwrap().take::<Effect>().unwrap();
    /// assert_eq!(effect, Effect { kind: "SPEED".into(), amplifier: 2 });
    /// ```
    pub fn register_serde<T: Reflect + Serialize + DeserializeOwned>(&mut self) {
        self.register::<T>(
            |value| Ok(yaml::to_document(value)?),
            |doc| yaml::from_document(doc).map_err(|e| ConvertError::invalid::<T>(e.to_string())),
        );
    }

    fn insert_value(&mut self, converter: ValueConverter) {
        let ty = *converter.ty();
        if self.values.insert(ty.id(), converter).is_some() {
            log::debug!("Replaced the value converter of `{ty}`.");
        }
    }

    fn insert_key(&mut self, converter: KeyConverter) {
        let ty = *converter.ty();
        if self.keys.insert(ty.id(), converter).is_some() {
            log::debug!("Replaced the key converter of `{ty}`.");
        }
    }

    /// Runs every registration submitted by `#[reflect(convert)]` and
    /// `#[reflect(key_convert)]`, returning how many ran.
    ///
    /// Always `0` without the `auto_register` feature.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> usize {
        #[cfg(feature = "auto_register")]
        {
            let mut count = 0;
            for func in inventory::iter::<AutoRegisterFunc> {
                (func.0)(self);
                count += 1;
            }
            count
        }
        #[cfg(not(feature = "auto_register"))]
        {
            0
        }
    }

    /// Returns the value converter registered for exactly `type_id`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&ValueConverter> {
        self.values.get(&type_id)
    }

    /// Returns the key converter registered for exactly `type_id`.
    #[inline]
    pub fn get_key(&self, type_id: TypeId) -> Option<&KeyConverter> {
        self.keys.get(&type_id)
    }

    #[inline]
    pub fn lookup_serializer(&self, type_id: TypeId) -> Option<&SerializeFn> {
        self.get(type_id).map(ValueConverter::serializer)
    }

    #[inline]
    pub fn lookup_deserializer(&self, type_id: TypeId) -> Option<&DeserializeFn> {
        self.get(type_id).map(ValueConverter::deserializer)
    }

    #[inline]
    pub fn lookup_key_serializer(&self, type_id: TypeId) -> Option<&KeySerializeFn> {
        self.get_key(type_id).map(KeyConverter::serializer)
    }

    #[inline]
    pub fn lookup_key_deserializer(&self, type_id: TypeId) -> Option<&KeyDeserializeFn> {
        self.get_key(type_id).map(KeyConverter::deserializer)
    }

    /// Returns `true` if a value converter is registered for `type_id`.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.values.contains(&type_id)
    }

    /// Returns `true` if a key converter is registered for `type_id`.
    #[inline]
    pub fn contains_key(&self, type_id: TypeId) -> bool {
        self.keys.contains(&type_id)
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("values", &self.values.values().map(|c| c.ty()).collect::<Vec<_>>())
            .field("keys", &self.keys.values().map(|c| c.ty()).collect::<Vec<_>>())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// AutoRegisterFunc

/// A registration submitted through [`inventory`].
#[cfg(feature = "auto_register")]
pub struct AutoRegisterFunc(pub fn(&mut ConverterRegistry));

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegisterFunc);

// -----------------------------------------------------------------------------
// ConverterRegistryArc

/// A [`ConverterRegistry`] shared between owners.
///
/// Reads vastly outnumber writes: registration happens at start-up.
#[derive(Clone, Default)]
pub struct ConverterRegistryArc {
    /// The wrapped [`ConverterRegistry`].
    pub internal: Arc<RwLock<ConverterRegistry>>,
}

impl ConverterRegistryArc {
    /// Wraps an existing registry.
    pub fn new(registry: ConverterRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Returns the process-wide registry.
    ///
    /// It is created on first access, already holding the
    /// [auto-registered](ConverterRegistry::auto_register) converters.
    pub fn global() -> &'static ConverterRegistryArc {
        static GLOBAL: LazyLock<ConverterRegistryArc> = LazyLock::new(|| {
            let mut registry = ConverterRegistry::new();
            registry.auto_register();
            ConverterRegistryArc::new(registry)
        });
        &GLOBAL
    }

    /// Takes a read lock on the underlying [`ConverterRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, ConverterRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`ConverterRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, ConverterRegistry> {
        self.internal.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ConverterRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use core::any::TypeId;

    use yc_doc::DocValue;

    use super::ConverterRegistry;
    use crate::convert::ConvertError;

    #[test]
    fn lookup_is_exact() {
        let mut registry = ConverterRegistry::new();
        registry.register::<u32>(|v| Ok(DocValue::from(*v * 2)), |_| Ok(0));
        assert!(registry.lookup_serializer(TypeId::of::<u32>()).is_some());
        assert!(registry.lookup_serializer(TypeId::of::<u64>()).is_none());
        assert!(registry.lookup_key_serializer(TypeId::of::<u32>()).is_none());
    }

    #[test]
    fn reregistration_replaces() {
        let mut registry = ConverterRegistry::new();
        registry.register::<u8>(|_| Ok(DocValue::from(1)), |_| Ok(1));
        registry.register::<u8>(|_| Ok(DocValue::from(2)), |_| Ok(2));
        let ser = registry.lookup_serializer(TypeId::of::<u8>()).unwrap();
        assert_eq!(ser(&0_u8).unwrap(), DocValue::Int(2));
    }

    #[test]
    fn erased_serializer_rejects_other_types() {
        let mut registry = ConverterRegistry::new();
        registry.register::<u8>(|v| Ok(DocValue::from(*v)), |_| Ok(0));
        let ser = registry.lookup_serializer(TypeId::of::<u8>()).unwrap();
        assert!(matches!(ser(&1_i8), Err(ConvertError::MismatchedTypes { .. })));
    }

    #[test]
    fn key_channel_round_trip() {
        let mut registry = ConverterRegistry::new();
        registry.register_key::<u16>(
            |v| alloc::format!("#{v}"),
            |k| k.trim_start_matches('#').parse().map_err(|_| ConvertError::custom("bad key")),
        );
        let ser = registry.lookup_key_serializer(TypeId::of::<u16>()).unwrap();
        let de = registry.lookup_key_deserializer(TypeId::of::<u16>()).unwrap();
        let key: String = ser(&7_u16).unwrap();
        assert_eq!(key, "#7");
        assert_eq!(de(&key).unwrap().take::<u16>().unwrap(), 7);
        assert!(de("x").unwrap_err().to_string().contains("bad key"));
    }
}
