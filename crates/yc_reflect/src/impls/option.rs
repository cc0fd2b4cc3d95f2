use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{OptionalInfo, TypeInfo, Typed};
use crate::ops::Optional;
use crate::reflection::impl_reflect_cast_fn;

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Optional(OptionalInfo::new::<Self, T>().with_default::<Self>())
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    impl_reflect_cast_fn!(Optional);
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    fn set_some(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = Some(value.take::<T>()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::ops::Optional;

    #[test]
    fn set_some_checks_type() {
        let mut value: Option<String> = None;
        assert!(value.set_some(Box::new(1_u8)).is_err());
        value.set_some(Box::new(String::from("a"))).unwrap();
        assert_eq!(value.as_deref(), Some("a"));
        value.set_none();
        assert!(!value.is_some());
    }
}
