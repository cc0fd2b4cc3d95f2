use alloc::string::{String, ToString};

use yc_doc::DocValue;

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, Typed};
use crate::ops::{Scalar, ScalarError};
use crate::ops::{coerce_bool, coerce_char, coerce_float, coerce_int, coerce_string};
use crate::reflection::impl_reflect_cast_fn;
use crate::Reflect;

macro_rules! impl_scalar_reflect {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Scalar(OpaqueInfo::new::<Self>().with_default::<Self>()))
            }
        }

        impl Reflect for $ty {
            impl_reflect_cast_fn!(Scalar);
        }
    )*};
}

impl_scalar_reflect!(
    bool, char, String, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize,
);

macro_rules! impl_int_scalar {
    ($($ty:ident),*) => {$(
        impl Scalar for $ty {
            #[inline]
            fn to_scalar(&self) -> DocValue {
                DocValue::from(*self)
            }

            fn assign_scalar(&mut self, value: &DocValue) -> Result<(), ScalarError> {
                *self = coerce_int(value, stringify!($ty))?;
                Ok(())
            }
        }
    )*};
}

impl_int_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl Scalar for f64 {
    #[inline]
    fn to_scalar(&self) -> DocValue {
        DocValue::Float(*self)
    }

    fn assign_scalar(&mut self, value: &DocValue) -> Result<(), ScalarError> {
        *self = coerce_float(value, "f64")?;
        Ok(())
    }
}

impl Scalar for f32 {
    #[inline]
    fn to_scalar(&self) -> DocValue {
        DocValue::from(*self)
    }

    fn assign_scalar(&mut self, value: &DocValue) -> Result<(), ScalarError> {
        let wide = coerce_float(value, "f32")?;
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return Err(ScalarError::OutOfRange {
                expected: "f32",
                value: wide.to_string(),
            });
        }
        *self = narrow;
        Ok(())
    }
}

impl Scalar for bool {
    #[inline]
    fn to_scalar(&self) -> DocValue {
        DocValue::Bool(*self)
    }

    fn assign_scalar(&mut self, value: &DocValue) -> Result<(), ScalarError> {
        *self = coerce_bool(value, "bool")?;
        Ok(())
    }
}

impl Scalar for char {
    #[inline]
    fn to_scalar(&self) -> DocValue {
        DocValue::String(self.to_string())
    }

    fn assign_scalar(&mut self, value: &DocValue) -> Result<(), ScalarError> {
        *self = coerce_char(value, "char")?;
        Ok(())
    }
}

impl Scalar for String {
    #[inline]
    fn to_scalar(&self) -> DocValue {
        DocValue::String(self.clone())
    }

    fn assign_scalar(&mut self, value: &DocValue) -> Result<(), ScalarError> {
        *self = coerce_string(value, "String")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::{Scalar, ScalarError};
    use alloc::string::String;
    use yc_doc::DocValue;

    #[test]
    fn failed_assign_keeps_value() {
        let mut port = 8080_u16;
        assert!(port.assign_scalar(&DocValue::from("abc")).is_err());
        assert_eq!(port, 8080);
        port.assign_scalar(&DocValue::from("25565")).unwrap();
        assert_eq!(port, 25565);
    }

    #[test]
    fn f32_out_of_range_is_rejected() {
        let mut ratio = 0.5_f32;
        assert!(matches!(
            ratio.assign_scalar(&DocValue::Float(1e300)),
            Err(ScalarError::OutOfRange { expected: "f32", .. })
        ));
        assert_eq!(ratio, 0.5);

        ratio.assign_scalar(&DocValue::Float(f64::INFINITY)).unwrap();
        assert_eq!(ratio, f32::INFINITY);
        ratio.assign_scalar(&DocValue::Float(0.1)).unwrap();
        assert_eq!(ratio, 0.1);
        assert_eq!(ratio.to_scalar(), DocValue::Float(0.1));
    }

    #[test]
    fn string_accepts_numbers() {
        let mut name = String::new();
        name.assign_scalar(&DocValue::Float(1.5)).unwrap();
        assert_eq!(name, "1.5");
    }
}
