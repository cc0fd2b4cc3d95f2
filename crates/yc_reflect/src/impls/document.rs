use yc_doc::DocValue;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, Typed};
use crate::reflection::impl_reflect_cast_fn;

// A `DocValue` field holds an arbitrary subtree, copied in and out verbatim.
impl Typed for DocValue {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Document(OpaqueInfo::new::<Self>().with_default::<Self>()))
    }
}

impl Reflect for DocValue {
    impl_reflect_cast_fn!(Document);
}
