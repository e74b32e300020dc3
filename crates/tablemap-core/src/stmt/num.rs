use super::Value;
use crate::{Error, Result};

macro_rules! impl_num {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::I64(i64::from(value))
                }
            }

            impl From<&$ty> for Value {
                fn from(value: &$ty) -> Self {
                    Self::I64(i64::from(*value))
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    match value {
                        Value::I64(v) => v
                            .try_into()
                            .map_err(|_| Error::type_conversion(value, stringify!($ty))),
                        _ => Err(Error::type_conversion(value, stringify!($ty))),
                    }
                }
            }
        )*
    };
}

impl_num!(i8, i16, i32, i64, u8, u16, u32);
