#![forbid(unsafe_code)]

use crate::column::{Column, PrimitiveColumn};
use std::fmt;
use std::sync::Arc;

/// Logical type of a column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Utf8,
    /// `u32` indices into a keys column of the inner type.
    Dictionary(Box<DataType>),
}

impl DataType {
    /// The type values are compared as: the keys' type for dictionary columns, the type itself
    /// otherwise.
    pub fn comparable(&self) -> &DataType {
        match self {
            DataType::Dictionary(keys) => keys.comparable(),
            other => other,
        }
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, DataType::Dictionary(_))
    }

    pub fn is_fixed_width(&self) -> bool {
        !matches!(self, DataType::Utf8 | DataType::Dictionary(_))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Bool => "bool",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::UInt8 => "uint8",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::UInt64 => "uint64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Utf8 => "utf8",
            DataType::Dictionary(keys) => return write!(f, "dictionary<{keys}>"),
        };
        f.write_str(name)
    }
}

/// An owned scalar read out of a column.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(Arc<str>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width numeric element types that can back a [`PrimitiveColumn`].
pub trait NativeType:
    Copy + fmt::Debug + Default + PartialEq + Send + Sync + 'static + sealed::Sealed
{
    const DATA_TYPE: DataType;

    /// Raw bit pattern, zero-extended to 64 bits.
    fn to_bits_u64(self) -> u64;

    fn into_value(self) -> Value;

    fn primitive(column: &Column) -> Option<&PrimitiveColumn<Self>>;

    fn into_column(column: PrimitiveColumn<Self>) -> Column;
}

macro_rules! native_int {
    ($ty:ty, $unsigned:ty, $variant:ident, $value:ident) => {
        impl sealed::Sealed for $ty {}

        impl NativeType for $ty {
            const DATA_TYPE: DataType = DataType::$variant;

            fn to_bits_u64(self) -> u64 {
                self as $unsigned as u64
            }

            fn into_value(self) -> Value {
                Value::$value(self.into())
            }

            fn primitive(column: &Column) -> Option<&PrimitiveColumn<Self>> {
                match column {
                    Column::$variant(c) => Some(c),
                    _ => None,
                }
            }

            fn into_column(column: PrimitiveColumn<Self>) -> Column {
                Column::$variant(column)
            }
        }
    };
}

native_int!(i8, u8, Int8, Int);
native_int!(i16, u16, Int16, Int);
native_int!(i32, u32, Int32, Int);
native_int!(i64, u64, Int64, Int);
native_int!(u8, u8, UInt8, UInt);
native_int!(u16, u16, UInt16, UInt);
native_int!(u32, u32, UInt32, UInt);
native_int!(u64, u64, UInt64, UInt);

macro_rules! native_float {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl NativeType for $ty {
            const DATA_TYPE: DataType = DataType::$variant;

            fn to_bits_u64(self) -> u64 {
                self.to_bits() as u64
            }

            fn into_value(self) -> Value {
                Value::Float(self.into())
            }

            fn primitive(column: &Column) -> Option<&PrimitiveColumn<Self>> {
                match column {
                    Column::$variant(c) => Some(c),
                    _ => None,
                }
            }

            fn into_column(column: PrimitiveColumn<Self>) -> Column {
                Column::$variant(column)
            }
        }
    };
}

native_float!(f32, Float32);
native_float!(f64, Float64);
