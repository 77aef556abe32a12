#![forbid(unsafe_code)]

use crate::bitmap::BitVec;
use crate::dictionary::DictionaryColumn;
use crate::error::ColumnError;
use crate::types::{DataType, NativeType, Value};
use std::sync::Arc;

/// Drop an all-valid mask and check the length of anything else.
pub(crate) fn normalize_validity(
    validity: Option<BitVec>,
    len: usize,
) -> Result<Option<BitVec>, ColumnError> {
    match validity {
        Some(mask) if mask.len() != len => Err(ColumnError::ValidityLength {
            expected: len,
            actual: mask.len(),
        }),
        Some(mask) if mask.all_true() => Ok(None),
        other => Ok(other),
    }
}

pub(crate) fn is_valid_at(validity: Option<&BitVec>, row: usize) -> bool {
    validity.map_or(true, |mask| mask.get(row))
}

fn null_count_of(validity: Option<&BitVec>) -> usize {
    validity.map_or(0, BitVec::count_zeros)
}

/// Fixed-width numeric values plus an optional validity mask (`None` means every row is valid).
///
/// Null rows still occupy a slot in `values`; its content is unspecified.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveColumn<T> {
    values: Vec<T>,
    validity: Option<BitVec>,
}

impl<T: NativeType> PrimitiveColumn<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            validity: None,
        }
    }

    pub fn try_new(values: Vec<T>, validity: Option<BitVec>) -> Result<Self, ColumnError> {
        let validity = normalize_validity(validity, values.len())?;
        Ok(Self { values, validity })
    }

    pub fn from_options<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut values = Vec::with_capacity(iter.size_hint().0);
        let mut validity = BitVec::with_capacity_bits(iter.size_hint().0);
        for value in iter {
            validity.push(value.is_some());
            values.push(value.unwrap_or_default());
        }
        let validity = if validity.all_true() {
            None
        } else {
            Some(validity)
        };
        Self { values, validity }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_valid(&self, row: usize) -> bool {
        is_valid_at(self.validity.as_ref(), row)
    }

    /// Raw slot value, ignoring validity.
    pub fn value(&self, row: usize) -> T {
        self.values[row]
    }

    pub fn get(&self, row: usize) -> Option<T> {
        if row < self.len() && self.is_valid(row) {
            Some(self.values[row])
        } else {
            None
        }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn validity(&self) -> Option<&BitVec> {
        self.validity.as_ref()
    }

    pub fn null_count(&self) -> usize {
        null_count_of(self.validity.as_ref())
    }

    fn take(&self, rows: &[Option<usize>]) -> Self {
        Self::from_options(rows.iter().map(|row| row.and_then(|r| self.get(r))))
    }
}

/// Boolean values packed into a [`BitVec`].
#[derive(Clone, Debug, PartialEq)]
pub struct BoolColumn {
    values: BitVec,
    validity: Option<BitVec>,
}

impl BoolColumn {
    /// A non-nullable column taking ownership of `values`.
    pub fn new(values: BitVec) -> Self {
        Self {
            values,
            validity: None,
        }
    }

    pub fn try_new(values: BitVec, validity: Option<BitVec>) -> Result<Self, ColumnError> {
        let validity = normalize_validity(validity, values.len())?;
        Ok(Self { values, validity })
    }

    pub fn from_options<I: IntoIterator<Item = Option<bool>>>(iter: I) -> Self {
        let mut values = BitVec::new();
        let mut validity = BitVec::new();
        for value in iter {
            validity.push(value.is_some());
            values.push(value.unwrap_or(false));
        }
        let validity = if validity.all_true() {
            None
        } else {
            Some(validity)
        };
        Self { values, validity }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_valid(&self, row: usize) -> bool {
        is_valid_at(self.validity.as_ref(), row)
    }

    pub fn value(&self, row: usize) -> bool {
        self.values.get(row)
    }

    pub fn get(&self, row: usize) -> Option<bool> {
        if row < self.len() && self.is_valid(row) {
            Some(self.values.get(row))
        } else {
            None
        }
    }

    pub fn values(&self) -> &BitVec {
        &self.values
    }

    pub fn validity(&self) -> Option<&BitVec> {
        self.validity.as_ref()
    }

    pub fn null_count(&self) -> usize {
        null_count_of(self.validity.as_ref())
    }

    fn take(&self, rows: &[Option<usize>]) -> Self {
        Self::from_options(rows.iter().map(|row| row.and_then(|r| self.get(r))))
    }
}

/// Variable-length UTF-8 values: `offsets` has `len + 1` entries delimiting each row in `data`.
///
/// Null rows are stored as empty slices.
#[derive(Clone, Debug, PartialEq)]
pub struct StringColumn {
    offsets: Vec<usize>,
    data: String,
    validity: Option<BitVec>,
}

impl StringColumn {
    pub fn from_options<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let iter = iter.into_iter();
        let mut offsets = Vec::with_capacity(iter.size_hint().0 + 1);
        let mut data = String::new();
        let mut validity = BitVec::with_capacity_bits(iter.size_hint().0);
        offsets.push(0);
        for value in iter {
            validity.push(value.is_some());
            if let Some(s) = value {
                data.push_str(s.as_ref());
            }
            offsets.push(data.len());
        }
        let validity = if validity.all_true() {
            None
        } else {
            Some(validity)
        };
        Self {
            offsets,
            data,
            validity,
        }
    }

    pub fn from_values<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_options(iter.into_iter().map(Some))
    }

    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_valid(&self, row: usize) -> bool {
        is_valid_at(self.validity.as_ref(), row)
    }

    /// Raw slot value, ignoring validity (`""` for null rows).
    pub fn value(&self, row: usize) -> &str {
        &self.data[self.offsets[row]..self.offsets[row + 1]]
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        if row < self.len() && self.is_valid(row) {
            Some(self.value(row))
        } else {
            None
        }
    }

    pub fn validity(&self) -> Option<&BitVec> {
        self.validity.as_ref()
    }

    pub fn null_count(&self) -> usize {
        null_count_of(self.validity.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..self.len()).map(move |row| self.get(row))
    }

    fn take(&self, rows: &[Option<usize>]) -> Self {
        Self::from_options(rows.iter().map(|row| row.and_then(|r| self.get(r))))
    }
}

/// A column of a single logical [`DataType`].
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Bool(BoolColumn),
    Int8(PrimitiveColumn<i8>),
    Int16(PrimitiveColumn<i16>),
    Int32(PrimitiveColumn<i32>),
    Int64(PrimitiveColumn<i64>),
    UInt8(PrimitiveColumn<u8>),
    UInt16(PrimitiveColumn<u16>),
    UInt32(PrimitiveColumn<u32>),
    UInt64(PrimitiveColumn<u64>),
    Float32(PrimitiveColumn<f32>),
    Float64(PrimitiveColumn<f64>),
    Utf8(StringColumn),
    Dictionary(DictionaryColumn),
}

/// Forward a call to whichever container backs the column.
macro_rules! with_container {
    ($column:expr, $c:ident => $body:expr) => {
        match $column {
            Column::Bool($c) => $body,
            Column::Int8($c) => $body,
            Column::Int16($c) => $body,
            Column::Int32($c) => $body,
            Column::Int64($c) => $body,
            Column::UInt8($c) => $body,
            Column::UInt16($c) => $body,
            Column::UInt32($c) => $body,
            Column::UInt64($c) => $body,
            Column::Float32($c) => $body,
            Column::Float64($c) => $body,
            Column::Utf8($c) => $body,
            Column::Dictionary($c) => $body,
        }
    };
}

impl Column {
    pub fn from_values<T: NativeType>(values: Vec<T>) -> Self {
        T::into_column(PrimitiveColumn::new(values))
    }

    pub fn from_options<T: NativeType, I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        T::into_column(PrimitiveColumn::from_options(iter))
    }

    pub fn bools<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Column::Bool(BoolColumn::new(iter.into_iter().collect()))
    }

    pub fn bool_options<I: IntoIterator<Item = Option<bool>>>(iter: I) -> Self {
        Column::Bool(BoolColumn::from_options(iter))
    }

    pub fn utf8<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Column::Utf8(StringColumn::from_values(iter))
    }

    pub fn utf8_options<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        Column::Utf8(StringColumn::from_options(iter))
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Column::Bool(_) => DataType::Bool,
            Column::Int8(_) => DataType::Int8,
            Column::Int16(_) => DataType::Int16,
            Column::Int32(_) => DataType::Int32,
            Column::Int64(_) => DataType::Int64,
            Column::UInt8(_) => DataType::UInt8,
            Column::UInt16(_) => DataType::UInt16,
            Column::UInt32(_) => DataType::UInt32,
            Column::UInt64(_) => DataType::UInt64,
            Column::Float32(_) => DataType::Float32,
            Column::Float64(_) => DataType::Float64,
            Column::Utf8(_) => DataType::Utf8,
            Column::Dictionary(c) => DataType::Dictionary(Box::new(c.keys().data_type())),
        }
    }

    pub fn len(&self) -> usize {
        with_container!(self, c => c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_valid(&self, row: usize) -> bool {
        with_container!(self, c => c.is_valid(row))
    }

    pub fn null_count(&self) -> usize {
        with_container!(self, c => c.null_count())
    }

    pub fn validity(&self) -> Option<&BitVec> {
        with_container!(self, c => c.validity())
    }

    /// Logical value at `row`; dictionary columns resolve through their keys.
    ///
    /// Out-of-range rows read as [`Value::Null`].
    pub fn get(&self, row: usize) -> Value {
        match self {
            Column::Bool(c) => c.get(row).map(Value::Bool).unwrap_or(Value::Null),
            Column::Int8(c) => primitive_value(c, row),
            Column::Int16(c) => primitive_value(c, row),
            Column::Int32(c) => primitive_value(c, row),
            Column::Int64(c) => primitive_value(c, row),
            Column::UInt8(c) => primitive_value(c, row),
            Column::UInt16(c) => primitive_value(c, row),
            Column::UInt32(c) => primitive_value(c, row),
            Column::UInt64(c) => primitive_value(c, row),
            Column::Float32(c) => primitive_value(c, row),
            Column::Float64(c) => primitive_value(c, row),
            Column::Utf8(c) => c
                .get(row)
                .map(|s| Value::String(Arc::<str>::from(s)))
                .unwrap_or(Value::Null),
            Column::Dictionary(c) => c
                .get_index(row)
                .map(|idx| c.keys().get(idx as usize))
                .unwrap_or(Value::Null),
        }
    }

    pub fn as_primitive<T: NativeType>(&self) -> Option<&PrimitiveColumn<T>> {
        T::primitive(self)
    }

    pub fn as_bool(&self) -> Option<&BoolColumn> {
        match self {
            Column::Bool(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_utf8(&self) -> Option<&StringColumn> {
        match self {
            Column::Utf8(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&DictionaryColumn> {
        match self {
            Column::Dictionary(c) => Some(c),
            _ => None,
        }
    }

    /// Gather rows into a new plain column. `None` (or a null source row) yields a null row.
    ///
    /// Dictionary columns are decoded while gathering.
    pub fn take(&self, rows: &[Option<usize>]) -> Column {
        match self {
            Column::Bool(c) => Column::Bool(c.take(rows)),
            Column::Int8(c) => Column::Int8(c.take(rows)),
            Column::Int16(c) => Column::Int16(c.take(rows)),
            Column::Int32(c) => Column::Int32(c.take(rows)),
            Column::Int64(c) => Column::Int64(c.take(rows)),
            Column::UInt8(c) => Column::UInt8(c.take(rows)),
            Column::UInt16(c) => Column::UInt16(c.take(rows)),
            Column::UInt32(c) => Column::UInt32(c.take(rows)),
            Column::UInt64(c) => Column::UInt64(c.take(rows)),
            Column::Float32(c) => Column::Float32(c.take(rows)),
            Column::Float64(c) => Column::Float64(c.take(rows)),
            Column::Utf8(c) => Column::Utf8(c.take(rows)),
            Column::Dictionary(c) => {
                let key_rows: Vec<Option<usize>> = rows
                    .iter()
                    .map(|row| row.and_then(|r| c.get_index(r)).map(|idx| idx as usize))
                    .collect();
                c.keys().take(&key_rows)
            }
        }
    }
}

fn primitive_value<T: NativeType>(column: &PrimitiveColumn<T>, row: usize) -> Value {
    column.get(row).map(T::into_value).unwrap_or(Value::Null)
}
