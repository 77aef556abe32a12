#![forbid(unsafe_code)]

use crate::bitmap::BitVec;
use crate::column::{is_valid_at, normalize_validity, Column};
use crate::error::ColumnError;
use crate::types::NativeType;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// A dictionary-encoded column: per-row `u32` indices into a shared keys column.
///
/// The logical value of a valid row is `keys[indices[row]]`. Keys are always a plain (non
/// dictionary) column and may be shared between several dictionary columns.
#[derive(Clone, Debug, PartialEq)]
pub struct DictionaryColumn {
    indices: Vec<u32>,
    validity: Option<BitVec>,
    keys: Arc<Column>,
}

impl DictionaryColumn {
    pub fn try_new(
        indices: Vec<u32>,
        validity: Option<BitVec>,
        keys: Arc<Column>,
    ) -> Result<Self, ColumnError> {
        if keys.data_type().is_dictionary() {
            return Err(ColumnError::NestedDictionary(keys.data_type()));
        }
        let validity = normalize_validity(validity, indices.len())?;

        let key_count = keys.len();
        for (row, &index) in indices.iter().enumerate() {
            if is_valid_at(validity.as_ref(), row) && index as usize >= key_count {
                return Err(ColumnError::DictionaryIndexOutOfRange {
                    row,
                    index,
                    keys: key_count,
                });
            }
        }

        Ok(Self {
            indices,
            validity,
            keys,
        })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_valid(&self, row: usize) -> bool {
        is_valid_at(self.validity.as_ref(), row)
    }

    pub fn null_count(&self) -> usize {
        self.validity.as_ref().map_or(0, BitVec::count_zeros)
    }

    pub fn validity(&self) -> Option<&BitVec> {
        self.validity.as_ref()
    }

    /// Raw index slot, ignoring validity.
    pub fn index(&self, row: usize) -> u32 {
        self.indices[row]
    }

    pub fn get_index(&self, row: usize) -> Option<u32> {
        if row < self.len() && self.is_valid(row) {
            Some(self.indices[row])
        } else {
            None
        }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn keys(&self) -> &Column {
        &self.keys
    }

    pub fn shared_keys(&self) -> Arc<Column> {
        Arc::clone(&self.keys)
    }
}

/// Assign each distinct non-null key an index in first-occurrence order.
///
/// Returns the per-row indices, the validity mask and the first row holding each key.
fn encode_rows<K, F>(
    len: usize,
    mut key_at: F,
) -> Result<(Vec<u32>, BitVec, Vec<usize>), ColumnError>
where
    K: Eq + Hash,
    F: FnMut(usize) -> Option<K>,
{
    let mut lookup: HashMap<K, u32> = HashMap::new();
    let mut indices = Vec::with_capacity(len);
    let mut validity = BitVec::with_capacity_bits(len);
    let mut first_rows = Vec::new();

    for row in 0..len {
        let Some(key) = key_at(row) else {
            indices.push(0);
            validity.push(false);
            continue;
        };

        let next = u32::try_from(first_rows.len()).map_err(|_| ColumnError::DictionaryOverflow)?;
        let index = *lookup.entry(key).or_insert_with(|| {
            first_rows.push(row);
            next
        });
        indices.push(index);
        validity.push(true);
    }

    Ok((indices, validity, first_rows))
}

fn encode_primitive<T: NativeType>(
    column: &crate::column::PrimitiveColumn<T>,
) -> Result<(Vec<u32>, BitVec, Vec<usize>), ColumnError> {
    // Bit patterns, so NaN payloads and signed zeros stay distinct keys.
    encode_rows(column.len(), |row| column.get(row).map(T::to_bits_u64))
}

impl Column {
    /// Dictionary-encode a plain column.
    ///
    /// Keys are the distinct non-null values in first-occurrence order; floats are deduplicated
    /// by bit pattern. Null rows stay null. An already encoded column is returned as-is.
    pub fn dictionary_encode(&self) -> Result<Column, ColumnError> {
        let (indices, validity, first_rows) = match self {
            Column::Dictionary(_) => return Ok(self.clone()),
            Column::Bool(c) => encode_rows(c.len(), |row| c.get(row))?,
            Column::Int8(c) => encode_primitive(c)?,
            Column::Int16(c) => encode_primitive(c)?,
            Column::Int32(c) => encode_primitive(c)?,
            Column::Int64(c) => encode_primitive(c)?,
            Column::UInt8(c) => encode_primitive(c)?,
            Column::UInt16(c) => encode_primitive(c)?,
            Column::UInt32(c) => encode_primitive(c)?,
            Column::UInt64(c) => encode_primitive(c)?,
            Column::Float32(c) => encode_primitive(c)?,
            Column::Float64(c) => encode_primitive(c)?,
            Column::Utf8(c) => encode_rows(c.len(), |row| c.get(row))?,
        };

        let key_rows: Vec<Option<usize>> = first_rows.into_iter().map(Some).collect();
        let keys = Arc::new(self.take(&key_rows));
        Ok(Column::Dictionary(DictionaryColumn::try_new(
            indices,
            Some(validity),
            keys,
        )?))
    }

    /// Materialize a dictionary column into its plain equivalent. Plain columns are cloned.
    pub fn decode(&self) -> Column {
        match self {
            Column::Dictionary(_) => {
                let rows: Vec<Option<usize>> = (0..self.len()).map(Some).collect();
                self.take(&rows)
            }
            other => other.clone(),
        }
    }
}
