#![forbid(unsafe_code)]

use crate::types::DataType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    #[error("validity mask has {actual} bits, expected {expected}")]
    ValidityLength { expected: usize, actual: usize },

    #[error("dictionary index {index} at row {row} is out of range for {keys} keys")]
    DictionaryIndexOutOfRange { row: usize, index: u32, keys: usize },

    #[error("dictionary keys must be a plain column, got {0}")]
    NestedDictionary(DataType),

    #[error("column {column} has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: usize,
        expected: usize,
        actual: usize,
    },

    #[error("dictionary has more than u32::MAX distinct keys")]
    DictionaryOverflow,
}
