use formula_columnar::DataType;

pub type OneHotResult<T> = Result<T, OneHotError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OneHotError {
    /// The input and category columns do not resolve to the same comparable type (dictionary
    /// columns compare by their keys' type).
    #[error("type mismatch: input column is {input}, categories column is {categories}")]
    TypeMismatch {
        input: DataType,
        categories: DataType,
    },
}
