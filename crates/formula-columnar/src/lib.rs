//! Columnar value model for Formula.
//!
//! This crate focuses on:
//! - Typed column containers (fixed-width numerics, booleans, UTF-8 text) with out-of-band
//!   validity masks.
//! - Dictionary-encoded columns (per-row indices into a shared keys column) and conversions to
//!   and from plain columns.
//! - Tables assembled from owned columns without copying.

#![forbid(unsafe_code)]

mod bitmap;
mod column;
mod dictionary;
mod error;
mod table;
mod types;

pub use crate::bitmap::{BitVec, IterOnes};
pub use crate::column::{BoolColumn, Column, PrimitiveColumn, StringColumn};
pub use crate::dictionary::DictionaryColumn;
pub use crate::error::ColumnError;
pub use crate::table::Table;
pub use crate::types::{DataType, NativeType, Value};
