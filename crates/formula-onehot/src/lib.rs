//! Categorical one-hot encoding over `formula-columnar` columns.
//!
//! [`one_hot_encode`] turns an input column and a column of categories into a table of boolean
//! indicator columns, one per category row. The work is split into:
//! - type dispatch: both columns are resolved to a common comparable type (dictionary columns by
//!   their keys) and a single generic pipeline is instantiated for it
//! - a category key table built once over the category rows
//! - per-row classification of the input against that table
//! - scattering the classification into the indicator columns
//!
//! Classification and scattering are row-independent; with the `parallel` feature they run on a
//! crate-local Rayon pool for large inputs.

#![forbid(unsafe_code)]

mod category;
mod classify;
mod dispatch;
pub mod equality;
mod error;
mod indicator;
mod options;
mod parallel;

pub use crate::category::CategoryKeyTable;
pub use crate::classify::{classify, Classification};
pub use crate::dispatch::{one_hot_encode, one_hot_encode_with_options};
pub use crate::equality::{BitEq, CategoryKey, KeySource};
pub use crate::error::{OneHotError, OneHotResult};
pub use crate::indicator::build_indicator_table;
pub use crate::options::EncodeOptions;
